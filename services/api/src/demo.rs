use crate::infra::{
    parse_score, InMemoryAssessmentRepository, InMemoryChangeRequestRepository,
    InMemoryEmployeeStore, InMemoryLearningPathRepository,
};
use chrono::{Datelike, Local};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use talent_matrix::config::{ScoringConfig, DEFAULT_WEIGHT_TOLERANCE};
use talent_matrix::error::AppError;
use talent_matrix::workflows::assessment::{
    read_indicators, AssessmentBlueprint, AssessmentService, AssessmentSnapshot, EmployeeId,
    ScoringEngine,
};
use talent_matrix::workflows::change_requests::{
    Certification, ChangePayload, ChangeRequestService, EmployeeRecordStore, ReviewDecision,
};
use talent_matrix::workflows::learning_paths::{
    LearningPathService, LearningPathView, ModuleStatus, ModuleUpdate,
};

#[derive(Args, Debug, Default)]
pub(crate) struct AssessArgs {
    /// CSV with axis,component,component_weight,indicator,indicator_weight,raw_score rows.
    #[arg(long, conflicts_with = "score")]
    pub(crate) csv: Option<PathBuf>,
    /// Raw score for a standard indicator as KEY=SCORE; unset keys use sample scores.
    #[arg(long = "score", value_parser = parse_score)]
    pub(crate) score: Vec<(String, f64)>,
    /// Accepted distance of weight sums from 100 before a warning is reported.
    #[arg(long, default_value_t = DEFAULT_WEIGHT_TOLERANCE)]
    pub(crate) tolerance: f64,
    /// Print the full snapshot as JSON instead of a summary.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Assessment year (defaults to the current year).
    #[arg(long)]
    pub(crate) year: Option<i32>,
    /// Skip the change-request portion of the demo.
    #[arg(long)]
    pub(crate) skip_change_requests: bool,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        csv,
        score,
        tolerance,
        json,
    } = args;

    let indicators = match csv {
        Some(path) => read_indicators(path)?,
        None => {
            let mut scores = AssessmentBlueprint::sample_scores();
            scores.extend(score);
            AssessmentBlueprint::standard().fill(&scores)?
        }
    };

    // out-of-range tolerance uses the default
    let config = ScoringConfig::with_tolerance(tolerance).unwrap_or_default();
    let snapshot = ScoringEngine::new(config).score(&indicators)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        render_snapshot(&snapshot);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        year,
        skip_change_requests,
    } = args;
    let year = year.unwrap_or_else(|| Local::now().year());

    println!("Talent matrix demo ({year})");
    let assessment_store = Arc::new(InMemoryAssessmentRepository::default());
    let assessments = AssessmentService::new(assessment_store.clone(), ScoringEngine::default());
    let learning_paths = LearningPathService::new(
        Arc::new(InMemoryLearningPathRepository::default()),
        assessment_store,
    );
    let employees = Arc::new(InMemoryEmployeeStore::seeded());

    let variants: [&[(&str, f64)]; 2] = [
        &[],
        &[
            ("penilaian_kinerja", 92.0),
            ("penghargaan", 85.0),
            ("penugasan_tim", 88.0),
            ("penilaian_kompetensi", 90.0),
            ("penilaian_potensi", 86.0),
        ],
    ];

    let mut last_assessment = None;
    for (employee_id, overrides) in employees.employee_ids().into_iter().zip(variants) {
        let mut scores = AssessmentBlueprint::sample_scores();
        scores.extend(overrides.iter().map(|(key, value)| (key.to_string(), *value)));

        let record = match assessments.generate_standard(employee_id.clone(), year, &scores) {
            Ok(record) => record,
            Err(err) => {
                println!("- {}: assessment rejected: {}", employee_id.0, err);
                continue;
            }
        };
        let view = record.summary_view();
        println!(
            "- {} -> box {} ({}) | kinerja {:.2} | potensial {:.2}",
            view.employee_id.0,
            view.box_number,
            view.box_title,
            view.total_performance,
            view.total_potential
        );
        last_assessment = Some(record);
    }

    if let Some(assessment) = last_assessment {
        println!("\nRecommendations for {}", assessment.employee_id.0);
        for recommendation in &assessment.snapshot.recommendations {
            println!("  - {recommendation}");
        }

        match learning_paths.seed_from_assessment(&assessment.id) {
            Ok(record) => {
                let completed = ModuleUpdate {
                    status: Some(ModuleStatus::Completed),
                    notes: Some("Selesai pada batch pertama".to_string()),
                    ..ModuleUpdate::default()
                };
                if let Some(first) = record.path.modules.first() {
                    let updated = learning_paths.update_module(&record.id, &first.id, &completed);
                    if let Err(err) = updated {
                        println!("  Learning path update failed: {err}");
                    }
                }
                match learning_paths.get(&record.id) {
                    Ok(record) => render_learning_path(&LearningPathView::from(record)),
                    Err(err) => println!("  Learning path unavailable: {err}"),
                }
            }
            Err(err) => println!("  Learning path not created: {err}"),
        }
    }

    if skip_change_requests {
        return Ok(());
    }

    println!("\nChange request review");
    let change_requests = ChangeRequestService::new(
        Arc::new(InMemoryChangeRequestRepository::default()),
        employees.clone(),
    );
    let employee_id = EmployeeId("emp-001".to_string());
    let payload = ChangePayload::Certification(Certification {
        id: None,
        name: "Certified Ethical Hacker (CEH)".to_string(),
        issuer: "EC-Council".to_string(),
        issue_date: chrono::NaiveDate::from_ymd_opt(2019, 3, 20),
        credential: Some("CEH-789012".to_string()),
    });

    let request = match change_requests.submit(
        employee_id.clone(),
        payload,
        None,
        Some("Sertifikat belum tercatat".to_string()),
    ) {
        Ok(request) => request,
        Err(err) => {
            println!("  Submission rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "- Submitted {} ({}) -> {:?}",
        request.id.0,
        request.kind().label(),
        request.status
    );

    match change_requests.review(
        &request.id,
        ReviewDecision::Approved,
        Some("Dokumen lengkap".to_string()),
        "Admin OSDM",
    ) {
        Ok(reviewed) => println!(
            "- Reviewed by {} -> {:?}",
            reviewed.reviewed_by.as_deref().unwrap_or("-"),
            reviewed.status
        ),
        Err(err) => println!("  Review failed: {err}"),
    }

    if let Ok(Some(record)) = employees.fetch(&employee_id) {
        println!("  Certifications on record for {}:", record.profile.full_name);
        for certification in &record.certifications {
            println!(
                "    - {} ({})",
                certification.name,
                certification.id.as_deref().unwrap_or("-")
            );
        }
    }

    Ok(())
}

fn render_learning_path(view: &LearningPathView) {
    let path = &view.record.path;
    println!("\n{} ({}% complete)", path.title, view.progress_pct);
    for module in &path.modules {
        println!("  [{}] {}", module.status.label(), module.title);
    }
}

fn render_snapshot(snapshot: &AssessmentSnapshot) {
    let classification = &snapshot.classification;
    println!(
        "Kinerja {:.2} ({}) | Potensial {:.2} ({}) | Total {:.2}",
        snapshot.totals.performance,
        classification.performance_band.label(),
        snapshot.totals.potential,
        classification.potential_band.label(),
        snapshot.totals.overall
    );
    println!("{}", snapshot.description.title);
    println!("Rekomendasi:");
    for recommendation in &snapshot.recommendations {
        println!("  - {recommendation}");
    }
    println!("Learning modules:");
    for module in &snapshot.learning_modules {
        println!("  - {module}");
    }
    if !snapshot.warnings.is_empty() {
        println!("Weight warnings:");
        for warning in &snapshot.warnings {
            println!("  - {}", warning.summary());
        }
    }
}
