use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use talent_matrix::workflows::assessment::{
    AssessmentId, AssessmentQuery, AssessmentRecord, AssessmentRepository, AssessmentService,
    EmployeeId, RepositoryError, ScoringEngine,
};
use talent_matrix::workflows::change_requests::{
    AppliedChange, Assignment, Certification, ChangePayload, ChangeRequest, ChangeRequestId,
    ChangeRequestKind, ChangeRequestQuery, ChangeRequestRepository, ChangeRequestService,
    ChangeRequestStatus, EducationRecord, EmployeeProfile, EmployeeRecord, EmployeeRecordStore,
    PositionRecord, RecordStoreError,
};
use talent_matrix::workflows::competencies::{
    Competency, CompetencyCategory, CompetencyId, CompetencyRepository, CompetencyService,
    JobPosition, JobPositionId, JobPositionRepository, Priority, RequiredCompetency,
};
use talent_matrix::workflows::employees::EmployeeService;
use talent_matrix::workflows::learning_paths::{
    LearningPathId, LearningPathQuery, LearningPathRecord, LearningPathRepository,
    LearningPathService,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Every workflow service over the in-memory stores, sharing the assessment and employee data.
pub(crate) struct TalentServices {
    pub(crate) assessments: Arc<AssessmentService<InMemoryAssessmentRepository>>,
    pub(crate) change_requests:
        Arc<ChangeRequestService<InMemoryChangeRequestRepository, InMemoryEmployeeStore>>,
    pub(crate) learning_paths:
        Arc<LearningPathService<InMemoryLearningPathRepository, InMemoryAssessmentRepository>>,
    pub(crate) employees: Arc<EmployeeService<InMemoryEmployeeStore>>,
    pub(crate) competencies:
        Arc<CompetencyService<InMemoryCompetencyRepository, InMemoryJobPositionRepository>>,
}

impl TalentServices {
    pub(crate) fn in_memory(engine: ScoringEngine) -> Self {
        let assessment_store = Arc::new(InMemoryAssessmentRepository::default());
        let employee_store = Arc::new(InMemoryEmployeeStore::seeded());
        let (competency_store, position_store) = seeded_catalogue();

        Self {
            assessments: Arc::new(AssessmentService::new(assessment_store.clone(), engine)),
            change_requests: Arc::new(ChangeRequestService::new(
                Arc::new(InMemoryChangeRequestRepository::default()),
                employee_store.clone(),
            )),
            learning_paths: Arc::new(LearningPathService::new(
                Arc::new(InMemoryLearningPathRepository::default()),
                assessment_store,
            )),
            employees: Arc::new(EmployeeService::new(employee_store)),
            competencies: Arc::new(CompetencyService::new(
                Arc::new(competency_store),
                Arc::new(position_store),
            )),
        }
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let duplicate = guard.values().any(|existing| {
            existing.same_period(&record.employee_id, record.year, &record.period)
        });
        if duplicate || guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, query: &AssessmentQuery) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard
            .values()
            .filter(|record| query.matches(record))
            .cloned()
            .collect();
        // ids are sequential, so they break ties between records created in the same instant
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.0.cmp(&a.id.0))
        });
        Ok(records)
    }

    fn delete(&self, id: &AssessmentId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryChangeRequestRepository {
    requests: Arc<Mutex<Vec<ChangeRequest>>>,
}

impl ChangeRequestRepository for InMemoryChangeRequestRepository {
    fn insert(&self, request: ChangeRequest) -> Result<ChangeRequest, RepositoryError> {
        let mut guard = self.requests.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == request.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(request.clone());
        Ok(request)
    }

    fn transition(
        &self,
        expected: ChangeRequestStatus,
        request: ChangeRequest,
    ) -> Result<ChangeRequest, RepositoryError> {
        let mut guard = self.requests.lock().expect("repository mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == request.id)
            .ok_or(RepositoryError::NotFound)?;
        if slot.status != expected {
            return Err(RepositoryError::Conflict);
        }
        *slot = request.clone();
        Ok(request)
    }

    fn fetch(&self, id: &ChangeRequestId) -> Result<Option<ChangeRequest>, RepositoryError> {
        let guard = self.requests.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|request| request.id == *id).cloned())
    }

    fn list(&self, query: &ChangeRequestQuery) -> Result<Vec<ChangeRequest>, RepositoryError> {
        let guard = self.requests.lock().expect("repository mutex poisoned");
        // insertion order is submission order
        Ok(guard
            .iter()
            .rev()
            .filter(|request| query.matches(request))
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEmployeeStore {
    records: Arc<Mutex<HashMap<EmployeeId, EmployeeRecord>>>,
    next_entry: Arc<Mutex<u64>>,
}

impl InMemoryEmployeeStore {
    pub(crate) fn seeded() -> Self {
        let store = Self::default();
        {
            let mut guard = store.records.lock().expect("employee mutex poisoned");
            for record in seed_employees() {
                guard.insert(record.employee_id.clone(), record);
            }
        }
        store
    }

    pub(crate) fn employee_ids(&self) -> Vec<EmployeeId> {
        let guard = self.records.lock().expect("employee mutex poisoned");
        let mut ids: Vec<_> = guard.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn allocate_id(&self, kind: ChangeRequestKind) -> String {
        let mut next = self.next_entry.lock().expect("sequence mutex poisoned");
        *next += 1;
        let prefix = match kind {
            ChangeRequestKind::Profile => "profile",
            ChangeRequestKind::Certification => "cert",
            ChangeRequestKind::Assignment => "assign",
            ChangeRequestKind::PositionHistory => "pos",
            ChangeRequestKind::Education => "edu",
        };
        format!("{prefix}-new-{next}")
    }
}

impl EmployeeRecordStore for InMemoryEmployeeStore {
    fn fetch(&self, employee_id: &EmployeeId) -> Result<Option<EmployeeRecord>, RecordStoreError> {
        let guard = self.records.lock().expect("employee mutex poisoned");
        Ok(guard.get(employee_id).cloned())
    }

    fn list(&self) -> Result<Vec<EmployeeRecord>, RecordStoreError> {
        let guard = self.records.lock().expect("employee mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn apply(
        &self,
        employee_id: &EmployeeId,
        payload: &ChangePayload,
    ) -> Result<AppliedChange, RecordStoreError> {
        let mut guard = self.records.lock().expect("employee mutex poisoned");
        let record = guard
            .get_mut(employee_id)
            .ok_or_else(|| RecordStoreError::UnknownEmployee(employee_id.0.clone()))?;
        Ok(record.apply(payload, |kind| self.allocate_id(kind))?)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLearningPathRepository {
    records: Arc<Mutex<Vec<LearningPathRecord>>>,
}

impl LearningPathRepository for InMemoryLearningPathRepository {
    fn insert(&self, record: LearningPathRecord) -> Result<LearningPathRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("learning path mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: LearningPathRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("learning path mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == record.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = record;
        Ok(())
    }

    fn fetch(&self, id: &LearningPathId) -> Result<Option<LearningPathRecord>, RepositoryError> {
        let guard = self.records.lock().expect("learning path mutex poisoned");
        Ok(guard.iter().find(|record| record.id == *id).cloned())
    }

    fn list(&self, query: &LearningPathQuery) -> Result<Vec<LearningPathRecord>, RepositoryError> {
        let guard = self.records.lock().expect("learning path mutex poisoned");
        // insertion order is creation order
        Ok(guard
            .iter()
            .rev()
            .filter(|record| query.matches(record))
            .cloned()
            .collect())
    }

    fn delete(&self, id: &LearningPathId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("learning path mutex poisoned");
        let before = guard.len();
        guard.retain(|record| record.id != *id);
        if guard.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCompetencyRepository {
    entries: Arc<Mutex<Vec<Competency>>>,
}

impl CompetencyRepository for InMemoryCompetencyRepository {
    fn insert(&self, competency: Competency) -> Result<Competency, RepositoryError> {
        let mut guard = self.entries.lock().expect("competency mutex poisoned");
        if guard.iter().any(|existing| {
            existing.id == competency.id || existing.same_name(&competency.name)
        }) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(competency.clone());
        Ok(competency)
    }

    fn update(&self, competency: Competency) -> Result<(), RepositoryError> {
        let mut guard = self.entries.lock().expect("competency mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.id != competency.id && existing.same_name(&competency.name))
        {
            return Err(RepositoryError::Conflict);
        }
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == competency.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = competency;
        Ok(())
    }

    fn fetch(&self, id: &CompetencyId) -> Result<Option<Competency>, RepositoryError> {
        let guard = self.entries.lock().expect("competency mutex poisoned");
        Ok(guard.iter().find(|competency| competency.id == *id).cloned())
    }

    fn list(&self) -> Result<Vec<Competency>, RepositoryError> {
        Ok(self.entries.lock().expect("competency mutex poisoned").clone())
    }

    fn delete(&self, id: &CompetencyId) -> Result<(), RepositoryError> {
        let mut guard = self.entries.lock().expect("competency mutex poisoned");
        let before = guard.len();
        guard.retain(|competency| competency.id != *id);
        if guard.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryJobPositionRepository {
    entries: Arc<Mutex<Vec<JobPosition>>>,
}

impl JobPositionRepository for InMemoryJobPositionRepository {
    fn insert(&self, position: JobPosition) -> Result<JobPosition, RepositoryError> {
        let mut guard = self.entries.lock().expect("job position mutex poisoned");
        if guard.iter().any(|existing| existing.id == position.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(position.clone());
        Ok(position)
    }

    fn update(&self, position: JobPosition) -> Result<(), RepositoryError> {
        let mut guard = self.entries.lock().expect("job position mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == position.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = position;
        Ok(())
    }

    fn fetch(&self, id: &JobPositionId) -> Result<Option<JobPosition>, RepositoryError> {
        let guard = self.entries.lock().expect("job position mutex poisoned");
        Ok(guard.iter().find(|position| position.id == *id).cloned())
    }

    fn list(&self) -> Result<Vec<JobPosition>, RepositoryError> {
        Ok(self.entries.lock().expect("job position mutex poisoned").clone())
    }

    fn delete(&self, id: &JobPositionId) -> Result<(), RepositoryError> {
        let mut guard = self.entries.lock().expect("job position mutex poisoned");
        let before = guard.len();
        guard.retain(|position| position.id != *id);
        if guard.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

const SEED_COMPETENCIES: &[(&str, CompetencyCategory, &str)] = &[
    (
        "Keamanan Informasi",
        CompetencyCategory::Technical,
        "Kemampuan dalam mengelola dan mengamankan informasi",
    ),
    (
        "Kriptografi",
        CompetencyCategory::Technical,
        "Pemahaman tentang algoritma dan implementasi kriptografi",
    ),
    ("Network Security", CompetencyCategory::Technical, "Keamanan jaringan dan infrastruktur"),
    ("Incident Response", CompetencyCategory::Technical, "Penanganan insiden keamanan siber"),
    ("Risk Management", CompetencyCategory::Technical, "Manajemen risiko keamanan informasi"),
    ("Penetration Testing", CompetencyCategory::Technical, "Pengujian penetrasi sistem"),
    ("Cloud Security", CompetencyCategory::Technical, "Keamanan komputasi awan"),
    ("Digital Forensics", CompetencyCategory::Technical, "Forensik digital dan investigasi"),
    ("Kepemimpinan", CompetencyCategory::Managerial, "Kemampuan memimpin dan mengarahkan tim"),
    (
        "Perencanaan Strategis",
        CompetencyCategory::Managerial,
        "Kemampuan merencanakan strategi organisasi",
    ),
    ("Manajemen Proyek", CompetencyCategory::Managerial, "Pengelolaan proyek dan program"),
    ("Budgeting", CompetencyCategory::Managerial, "Pengelolaan anggaran"),
    (
        "Pengambilan Keputusan",
        CompetencyCategory::Managerial,
        "Kemampuan mengambil keputusan strategis",
    ),
    ("Komunikasi", CompetencyCategory::Social, "Kemampuan berkomunikasi efektif"),
    ("Kolaborasi", CompetencyCategory::Social, "Kemampuan bekerja sama dalam tim"),
    ("Negosiasi", CompetencyCategory::Social, "Kemampuan bernegosiasi dengan stakeholder"),
    (
        "Public Speaking",
        CompetencyCategory::Social,
        "Kemampuan presentasi dan berbicara di depan umum",
    ),
];

type SeedRequirement = (&'static str, u8, Priority);

const SEED_POSITIONS: &[(&str, &str, &str, &[SeedRequirement])] = &[
    (
        "Kepala Biro Perencanaan dan Keuangan",
        "Biro Perencanaan dan Keuangan",
        "Eselon II",
        &[
            ("Kepemimpinan", 5, Priority::High),
            ("Perencanaan Strategis", 5, Priority::High),
            ("Budgeting", 5, Priority::High),
            ("Manajemen Proyek", 4, Priority::Medium),
            ("Pengambilan Keputusan", 5, Priority::High),
        ],
    ),
    (
        "Direktur Operasi Keamanan Siber",
        "Deputi Bidang Operasi",
        "Eselon III",
        &[
            ("Keamanan Informasi", 5, Priority::High),
            ("Incident Response", 5, Priority::High),
            ("Network Security", 4, Priority::High),
            ("Kepemimpinan", 4, Priority::Medium),
            ("Manajemen Proyek", 4, Priority::Medium),
        ],
    ),
];

fn seeded_catalogue() -> (InMemoryCompetencyRepository, InMemoryJobPositionRepository) {
    let competencies: Vec<Competency> = SEED_COMPETENCIES
        .iter()
        .enumerate()
        .map(|(index, (name, category, description))| Competency {
            id: CompetencyId(format!("comp-seed-{:02}", index + 1)),
            name: name.to_string(),
            category: *category,
            description: Some(description.to_string()),
        })
        .collect();

    let positions = SEED_POSITIONS
        .iter()
        .enumerate()
        .map(|(index, (title, unit, level, requirements))| JobPosition {
            id: JobPositionId(format!("job-seed-{:02}", index + 1)),
            title: title.to_string(),
            unit: Some(unit.to_string()),
            level: Some(level.to_string()),
            description: None,
            is_available: true,
            competencies: requirements
                .iter()
                .filter_map(|(name, required_level, priority)| {
                    let competency = competencies
                        .iter()
                        .find(|competency| competency.name == *name)?;
                    Some(RequiredCompetency {
                        competency_id: competency.id.clone(),
                        required_level: *required_level,
                        priority: *priority,
                    })
                })
                .collect(),
        })
        .collect();

    (
        InMemoryCompetencyRepository {
            entries: Arc::new(Mutex::new(competencies)),
        },
        InMemoryJobPositionRepository {
            entries: Arc::new(Mutex::new(positions)),
        },
    )
}

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn seed_employees() -> Vec<EmployeeRecord> {
    vec![
        EmployeeRecord {
            employee_id: EmployeeId("emp-001".to_string()),
            nip: Some("198501012010011001".to_string()),
            profile: EmployeeProfile {
                full_name: "Budi Santoso, S.Kom, M.Kom".to_string(),
                birth_place: Some("Jakarta".to_string()),
                birth_date: date(1985, 1, 1),
                gender: Some("Laki-laki".to_string()),
                phone: Some("081234567890".to_string()),
                email: Some("budi.santoso@bssn.go.id".to_string()),
                address: Some("Jl. Sudirman No. 123, Jakarta Pusat".to_string()),
            },
            certifications: vec![Certification {
                id: Some("cert-001".to_string()),
                name: "Certified Information Systems Security Professional (CISSP)".to_string(),
                issuer: "ISC2".to_string(),
                issue_date: date(2020, 6, 15),
                credential: Some("CISSP-123456".to_string()),
            }],
            assignments: vec![Assignment {
                id: Some("assign-001".to_string()),
                title: "Tim Pengamanan Infrastruktur Kritis Nasional".to_string(),
                description: Some("Memimpin tim pengamanan infrastruktur kritis".to_string()),
                location: Some("Jakarta".to_string()),
                start_date: date(2022, 1, 1),
                end_date: None,
            }],
            position_history: vec![PositionRecord {
                id: Some("pos-001".to_string()),
                position: "Kepala Seksi Keamanan Siber".to_string(),
                unit: "Deputi Bidang Operasi".to_string(),
                start_date: date(2020, 1, 1),
                end_date: None,
            }],
            education: vec![EducationRecord {
                id: Some("edu-001".to_string()),
                degree: "S2 - Magister Komputer".to_string(),
                institution: "Universitas Indonesia".to_string(),
                major: Some("Keamanan Informasi".to_string()),
                start_year: Some(2013),
                end_year: Some(2015),
                gpa: Some(3.8),
            }],
        },
        EmployeeRecord {
            employee_id: EmployeeId("emp-002".to_string()),
            nip: Some("199002152015032001".to_string()),
            profile: EmployeeProfile {
                full_name: "Dr. Siti Nurhaliza, S.T, M.T".to_string(),
                birth_place: Some("Bandung".to_string()),
                birth_date: date(1990, 2, 15),
                gender: Some("Perempuan".to_string()),
                phone: Some("081298765432".to_string()),
                email: Some("siti.nurhaliza@bssn.go.id".to_string()),
                address: Some("Jl. Gatot Subroto No. 45, Jakarta Selatan".to_string()),
            },
            certifications: vec![Certification {
                id: Some("cert-002".to_string()),
                name: "Certified Information Security Manager (CISM)".to_string(),
                issuer: "ISACA".to_string(),
                issue_date: date(2021, 8, 10),
                credential: Some("CISM-456789".to_string()),
            }],
            assignments: Vec::new(),
            position_history: vec![PositionRecord {
                id: Some("pos-002".to_string()),
                position: "Kepala Sub Direktorat Kriptografi".to_string(),
                unit: "Pussertif".to_string(),
                start_date: date(2021, 1, 1),
                end_date: None,
            }],
            education: vec![EducationRecord {
                id: Some("edu-002".to_string()),
                degree: "S3 - Doktor".to_string(),
                institution: "Institut Teknologi Bandung".to_string(),
                major: Some("Kriptografi".to_string()),
                start_year: Some(2018),
                end_year: Some(2022),
                gpa: Some(3.9),
            }],
        },
    ]
}

pub(crate) fn parse_score(raw: &str) -> Result<(String, f64), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=SCORE, got '{raw}'"))?;
    let score = value
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse score in '{raw}' ({err})"))?;
    Ok((key.trim().to_string(), score))
}
