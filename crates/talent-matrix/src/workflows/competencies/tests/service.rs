use super::common::*;
use crate::workflows::competencies::domain::{
    CompetencyCategory, CompetencyError, CompetencyId, Priority,
};
use crate::workflows::competencies::repository::RepositoryError;
use crate::workflows::competencies::CompetencyServiceError;

#[test]
fn catalogue_sorts_by_category_then_name() {
    let service = build_service();
    for (name, category) in [
        ("Kriptografi", CompetencyCategory::Technical),
        ("Komunikasi", CompetencyCategory::Social),
        ("Budgeting", CompetencyCategory::Managerial),
        ("Incident Response", CompetencyCategory::Technical),
    ] {
        service
            .create_competency(competency(name, category))
            .expect("created");
    }

    let names: Vec<_> = service
        .list_competencies()
        .expect("lists")
        .into_iter()
        .map(|competency| competency.name)
        .collect();
    assert_eq!(
        names,
        ["Budgeting", "Komunikasi", "Incident Response", "Kriptografi"]
    );
}

#[test]
fn duplicate_names_conflict_ignoring_case() {
    let service = build_service();
    service
        .create_competency(competency("Cloud Security", CompetencyCategory::Technical))
        .expect("created");

    assert!(matches!(
        service.create_competency(competency(" cloud security ", CompetencyCategory::Technical)),
        Err(CompetencyServiceError::Repository(RepositoryError::Conflict))
    ));
    assert!(matches!(
        service.create_competency(competency("  ", CompetencyCategory::Technical)),
        Err(CompetencyServiceError::Invalid(CompetencyError::BlankName))
    ));
}

#[test]
fn position_requirements_are_validated() {
    let service = build_service();
    let leadership = service
        .create_competency(competency("Kepemimpinan", CompetencyCategory::Managerial))
        .expect("created")
        .id;
    let unknown = CompetencyId("comp-missing".to_string());

    assert!(matches!(
        service.create_position(position("Direktur", vec![requirement(&leadership, 6, Priority::High)])),
        Err(CompetencyServiceError::Invalid(CompetencyError::LevelOutOfRange { level: 6, .. }))
    ));
    assert!(matches!(
        service.create_position(position("Direktur", vec![requirement(&unknown, 3, Priority::High)])),
        Err(CompetencyServiceError::Invalid(CompetencyError::UnknownCompetency(_)))
    ));
    assert!(matches!(
        service.create_position(position(
            "Direktur",
            vec![
                requirement(&leadership, 4, Priority::High),
                requirement(&leadership, 5, Priority::Medium),
            ]
        )),
        Err(CompetencyServiceError::Invalid(CompetencyError::DuplicateRequirement(_)))
    ));
}

#[test]
fn positions_resolve_competencies_and_filter_availability() {
    let service = build_service();
    let incident = service
        .create_competency(competency("Incident Response", CompetencyCategory::Technical))
        .expect("created")
        .id;

    let open = service
        .create_position(position(
            "Direktur Operasi Keamanan Siber",
            vec![requirement(&incident, 5, Priority::High)],
        ))
        .expect("created");
    let mut closed = position("Analis Forensik", Vec::new());
    closed.is_available = false;
    service.create_position(closed).expect("created");

    assert_eq!(open.competencies[0].competency.name, "Incident Response");
    assert_eq!(open.competencies[0].required_level, 5);

    let all: Vec<_> = service
        .list_positions(false)
        .expect("lists")
        .into_iter()
        .map(|view| view.title)
        .collect();
    assert_eq!(all, ["Analis Forensik", "Direktur Operasi Keamanan Siber"]);

    let available = service.list_positions(true).expect("lists");
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, open.id);
}

#[test]
fn update_replaces_requirements() {
    let service = build_service();
    let budgeting = service
        .create_competency(competency("Budgeting", CompetencyCategory::Managerial))
        .expect("created")
        .id;
    let planning = service
        .create_competency(competency("Perencanaan Strategis", CompetencyCategory::Managerial))
        .expect("created")
        .id;
    let created = service
        .create_position(position(
            "Kepala Biro",
            vec![requirement(&budgeting, 5, Priority::High)],
        ))
        .expect("created");

    let updated = service
        .update_position(
            &created.id,
            position("Kepala Biro", vec![requirement(&planning, 4, Priority::Medium)]),
        )
        .expect("updated");

    assert_eq!(updated.competencies.len(), 1);
    assert_eq!(updated.competencies[0].competency.id, planning);
    assert_eq!(updated.competencies[0].priority, Priority::Medium);
}

#[test]
fn required_competency_cannot_be_deleted() {
    let service = build_service();
    let forensics = service
        .create_competency(competency("Digital Forensics", CompetencyCategory::Technical))
        .expect("created")
        .id;
    let created = service
        .create_position(position(
            "Analis Forensik",
            vec![requirement(&forensics, 4, Priority::High)],
        ))
        .expect("created");

    assert!(matches!(
        service.delete_competency(&forensics),
        Err(CompetencyServiceError::Invalid(CompetencyError::InUse { positions: 1, .. }))
    ));

    service.delete_position(&created.id).expect("deleted");
    service.delete_competency(&forensics).expect("deleted");
    assert!(service.list_competencies().expect("lists").is_empty());
}
