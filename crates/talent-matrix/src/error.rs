use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::assessment::{
    AssessmentServiceError, BlueprintError, IndicatorImportError, RepositoryError, ScoringError,
};
use crate::workflows::change_requests::{ChangeRequestServiceError, RecordStoreError};
use crate::workflows::competencies::{CompetencyError, CompetencyServiceError};
use crate::workflows::employees::EmployeeServiceError;
use crate::workflows::learning_paths::LearningPathServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Serialization(serde_json::Error),
    Import(IndicatorImportError),
    Assessment(AssessmentServiceError),
    ChangeRequest(ChangeRequestServiceError),
    LearningPath(LearningPathServiceError),
    Employee(EmployeeServiceError),
    Competency(CompetencyServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Serialization(err) => write!(f, "serialization error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Assessment(err) => write!(f, "assessment error: {}", err),
            AppError::ChangeRequest(err) => write!(f, "change request error: {}", err),
            AppError::LearningPath(err) => write!(f, "learning path error: {}", err),
            AppError::Employee(err) => write!(f, "employee error: {}", err),
            AppError::Competency(err) => write!(f, "competency error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Serialization(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Assessment(err) => Some(err),
            AppError::ChangeRequest(err) => Some(err),
            AppError::LearningPath(err) => Some(err),
            AppError::Employee(err) => Some(err),
            AppError::Competency(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Assessment(err) => assessment_status(err),
            AppError::ChangeRequest(err) => change_request_status(err),
            AppError::LearningPath(err) => learning_path_status(err),
            AppError::Employee(err) => employee_status(err),
            AppError::Competency(err) => competency_status(err),
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

fn repository_status(error: &RepositoryError) -> StatusCode {
    match error {
        RepositoryError::Conflict => StatusCode::CONFLICT,
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn record_store_status(error: &RecordStoreError) -> StatusCode {
    match error {
        RecordStoreError::UnknownEmployee(_) => StatusCode::NOT_FOUND,
        RecordStoreError::Apply(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RecordStoreError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn assessment_status(error: &AssessmentServiceError) -> StatusCode {
    match error {
        AssessmentServiceError::Scoring(err) if err.is_input_error() => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AssessmentServiceError::Scoring(_) => StatusCode::INTERNAL_SERVER_ERROR,
        AssessmentServiceError::Blueprint(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentServiceError::Repository(err) => repository_status(err),
    }
}

fn change_request_status(error: &ChangeRequestServiceError) -> StatusCode {
    match error {
        ChangeRequestServiceError::Payload(_) | ChangeRequestServiceError::MissingReviewer => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ChangeRequestServiceError::UnknownEmployee(_) => StatusCode::NOT_FOUND,
        ChangeRequestServiceError::InvalidTransition { .. } => StatusCode::CONFLICT,
        ChangeRequestServiceError::Records(err) => record_store_status(err),
        ChangeRequestServiceError::Repository(err) => repository_status(err),
    }
}

fn learning_path_status(error: &LearningPathServiceError) -> StatusCode {
    match error {
        LearningPathServiceError::Path(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LearningPathServiceError::UnknownAssessment(_) => StatusCode::NOT_FOUND,
        LearningPathServiceError::Repository(err) => repository_status(err),
    }
}

fn employee_status(error: &EmployeeServiceError) -> StatusCode {
    match error {
        EmployeeServiceError::Payload(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EmployeeServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        EmployeeServiceError::Records(err) => record_store_status(err),
    }
}

fn competency_status(error: &CompetencyServiceError) -> StatusCode {
    match error {
        CompetencyServiceError::Invalid(CompetencyError::InUse { .. }) => StatusCode::CONFLICT,
        CompetencyServiceError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CompetencyServiceError::Repository(err) => repository_status(err),
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

impl From<IndicatorImportError> for AppError {
    fn from(value: IndicatorImportError) -> Self {
        Self::Import(value)
    }
}

impl From<AssessmentServiceError> for AppError {
    fn from(value: AssessmentServiceError) -> Self {
        Self::Assessment(value)
    }
}

impl From<ChangeRequestServiceError> for AppError {
    fn from(value: ChangeRequestServiceError) -> Self {
        Self::ChangeRequest(value)
    }
}

impl From<LearningPathServiceError> for AppError {
    fn from(value: LearningPathServiceError) -> Self {
        Self::LearningPath(value)
    }
}

impl From<EmployeeServiceError> for AppError {
    fn from(value: EmployeeServiceError) -> Self {
        Self::Employee(value)
    }
}

impl From<CompetencyServiceError> for AppError {
    fn from(value: CompetencyServiceError) -> Self {
        Self::Competency(value)
    }
}

impl From<ScoringError> for AppError {
    fn from(value: ScoringError) -> Self {
        Self::Assessment(AssessmentServiceError::Scoring(value))
    }
}

impl From<BlueprintError> for AppError {
    fn from(value: BlueprintError) -> Self {
        Self::Assessment(AssessmentServiceError::Blueprint(value))
    }
}
