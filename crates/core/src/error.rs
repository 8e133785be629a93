#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unsupported report type: {category}/{report_type}")]
    UnsupportedReportType {
        category: String,
        report_type: String,
    },

    #[error("Unsupported report format: {0}")]
    UnsupportedFormat(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
