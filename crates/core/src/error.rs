use crate::tree::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `id` is kept as the raw path segment so ids that do not parse
    /// still report what was asked for.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}
