use thiserror::Error;

/// Errors raised at the edges of the allocation engine.
///
/// The engine itself is total over its input domain; these only come from
/// builders, rate-table construction, and record parsing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AllocationError {
    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Rate table is inconsistent (rates out of range, empty weights).
    #[error("rate table error: {0}")]
    Config(String),

    /// Raw invoice record could not be decoded.
    #[error("record error: {0}")]
    Record(String),
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "materials[2].pricing_divisor").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// Stable rule code if applicable (e.g. "INV-03").
    pub code: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(code) = &self.code {
            write!(f, "[{}] {}: {}", code, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without a rule code.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: None,
        }
    }

    /// Create a validation error with a rule code.
    pub fn with_code(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: Some(code.into()),
        }
    }
}

/// Join validation errors into one message, `; `-separated.
pub(crate) fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_code() {
        let e = ValidationError::with_code("vat_rate", "must be within [0, 1]", "INV-02");
        assert_eq!(e.to_string(), "[INV-02] vat_rate: must be within [0, 1]");
    }

    #[test]
    fn display_without_code() {
        let e = ValidationError::new("currency", "unknown");
        assert_eq!(e.to_string(), "currency: unknown");
    }

    #[test]
    fn join_is_semicolon_separated() {
        let errors = vec![
            ValidationError::new("a", "x"),
            ValidationError::with_code("b", "y", "C-1"),
        ];
        assert_eq!(join_errors(&errors), "a: x; [C-1] b: y");
    }
}
