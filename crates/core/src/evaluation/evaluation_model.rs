use crate::errors::ValidationError;

/// A validated evaluation input: both fields non-empty, otherwise passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRequest {
    level: String,
    cm_type: String,
}

impl EvaluationRequest {
    pub fn new(
        level: impl Into<String>,
        cm_type: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let level = level.into();
        let cm_type = cm_type.into();
        if level.is_empty() || cm_type.is_empty() {
            return Err(ValidationError::MissingParameters(
                "Please provide level and cm_type".to_string(),
            ));
        }
        Ok(Self { level, cm_type })
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn cm_type(&self) -> &str {
        &self.cm_type
    }
}
