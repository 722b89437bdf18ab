use meshinv_core::ValueObject;

/// Outcome of validating one code. The first failing rule wins, so there is
/// never more than one reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Accepted; `message` is informational.
    Valid { message: String },
    /// Rejected; `reason` is always populated.
    Invalid { reason: String },
}

impl ValidationResult {
    pub fn valid(message: impl Into<String>) -> Self {
        Self::Valid {
            message: message.into(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// The success note or the rejection reason.
    pub fn message(&self) -> &str {
        match self {
            Self::Valid { message } => message,
            Self::Invalid { reason } => reason,
        }
    }

    /// `(valid, message)` as carried on the wire.
    pub fn into_parts(self) -> (bool, String) {
        match self {
            Self::Valid { message } => (true, message),
            Self::Invalid { reason } => (false, reason),
        }
    }
}

impl ValueObject for ValidationResult {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_parts_maps_variants() {
        assert_eq!(ValidationResult::valid("ok").into_parts(), (true, "ok".to_string()));
        assert_eq!(
            ValidationResult::invalid("nope").into_parts(),
            (false, "nope".to_string())
        );
    }
}
