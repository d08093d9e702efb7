use thiserror::Error;

/// Errors raised by the configuration and CLI surfaces.
///
/// The computation engine itself never fails; it reports problems through
/// [`crate::validation::ValidationReport`] and invalid solver results.
#[derive(Error, Debug)]
pub enum DesignerError {
    #[error("Unknown ogive family: {0}")]
    UnknownOgive(String),

    #[error("Unknown base family: {0}")]
    UnknownBase(String),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DesignerResult<T> = Result<T, DesignerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DesignerError::UnknownOgive("Parabolic".to_string());
        assert_eq!(err.to_string(), "Unknown ogive family: Parabolic");

        let err = DesignerError::Config("band count out of range".to_string());
        assert_eq!(err.to_string(), "Configuration error: band count out of range");
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: DesignerError = parse.unwrap_err().into();
        assert!(matches!(err, DesignerError::Json(_)));
        assert!(err.to_string().starts_with("JSON error"));
    }
}
