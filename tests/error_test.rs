use huginn::{Result, SemanticError, Taxonomy};

#[test]
fn test_error_display() {
    let err = SemanticError::ModelUnavailable("weights not found".to_string());
    assert!(err.to_string().contains("weights not found"));

    let err = SemanticError::DimensionMismatch {
        expected: 384,
        actual: 512,
    };
    assert_eq!(err.to_string(), "dimension mismatch: expected 384, got 512");
}

#[test]
fn test_result_alias() {
    fn returns_error() -> Result<()> {
        Err(SemanticError::Worker("task panicked".into()))
    }
    assert!(returns_error().is_err());
}

#[test]
fn test_json_errors_convert() {
    fn parse(s: &str) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(s)?)
    }
    assert!(matches!(parse("{"), Err(SemanticError::Json(_))));
}

// ============================================================================
// Fatal error classification
// ============================================================================

#[test]
fn only_model_unavailable_is_fatal() {
    assert!(SemanticError::ModelUnavailable("x".into()).is_fatal());

    assert!(!SemanticError::Embedding("x".into()).is_fatal());
    assert!(
        !SemanticError::DimensionMismatch {
            expected: 1,
            actual: 2
        }
        .is_fatal()
    );
    assert!(!SemanticError::InvalidCatalog("x".into()).is_fatal());
    assert!(!SemanticError::Configuration("x".into()).is_fatal());
    assert!(!SemanticError::LockPoisoned("model guard").is_fatal());
    assert!(!SemanticError::Worker("x".into()).is_fatal());
}

#[test]
fn unknown_taxonomy_is_configuration_error() {
    let err = "emotion".parse::<Taxonomy>().unwrap_err();
    assert!(matches!(err, SemanticError::Configuration(_)));
    assert!(err.to_string().contains("emotion"));
}
