/*!
 * Tests for application configuration
 */

use aozora2mdx::app_config::{Config, LogLevel};

/// Test the default configuration values
#[test]
fn test_default_withNoInput_shouldUseExpectedValues() {
    let config = Config::default();

    assert!(config.strip_leading_indent);
    assert!(!config.annotation.strict);
    assert!(!config.annotation.preserve_prior_media);
    assert_eq!(config.output.extension, "mdx");
    assert!(config.output.emit_frontmatter);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test that an empty JSON object deserializes to the defaults
#[test]
fn test_deserialize_withEmptyObject_shouldFillDefaults() {
    let config: Config = serde_json::from_str("{}").unwrap();

    assert!(config.strip_leading_indent);
    assert_eq!(config.output.extension, "mdx");
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test that partial JSON overrides only the named fields
#[test]
fn test_deserialize_withPartialObject_shouldOverrideNamedFields() {
    let json = r#"{
        "strip_leading_indent": false,
        "annotation": { "strict": true },
        "log_level": "debug"
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert!(!config.strip_leading_indent);
    assert!(config.annotation.strict);
    assert!(!config.annotation.preserve_prior_media);
    assert_eq!(config.output.extension, "mdx");
    assert_eq!(config.log_level, LogLevel::Debug);
}

/// Test that validation rejects an empty output extension
#[test]
fn test_validate_withEmptyExtension_shouldFail() {
    let mut config = Config::default();
    config.output.extension = String::new();

    assert!(config.validate().is_err());
}

/// Test that validation rejects an extension carrying a leading dot
#[test]
fn test_validate_withDottedExtension_shouldFail() {
    let mut config = Config::default();
    config.output.extension = ".mdx".to_string();

    assert!(config.validate().is_err());
}

/// Test that a serialized configuration deserializes back unchanged
#[test]
fn test_serialize_withDefaults_shouldRoundTrip() {
    let config = Config::default();
    let json = serde_json::to_string_pretty(&config).unwrap();
    let restored: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.strip_leading_indent, config.strip_leading_indent);
    assert_eq!(restored.output.extension, config.output.extension);
    assert_eq!(restored.log_level, config.log_level);
}
