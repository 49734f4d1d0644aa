/*!
 * Tests for configuration loading and validation.
 */

use std::path::PathBuf;

use tagweave::Config;
use tagweave::app_config::LogLevel;

fn write_temp_config(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("tagweave-test-{}-{}.json", name, std::process::id()));
    std::fs::write(&path, content).expect("write temp config");
    path
}

#[test]
fn test_fromFile_validConfig_shouldLoadAndValidate() {
    let path = write_temp_config(
        "valid",
        r#"{
            "source_language": "en",
            "target_language": "fr",
            "postprocess": { "detokenize": false, "worker_threads": 2 },
            "symmetrization": "grow-diag-final-and",
            "log_level": "debug"
        }"#,
    );

    let config = Config::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "fr");
    assert!(!config.postprocess.detokenize);
    assert_eq!(config.worker_threads(), 2);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.symmetrization_strategy().unwrap().is_some());
}

#[test]
fn test_fromFile_unknownStrategy_shouldFail() {
    let path = write_temp_config(
        "badstrategy",
        r#"{
            "source_language": "en",
            "target_language": "fr",
            "symmetrization": "majority-vote"
        }"#,
    );

    let result = Config::from_file(&path);
    std::fs::remove_file(&path).ok();
    assert!(result.is_err());
}

#[test]
fn test_fromFile_missingFile_shouldFail() {
    let result = Config::from_file("/nonexistent/tagweave.json");
    assert!(result.is_err());
}

#[test]
fn test_fromFile_malformedJson_shouldFail() {
    let path = write_temp_config("badjson", "{ not json");
    let result = Config::from_file(&path);
    std::fs::remove_file(&path).ok();
    assert!(result.is_err());
}
