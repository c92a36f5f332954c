mod common;

use chart_regen::prelude::*;
use common::*;

#[test]
fn test_defaults_without_config_file() {
    let config = RunnerConfig::default();
    assert_eq!(config.script_name, "generate.py");
    assert_eq!(config.interpreter, "python3");
    assert_eq!(config.timeout_secs, 60);
    assert_eq!(config.workers, 1);
    assert_eq!(config.artifact, ArtifactSpec::None);
}

#[test]
fn test_load_from_file() {
    let tree = create_test_tree();
    let path = tree.path().join(CONFIG_FILE);
    std::fs::write(
        &path,
        r#"
script_name: generate.sh
interpreter: sh
timeout_secs: 3
exclude: [tools]
"#,
    )
    .unwrap();

    let config = RunnerConfig::load(&path).unwrap();
    assert_eq!(config.script_name, "generate.sh");
    assert_eq!(config.interpreter, "sh");
    assert_eq!(config.timeout_secs, 3);
    assert_eq!(config.exclude, vec!["tools"]);
    // unspecified fields keep defaults
    assert_eq!(config.workers, 1);
}

#[test]
fn test_load_rejects_malformed_yaml() {
    let tree = create_test_tree();
    let path = tree.path().join(CONFIG_FILE);
    std::fs::write(&path, "timeout_secs: [not a number").unwrap();

    let result = RunnerConfig::load(&path);
    assert!(result.is_err());
}

#[test]
fn test_artifact_specs_parse() {
    let fixed: RunnerConfig = serde_yaml::from_str(
        r#"
artifact:
  type: fixed
  name: chart.pdf
"#,
    )
    .unwrap();
    assert_eq!(
        fixed.artifact,
        ArtifactSpec::Fixed {
            name: "chart.pdf".to_string()
        }
    );

    let stem: RunnerConfig = serde_yaml::from_str(
        r#"
artifact:
  type: stem
  extension: pdf
"#,
    )
    .unwrap();
    assert_eq!(
        stem.artifact,
        ArtifactSpec::Stem {
            extension: "pdf".to_string()
        }
    );
}

#[tokio::test]
async fn test_batch_honors_config_exclusions() {
    let tree = create_test_tree();
    write_script(tree.path(), "l01", &silent_script());
    write_script(tree.path(), "tools", &failing_script(1, "should never run"));

    let mut config = sh_config();
    config.exclude.push("tools".to_string());

    let summary = BatchRunner::with_config(tree.path(), config)
        .run()
        .await
        .unwrap();

    assert!(summary.success());
    assert_eq!(summary.total(), 1);
}
