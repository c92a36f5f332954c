mod common;

use std::path::PathBuf;

use chart_regen::prelude::*;
use common::*;

#[test]
fn test_scan_finds_nested_scripts() {
    let tree = create_test_tree();
    write_script(tree.path(), "l01/pie", &silent_script());
    write_script(tree.path(), "l02/charts/bar", &silent_script());

    let scripts = ScriptScanner::new("generate.sh").scan(tree.path()).unwrap();

    assert_eq!(scripts.len(), 2);
}

#[test]
fn test_scan_ignores_other_files() {
    let tree = create_test_tree();
    write_script(tree.path(), "l01", &silent_script());
    std::fs::write(tree.path().join("l01/README.md"), "notes").unwrap();
    std::fs::write(tree.path().join("l01/helper.sh"), "exit 0").unwrap();

    let scripts = ScriptScanner::new("generate.sh").scan(tree.path()).unwrap();

    assert_eq!(scripts.len(), 1);
    assert!(scripts[0].path.ends_with("l01/generate.sh"));
}

#[test]
fn test_excluded_subtree_contributes_nothing() {
    let tree = create_test_tree();
    write_script(tree.path(), "l01", &silent_script());
    write_script(tree.path(), "tools", &silent_script());
    write_script(tree.path(), "tools/deep/nested", &silent_script());
    // non-excluded script nested deeper than the excluded subtree
    write_script(tree.path(), "l02/a/b/c", &silent_script());

    let scripts = ScriptScanner::new("generate.sh")
        .exclude(["tools".to_string()])
        .scan(tree.path())
        .unwrap();

    let rel: Vec<PathBuf> = scripts.iter().map(|s| s.relative_to(tree.path())).collect();
    assert_eq!(
        rel,
        vec![
            PathBuf::from("l01/generate.sh"),
            PathBuf::from("l02/a/b/c/generate.sh"),
        ]
    );
}

#[test]
fn test_exclusion_applies_at_any_depth() {
    let tree = create_test_tree();
    write_script(tree.path(), "l01/old/pie", &silent_script());
    write_script(tree.path(), "l01/pie", &silent_script());

    let scripts = ScriptScanner::new("generate.sh")
        .exclude(["old".to_string()])
        .scan(tree.path())
        .unwrap();

    assert_eq!(scripts.len(), 1);
    assert!(scripts[0].path.ends_with("l01/pie/generate.sh"));
}

#[test]
fn test_discovery_order_is_stable() {
    let tree = create_test_tree();
    for dir in ["zeta", "alpha", "mid/way"] {
        write_script(tree.path(), dir, &silent_script());
    }

    let scanner = ScriptScanner::new("generate.sh");
    let first = scanner.scan(tree.path()).unwrap();
    let second = scanner.scan(tree.path()).unwrap();

    assert_eq!(first, second);
    let rel: Vec<PathBuf> = first.iter().map(|s| s.relative_to(tree.path())).collect();
    assert_eq!(
        rel,
        vec![
            PathBuf::from("alpha/generate.sh"),
            PathBuf::from("mid/way/generate.sh"),
            PathBuf::from("zeta/generate.sh"),
        ]
    );
}

#[test]
fn test_scanner_attaches_expected_artifact() {
    let tree = create_test_tree();
    write_script(tree.path(), "l01", &silent_script());

    let scripts = ScriptScanner::new("generate.sh")
        .artifact(ArtifactSpec::Fixed {
            name: "chart.pdf".to_string(),
        })
        .scan(tree.path())
        .unwrap();

    assert_eq!(
        scripts[0].artifact,
        Some(tree.path().join("l01/chart.pdf"))
    );
}

#[test]
fn test_scan_of_missing_root_is_an_error() {
    let tree = create_test_tree();
    let result = ScriptScanner::new("generate.sh").scan(tree.path().join("missing"));
    assert!(matches!(result, Err(ScanError::NotADirectory(_))));
}
