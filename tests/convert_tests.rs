use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use ts_annotate::{run, ConvertConfig};

fn write(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

fn squash(s: &str) -> String {
    s.split_whitespace().collect()
}

fn relative_outputs(root: &Path, outputs: impl IntoIterator<Item = PathBuf>) -> Vec<String> {
    outputs
        .into_iter()
        .map(|path| {
            path.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn directory_tree_is_mirrored() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a.js", "const n = 1;");
    write(root, "lib/b.js", "import a from \"../a.js\";\nexport default a;");
    write(root, "lib/view.jsx", "export const v = <div />;");
    write(root, "notes.md", "# not code");

    let summary = run(&ConvertConfig::default(), root).unwrap();

    assert_eq!(
        relative_outputs(root, summary.converted.iter().map(|(_, out)| out.clone())),
        vec![
            "tsConverter/a.ts",
            "tsConverter/lib/b.ts",
            "tsConverter/lib/view.tsx",
        ]
    );
    assert!(summary.failed.is_empty());
    assert!(summary.skipped.is_empty());

    let a = fs::read_to_string(root.join("tsConverter/a.ts")).unwrap();
    assert_eq!(squash(&a), "constn:number=1;");

    let b = fs::read_to_string(root.join("tsConverter/lib/b.ts")).unwrap();
    assert_eq!(squash(&b), "importafrom\"../a\";exportdefaulta;");

    // Inputs are left alone.
    assert_eq!(fs::read_to_string(root.join("a.js")).unwrap(), "const n = 1;");
}

#[test]
fn skipped_segments_prune_subtrees() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "src/index.js", "let x = [];");
    write(root, "node_modules/dep/index.js", "let y = 1;");
    write(root, "src/public/asset.js", "let z = 1;");
    write(root, "publicity/ok.js", "let w = 1;");

    let summary = run(&ConvertConfig::default(), root).unwrap();

    assert_eq!(
        relative_outputs(root, summary.converted.iter().map(|(_, out)| out.clone())),
        vec!["tsConverter/publicity/ok.ts", "tsConverter/src/index.ts"]
    );
    assert!(!root.join("tsConverter/node_modules").exists());
    assert!(!root.join("tsConverter/src/public").exists());
}

#[test]
fn extra_skip_segments() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "dist/bundle.js", "var b = 1;");
    write(root, "src/a.js", "var a = 1;");

    let config = ConvertConfig::default().with_skip_segments(["dist".to_string()]);
    let summary = run(&config, root).unwrap();

    assert_eq!(summary.converted.len(), 1);
    assert!(!root.join("tsConverter/dist").exists());
}

#[test]
fn parse_failures_do_not_stop_the_batch() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a.js", "const a = 1;");
    let broken = write(root, "b.js", "const x = ;");
    write(root, "c.js", "const c = \"c\";");

    let summary = run(&ConvertConfig::default(), root).unwrap();

    assert_eq!(summary.converted.len(), 2);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].path, broken);
    assert!(summary.failed[0].line >= 1);
    assert!(root.join("tsConverter/a.ts").exists());
    assert!(!root.join("tsConverter/b.ts").exists());
    assert!(root.join("tsConverter/c.ts").exists());
}

#[test]
fn second_run_ignores_previous_output() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a.js", "function f(x) { return x; }");

    let first = run(&ConvertConfig::default(), root).unwrap();
    let written = fs::read_to_string(root.join("tsConverter/a.ts")).unwrap();

    let second = run(&ConvertConfig::default(), root).unwrap();
    assert_eq!(first.converted, second.converted);
    assert!(!root.join("tsConverter/tsConverter").exists());
    assert_eq!(
        fs::read_to_string(root.join("tsConverter/a.ts")).unwrap(),
        written
    );
}

#[test]
fn custom_output_directory_is_skipped() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "a.js", "let a = true;");

    let config = ConvertConfig {
        out_dir_name: "typed".to_string(),
        ..ConvertConfig::default()
    };
    run(&config, root).unwrap();
    let second = run(&config, root).unwrap();

    assert_eq!(second.converted.len(), 1);
    let a = fs::read_to_string(root.join("typed/a.ts")).unwrap();
    assert_eq!(squash(&a), "leta:boolean=true;");
}

#[test]
fn single_file_input() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "app/widget.jsx", "const w = <>{1}</>;");

    let summary = run(&ConvertConfig::default(), &input).unwrap();

    let expected = dir.path().join("app/tsConverter/widget.tsx");
    assert_eq!(summary.converted, vec![(input, expected.clone())]);
    assert!(expected.exists());
}

#[test]
fn single_file_parse_failure() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "bad.ts", "const x = ;");

    let summary = run(&ConvertConfig::default(), &input).unwrap();

    assert!(summary.converted.is_empty());
    assert_eq!(summary.failed.len(), 1);
    assert!(!dir.path().join("tsConverter").exists());
}

#[test]
fn unsupported_file_is_skipped() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "style.css", "body {}");

    let summary = run(&ConvertConfig::default(), &input).unwrap();

    assert!(summary.converted.is_empty());
    assert!(summary.failed.is_empty());
    assert_eq!(summary.skipped, vec![input]);
}

#[test]
fn missing_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = run(&ConvertConfig::default(), &dir.path().join("nope")).unwrap_err();
    assert!(err.to_string().contains("nope"), "{err}");
}
