use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ConvertConfig;
use crate::error::{Error, ParseError, Result};
use crate::markup::OutputVariant;
use crate::parse::{parse, SourceKind};
use crate::transform::annotate_module;

/// Where a run reads from and writes to. Built once per run and only read afterwards.
#[derive(Debug, Clone)]
pub struct RunContext<'a> {
    config: &'a ConvertConfig,

    /// Inputs are mirrored relative to this directory.
    root: PathBuf,

    /// `<root>/<out_dir_name>`.
    out_root: PathBuf,
}

impl<'a> RunContext<'a> {
    /// Context for converting everything below `root`.
    pub fn new(config: &'a ConvertConfig, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let out_root = root.join(&config.out_dir_name);
        Self {
            config,
            root,
            out_root,
        }
    }

    /// Context for converting a single file, rooted at the file's directory.
    pub fn for_file(config: &'a ConvertConfig, file: &Path) -> Self {
        Self::new(config, file.parent().unwrap_or_else(|| Path::new("")))
    }

    /// The directory converted files are written under.
    pub fn out_root(&self) -> &Path {
        &self.out_root
    }

    /// Mirrors `input` under the output root with the extension of `variant`.
    pub fn output_path(&self, input: &Path, variant: OutputVariant) -> PathBuf {
        let relative = match input.strip_prefix(&self.root) {
            Ok(relative) => relative,
            Err(_) => input.file_name().map(Path::new).unwrap_or(input),
        };

        self.out_root
            .join(relative)
            .with_extension(variant.extension())
    }
}

/// The printed result of converting one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// The annotated source text.
    pub code: String,

    /// Whether the text has to be written as `.ts` or `.tsx`.
    pub variant: OutputVariant,
}

/// Parses, rewrites and prints one module without touching the file system.
pub fn convert_source(path: &Path, source: String, kind: SourceKind) -> Result<Conversion> {
    let mut parsed = parse(path, source, kind)?;
    tracing::debug!(items = parsed.module.body.len(), "parsed");

    let variant = annotate_module(&mut parsed.module);
    tracing::debug!(%variant, "annotated");

    let code = parsed.print().map_err(|source| Error::Print {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Conversion { code, variant })
}

/// What happened to one input file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Written to the contained output path.
    Converted(PathBuf),

    /// Not converted because it did not parse.
    Failed(ParseError),
}

/// Converts one file and writes the result under the context's output root.
///
/// A parse failure is an outcome, not an error: the caller moves on to the next file.
/// File system errors are returned.
pub fn convert_file(ctx: &RunContext<'_>, input: &Path, kind: SourceKind) -> Result<FileOutcome> {
    let _span = tracing::debug_span!("convert_file", path = %input.display()).entered();

    let source = fs::read_to_string(input).map_err(Error::io("read", input))?;

    let conversion = match convert_source(input, source, kind) {
        Ok(conversion) => conversion,
        Err(Error::Parse(err)) => return Ok(FileOutcome::Failed(err)),
        Err(err) => return Err(err),
    };

    let output = ctx.output_path(input, conversion.variant);
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(Error::io("create directory", parent))?;
    }
    fs::write(&output, conversion.code).map_err(Error::io("write", &output))?;

    Ok(FileOutcome::Converted(output))
}

/// Everything a run did, in the order it happened.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Input and output path of each converted file.
    pub converted: Vec<(PathBuf, PathBuf)>,

    /// Files that failed to parse.
    pub failed: Vec<ParseError>,

    /// Inputs that were not files or directories the converter accepts.
    pub skipped: Vec<PathBuf>,
}

impl RunSummary {
    fn record(&mut self, input: &Path, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Converted(output) => {
                tracing::info!("converted {} -> {}", input.display(), output.display());
                self.converted.push((input.to_path_buf(), output));
            }
            FileOutcome::Failed(err) => {
                tracing::error!("skipped {}", err);
                self.failed.push(err);
            }
        }
    }
}

/// Converts every source file below the context root, depth first.
///
/// Entries are visited in file name order. Skipped segments prune the whole subtree.
pub fn convert_directory(ctx: &RunContext<'_>, summary: &mut RunSummary) -> Result<()> {
    let walker = WalkDir::new(&ctx.root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !ctx.config.is_skipped(entry.file_name()));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(kind) = SourceKind::from_path(entry.path()) else {
            continue;
        };

        let outcome = convert_file(ctx, entry.path(), kind)?;
        summary.record(entry.path(), outcome);
    }

    Ok(())
}

/// What a run was pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Directory,
    File(SourceKind),
}

impl Target {
    /// Fails with [`Error::UnsupportedInput`] for anything that is neither a directory nor a
    /// file with a recognized extension.
    fn of(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(Error::io("read metadata of", path))?;
        if metadata.is_dir() {
            return Ok(Target::Directory);
        }

        SourceKind::from_path(path)
            .filter(|_| metadata.is_file())
            .map(Target::File)
            .ok_or_else(|| Error::UnsupportedInput(path.to_path_buf()))
    }
}

/// Converts `target`, a source file or a directory of them.
///
/// Files that fail to parse and unsupported targets are reported in the summary. File system
/// errors end the run.
pub fn run(config: &ConvertConfig, target: &Path) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    match Target::of(target) {
        Ok(Target::Directory) => {
            let ctx = RunContext::new(config, target);
            tracing::debug!(out_root = %ctx.out_root().display(), "converting directory");
            convert_directory(&ctx, &mut summary)?;
        }
        Ok(Target::File(kind)) => {
            let ctx = RunContext::for_file(config, target);
            let outcome = convert_file(&ctx, target, kind)?;
            summary.record(target, outcome);
        }
        Err(err @ Error::UnsupportedInput(_)) => {
            tracing::warn!("skipped: {err}");
            summary.skipped.push(target.to_path_buf());
        }
        Err(err) => return Err(err),
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::squash;

    #[test]
    fn output_paths_mirror_the_input() {
        let config = ConvertConfig::default();
        let ctx = RunContext::new(&config, "project");

        assert_eq!(
            ctx.output_path(Path::new("project/src/a.js"), OutputVariant::Plain),
            Path::new("project/tsConverter/src/a.ts")
        );
        assert_eq!(
            ctx.output_path(Path::new("project/b.test.jsx"), OutputVariant::Markup),
            Path::new("project/tsConverter/b.test.tsx")
        );
    }

    #[test]
    fn single_file_context() {
        let config = ConvertConfig::default();

        let ctx = RunContext::for_file(&config, Path::new("src/app/a.js"));
        assert_eq!(
            ctx.output_path(Path::new("src/app/a.js"), OutputVariant::Plain),
            Path::new("src/app/tsConverter/a.ts")
        );

        let ctx = RunContext::for_file(&config, Path::new("a.js"));
        assert_eq!(
            ctx.output_path(Path::new("a.js"), OutputVariant::Plain),
            Path::new("tsConverter/a.ts")
        );
    }

    #[test]
    fn custom_output_directory() {
        let config = ConvertConfig {
            out_dir_name: "typed".to_string(),
            ..ConvertConfig::default()
        };
        let ctx = RunContext::new(&config, "p");
        assert_eq!(
            ctx.output_path(Path::new("p/x.ts"), OutputVariant::Plain),
            Path::new("p/typed/x.ts")
        );
    }

    #[test]
    fn convert_source_reports_the_variant() {
        let conversion =
            convert_source(Path::new("a.jsx"), "const a = <b />;".into(), SourceKind::Jsx)
                .expect("converts");
        assert_eq!(conversion.variant, OutputVariant::Markup);
        assert!(squash(&conversion.code).starts_with("consta:any=<b"));
    }

    #[test]
    fn target_kinds() {
        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("a.jsx");
        let style = dir.path().join("a.css");
        fs::write(&script, "").unwrap();
        fs::write(&style, "").unwrap();

        assert_eq!(Target::of(dir.path()).unwrap(), Target::Directory);
        assert_eq!(Target::of(&script).unwrap(), Target::File(SourceKind::Jsx));

        let err = Target::of(&style).unwrap_err();
        assert!(matches!(&err, Error::UnsupportedInput(path) if *path == style), "{err}");

        let err = Target::of(&dir.path().join("missing.js")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "{err}");
    }

    #[test]
    fn convert_source_parse_errors() {
        let err = convert_source(Path::new("a.js"), "const x = ;".into(), SourceKind::Js)
            .expect_err("should fail");
        assert!(matches!(err, Error::Parse(_)), "{err}");
    }
}
