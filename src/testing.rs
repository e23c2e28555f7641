use std::path::Path;

use swc_ecma_ast::{Expr, ModuleItem, Stmt};

use super::markup::OutputVariant;
use super::parse::{parse, ParsedModule, SourceKind};
use super::transform::annotate_module;

pub(crate) fn parse_helper(contents: &str) -> ParsedModule {
    parse(Path::new("test.jsx"), contents.to_string(), SourceKind::Jsx).expect("error parsing")
}

/// Parses `contents` as a single expression statement and returns its expression.
pub(crate) fn expr_helper(contents: &str) -> Expr {
    let parsed = parse_helper(&format!("{contents};"));
    match parsed.module.body.into_iter().next() {
        Some(ModuleItem::Stmt(Stmt::Expr(stmt))) => *stmt.expr,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

/// Runs the whole transform over `contents` and returns the printed output with all
/// whitespace removed, which keeps assertions independent of the printer's layout.
pub(crate) fn convert_helper(contents: &str) -> String {
    squash(&transform_helper(contents).0)
}

pub(crate) fn transform_helper(contents: &str) -> (String, OutputVariant) {
    let mut parsed = parse_helper(contents);
    let variant = annotate_module(&mut parsed.module);
    (parsed.print().expect("error printing"), variant)
}

pub(crate) fn squash(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
