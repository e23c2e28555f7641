#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

/// Maps literal initializers to the fixed set of annotations the converter can insert.
pub mod infer;

/// Annotates variable declarators and strips annotations from `for-in`/`for-of` heads.
pub mod declare;

/// Rewrites function-like signatures: parameter and return annotations, and the lowering of
/// destructuring parameters into a synthetic `params` binding.
pub mod params;

/// Strips recognized source extensions from module specifiers.
pub mod imports;

/// Tracks whether a module contains JSX, which decides the output extension.
pub mod markup;

/// The single [`swc_ecma_visit::VisitMut`] pass that dispatches to the rewrites above.
pub mod transform;

/// Glue around [`swc_ecma_parser`] and [`swc_ecma_codegen`]: source text in, source text out.
pub mod parse;

/// Drives conversion of a file or a directory tree and persists the results.
pub mod convert;

/// Run configuration shared by the library and the command line.
pub mod config;

/// Error types.
pub mod error;

/// Installs the [`tracing`] subscriber used by the binary.
pub mod tracing_config;

/// Private crate for testing utilities.
#[cfg(test)]
pub(crate) mod testing;

pub use config::ConvertConfig;
pub use convert::{convert_source, run, Conversion, RunContext, RunSummary};
pub use error::{Error, ParseError, Result};
pub use infer::AnnotationKind;
pub use markup::OutputVariant;
