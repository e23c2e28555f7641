use std::io;
use std::path::Path;

use swc_common::comments::SingleThreadedComments;
use swc_common::sync::Lrc;
use swc_common::{FileName, SourceMap, Span, Spanned};
use swc_ecma_ast::{EsVersion, Module};
use swc_ecma_codegen::text_writer::JsWriter;
use swc_ecma_codegen::{Config, Emitter};
use swc_ecma_parser::lexer::Lexer;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsConfig};

use crate::error::ParseError;

/// The source dialects accepted as input, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `.js`
    Js,

    /// `.jsx`
    Jsx,

    /// `.ts`
    Ts,

    /// `.tsx`
    Tsx,
}

impl SourceKind {
    /// Every extension the converter accepts, without the leading dot.
    pub const EXTENSIONS: [&'static str; 4] = ["js", "jsx", "ts", "tsx"];

    /// Picks the dialect from a path's extension, or `None` when the file is not a source file.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "js" => Some(SourceKind::Js),
            "jsx" => Some(SourceKind::Jsx),
            "ts" => Some(SourceKind::Ts),
            "tsx" => Some(SourceKind::Tsx),
            _ => None,
        }
    }

    /// Everything is parsed with the TypeScript grammar so existing annotations survive.
    /// JSX stays off for `.ts` files, where `<T>expr` is a type assertion.
    fn syntax(self) -> Syntax {
        Syntax::Typescript(TsConfig {
            tsx: self != SourceKind::Ts,
            decorators: true,
            ..Default::default()
        })
    }
}

/// A parsed module together with what is needed to print it back.
pub struct ParsedModule {
    /// The syntax tree. Rewrites mutate it in place.
    pub module: Module,

    comments: SingleThreadedComments,
    source_map: Lrc<SourceMap>,
}

/// Parses `source` into a module.
///
/// Recoverable errors reported by the parser count as failures too: a file is either parsed
/// cleanly or not converted at all.
pub fn parse(path: &Path, source: String, kind: SourceKind) -> Result<ParsedModule, ParseError> {
    let source_map = Lrc::<SourceMap>::default();
    let comments = SingleThreadedComments::default();
    let fm = source_map.new_source_file(FileName::Real(path.to_path_buf()), source);

    let lexer = Lexer::new(
        kind.syntax(),
        EsVersion::EsNext,
        StringInput::from(&*fm),
        Some(&comments),
    );

    let mut parser = Parser::new_from(lexer);
    let module = parser.parse_module();
    let recovered = parser.take_errors();

    let error = match module {
        Ok(module) => match recovered.into_iter().next() {
            None => {
                return Ok(ParsedModule {
                    module,
                    comments,
                    source_map,
                })
            }
            Some(error) => error,
        },
        Err(error) => error,
    };

    let (line, column) = location(&source_map, error.span());
    Err(ParseError {
        path: path.to_path_buf(),
        line,
        column,
        message: error.kind().msg().into_owned(),
    })
}

/// One-based line and column of `span`, or `(0, 0)` when the parser gave no position.
fn location(source_map: &SourceMap, span: Span) -> (usize, usize) {
    if span.is_dummy() {
        return (0, 0);
    }

    let loc = source_map.lookup_char_pos(span.lo);
    (loc.line, loc.col_display + 1)
}

impl ParsedModule {
    /// Prints the (possibly rewritten) module back to source text, comments included.
    pub fn print(&self) -> io::Result<String> {
        let mut buf = Vec::new();

        {
            let mut cfg = Config::default();
            cfg.target = EsVersion::EsNext;

            let mut emitter = Emitter {
                cfg,
                cm: self.source_map.clone(),
                comments: Some(&self.comments),
                wr: JsWriter::new(self.source_map.clone(), "\n", &mut buf, None),
            };

            emitter.emit_module(&self.module)?;
        }

        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
