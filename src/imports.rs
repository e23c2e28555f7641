use swc_ecma_ast::Str;

use crate::parse::SourceKind;

/// Splits a recognized source extension off `specifier`, returning the stem and the
/// extension (without its dot). At most one extension is removed.
pub fn strip_source_extension(specifier: &str) -> Option<(&str, &'static str)> {
    SourceKind::EXTENSIONS.iter().find_map(|ext| {
        specifier
            .strip_suffix(ext)
            .and_then(|rest| rest.strip_suffix('.'))
            .map(|stem| (stem, *ext))
    })
}

/// Drops a recognized source extension from a module specifier literal.
///
/// The raw token is trimmed along with the value so the printer keeps the original quotes.
pub fn normalize_specifier(src: &mut Str) {
    let Some((stem, ext)) = strip_source_extension(&src.value) else {
        return;
    };
    let stem = stem.to_string();
    let suffix = format!(".{ext}");

    let raw = src.raw.as_ref().and_then(|raw| {
        let quote = raw.chars().last()?;
        let inner = raw.strip_suffix(quote)?.strip_suffix(suffix.as_str())?;
        Some(format!("{inner}{quote}"))
    });

    tracing::trace!(from = %src.value, to = %stem, "normalized module specifier");
    src.value = stem.into();
    src.raw = raw.map(Into::into);
}
