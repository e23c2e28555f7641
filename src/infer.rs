use std::fmt::Display;

use swc_common::DUMMY_SP;
use swc_ecma_ast::{
    Expr, Ident, Lit, TsArrayType, TsEntityName, TsKeywordType, TsKeywordTypeKind, TsType,
    TsTypeAnn, TsTypeParamInstantiation, TsTypeRef,
};

/// Represents an annotation the converter knows how to insert.
///
/// The set is closed: there are no numeric subtypes, unions or element types. Anything the
/// literal shape of an expression cannot tell us becomes [`AnnotationKind::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnotationKind {
    /// The `any` type. This is the default annotation.
    #[default]
    Unknown,

    /// The `number` type.
    Number,

    /// The `string` type.
    String,

    /// The `boolean` type.
    Boolean,

    /// An array of unknown elements (ie, `any[]`).
    UnknownArray,

    /// An object with unknown values (ie, `Record<string, any>`).
    UnknownRecord,
}

impl Display for AnnotationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnotationKind::Unknown => write!(f, "any"),
            AnnotationKind::Number => write!(f, "number"),
            AnnotationKind::String => write!(f, "string"),
            AnnotationKind::Boolean => write!(f, "boolean"),
            AnnotationKind::UnknownArray => write!(f, "any[]"),
            AnnotationKind::UnknownRecord => write!(f, "Record<string, any>"),
        }
    }
}

impl AnnotationKind {
    /// Builds the [`TsType`] node for this annotation.
    pub fn to_ts_type(self) -> TsType {
        match self {
            AnnotationKind::Unknown => keyword(TsKeywordTypeKind::TsAnyKeyword),
            AnnotationKind::Number => keyword(TsKeywordTypeKind::TsNumberKeyword),
            AnnotationKind::String => keyword(TsKeywordTypeKind::TsStringKeyword),
            AnnotationKind::Boolean => keyword(TsKeywordTypeKind::TsBooleanKeyword),
            AnnotationKind::UnknownArray => TsType::TsArrayType(TsArrayType {
                span: DUMMY_SP,
                elem_type: Box::new(keyword(TsKeywordTypeKind::TsAnyKeyword)),
            }),
            AnnotationKind::UnknownRecord => TsType::TsTypeRef(TsTypeRef {
                span: DUMMY_SP,
                type_name: TsEntityName::Ident(Ident::new("Record".into(), DUMMY_SP)),
                type_params: Some(Box::new(TsTypeParamInstantiation {
                    span: DUMMY_SP,
                    params: vec![
                        Box::new(keyword(TsKeywordTypeKind::TsStringKeyword)),
                        Box::new(keyword(TsKeywordTypeKind::TsAnyKeyword)),
                    ],
                })),
            }),
        }
    }

    /// Builds a `: T` annotation ready to be stored in an annotation slot.
    pub fn to_type_ann(self) -> Box<TsTypeAnn> {
        Box::new(TsTypeAnn {
            span: DUMMY_SP,
            type_ann: Box::new(self.to_ts_type()),
        })
    }
}

fn keyword(kind: TsKeywordTypeKind) -> TsType {
    TsType::TsKeywordType(TsKeywordType {
        span: DUMMY_SP,
        kind,
    })
}

/// Guesses an annotation from the lexical shape of an initializer.
///
/// Only literals are recognized. Calls, identifiers, operators and a missing initializer all
/// give [`AnnotationKind::Unknown`]; no value is ever evaluated.
pub fn infer_annotation(init: Option<&Expr>) -> AnnotationKind {
    match init {
        Some(Expr::Paren(paren)) => infer_annotation(Some(&paren.expr)),
        Some(Expr::Lit(Lit::Num(_))) => AnnotationKind::Number,
        Some(Expr::Lit(Lit::Str(_))) => AnnotationKind::String,
        Some(Expr::Lit(Lit::Bool(_))) => AnnotationKind::Boolean,
        Some(Expr::Array(_)) => AnnotationKind::UnknownArray,
        Some(Expr::Object(_)) => AnnotationKind::UnknownRecord,
        _ => AnnotationKind::Unknown,
    }
}

/// Stores `kind` in `slot` unless the slot already holds an annotation.
pub(crate) fn default_annotation(slot: &mut Option<Box<TsTypeAnn>>, kind: AnnotationKind) {
    if slot.is_none() {
        *slot = Some(kind.to_type_ann());
    }
}
