use std::collections::HashSet;

use swc_common::{Spanned, DUMMY_SP};
use swc_ecma_ast::{
    ArrowExpr, BindingIdent, BlockStmt, BlockStmtOrExpr, Constructor, Decl, Expr, ExprStmt,
    Function, GetterProp, Ident, Invalid, Lit, ParamOrTsParamProp, Pat, ReturnStmt, SetterProp,
    Stmt, TsParamPropParam, VarDecl, VarDeclKind, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::declare::annotation_slot;
use crate::infer::{default_annotation, AnnotationKind};

/// Name given to the parameter that replaces a destructuring pattern.
pub const SYNTHETIC_PARAM: &str = "params";

/// How a parameter is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    /// A plain name, possibly with a default value. Annotated `any` when unannotated.
    Simple,

    /// A rest parameter. Annotated `any[]` when unannotated.
    Rest,

    /// An object or array pattern, possibly with a default value. Lowered into a
    /// [`SyntheticBinding`].
    Structural,

    /// Anything else; left alone.
    Opaque,
}

impl Parameter {
    /// Classifies a parameter pattern.
    pub fn classify(pat: &Pat) -> Self {
        match pat {
            Pat::Ident(_) => Parameter::Simple,
            Pat::Rest(_) => Parameter::Rest,
            Pat::Object(_) | Pat::Array(_) => Parameter::Structural,
            Pat::Assign(assign) => match &*assign.left {
                Pat::Ident(_) => Parameter::Simple,
                Pat::Object(_) | Pat::Array(_) => Parameter::Structural,
                _ => Parameter::Opaque,
            },
            _ => Parameter::Opaque,
        }
    }
}

/// `const <pattern> = <source>;`, re-binding the names of a lowered destructuring parameter.
#[derive(Debug, Clone)]
pub struct SyntheticBinding {
    /// The original pattern, including its own annotation if it had one.
    pub pattern: Pat,

    /// The synthetic parameter the pattern is bound from.
    pub source: Ident,
}

impl SyntheticBinding {
    /// Builds the declaration statement.
    pub fn into_stmt(self) -> Stmt {
        Stmt::Decl(Decl::Var(Box::new(VarDecl {
            span: DUMMY_SP,
            kind: VarDeclKind::Const,
            declare: false,
            decls: vec![VarDeclarator {
                span: DUMMY_SP,
                name: self.pattern,
                init: Some(Box::new(Expr::Ident(self.source))),
                definite: false,
            }],
        })))
    }
}

/// Every identifier appearing anywhere in a function, bound or not.
#[derive(Default)]
struct IdentCollector {
    seen: HashSet<String>,
}

impl Visit for IdentCollector {
    fn visit_ident(&mut self, ident: &Ident) {
        self.seen.insert(ident.sym.to_string());
    }
}

/// Hands out `params`, `params2`, `params3`, ... skipping names the function already uses.
struct SyntheticNames {
    taken: HashSet<String>,
    next: usize,
}

impl SyntheticNames {
    fn for_node<N: VisitWith<IdentCollector>>(node: &N) -> Self {
        let mut collector = IdentCollector::default();
        node.visit_with(&mut collector);
        Self {
            taken: collector.seen,
            next: 1,
        }
    }

    fn fresh(&mut self) -> Ident {
        loop {
            let candidate = match self.next {
                1 => SYNTHETIC_PARAM.to_string(),
                n => format!("{SYNTHETIC_PARAM}{n}"),
            };
            self.next += 1;

            if self.taken.insert(candidate.clone()) {
                return Ident::new(candidate.into(), DUMMY_SP);
            }
        }
    }
}

/// Replaces the pattern in `slot` with a fresh identifier typed `any` and returns the binding
/// that restores the pattern's names. An annotation on the pattern stays with the binding.
fn lower_structural(slot: &mut Pat, names: &mut SyntheticNames) -> SyntheticBinding {
    let source = names.fresh();
    let pattern = std::mem::replace(
        slot,
        Pat::Ident(BindingIdent {
            id: source.clone(),
            type_ann: Some(AnnotationKind::Unknown.to_type_ann()),
        }),
    );

    SyntheticBinding { pattern, source }
}

/// Annotates a simple parameter, looking through a default value.
fn annotate_simple(pat: &mut Pat) {
    match pat {
        Pat::Ident(binding) => default_annotation(&mut binding.type_ann, AnnotationKind::Unknown),
        Pat::Assign(assign) => annotate_simple(&mut assign.left),
        _ => {}
    }
}

/// Annotates one parameter, lowering it if it is structural.
fn rewrite_param(pat: &mut Pat, names: &mut SyntheticNames) -> Option<SyntheticBinding> {
    match Parameter::classify(pat) {
        Parameter::Simple => {
            annotate_simple(pat);
            None
        }

        Parameter::Rest => {
            if let Some(slot) = annotation_slot(pat) {
                default_annotation(slot, AnnotationKind::UnknownArray);
            }
            None
        }

        // A default value stays on the synthetic parameter.
        Parameter::Structural => Some(match pat {
            Pat::Assign(assign) => lower_structural(&mut assign.left, names),
            _ => lower_structural(pat, names),
        }),

        Parameter::Opaque => None,
    }
}

/// Rewrites parameters in order, returning the synthetic bindings in the same order.
fn rewrite_params<'a>(
    params: impl IntoIterator<Item = &'a mut Pat>,
    names: &mut SyntheticNames,
) -> Vec<SyntheticBinding> {
    params
        .into_iter()
        .filter_map(|pat| rewrite_param(pat, names))
        .collect()
}

fn is_directive(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Expr(ExprStmt { expr, .. }) => matches!(&**expr, Expr::Lit(Lit::Str(_))),
        _ => false,
    }
}

/// Inserts the bindings, in order, right after the directive prologue of `stmts`.
fn prepend_bindings(stmts: &mut Vec<Stmt>, bindings: Vec<SyntheticBinding>) {
    if bindings.is_empty() {
        return;
    }

    let at = stmts.iter().take_while(|stmt| is_directive(stmt)).count();
    let rest = stmts.split_off(at);
    stmts.extend(bindings.into_iter().map(SyntheticBinding::into_stmt));
    stmts.extend(rest);
}

/// Rewrites the signature of a function, method, getter or setter body.
///
/// `annotate_return` is false for setters, which may not declare a return type.
pub fn annotate_function(function: &mut Function, annotate_return: bool) {
    let mut names = SyntheticNames::for_node(&*function);
    let params = function.params.iter_mut().map(|param| &mut param.pat);
    let bindings = rewrite_params(params, &mut names);

    if let Some(body) = &mut function.body {
        prepend_bindings(&mut body.stmts, bindings);
    }

    if annotate_return {
        default_annotation(&mut function.return_type, AnnotationKind::Unknown);
    }
}

/// Rewrites the signature of an arrow function.
///
/// An expression body that needs synthetic bindings becomes a block ending in `return`.
pub fn annotate_arrow(arrow: &mut ArrowExpr) {
    let mut names = SyntheticNames::for_node(&*arrow);
    let bindings = rewrite_params(arrow.params.iter_mut(), &mut names);

    if !bindings.is_empty() {
        let body = &mut *arrow.body;
        match body {
            BlockStmtOrExpr::BlockStmt(block) => prepend_bindings(&mut block.stmts, bindings),
            BlockStmtOrExpr::Expr(expr) => {
                let span = expr.span();
                let arg = std::mem::replace(expr, Box::new(Expr::Invalid(Invalid { span })));

                let mut stmts: Vec<Stmt> = bindings
                    .into_iter()
                    .map(SyntheticBinding::into_stmt)
                    .collect();
                stmts.push(Stmt::Return(ReturnStmt {
                    span,
                    arg: Some(arg),
                }));

                *body = BlockStmtOrExpr::BlockStmt(BlockStmt { span, stmts });
            }
        }
    }

    default_annotation(&mut arrow.return_type, AnnotationKind::Unknown);
}

/// Rewrites the parameters of a class constructor. Constructors take no return annotation.
pub fn annotate_constructor(constructor: &mut Constructor) {
    let mut names = SyntheticNames::for_node(&*constructor);

    for param in &mut constructor.params {
        if let ParamOrTsParamProp::TsParamProp(prop) = param {
            match &mut prop.param {
                TsParamPropParam::Ident(binding) => {
                    default_annotation(&mut binding.type_ann, AnnotationKind::Unknown)
                }
                TsParamPropParam::Assign(assign) => annotate_simple(&mut assign.left),
            }
        }
    }

    let bindings = rewrite_params(
        constructor.params.iter_mut().filter_map(|param| match param {
            ParamOrTsParamProp::Param(param) => Some(&mut param.pat),
            ParamOrTsParamProp::TsParamProp(_) => None,
        }),
        &mut names,
    );

    if let Some(body) = &mut constructor.body {
        prepend_bindings(&mut body.stmts, bindings);
    }
}

/// Annotates the return type of an object literal getter.
pub fn annotate_getter(getter: &mut GetterProp) {
    default_annotation(&mut getter.type_ann, AnnotationKind::Unknown);
}

/// Rewrites the parameter of an object literal setter. Setters take no return annotation.
pub fn annotate_setter(setter: &mut SetterProp) {
    let mut names = SyntheticNames::for_node(&*setter);
    let bindings = rewrite_params(std::iter::once(&mut *setter.param), &mut names);

    if let Some(body) = &mut setter.body {
        prepend_bindings(&mut body.stmts, bindings);
    }
}
