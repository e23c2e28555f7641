use swc_ecma_ast::{
    ArrowExpr, ClassMethod, Constructor, ExportAll, ForHead, ForInStmt, ForOfStmt, Function,
    GetterProp, ImportDecl, JSXElement, JSXFragment, MethodKind, Module, NamedExport,
    PrivateMethod, SetterProp, VarDeclarator,
};
use swc_ecma_visit::{VisitMut, VisitMutWith};

use crate::declare::{annotate_declarator, sanitize_loop_head};
use crate::imports::normalize_specifier;
use crate::markup::{MarkupDetector, OutputVariant};
use crate::params::{
    annotate_arrow, annotate_constructor, annotate_function, annotate_getter, annotate_setter,
};

/// Rewrites a module in a single pre-order pass.
///
/// Each handler rewrites its node on the way in and then continues into the children, so
/// statements a handler inserts are visited like any other. Node kinds without a handler are
/// walked through unchanged.
#[derive(Debug, Default)]
pub struct Annotator {
    markup: MarkupDetector,
}

impl Annotator {
    /// Creates an annotator for one module.
    pub fn new() -> Self {
        Self::default()
    }

    /// The output variant decided by the traversal so far.
    pub fn variant(&self) -> OutputVariant {
        self.markup.variant()
    }

    /// Visits the function of a class method. Setters get no return annotation.
    fn visit_method_function(&mut self, function: &mut Function, is_setter: bool) {
        annotate_function(function, !is_setter);
        function.visit_mut_children_with(self);
    }

    /// Visits a `for-in`/`for-of` head without annotating its declarators.
    fn visit_loop_head(&mut self, head: &mut ForHead) {
        sanitize_loop_head(head);

        match head {
            ForHead::VarDecl(decl) => {
                for declarator in &mut decl.decls {
                    declarator.name.visit_mut_with(self);
                    declarator.init.visit_mut_with(self);
                }
            }
            other => other.visit_mut_with(self),
        }
    }
}

impl VisitMut for Annotator {
    fn visit_mut_var_declarator(&mut self, n: &mut VarDeclarator) {
        annotate_declarator(n);
        n.visit_mut_children_with(self);
    }

    fn visit_mut_for_in_stmt(&mut self, n: &mut ForInStmt) {
        self.visit_loop_head(&mut n.left);
        n.right.visit_mut_with(self);
        n.body.visit_mut_with(self);
    }

    fn visit_mut_for_of_stmt(&mut self, n: &mut ForOfStmt) {
        self.visit_loop_head(&mut n.left);
        n.right.visit_mut_with(self);
        n.body.visit_mut_with(self);
    }

    fn visit_mut_function(&mut self, n: &mut Function) {
        annotate_function(n, true);
        n.visit_mut_children_with(self);
    }

    fn visit_mut_class_method(&mut self, n: &mut ClassMethod) {
        let is_setter = n.kind == MethodKind::Setter;
        n.key.visit_mut_with(self);
        self.visit_method_function(&mut n.function, is_setter);
    }

    fn visit_mut_private_method(&mut self, n: &mut PrivateMethod) {
        let is_setter = n.kind == MethodKind::Setter;
        n.key.visit_mut_with(self);
        self.visit_method_function(&mut n.function, is_setter);
    }

    fn visit_mut_arrow_expr(&mut self, n: &mut ArrowExpr) {
        annotate_arrow(n);
        n.visit_mut_children_with(self);
    }

    fn visit_mut_constructor(&mut self, n: &mut Constructor) {
        annotate_constructor(n);
        n.visit_mut_children_with(self);
    }

    fn visit_mut_getter_prop(&mut self, n: &mut GetterProp) {
        annotate_getter(n);
        n.visit_mut_children_with(self);
    }

    fn visit_mut_setter_prop(&mut self, n: &mut SetterProp) {
        annotate_setter(n);
        n.visit_mut_children_with(self);
    }

    fn visit_mut_import_decl(&mut self, n: &mut ImportDecl) {
        normalize_specifier(&mut n.src);
    }

    fn visit_mut_export_all(&mut self, n: &mut ExportAll) {
        normalize_specifier(&mut n.src);
    }

    fn visit_mut_named_export(&mut self, n: &mut NamedExport) {
        if let Some(src) = &mut n.src {
            normalize_specifier(src);
        }
    }

    fn visit_mut_jsx_element(&mut self, n: &mut JSXElement) {
        self.markup.observe();
        n.visit_mut_children_with(self);
    }

    fn visit_mut_jsx_fragment(&mut self, n: &mut JSXFragment) {
        self.markup.observe();
        n.visit_mut_children_with(self);
    }
}

/// Runs every rewrite over `module` in place and returns the output variant it calls for.
pub fn annotate_module(module: &mut Module) -> OutputVariant {
    let mut annotator = Annotator::new();
    module.visit_mut_with(&mut annotator);
    annotator.variant()
}
