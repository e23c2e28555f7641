use swc_ecma_ast::{ForHead, Pat, TsTypeAnn, VarDeclarator};

use crate::infer::{default_annotation, infer_annotation};

/// Returns the annotation slot of a binding pattern, if its kind has one.
///
/// Identifiers, object, array and rest patterns carry a slot. Assignment patterns and
/// expression patterns do not and yield `None`.
pub fn annotation_slot(pat: &mut Pat) -> Option<&mut Option<Box<TsTypeAnn>>> {
    match pat {
        Pat::Ident(binding) => Some(&mut binding.type_ann),
        Pat::Array(array) => Some(&mut array.type_ann),
        Pat::Object(object) => Some(&mut object.type_ann),
        Pat::Rest(rest) => Some(&mut rest.type_ann),
        _ => None,
    }
}

/// Annotates a declarator from the shape of its initializer.
///
/// An annotation that is already present is kept as is. Callers must not pass declarators
/// of a `for-in`/`for-of` head; see [`sanitize_loop_head`].
pub fn annotate_declarator(declarator: &mut VarDeclarator) {
    let kind = infer_annotation(declarator.init.as_deref());
    if let Some(slot) = annotation_slot(&mut declarator.name) {
        default_annotation(slot, kind);
    }
}

/// Removes every annotation from the declarators of a `for-in`/`for-of` head, which the
/// grammar does not allow there.
pub fn sanitize_loop_head(head: &mut ForHead) {
    if let ForHead::VarDecl(decl) = head {
        for declarator in &mut decl.decls {
            if let Some(slot) = annotation_slot(&mut declarator.name) {
                *slot = None;
            }
        }
    }
}
