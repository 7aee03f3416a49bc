//! Member extraction.

use syn::ext::IdentExt;
use syn::Type;

use crate::model::{DeclarationKind, DeclaredField, Member, TypeDeclaration};

/// Generation-eligible members of `decl`, in declaration order.
///
/// Records keep every component since their all-members constructor needs one
/// value per field. Classes skip zero-sized marker fields (`PhantomData`,
/// `PhantomPinned`), which hold no instance data. Unsupported shapes yield an
/// empty list; rejecting them is left to validation.
pub fn extract_members(decl: &TypeDeclaration) -> Vec<Member> {
    let eligible = |field: &&DeclaredField| match decl.kind {
        DeclarationKind::ImmutableRecord => true,
        DeclarationKind::MutableClass => !is_marker_type(&field.ty),
        _ => false,
    };

    decl.fields
        .iter()
        .filter(eligible)
        .filter_map(|field| field.ident.as_ref().map(|ident| (ident, &field.ty)))
        .enumerate()
        .map(|(index, (ident, ty))| Member {
            ident: ident.clone(),
            name: ident.unraw().to_string(),
            ty: ty.clone(),
            index,
        })
        .collect()
}

fn is_marker_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "PhantomData" || segment.ident == "PhantomPinned"),
        Type::Group(group) => is_marker_type(&group.elem),
        Type::Paren(paren) => is_marker_type(&paren.elem),
        _ => false,
    }
}
