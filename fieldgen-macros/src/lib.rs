use fieldgen_codegen::{ArtifactKind, expand_derive};
use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Generate `<Type>FieldNames`, a table of `&'static str` constants, one per field.
///
/// ```text
/// #[derive(FieldNames)]
/// #[field_names(name = "OrderKeys", visibility = "module")]
/// struct Order { id: String, order_date: u64 }
///
/// assert_eq!(OrderKeys::order_date, "order_date");
/// ```
#[proc_macro_derive(FieldNames, attributes(fieldgen, field_names))]
pub fn derive_field_names(input: TokenStream) -> TokenStream {
    expand(input, ArtifactKind::FieldNames)
}

/// Generate `<Type>Fields`, an enum with one SCREAMING_SNAKE variant per field.
///
/// Each variant knows the field name it stands for (`OrderFields::ORDER_DATE.field_name()`
/// is `"order_date"`), and the enum implements `fieldgen::FieldEnum`, `Display`
/// and `FromStr`.
#[proc_macro_derive(FieldEnum, attributes(fieldgen, field_enum))]
pub fn derive_field_enum(input: TokenStream) -> TokenStream {
    expand(input, ArtifactKind::FieldEnum)
}

/// Generate `<Type>FieldVisitor`, bound to one instance, with a callback per
/// field and `visit_all()` running them in declaration order.
///
/// ```text
/// let mut visitor = OrderFieldVisitor::builder(&order)
///     .visit_id(|id| println!("{id}"))
///     .build();
/// visitor.visit_all();
/// ```
#[proc_macro_derive(FieldVisitor, attributes(fieldgen, field_visitor))]
pub fn derive_field_visitor(input: TokenStream) -> TokenStream {
    expand(input, ArtifactKind::FieldVisitor)
}

/// Generate `<Type>FieldMapper`, bound to one source instance.
///
/// For plain structs, `map_all_to(&mut target)` hands each field to a `set_<field>`
/// callback that decides what to write into the target. Structs marked
/// `#[fieldgen(record)]` get `map_<field>` callbacks returning the new value and
/// `map_all()` building a fresh instance instead.
#[proc_macro_derive(FieldMapper, attributes(fieldgen, field_mapper))]
pub fn derive_field_mapper(input: TokenStream) -> TokenStream {
    expand(input, ArtifactKind::FieldMapper)
}

fn expand(input: TokenStream, kind: ArtifactKind) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_derive(&input, kind).into()
}
