//! Field enums generated by `#[derive(FieldEnum)]`.

use fieldgen::{FieldEnum, FieldError};
use std::collections::BTreeSet;

#[allow(dead_code)]
#[derive(FieldEnum)]
struct Item {
    sku: String,
    quantity: u32,
}

#[allow(dead_code, non_snake_case)]
#[derive(FieldEnum)]
struct Account {
    accountId: u64,
    myAPIKey: String,
    created_at: u64,
}

#[test]
fn test_variants_follow_declaration_order() {
    assert_eq!(ItemFields::ALL, &[ItemFields::SKU, ItemFields::QUANTITY]);
    assert_eq!(ItemFields::SKU.field_name(), "sku");
    assert_eq!(ItemFields::QUANTITY.field_name(), "quantity");
    assert_eq!(FieldEnum::index(&ItemFields::QUANTITY), 1);
    assert_eq!(<ItemFields as FieldEnum>::TYPE_NAME, "Item");
}

#[test]
fn test_variant_names_are_screaming_snake() {
    let names: Vec<_> = AccountFields::iter().map(|field| format!("{field:?}")).collect();
    assert_eq!(names, vec!["ACCOUNT_ID", "MY_API_KEY", "CREATED_AT"]);
    assert_eq!(AccountFields::MY_API_KEY.field_name(), "myAPIKey");
}

#[test]
fn test_display_and_from_str_use_member_names() {
    assert_eq!(AccountFields::ACCOUNT_ID.to_string(), "accountId");
    assert_eq!("myAPIKey".parse::<AccountFields>(), Ok(AccountFields::MY_API_KEY));
    assert_eq!(
        "MY_API_KEY".parse::<AccountFields>(),
        Err(FieldError::UnknownField {
            type_name: "Account",
            name: "MY_API_KEY".to_string(),
        })
    );
}

#[test]
fn test_variants_are_ordered_and_hashable() {
    assert!(ItemFields::SKU < ItemFields::QUANTITY);

    let selected: BTreeSet<_> = ["quantity", "sku", "quantity"]
        .iter()
        .map(|name| ItemFields::from_field_name(name).unwrap())
        .collect();
    assert_eq!(selected.into_iter().collect::<Vec<_>>(), ItemFields::ALL);
}
