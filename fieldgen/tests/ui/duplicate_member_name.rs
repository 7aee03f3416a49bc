//! Compile-fail test: two members differing only in case.
#![allow(dead_code, non_snake_case)]

use fieldgen::FieldNames;

#[derive(FieldNames)]
struct Shipment {
    id: String,
    Id: String,
}

fn main() {}
