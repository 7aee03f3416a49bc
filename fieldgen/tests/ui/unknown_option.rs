//! Compile-fail test: unsupported key in #[field_mapper(..)].
#![allow(dead_code)]

use fieldgen::FieldMapper;

#[derive(FieldMapper)]
#[field_mapper(prefix = "Copy")]
struct Item {
    sku: String,
}

fn main() {}
