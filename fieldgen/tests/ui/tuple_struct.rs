//! Compile-fail test: #[derive(FieldVisitor)] on a tuple struct.
#![allow(dead_code)]

use fieldgen::FieldVisitor;

#[derive(FieldVisitor)]
struct Pair(u8, u8);

fn main() {}
