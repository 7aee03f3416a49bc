//! Compile-fail test: #[derive(FieldEnum)] on an enum.
#![allow(dead_code)]

use fieldgen::FieldEnum;

#[derive(FieldEnum)]
enum State {
    Open,
    Closed,
}

fn main() {}
