//! Test doubles for the trait seams. Kept in the library so integration
//! tests and frontend crates can share them.

pub mod mocks;
