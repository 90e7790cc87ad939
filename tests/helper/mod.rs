//! Shared test utilities

#![allow(dead_code)]

pub mod catalog;

pub use catalog::{create_test_catalog, versions};
