//! Shared helpers for the integration tests. Included by each test file.
#![allow(dead_code)]

pub mod fixtures;
