//! Shared test helpers for `healthprod-core` integration tests.
//!
//! In-memory implementations of the core ports so that tests can focus on
//! behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod gateway;
pub mod storage;
pub mod voice;
