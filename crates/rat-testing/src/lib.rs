//! Testing infrastructure for rat tests.
//!
//! - `FakeGraph`: in-memory graph server implementing `GraphApi`, with
//!   failure injection and call recording
//! - `fixtures`: AST part and node builders

pub mod fake;
pub mod fixtures;

pub use fake::{Call, FakeGraph, Op};
