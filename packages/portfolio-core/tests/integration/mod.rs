//! Integration test suite for portfolio documents.
//!
//! 1. Schema management through the document
//! 2. Entry lifecycle
//! 3. Randomized schema operation sequences
//! 4. Configuration loading

pub mod helpers;
pub mod property_tests;
pub mod schema_tests;
