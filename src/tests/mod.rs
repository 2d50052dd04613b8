//! Test modules for the debrev engine.
//!
//! This module contains all testing infrastructure, including:
//! - Unit tests for each component
//! - Property-based tests using proptest
//! - Test fixtures and utilities
//!
//! The test philosophy follows the project standards:
//! - Testing all error paths and edge cases
//! - Property-based testing for the trie traversal contract
//! - Deterministic debounce tests over a paused clock

pub mod session_tests;
pub mod trie_tests;
