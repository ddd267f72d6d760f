//! Integration tests for mvc_core
//!
//! These tests drive the full dispatch pipeline against a temporary view
//! tree on disk. Run with: cargo test --test integration

mod helpers;

mod dispatch;
