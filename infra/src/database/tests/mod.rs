//! Integration tests for the database layer.
//!
//! These tests require a running MySQL instance and are ignored by
//! default; run them with `cargo test -- --ignored` and a
//! `DATABASE_URL` pointing at a scratch database.

mod connection_tests;
