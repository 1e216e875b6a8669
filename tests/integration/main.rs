//! Integration tests for urwarden

mod blocklist_tests;
mod concurrency_tests;
mod evaluator_tests;
