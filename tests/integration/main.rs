//! Integration tests for the specrun CLI
//!
//! These tests drive the compiled binary against temporary resource trees
//! and archives, covering resolve, probe and plan end to end.
