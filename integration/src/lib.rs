//! Integration test crate for the Support Platform admin client.
//!
//! The tests under `tests/` drive the full session lifecycle against a mock
//! backend; this library target exists only so Cargo treats the package as
//! a crate.
