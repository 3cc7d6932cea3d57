//! Unit test module
//!
//! Middleware unit tests live here, separate from source files.
//! Tests interact with middleware via public APIs.

mod auth_middleware_test;
