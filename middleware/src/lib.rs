//! # middleware
//!
//! Interceptors applied uniformly around every registered command:
//! [`LoggingMiddleware`] records invocations and outcomes, [`AuthMiddleware`]
//! drops invocations from users outside the admin allow-list.

mod middleware;

pub use middleware::{AuthMiddleware, LoggingMiddleware};

#[cfg(test)]
mod test;
