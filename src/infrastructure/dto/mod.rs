//! Data transfer objects for the HTTP boundary.

pub mod http;
