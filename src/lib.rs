//! Single-room chat backend library.
//!
//! Participants join a shared room, exchange broadcast and private
//! messages, and are evicted after a period of inactivity by a
//! background sweep. Layered: domain (room store, visibility, presence
//! rules), usecase (one struct per operation), infrastructure (in-memory
//! store, DTOs), ui (axum HTTP boundary), plus the eviction scheduler.

pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod logger;
pub mod scheduler;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::{ServerConfig, run as run_server};
