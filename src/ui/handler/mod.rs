//! Handler modules for HTTP endpoints.

pub mod http;

// Re-export HTTP handlers
pub use http::{
    delete_message, edit_message, get_messages, health_check, heartbeat, join, list_participants,
    post_message,
};
