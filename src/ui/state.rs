//! Server state shared across request handlers.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::RoomRepository;

/// Query parameters for `GET /messages`
#[derive(Debug, Deserialize)]
pub struct ListMessagesQuery {
    /// Raw limit string; must parse to a positive integer when present
    pub limit: Option<String>,
}

/// Shared application state
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn RoomRepository>,
}
