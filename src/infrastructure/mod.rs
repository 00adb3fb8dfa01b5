//! Infrastructure layer: concrete store implementations and DTOs.

pub mod dto;
pub mod repository;
