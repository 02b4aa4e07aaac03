//! Registry 핸들러

pub mod api;
pub mod health;
