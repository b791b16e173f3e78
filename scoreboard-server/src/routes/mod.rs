//! HTTP route handlers

pub mod matches;
pub mod participants;
pub mod standings;
pub mod status;
pub mod tournaments;
