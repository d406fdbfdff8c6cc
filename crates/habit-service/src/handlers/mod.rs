//! HTTP API 处理器

pub mod checkin;
pub mod coach;
pub mod habit;
pub mod profile;
pub mod schedule;
