//! 习惯打卡服务
//!
//! 提供习惯管理、每日打卡结算（EXP / 等级 / streak / 徽章）、
//! 课程表冲突检测与 AI 周报的 REST API。

pub mod auth;
pub mod coach;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

pub use error::{HabitError, Result};
