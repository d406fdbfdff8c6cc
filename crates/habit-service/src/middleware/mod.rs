//! HTTP 中间件

mod auth;

pub use auth::{AuthUser, auth_middleware};
