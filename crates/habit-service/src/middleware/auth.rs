//! JWT 认证中间件
//!
//! 验证请求中的 Bearer Token 并将用户身份注入请求扩展

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use uuid::Uuid;

use crate::error::HabitError;
use crate::state::AppState;

/// 已认证的用户身份，由认证中间件写入请求扩展
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

/// 认证中间件
///
/// 从 Authorization header 提取 Bearer Token，验证后将用户 ID
/// 注入请求扩展。健康检查等公开路由跳过验证。
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path();

    // 公开路由列表（不需要认证）
    let public_paths = ["/health", "/ready"];

    if public_paths.contains(&path) {
        return next.run(request).await;
    }

    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => return unauthorized_response("missing bearer token"),
    };

    match state
        .jwt_manager
        .verify_token(token)
        .and_then(|claims| claims.user_id())
    {
        Ok(user_id) => {
            request.extensions_mut().insert(AuthUser(user_id));
            next.run(request).await
        }
        Err(e) => unauthorized_response(&e.to_string()),
    }
}

/// 生成 401 未授权响应
fn unauthorized_response(message: &str) -> Response {
    let body = json!({ "error": message });
    (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = HabitError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(|| HabitError::Unauthorized("missing authentication".to_string()))
    }
}
