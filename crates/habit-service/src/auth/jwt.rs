//! JWT Token 验证
//!
//! Token 由外部身份服务签发，本服务只做验证与解析。
//! sub 字段是用户 UUID，所有数据访问都以它为租户边界。

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::HabitError;
use strive_shared::config::AuthConfig;

/// JWT Claims（Token 载荷）
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// 用户 ID（UUID 字符串）
    pub sub: String,
    /// 过期时间
    pub exp: i64,
    /// 签发时间
    #[serde(default)]
    pub iat: i64,
    /// 签发者，配置了 issuer 时校验
    #[serde(default)]
    pub iss: Option<String>,
}

impl Claims {
    /// 解析 sub 为用户 UUID
    pub fn user_id(&self) -> Result<Uuid, HabitError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| HabitError::Unauthorized("invalid subject in token".to_string()))
    }
}

/// JWT 管理器
#[derive(Clone)]
pub struct JwtManager {
    decoding_key: DecodingKey,
    issuer: Option<String>,
}

impl JwtManager {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
        }
    }

    /// 验证并解析 Token
    pub fn verify_token(&self, token: &str) -> Result<Claims, HabitError> {
        let mut validation = Validation::default();
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        HabitError::Unauthorized("token expired".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        HabitError::Unauthorized("invalid token".to_string())
                    }
                    _ => HabitError::Unauthorized(format!("token verification failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            issuer: None,
        }
    }

    fn issue(secret: &str, claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn valid_claims() -> Claims {
        let now = Utc::now();
        Claims {
            sub: "a1a2a3a4-b1b2-c1c2-d1d2-e1e2e3e4e5e6".to_string(),
            exp: (now + Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
            iss: None,
        }
    }

    #[test]
    fn test_verify_valid_token() {
        let manager = JwtManager::new(&test_config());
        let token = issue("test-secret", &valid_claims());

        let claims = manager.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "a1a2a3a4-b1b2-c1c2-d1d2-e1e2e3e4e5e6");
        assert!(claims.user_id().is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let manager = JwtManager::new(&test_config());
        let token = issue("other-secret", &valid_claims());
        assert!(manager.verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = JwtManager::new(&test_config());
        let mut claims = valid_claims();
        claims.exp = (Utc::now() - Duration::hours(1)).timestamp();
        let token = issue("test-secret", &claims);

        let err = manager.verify_token(&token).unwrap_err();
        assert!(matches!(err, HabitError::Unauthorized(_)));
        assert!(err.to_string().contains("expired"));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let manager = JwtManager::new(&test_config());
        assert!(manager.verify_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let manager = JwtManager::new(&test_config());
        let mut claims = valid_claims();
        claims.sub = "not-a-uuid".to_string();
        let token = issue("test-secret", &claims);

        let claims = manager.verify_token(&token).unwrap();
        assert!(claims.user_id().is_err());
    }
}
