use crate::{
    config::Config,
    error::{AppError, Result},
};
use axum::{
    async_trait,
    extract::FromRequestParts,
    headers::{authorization::Bearer, Authorization},
    http::request::Parts,
    Extension, RequestPartsExt, TypedHeader,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Verifies bearer tokens issued by Rainbow-Auth. Token issuance and the
/// rest of the account lifecycle live in that service, not here.
#[derive(Clone)]
pub struct AuthService {
    config: Config,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // 用户名
    pub exp: i64,    // 过期时间
    pub iat: i64,    // 签发时间
}

impl AuthService {
    pub async fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
        })
    }

    pub fn verify_jwt(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.config.jwt_secret.as_ref());
        let validation = Validation::new(Algorithm::HS256);

        match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(token_data) => {
                debug!("JWT token verified for user: {}", token_data.claims.sub);
                Ok(token_data.claims)
            }
            Err(e) => {
                warn!("JWT verification failed: {}", e);
                Err(AppError::Authentication("Invalid token".to_string()))
            }
        }
    }
}

/// The acting user's username, resolved from the Authorization header.
/// Routes that take this extractor are authenticated; everything else is
/// public.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::unauthorized("Missing authorization header"))?;

        let Extension(auth_service): Extension<AuthService> = parts
            .extract::<Extension<AuthService>>()
            .await
            .map_err(|_| AppError::internal("Auth service not found in request extensions"))?;

        let claims = auth_service.verify_jwt(bearer.token())?;
        Ok(CurrentUser(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn test_config() -> Config {
        Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            environment: "test".to_string(),
            log_level: "debug".to_string(),
            database_url: "localhost:8000".to_string(),
            database_namespace: "rainbow".to_string(),
            database_name: "board_test".to_string(),
            database_username: "root".to_string(),
            database_password: "root".to_string(),
            jwt_secret: "test-secret".to_string(),
            cors_allowed_origins: "http://localhost:3001".to_string(),
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_verify_jwt_roundtrip() {
        let service = AuthService::new(&test_config()).await.unwrap();
        let now = chrono::Utc::now().timestamp();
        let token = sign(
            &Claims {
                sub: "kefah".to_string(),
                exp: now + 3600,
                iat: now,
            },
            "test-secret",
        );

        let claims = service.verify_jwt(&token).unwrap();
        assert_eq!(claims.sub, "kefah");
    }

    #[tokio::test]
    async fn test_verify_jwt_rejects_wrong_secret() {
        let service = AuthService::new(&test_config()).await.unwrap();
        let now = chrono::Utc::now().timestamp();
        let token = sign(
            &Claims {
                sub: "kefah".to_string(),
                exp: now + 3600,
                iat: now,
            },
            "other-secret",
        );

        assert!(matches!(
            service.verify_jwt(&token),
            Err(AppError::Authentication(_))
        ));
    }

    #[tokio::test]
    async fn test_verify_jwt_rejects_expired_token() {
        let service = AuthService::new(&test_config()).await.unwrap();
        let now = chrono::Utc::now().timestamp();
        let token = sign(
            &Claims {
                sub: "kefah".to_string(),
                exp: now - 3600,
                iat: now - 7200,
            },
            "test-secret",
        );

        assert!(service.verify_jwt(&token).is_err());
    }
}
