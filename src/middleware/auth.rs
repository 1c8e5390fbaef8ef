use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::{
    AppState,
    cache,
    config::AuthConfig,
    db::enums::UserRole,
    db::models::{CurrentUser, User},
    db::repositories::UsersRepo,
    error::AppError,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user_id
    pub email: String,
    pub role: UserRole,
    pub exp: u64,    // expiration time
    pub iat: u64,    // issued at
    pub jti: String, // token id, revocable on logout
}

impl Claims {
    /// Seconds until the token expires, zero when already past.
    pub fn remaining_secs(&self) -> u64 {
        self.exp.saturating_sub(unix_now())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[derive(Clone)]
pub struct JwtService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expires_in: u64,
}

impl JwtService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            expires_in: config.access_token_expires_in,
        }
    }

    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    pub fn generate_access_token(&self, user: &User) -> Result<String, AppError> {
        let now = unix_now();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: now + self.expires_in,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        Ok(decode::<Claims>(token, &self.decoding, &Validation::default())?.claims)
    }
}

pub fn bearer_token<B>(request: &Request<B>) -> Option<String> {
    request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Resolves the bearer token into a `CurrentUser` and its `Claims` request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Result<Response, AppError> {
    let token = bearer_token(&request).ok_or_else(|| AppError::auth("Missing bearer token"))?;
    let claims = state.jwt.verify_token(&token)?;

    if cache::is_token_revoked(&state.redis, &claims.jti).await? {
        return Err(AppError::auth("Token has been revoked"));
    }

    let mut user = match cache::cached_user(&state.redis, claims.sub).await {
        Some(user) => user,
        None => {
            let found = {
                let mut conn = state.db.get()?;
                UsersRepo::find_active_by_id(&mut conn, claims.sub)?
            }
            .ok_or_else(|| AppError::auth("User no longer active"))?;
            let user = CurrentUser {
                id: found.id,
                name: found.name,
                email: found.email,
                role: found.role,
                token_id: String::new(),
            };
            cache::cache_user(&state.redis, &user).await;
            user
        }
    };
    user.token_id = claims.jti.clone();

    tracing::debug!(user_id = %user.id, role = %user.role, "Authenticated request");
    request.extensions_mut().insert(user);
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    fn service(secret: &str) -> JwtService {
        JwtService::new(&AuthConfig {
            jwt_secret: secret.to_string(),
            access_token_expires_in: 600,
        })
    }

    fn user() -> User {
        let now = chrono::Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "Priya".to_string(),
            email: "priya@example.com".to_string(),
            role: UserRole::ResourceManager,
            password_hash: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn token_carries_role_and_expiry() {
        let jwt = service("test-secret");
        let user = user();

        let token = jwt.generate_access_token(&user).unwrap();
        let claims = jwt.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, UserRole::ResourceManager);
        assert!(claims.remaining_secs() > 590);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let token = service("one").generate_access_token(&user()).unwrap();

        let err = service("two").verify_token(&token).unwrap_err();

        assert!(matches!(err, AppError::Jwt(_)));
    }

    #[test]
    fn bearer_prefix_is_required() {
        let with = Request::builder()
            .header(AUTHORIZATION, "Bearer abc.def")
            .body(())
            .unwrap();
        let without = Request::builder()
            .header(AUTHORIZATION, "Token abc.def")
            .body(())
            .unwrap();

        assert_eq!(bearer_token(&with).as_deref(), Some("abc.def"));
        assert_eq!(bearer_token(&without), None);
    }
}
