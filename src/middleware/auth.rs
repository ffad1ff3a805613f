//! Authentication middleware

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::AppError, models::SystemRole, services::AuthService, state::AppState};

/// Authenticated user extracted from JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
    pub role: String,
}

impl AuthenticatedUser {
    pub fn system_role(&self) -> Option<SystemRole> {
        SystemRole::from_str(&self.role)
    }

    /// Fail with `Forbidden` unless the user holds one of `allowed`
    pub fn require_role(&self, allowed: &[SystemRole]) -> Result<SystemRole, AppError> {
        match self.system_role() {
            Some(role) if allowed.contains(&role) => Ok(role),
            _ => Err(AppError::Forbidden("Insufficient permissions".to_string())),
        }
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        self.require_role(&[SystemRole::Admin])
            .map(|_| ())
            .map_err(|_| AppError::Forbidden("Admin access required".to_string()))
    }

    pub fn require_jury(&self) -> Result<(), AppError> {
        self.require_role(&[SystemRole::Jury])
            .map(|_| ())
            .map_err(|_| AppError::Forbidden("Jury access required".to_string()))
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let Some(auth_header) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        debug!(path = %path, "Auth failed: No Authorization header");
        return Err(AppError::Unauthorized);
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        debug!(path = %path, "Auth failed: Invalid Authorization format (expected 'Bearer <token>')");
        return Err(AppError::Unauthorized);
    };

    let claims = AuthService::verify_token(token, &state.config().jwt.secret).map_err(|e| {
        debug!(path = %path, error = ?e, "Auth failed: Token verification failed");
        e
    })?;

    let user_id = claims.sub.parse::<i64>().map_err(|e| {
        debug!(path = %path, sub = %claims.sub, error = ?e, "Auth failed: Invalid user ID in token");
        AppError::InvalidToken
    })?;

    let user = AuthenticatedUser {
        id: user_id,
        username: claims.username,
        role: claims.role,
    };

    debug!(path = %path, user_id, username = %user.username, role = %user.role, "User authenticated");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            id: 1,
            username: "someone".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_require_role() {
        assert_eq!(
            user("organizer")
                .require_role(&[SystemRole::Admin, SystemRole::Organizer])
                .unwrap(),
            SystemRole::Organizer
        );
        assert!(matches!(
            user("user").require_role(&[SystemRole::Admin]),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            user("superuser").require_role(&[SystemRole::Admin]),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_require_admin_and_jury() {
        assert!(user("admin").require_admin().is_ok());
        assert!(user("jury").require_admin().is_err());
        assert!(user("jury").require_jury().is_ok());
        assert!(user("admin").require_jury().is_err());
    }
}
