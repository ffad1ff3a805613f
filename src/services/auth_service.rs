//! Authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use tracing::info;

use crate::{
    config::Config,
    constants::REFRESH_TOKEN_LENGTH,
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::{NewUser, SystemRole, User},
    utils::{generate_secure_token, hash_string},
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Profile data supplied at registration
#[derive(Debug, Clone, Copy)]
pub struct Registration<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: &'a str,
    pub university: &'a str,
    pub study_info: &'a str,
    pub phone: &'a str,
    pub project_role: Option<&'a str>,
}

/// Issued token pair
#[derive(Debug)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Create an account with the given role
    pub async fn create_account(
        conn: &mut PgConnection,
        registration: Registration<'_>,
        role: SystemRole,
    ) -> AppResult<User> {
        if UserRepository::exists_with_username_or_email(
            conn,
            registration.username,
            registration.email,
        )
        .await?
        {
            return Err(AppError::AlreadyExists(
                "Username or email already registered".to_string(),
            ));
        }

        let password_hash = Self::hash_password(registration.password)?;

        let user = UserRepository::create(
            conn,
            &NewUser {
                username: registration.username,
                email: registration.email,
                password_hash: &password_hash,
                full_name: registration.full_name,
                university: registration.university,
                study_info: registration.study_info,
                phone: registration.phone,
                role,
                project_role: registration.project_role,
            },
        )
        .await?;

        info!(user_id = user.id, username = %user.username, role = %role, "Account created");
        Ok(user)
    }

    /// Self-service registration; always creates a `user`
    pub async fn register(conn: &mut PgConnection, registration: Registration<'_>) -> AppResult<User> {
        Self::create_account(conn, registration, SystemRole::User).await
    }

    /// Login with username and password, optionally asserting the role
    pub async fn login(
        conn: &mut PgConnection,
        redis: &mut MultiplexedConnection,
        config: &Config,
        username: &str,
        password: &str,
        expected_role: Option<SystemRole>,
    ) -> AppResult<(User, TokenPair)> {
        let user = UserRepository::find_by_username(conn, username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        if let Some(role) = expected_role {
            if user.system_role() != Some(role) {
                return Err(AppError::InvalidCredentials);
            }
        }

        let tokens = Self::issue_tokens(redis, config, &user).await?;

        Ok((user, tokens))
    }

    /// Exchange a refresh token for a new token pair; the old one is revoked
    pub async fn refresh_token(
        conn: &mut PgConnection,
        redis: &mut MultiplexedConnection,
        config: &Config,
        refresh_token: &str,
    ) -> AppResult<TokenPair> {
        let (user_id, secret) = Self::split_refresh_token(refresh_token)?;
        let key = Self::refresh_key(user_id, secret);

        let removed: i64 = redis.del(&key).await?;
        if removed == 0 {
            return Err(AppError::InvalidToken);
        }

        let user = UserRepository::find_by_id(conn, user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        Self::issue_tokens(redis, config, &user).await
    }

    /// Revoke one refresh token, or every session of the user
    pub async fn logout(
        redis: &mut MultiplexedConnection,
        user_id: i64,
        refresh_token: Option<&str>,
        all_sessions: bool,
    ) -> AppResult<()> {
        if all_sessions {
            let pattern = format!("refresh_token:{}:*", user_id);
            let keys: Vec<String> = redis::cmd("KEYS")
                .arg(&pattern)
                .query_async(&mut *redis)
                .await?;

            for key in keys {
                redis.del::<_, ()>(&key).await?;
            }
        } else if let Some(token) = refresh_token {
            let (owner, secret) = Self::split_refresh_token(token)?;
            if owner != user_id {
                return Err(AppError::InvalidToken);
            }
            redis.del::<_, ()>(Self::refresh_key(owner, secret)).await?;
        }

        Ok(())
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Hash password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Generate access token
    pub fn generate_access_token(user: &User, config: &Config) -> AppResult<(String, i64)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(config.jwt.expiry_hours);
        let expires_in = config.jwt.expiry_hours * 3600;

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok((token, expires_in))
    }

    async fn issue_tokens(
        redis: &mut MultiplexedConnection,
        config: &Config,
        user: &User,
    ) -> AppResult<TokenPair> {
        let (access_token, expires_in) = Self::generate_access_token(user, config)?;
        let secret = generate_secure_token(REFRESH_TOKEN_LENGTH);

        // Only the hash of the secret part is kept server side
        let key = Self::refresh_key(user.id, &secret);
        let expiry = config.jwt.refresh_token_expiry_days * 24 * 60 * 60;
        redis.set_ex::<_, _, ()>(&key, "1", expiry as u64).await?;

        Ok(TokenPair {
            access_token,
            refresh_token: format!("{}.{}", user.id, secret),
            expires_in,
        })
    }

    fn refresh_key(user_id: i64, secret: &str) -> String {
        format!("refresh_token:{}:{}", user_id, hash_string(secret))
    }

    /// Refresh tokens have the form `<user_id>.<secret>`
    fn split_refresh_token(token: &str) -> AppResult<(i64, &str)> {
        let (user_id, secret) = token.split_once('.').ok_or(AppError::InvalidToken)?;
        let user_id = user_id.parse::<i64>().map_err(|_| AppError::InvalidToken)?;
        if secret.is_empty() {
            return Err(AppError::InvalidToken);
        }
        Ok((user_id, secret))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_config, test_user};

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = AuthService::hash_password("correct horse").unwrap();
        assert!(AuthService::verify_password("correct horse", &hash).unwrap());
        assert!(!AuthService::verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_split_refresh_token() {
        let (user_id, secret) = AuthService::split_refresh_token("42.abcDEF123").unwrap();
        assert_eq!(user_id, 42);
        assert_eq!(secret, "abcDEF123");

        assert!(AuthService::split_refresh_token("no-separator").is_err());
        assert!(AuthService::split_refresh_token("x.abc").is_err());
        assert!(AuthService::split_refresh_token("7.").is_err());
    }

    #[test]
    fn test_refresh_key_does_not_contain_secret() {
        let key = AuthService::refresh_key(7, "plain-secret");
        assert!(key.starts_with("refresh_token:7:"));
        assert!(!key.contains("plain-secret"));
    }

    #[test]
    fn test_access_token_roundtrip() {
        let config = test_config("postgres://unused", "redis://unused");
        let user = test_user(42, "judge", SystemRole::Jury);

        let (token, expires_in) = AuthService::generate_access_token(&user, &config).unwrap();
        assert_eq!(expires_in, config.jwt.expiry_hours * 3600);

        let claims = AuthService::verify_token(&token, &config.jwt.secret).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.username, "judge");
        assert_eq!(claims.role, "jury");
    }

    #[test]
    fn test_token_with_wrong_secret_is_invalid() {
        let config = test_config("postgres://unused", "redis://unused");
        let user = test_user(1, "someone", SystemRole::User);
        let (token, _) = AuthService::generate_access_token(&user, &config).unwrap();

        assert!(matches!(
            AuthService::verify_token(&token, "another-secret"),
            Err(AppError::InvalidToken)
        ));
    }
}

#[cfg(test)]
mod db_tests {
    use super::*;
    use crate::test_utils::{containers, test_config, test_pool};

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn test_login_refresh_and_logout() {
        let pool = test_pool().await;
        let redis_url = containers::redis_url().await;
        let config = test_config("postgres://unused", &redis_url);
        let mut redis = redis::Client::open(redis_url.as_str())
            .unwrap()
            .get_multiplexed_async_connection()
            .await
            .unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let registration = Registration {
            username: "ada",
            email: "ada@example.com",
            password: "correct horse battery",
            full_name: "Ada L",
            university: "Analytical U",
            study_info: "Maths",
            phone: "+441234567890",
            project_role: None,
        };
        AuthService::register(&mut conn, registration).await.unwrap();
        assert!(matches!(
            AuthService::register(&mut conn, registration).await,
            Err(AppError::AlreadyExists(_))
        ));

        assert!(matches!(
            AuthService::login(&mut conn, &mut redis, &config, "ada", "wrong", None).await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            AuthService::login(
                &mut conn,
                &mut redis,
                &config,
                "ada",
                "correct horse battery",
                Some(SystemRole::Admin)
            )
            .await,
            Err(AppError::InvalidCredentials)
        ));

        let (user, tokens) = AuthService::login(
            &mut conn,
            &mut redis,
            &config,
            "ada",
            "correct horse battery",
            Some(SystemRole::User),
        )
        .await
        .unwrap();

        let rotated = AuthService::refresh_token(&mut conn, &mut redis, &config, &tokens.refresh_token)
            .await
            .unwrap();
        assert!(matches!(
            AuthService::refresh_token(&mut conn, &mut redis, &config, &tokens.refresh_token).await,
            Err(AppError::InvalidToken)
        ));

        AuthService::logout(&mut redis, user.id, None, true).await.unwrap();
        assert!(matches!(
            AuthService::refresh_token(&mut conn, &mut redis, &config, &rotated.refresh_token).await,
            Err(AppError::InvalidToken)
        ));
    }
}
