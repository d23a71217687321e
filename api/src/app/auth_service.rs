//! Auth service
//!
//! Registration, login and token verification for site users.

use std::sync::Arc;

use chrono::Utc;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token;
use crate::domain::entities::{Claims, NewUser, User};
use crate::domain::ports::UserRepository;
use crate::error::AppError;

/// Service for site user accounts
pub struct AuthService<UR>
where
    UR: UserRepository + ?Sized,
{
    users: Arc<UR>,
    secret: Vec<u8>,
    token_ttl_secs: i64,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository + ?Sized,
{
    pub fn new(users: Arc<UR>, secret: &str, token_ttl_secs: i64) -> Self {
        Self {
            users,
            secret: secret.as_bytes().to_vec(),
            token_ttl_secs,
        }
    }

    /// Register a new user
    ///
    /// Any persistence failure, a taken email included, surfaces as a generic
    /// internal error; the cause only goes to the log.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<User, AppError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::BadRequest(
                "Email and password are required".to_string(),
            ));
        }

        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))??;

        let new_user = NewUser {
            email: email.to_string(),
            password_hash,
            name: name.map(str::trim).filter(|n| !n.is_empty()).map(String::from),
        };

        match self.users.create(&new_user).await {
            Ok(user) => {
                tracing::info!(user_id = user.id.0, email = %user.email, "User registered");
                Ok(user)
            }
            Err(e) => Err(AppError::Internal(format!(
                "Failed to register {}: {}",
                email, e
            ))),
        }
    }

    /// Check credentials and issue a signed token
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User), AppError> {
        let Some(user) = self.users.find_by_email(email.trim()).await? else {
            tracing::debug!(email = %email, "Login for unknown email");
            return Err(AppError::Unauthorized);
        };

        let candidate = password.to_string();
        let stored = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&candidate, &stored))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))??;

        if !valid {
            tracing::debug!(user_id = user.id.0, "Login with wrong password");
            return Err(AppError::Unauthorized);
        }

        let claims = Claims::for_user(&user, Utc::now(), self.token_ttl_secs);
        let token = token::sign(&claims, &self.secret)?;

        Ok((token, user))
    }

    /// Verify a bearer token and return the identity it carries
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        Ok(token::verify(token, &self.secret, Utc::now())?)
    }
}
