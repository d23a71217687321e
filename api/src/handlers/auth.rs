//! Auth handlers
//!
//! Registration, login and the token echo endpoint.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Claims, User, UserId};
use crate::error::AppError;
use crate::AppState;

/// Request body for POST /register
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

/// Request body for POST /login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public view of a user
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: UserView,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub success: bool,
    pub user: Claims,
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    state
        .auth_service
        .register(&request.email, &request.password, request.name.as_deref())
        .await?;

    Ok(Json(RegisterResponse {
        success: true,
        message: "User created successfully".to_string(),
    }))
}

/// POST /login
///
/// Returns a bearer token valid for the configured lifetime.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (token, user) = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        token,
        user: user.into(),
    }))
}

/// GET /me
///
/// Echoes the identity carried by the bearer token.
pub async fn me(Extension(claims): Extension<Claims>) -> Json<MeResponse> {
    Json(MeResponse {
        success: true,
        user: claims,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_register_request_with_name() {
        let json = r#"{"email": "ana@example.com", "password": "pw", "name": "Ana"}"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.email, "ana@example.com");
        assert_eq!(request.name.as_deref(), Some("Ana"));
    }

    #[test]
    fn parse_register_request_missing_fields_defaults() {
        let request: RegisterRequest = serde_json::from_str("{}").unwrap();
        assert!(request.email.is_empty());
        assert!(request.password.is_empty());
        assert!(request.name.is_none());
    }

    #[test]
    fn serialize_login_response() {
        let response = LoginResponse {
            success: true,
            token: "a.b.c".to_string(),
            user: UserView {
                id: UserId(1),
                email: "ana@example.com".to_string(),
                name: None,
                role: "user".to_string(),
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["user"]["id"], 1);
        assert!(json["user"]["name"].is_null());
        assert!(json["user"].get("password_hash").is_none());
    }
}
