//! Account handlers - registration, login, logout and session lookup.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::password_hash::rand_core::OsRng;
use argon2::Argon2;
use serde::{Deserialize, Serialize};

use crate::auth::{AuthUser, clear_session_cookie, session_cookie};
use crate::error::HttpError;
use crate::state::AppState;
use repodeck_core::{NewUser, StoreError, User};

/// Request body for register and login.
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user account.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Register a new account and start a session.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<CredentialsRequest>,
) -> Result<(CookieJar, Json<UserResponse>), HttpError> {
    validate_credentials(&req)?;

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| HttpError::Internal(format!("Failed to hash password: {e}")))?
        .to_string();

    let new_user = NewUser {
        email: req.email.trim().to_lowercase(),
        password_hash,
    };

    // A duplicate email is reported the same way as bad input so the
    // endpoint does not reveal which addresses have accounts.
    let user = match state.stores.users.insert(&new_user).await {
        Ok(user) => user,
        Err(StoreError::AlreadyExists(_)) => {
            return Err(HttpError::BadRequest("Invalid credentials".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let token = state.auth.issue_token(user.id)?;
    Ok((jar.add(session_cookie(token)), Json(user.into())))
}

/// Log in with email and password.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<CredentialsRequest>,
) -> Result<(CookieJar, Json<UserResponse>), HttpError> {
    let unauthorized = || HttpError::Unauthorized("Invalid credentials".to_string());

    let user = match state
        .stores
        .users
        .find_by_email(&req.email.trim().to_lowercase())
        .await
    {
        Ok(user) => user,
        Err(StoreError::NotFound(_)) => return Err(unauthorized()),
        Err(e) => return Err(e.into()),
    };

    let parsed_hash =
        PasswordHash::new(&user.password_hash).map_err(|_| unauthorized())?;
    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| unauthorized())?;

    let token = state.auth.issue_token(user.id)?;
    Ok((jar.add(session_cookie(token)), Json(user.into())))
}

/// End the current session.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<serde_json::Value>) {
    (
        jar.add(clear_session_cookie()),
        Json(serde_json::json!({ "message": "Logged out" })),
    )
}

/// Return the currently authenticated user.
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserResponse>, HttpError> {
    let user = state.stores.users.find_by_id(user_id).await?;
    Ok(Json(user.into()))
}

fn validate_credentials(req: &CredentialsRequest) -> Result<(), HttpError> {
    let email = req.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(HttpError::BadRequest("A valid email is required".to_string()));
    }
    if req.password.len() < 6 {
        return Err(HttpError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}
