//! Registration, password login and the Google OAuth flow.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::auth::Claims;
use crate::auth::password::PasswordService;
use crate::database::schema::types::UserRole;
use crate::error::{ApiError, ErrorCode, Result};
use crate::handlers::validate_payload;
use crate::models::user::{AuthResponse, AuthUser, CredentialsRow, LoginRequest, RegisterRequest};

/// Register a new account with email and password
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = AuthResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email or username already taken")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    validate_payload(&request)?;
    info!("Registration for user: {}", request.name);

    let email_taken =
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
            .bind(&request.email)
            .fetch_optional(&state.db)
            .await?;
    if email_taken.is_some() {
        return Err(ApiError::Conflict(
            "User with this email already exists".to_string(),
        ));
    }

    let name_taken = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE name = $1")
        .bind(&request.name)
        .fetch_optional(&state.db)
        .await?;
    if name_taken.is_some() {
        return Err(ApiError::Conflict("Username is already taken".to_string()));
    }

    let password_hash = PasswordService::hash_password(&request.password)?;
    let id = Uuid::new_v4();

    let created_at: DateTime<Utc> = sqlx::query_scalar(
        "INSERT INTO users (id, name, email, password_hash, role)
         VALUES ($1, $2, $3, $4, 'user')
         RETURNING created_at",
    )
    .bind(id)
    .bind(&request.name)
    .bind(&request.email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await?;

    let claims = Claims::new(id, request.name.clone(), "user".to_string());
    let access_token = state.jwt_service.encode_token(&claims)?;

    info!(user_id = %id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            user: AuthUser {
                id,
                name: request.name,
                email: request.email,
                role: UserRole::User,
                created_at,
            },
            access_token,
        }),
    ))
}

/// Password login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials or OAuth-only account")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    validate_payload(&request)?;
    info!("Login attempt for email: {}", request.email);

    // Unknown email and wrong password produce the same response body
    let user = sqlx::query_as::<_, CredentialsRow>(
        "SELECT id, name, email, password_hash, role, created_at
         FROM users WHERE email = $1",
    )
    .bind(&request.email)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(ApiError::invalid_credentials)?;

    let password_hash = user.password_hash.ok_or_else(|| {
        ApiError::with_code(
            ErrorCode::PasswordLoginUnavailable,
            "Please sign in with Google or reset your password",
        )
    })?;

    if !PasswordService::verify_password(&request.password, &password_hash)? {
        return Err(ApiError::invalid_credentials());
    }

    let claims = Claims::new(user.id, user.name.clone(), user.role.to_string());
    let access_token = state.jwt_service.encode_token(&claims)?;

    info!(user_id = %user.id, "Login successful");

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        user: AuthUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        },
        access_token,
    }))
}

/// Entry point of the Google OAuth flow; redirects to the consent screen
#[utoipa::path(
    get,
    path = "/api/auth/google/signin",
    responses(
        (status = 307, description = "Redirect to the Google consent screen"),
        (status = 500, description = "OAuth is not configured")
    ),
    tag = "auth"
)]
pub async fn google_signin(State(state): State<AppState>) -> Result<Redirect> {
    if !state.google_oauth.is_configured() {
        return Err(ApiError::Configuration(
            "Google OAuth is not configured".to_string(),
        ));
    }

    let state_token = Uuid::new_v4().to_string();
    let url = state.google_oauth.authorize_url(&state_token)?;
    Ok(Redirect::temporary(&url))
}

#[derive(Debug, Deserialize)]
pub struct GoogleCallbackQuery {
    pub code: Option<String>,
    #[allow(dead_code)]
    pub state: Option<String>,
}

/// OAuth callback: exchanges the code, upserts the user and redirects to the
/// storefront with a freshly issued token.
#[utoipa::path(
    get,
    path = "/api/auth/google/callback",
    responses(
        (status = 307, description = "Redirect to the storefront with a token"),
        (status = 400, description = "Missing authorization code"),
        (status = 502, description = "Code exchange failed")
    ),
    tag = "auth"
)]
pub async fn google_callback(
    State(state): State<AppState>,
    Query(params): Query<GoogleCallbackQuery>,
) -> Result<Redirect> {
    let code = params
        .code
        .ok_or_else(|| ApiError::BadRequest("Missing authorization code".to_string()))?;

    let userinfo = state.google_oauth.exchange_code(&code).await?;
    info!("Google callback for email: {}", userinfo.email);

    let user = find_or_create_google_user(&state, &userinfo).await?;

    let claims = Claims::new(user.id, user.name.clone(), user.role.to_string());
    let token = state.jwt_service.encode_token(&claims)?;

    Ok(Redirect::temporary(&format!(
        "{}/auth/callback?token={}",
        state.config.frontend_url, token
    )))
}

async fn find_or_create_google_user(
    state: &AppState,
    userinfo: &crate::services::google_oauth::GoogleUserInfo,
) -> Result<CredentialsRow> {
    const CREDENTIAL_COLUMNS: &str = "id, name, email, password_hash, role, created_at";

    let by_google_id = sqlx::query_as::<_, CredentialsRow>(&format!(
        "SELECT {CREDENTIAL_COLUMNS} FROM users WHERE google_id = $1"
    ))
    .bind(&userinfo.id)
    .fetch_optional(&state.db)
    .await?;

    if let Some(user) = by_google_id {
        return Ok(user);
    }

    // Link an existing password account with the same email address
    let by_email = sqlx::query_as::<_, CredentialsRow>(&format!(
        "SELECT {CREDENTIAL_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(&userinfo.email)
    .fetch_optional(&state.db)
    .await?;

    if let Some(user) = by_email {
        sqlx::query(
            "UPDATE users SET google_id = $2, avatar = COALESCE(avatar, $3), updated_at = NOW()
             WHERE id = $1",
        )
        .bind(user.id)
        .bind(&userinfo.id)
        .bind(&userinfo.picture)
        .execute(&state.db)
        .await?;
        return Ok(user);
    }

    // First sign-in: OAuth-only account, no password hash
    let name = userinfo
        .name
        .clone()
        .unwrap_or_else(|| userinfo.email.clone());

    let user = sqlx::query_as::<_, CredentialsRow>(&format!(
        "INSERT INTO users (id, name, email, role, google_id, avatar)
         VALUES ($1, $2, $3, 'user', $4, $5)
         RETURNING {CREDENTIAL_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(&name)
    .bind(&userinfo.email)
    .bind(&userinfo.id)
    .bind(&userinfo.picture)
    .fetch_one(&state.db)
    .await?;

    info!(user_id = %user.id, "OAuth-only user created");
    Ok(user)
}
