use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::AppState;
use crate::auth::{Claims, Role};
use crate::error::{ApiError, ErrorCode};

/// JWT Authentication middleware
///
/// Decodes the bearer token and stores the claims in request extensions for
/// downstream extractors.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let token = match auth_header {
        Some(auth_value) if auth_value.starts_with("Bearer ") => &auth_value[7..],
        _ => {
            return ApiError::with_code(
                ErrorCode::TokenMissing,
                "Missing or invalid Authorization header",
            )
            .into_response();
        }
    };

    match state.jwt_service.decode_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}

/// Role-based authorization middleware for admin access
pub async fn require_admin_role(
    user: AuthenticatedUser,
    request: Request<Body>,
    next: Next,
) -> Response {
    match Role::from_str(&user.0.role) {
        Ok(Role::Admin) => next.run(request).await,
        Ok(_) => ApiError::Forbidden("Admin access required".to_string()).into_response(),
        Err(_) => ApiError::Forbidden("Invalid user role".to_string()).into_response(),
    }
}

/// Extractor for authenticated user claims
#[derive(Clone)]
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    pub fn user_id(&self) -> uuid::Uuid {
        self.0.sub
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("No authentication found".to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}
