//! Account endpoints.
//!
//! Every response body carries an `error` string, empty on success. Failure bodies keep
//! the same shape with zeroed fields.

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::{
        header::{AUTHORIZATION, WWW_AUTHENTICATE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::common::OutcomeKind;
use crate::domains::user::ServiceError;
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub phone_number: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: i32,
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub phone_number: String,
    pub password: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: i32,
    pub token: String,
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub phone_number: String,
    pub name: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub phone_number: String,
    pub name: String,
    pub error: String,
}

/// HTTP status for an outcome kind
pub fn status_for(kind: OutcomeKind) -> StatusCode {
    match kind {
        OutcomeKind::Ok => StatusCode::OK,
        OutcomeKind::BadRequest => StatusCode::BAD_REQUEST,
        OutcomeKind::Unauthorized => StatusCode::UNAUTHORIZED,
        OutcomeKind::NotFound => StatusCode::NOT_FOUND,
        OutcomeKind::Conflict => StatusCode::CONFLICT,
        OutcomeKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn respond<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    if status == StatusCode::UNAUTHORIZED {
        response
            .headers_mut()
            .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    }
    response
}

/// Log a failed operation and build its envelope
fn respond_error<T: Serialize>(
    operation: &str,
    err: &ServiceError,
    body: impl FnOnce(String) -> T,
) -> Response {
    match err.kind() {
        OutcomeKind::Internal => error!(error = %err, "{} failed", operation),
        kind => debug!(?kind, error = %err, "{} rejected", operation),
    }
    respond(status_for(err.kind()), body(err.public_message()))
}

fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
}

/// POST /register
pub async fn register_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return respond(
                StatusCode::BAD_REQUEST,
                RegisterResponse {
                    error: rejection.body_text(),
                    ..Default::default()
                },
            )
        }
    };

    match state
        .auth_service
        .register(&request.phone_number, &request.name, &request.password)
        .await
    {
        Ok(id) => respond(
            StatusCode::OK,
            RegisterResponse {
                id: id.into(),
                error: String::new(),
            },
        ),
        Err(e) => respond_error("Registration", &e, |error| RegisterResponse {
            error,
            ..Default::default()
        }),
    }
}

/// POST /login
pub async fn login_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return respond(
                StatusCode::BAD_REQUEST,
                LoginResponse {
                    error: rejection.body_text(),
                    ..Default::default()
                },
            )
        }
    };

    match state
        .auth_service
        .login(&request.phone_number, &request.password)
        .await
    {
        Ok(result) => respond(
            StatusCode::OK,
            LoginResponse {
                id: result.id.into(),
                token: result.token,
                error: String::new(),
            },
        ),
        Err(e) => respond_error("Login", &e, |error| LoginResponse {
            error,
            ..Default::default()
        }),
    }
}

/// GET /profile
pub async fn get_profile_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Response {
    match state.auth_service.get_profile(authorization(&headers)).await {
        Ok(profile) => respond(
            StatusCode::OK,
            ProfileResponse {
                phone_number: profile.phone_number,
                name: profile.name,
                error: String::new(),
            },
        ),
        Err(e) => respond_error("Get profile", &e, |error| ProfileResponse {
            error,
            ..Default::default()
        }),
    }
}

/// PATCH /profile
///
/// The bearer token is checked before the body is parsed, so unauthenticated callers
/// always get 401.
pub async fn update_profile_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Response {
    let claim = match state.auth_service.authenticate(authorization(&headers)) {
        Ok(claim) => claim,
        Err(e) => {
            return respond_error("Update profile", &ServiceError::from(e), |error| {
                ProfileResponse {
                    error,
                    ..Default::default()
                }
            })
        }
    };

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return respond(
                StatusCode::BAD_REQUEST,
                ProfileResponse {
                    error: rejection.body_text(),
                    ..Default::default()
                },
            )
        }
    };

    match state
        .auth_service
        .update_profile_as(&claim, &request.phone_number, &request.name)
        .await
    {
        Ok(profile) => respond(
            StatusCode::OK,
            ProfileResponse {
                phone_number: profile.phone_number,
                name: profile.name,
                error: String::new(),
            },
        ),
        Err(e) => respond_error("Update profile", &e, |error| ProfileResponse {
            error,
            ..Default::default()
        }),
    }
}
