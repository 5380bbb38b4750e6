// src/presentation/http/controllers/auth.rs
use crate::application::{
    commands::users::{
        ChangePasswordCommand, LoginUserCommand, RegisterUserCommand, UpdateProfileCommand,
    },
    dto::{AuthTokenDto, UserDto, UserProfileDto},
    queries::users::GetProfileQuery,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: AuthTokenDto,
    pub user: UserDto,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: Option<String>,
    pub new_password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created.", body = UserDto),
        (status = 409, description = "Username already taken.")
    ),
    tag = "Auth"
)]
pub async fn register(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<RegisterRequest>,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .user_commands
        .register(RegisterUserCommand {
            username: payload.username,
            password: payload.password,
            display_name: payload.display_name,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Access token issued.", body = LoginResponse),
        (status = 401, description = "Invalid credentials.")
    ),
    tag = "Auth"
)]
pub async fn login(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<LoginRequest>,
) -> HttpResult<Json<LoginResponse>> {
    let result = state
        .services
        .user_commands
        .login(LoginUserCommand {
            username: payload.username,
            password: payload.password,
        })
        .await
        .into_http()?;

    Ok(Json(LoginResponse {
        token: result.token,
        user: result.user,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Profile of the authenticated user.", body = UserProfileDto),
        (status = 401, description = "Not authenticated.")
    ),
    tag = "Auth"
)]
pub async fn profile(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
) -> HttpResult<Json<UserProfileDto>> {
    state
        .services
        .user_queries
        .get_profile(&actor, GetProfileQuery)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    patch,
    path = "/api/v1/auth/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated.", body = UserDto)
    ),
    tag = "Auth"
)]
pub async fn update_profile(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Json(payload): Json<UpdateProfileRequest>,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .user_commands
        .update_profile(
            &actor,
            UpdateProfileCommand {
                display_name: payload.display_name,
            },
        )
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/change-password",
    params(("id" = i64, Path, description = "User id")),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed."),
        (status = 400, description = "Current password missing or new password too weak.")
    ),
    tag = "Auth"
)]
pub async fn change_password(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<ChangePasswordRequest>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .user_commands
        .change_password(
            &actor,
            ChangePasswordCommand {
                user_id: id,
                current_password: payload.current_password,
                new_password: payload.new_password,
            },
        )
        .await
        .into_http()?;

    Ok(Json(serde_json::json!({ "status": "password changed" })))
}
