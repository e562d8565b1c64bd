//! Account registration and credential checks.
//!
//! ```text
//! POST /api/auth/register
//! POST /api/auth/login
//! ```
//!
//! Login answers whether the credentials match an account. No session or
//! token is issued.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    CredentialsValidationError, Error, LoginCredentials, Registration, RegistrationParts,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::UserResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error, missing_field_error};

/// Registration payload. Every field is required.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// `teacher` or `student`.
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Login payload. `username` may also hold the account's email.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::MissingField(field) => {
            missing_field_error(FieldName::new(field))
        }
        CredentialsValidationError::InvalidRole(_) => {
            invalid_field_error(FieldName::new(err.field()), "Invalid role")
        }
    }
}

fn text(value: Option<&str>) -> &str {
    value.unwrap_or_default()
}

fn parse_registration(payload: &RegisterRequest) -> Result<Registration, Error> {
    Registration::try_from_parts(RegistrationParts {
        username: text(payload.username.as_deref()),
        email: text(payload.email.as_deref()),
        password: text(payload.password.as_deref()),
        role: text(payload.role.as_deref()),
        first_name: text(payload.first_name.as_deref()),
        last_name: text(payload.last_name.as_deref()),
    })
    .map_err(map_credentials_error)
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid request or username/email taken", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register"
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = parse_registration(&payload)?;
    let user = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Check credentials and return the matching account.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials match", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let credentials = LoginCredentials::try_from_parts(
        payload.username.as_deref().unwrap_or_default(),
        payload.password.as_deref().unwrap_or_default(),
    )
    .map_err(map_credentials_error)?;
    let user = state.accounts.login(credentials).await?;
    Ok(web::Json(UserResponse::from(user)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::inbound::http::test_utils::{call_json, in_memory_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::json;

    fn ada() -> serde_json::Value {
        json!({
            "username": "ada",
            "email": "ada@school.test",
            "password": "analytical",
            "role": "teacher",
            "first_name": "Ada",
            "last_name": "Lovelace",
        })
    }

    #[rstest]
    #[case("username")]
    #[case("role")]
    #[case("last_name")]
    fn registration_requires_every_field(#[case] field: &str) {
        let mut body = ada();
        body[field] = json!("  ");
        let payload: RegisterRequest = serde_json::from_value(body).expect("payload shape");

        let err = parse_registration(&payload).expect_err("blank field rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().expect("details")["field"], field);
    }

    #[rstest]
    fn unknown_roles_are_rejected() {
        let mut body = ada();
        body["role"] = json!("admin");
        let payload: RegisterRequest = serde_json::from_value(body).expect("payload shape");

        let err = parse_registration(&payload).expect_err("role rejected");
        assert_eq!(err.message(), "Invalid role");
    }

    #[rstest]
    #[actix_web::test]
    async fn register_then_login_by_email() {
        let app = actix_test::init_service(in_memory_app()).await;

        let (status, created) = call_json(
            &app,
            actix_test::TestRequest::post().uri("/api/auth/register").set_json(ada()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["role"], "teacher");
        assert!(created.get("password").is_none());

        let (status, logged_in) = call_json(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({"username": "ada@school.test", "password": "analytical"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(logged_in["id"], created["id"]);
    }

    #[rstest]
    #[actix_web::test]
    async fn duplicate_username_is_bad_request() {
        let app = actix_test::init_service(in_memory_app()).await;
        let register_request = || actix_test::TestRequest::post().uri("/api/auth/register");

        let (first, _) = call_json(&app, register_request().set_json(ada())).await;
        assert_eq!(first, StatusCode::CREATED);

        let mut clash = ada();
        clash["email"] = json!("other@school.test");
        let (status, body) = call_json(&app, register_request().set_json(clash)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "duplicate_key");
    }

    #[rstest]
    #[actix_web::test]
    async fn wrong_password_is_unauthorized() {
        let app = actix_test::init_service(in_memory_app()).await;
        call_json(
            &app,
            actix_test::TestRequest::post().uri("/api/auth/register").set_json(ada()),
        )
        .await;

        let (status, body) = call_json(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({"username": "ada", "password": "difference"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "unauthorized");
    }
}
