//! Account and session handlers.
//!
//! ```text
//! POST /api/auth/register   {"name":"Ada","email":"ada@example.com","password":"pw"}
//! POST /api/auth/signup     {"name":"Ada","email":"...","password":"...","mobile":"...","aadhar":"...","faceData":"..."}
//! POST /api/auth/login      {"email":"ada@example.com","password":"pw"}
//! POST /api/auth/face-login {"faceData":"[0.1, 0.2, ...]"}
//! POST /api/auth/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, Registration, Signup, SignupParts, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, login_validation_error, require_text, user_validation_error,
};

const FACE_DATA: FieldName = FieldName::new("faceData");

/// Request body for lenient registration.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub face_data: Option<String>,
}

/// Request body for strict signup; every field is required.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub aadhar: Option<String>,
    #[serde(default)]
    pub face_data: Option<String>,
}

/// Request body for password login.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Request body for face login.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaceLoginRequest {
    /// JSON array of numbers produced by the client-side face model.
    #[serde(default)]
    pub face_data: Option<String>,
}

/// Identity returned after registration or face login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub message: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
}

impl AccountResponse {
    fn new(message: &str, user: &User) -> Self {
        Self {
            message: message.to_owned(),
            user_id: user.id.to_string(),
            name: user.name.to_string(),
            email: user.email.to_string(),
        }
    }
}

/// Acknowledgement of a password login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub user_id: String,
}

fn parse_registration(body: &RegisterRequest) -> Result<Registration, Error> {
    Registration::try_from_parts(
        body.name.as_deref().unwrap_or_default(),
        body.email.as_deref().unwrap_or_default(),
        body.password.as_deref(),
        body.face_data.as_deref(),
    )
    .map_err(user_validation_error)
}

fn parse_signup(body: &SignupRequest) -> Result<Signup, Error> {
    Signup::try_from_parts(SignupParts {
        name: body.name.as_deref().unwrap_or_default(),
        email: body.email.as_deref().unwrap_or_default(),
        password: body.password.as_deref().unwrap_or_default(),
        mobile: body.mobile.as_deref().unwrap_or_default(),
        aadhar: body.aadhar.as_deref().unwrap_or_default(),
        face_data: body.face_data.as_deref().unwrap_or_default(),
    })
    .map_err(user_validation_error)
}

fn parse_login(body: &LoginRequest) -> Result<LoginCredentials, Error> {
    LoginCredentials::try_from_parts(
        body.email.as_deref().unwrap_or_default(),
        body.password.as_deref().unwrap_or_default(),
    )
    .map_err(login_validation_error)
}

/// Register an account. Only name and email are required.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = parse_registration(&payload)?;
    let user = state.registration.register(registration).await?;
    Ok(HttpResponse::Created().json(AccountResponse::new("User registered", &user)))
}

/// Strict signup. Email, aadhar and mobile must all be unused.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email, aadhar or mobile already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let signup = parse_signup(&payload)?;
    let user = state.registration.signup(signup).await?;
    Ok(HttpResponse::Created().json(AccountResponse::new("Signup successful", &user)))
}

/// Authenticate with email and password and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 404, description = "Unknown email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = parse_login(&payload)?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(&user.id)?;
    tracing::info!(user_id = %user.id, "password login");
    Ok(web::Json(LoginResponse {
        message: "Login successful".to_owned(),
        user_id: user.id.to_string(),
    }))
}

/// Authenticate with a face descriptor and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/face-login",
    request_body = FaceLoginRequest,
    responses(
        (status = 200, description = "Login success", body = AccountResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Face data is not a descriptor", body = ErrorSchema),
        (status = 401, description = "No enrolled face close enough", body = ErrorSchema),
        (status = 404, description = "No enrolled faces", body = ErrorSchema),
        (status = 501, description = "Face login disabled", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "faceLogin",
    security([])
)]
#[post("/auth/face-login")]
pub async fn face_login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<FaceLoginRequest>,
) -> ApiResult<web::Json<AccountResponse>> {
    let face_data = require_text(payload.face_data.as_deref(), FACE_DATA)?;
    let user = state.face_login.authenticate_face(face_data).await?;
    session.persist_user(&user.id)?;
    tracing::info!(user_id = %user.id, "face login");
    Ok(web::Json(AccountResponse::new("Face login successful", &user)))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
