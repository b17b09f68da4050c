//! HTTP routes and handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use petcare_core::auth::authenticate;
use petcare_core::models::{PrescriptionRequest, Role, SessionContext};
use petcare_core::{submit_prescription, CoreError};

use crate::error::ApiError;
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/login", post(login_handler))
        .route("/nova-prescricao", post(create_prescription_handler))
        .with_state(state)
}

async fn root_handler() -> &'static str {
    "O servidor está funcionando!"
}

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    #[serde(rename = "senha")]
    password: String,
}

#[derive(Serialize)]
struct LoginUser {
    #[serde(rename = "nome")]
    name: String,
    role: Role,
    #[serde(rename = "pet_id", skip_serializing_if = "Option::is_none")]
    pet_id: Option<String>,
}

#[derive(Serialize)]
struct LoginResponse {
    msg: String,
    token: String,
    user: LoginUser,
}

async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let db = state.db.lock().map_err(CoreError::from)?;
    let user = authenticate(&db, &request.email, &request.password).map_err(CoreError::from)?;

    // Tutors get their linked patient id so the client can store it.
    let pet_id = match user.role {
        Role::Tutor => db
            .patient_for_account(&user.account_id)
            .map_err(CoreError::from)?,
        _ => None,
    };
    drop(db);

    let token = state.tokens.issue(&user).map_err(CoreError::from)?;
    tracing::info!(email = %request.email, role = user.role.as_str(), "login succeeded");

    Ok(Json(LoginResponse {
        msg: format!("Bem-vindo {}", user.display_name),
        token,
        user: LoginUser {
            name: user.display_name,
            role: user.role,
            pet_id,
        },
    }))
}

#[derive(Serialize)]
struct PrescriptionResponse {
    msg: String,
    #[serde(rename = "id_pet")]
    patient_id: String,
}

async fn create_prescription_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<PrescriptionRequest>,
) -> Result<Json<PrescriptionResponse>, ApiError> {
    // The role claim comes from the verified token only; any role field in
    // the body is ignored.
    let token = bearer_token(&headers).ok_or(ApiError::Unauthorized)?;
    let claims = state.tokens.verify(token).map_err(CoreError::from)?;
    let session = SessionContext::from(claims);

    let db = state.db.lock().map_err(CoreError::from)?;
    let records = state.records.lock().map_err(CoreError::from)?;
    let patient_id = submit_prescription(&session, &*db, &*records, &request)?;

    tracing::info!(
        patient = %patient_id,
        veterinarian = %session.display_name,
        "prescription appended"
    );

    Ok(Json(PrescriptionResponse {
        msg: "Prescrição salva com sucesso!".into(),
        patient_id,
    }))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
