//! Typed API service.
//!
//! Composes the request gateway and the session store explicitly, with no
//! module-level singletons, so token attachment and session updates stay
//! testable in isolation.

use serde_json::{json, Value};

use petcare_core::models::Medication;

use crate::gateway::{ApiOutcome, RequestGateway};
use crate::session::{SessionResult, SessionStore, UserProfile};

/// Prescription form data collected from the veterinarian.
#[derive(Debug, Clone)]
pub struct PrescriptionForm {
    pub client_tax_id: String,
    pub diagnosis: String,
    pub medications: Vec<Medication>,
    pub veterinarian_license: u32,
}

/// Client API bound to one server and one session.
pub struct ApiService {
    gateway: RequestGateway,
    session: SessionStore,
}

impl ApiService {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            gateway: RequestGateway::new(base_url),
            session,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Authenticate, persisting token / profile / patient id on success.
    pub async fn login(&mut self, email: &str, password: &str) -> SessionResult<ApiOutcome> {
        let body = json!({"email": email, "senha": password});
        let outcome = self.gateway.post("/login", None, &body).await;

        if let ApiOutcome::Success { data, .. } = &outcome {
            if let Some(token) = data.get("token").and_then(Value::as_str) {
                self.session.save_token(token)?;
            }
            if let Some(user) = data.get("user") {
                if let Ok(profile) = serde_json::from_value::<UserProfile>(user.clone()) {
                    if let Some(pet_id) = &profile.pet_id {
                        self.session.save_pet_id(pet_id)?;
                    }
                    self.session.save_user(&profile)?;
                }
            }
        }

        Ok(outcome)
    }

    /// Submit a prescription with the stored bearer token attached.
    ///
    /// The legacy role field still travels in the body for older servers;
    /// the current one derives the role from the token and ignores it.
    pub async fn submit_prescription(&self, form: &PrescriptionForm) -> ApiOutcome {
        let body = json!({
            "role_usuario": self.session.user().map(|profile| profile.role),
            "cpf_cliente": form.client_tax_id,
            "diagnostico": form.diagnosis,
            "medicamentos": form.medications,
            "crmv": form.veterinarian_license,
        });

        self.gateway
            .post("/nova-prescricao", self.session.token(), &body)
            .await
    }

    /// Drop the session: clears token, profile, and patient id.
    pub fn logout(&mut self) -> SessionResult<()> {
        self.session.logout()
    }
}
