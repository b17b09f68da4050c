//! End-to-end API tests.
//!
//! Each test spins the router on an ephemeral port and drives it over real
//! HTTP, then inspects the shared stores directly.

use std::sync::Arc;

use serde_json::{json, Value};

use petcare_core::auth::create_account;
use petcare_core::models::{ClientLink, Role, TaxId};
use petcare_server::{build_router, AppState};

const TUTOR_TAX_ID: &str = "10000000002";

struct TestApp {
    base_url: String,
    state: Arc<AppState>,
    client: reqwest::Client,
    patient_id: String,
}

async fn spawn_app() -> TestApp {
    let state = AppState::in_memory("test-secret").unwrap();

    let patient_id = {
        let db = state.db.lock().unwrap();

        let vet = create_account("ana@petcare.com", "Dra. Ana Souza", Role::Veterinarian, "senha-vet");
        db.insert_account(&vet).unwrap();

        let admin = create_account("adm@petcare.com", "Carlos Prado", Role::Admin, "senha-adm");
        db.insert_account(&admin).unwrap();

        let tutor = create_account("joao@petcare.com", "João Lima", Role::Tutor, "senha-tutor");
        db.insert_account(&tutor).unwrap();

        let mut link = ClientLink::new(TaxId::parse(TUTOR_TAX_ID).unwrap(), "Rex");
        link.account_id = Some(tutor.account_id.clone());
        db.insert_client(&link).unwrap();
        link.patient_id
    };

    let router = build_router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp {
        base_url: format!("http://{addr}"),
        state,
        client: reqwest::Client::new(),
        patient_id,
    }
}

impl TestApp {
    async fn login(&self, email: &str, password: &str) -> (u16, Value) {
        let response = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&json!({"email": email, "senha": password}))
            .send()
            .await
            .unwrap();
        (response.status().as_u16(), response.json().await.unwrap())
    }

    async fn token_for(&self, email: &str, password: &str) -> String {
        let (status, body) = self.login(email, password).await;
        assert_eq!(status, 200);
        body["token"].as_str().unwrap().to_string()
    }

    async fn post_prescription(&self, token: Option<&str>, body: &Value) -> (u16, Value) {
        let mut request = self
            .client
            .post(format!("{}/nova-prescricao", self.base_url))
            .json(body);
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        let response = request.send().await.unwrap();
        (response.status().as_u16(), response.json().await.unwrap())
    }
}

fn buscopan_body() -> Value {
    json!({
        "role_usuario": "VET",
        "cpf_cliente": TUTOR_TAX_ID,
        "diagnostico": "Dor de barriga forte",
        "medicamentos": [
            {"nome": "Buscopan Pet", "dosagem": "1 comprimido", "frequencia": "A cada 8 horas"}
        ],
        "crmv": 11223
    })
}

#[tokio::test]
async fn login_returns_role_and_token() {
    let app = spawn_app().await;

    let (status, body) = app.login("ana@petcare.com", "senha-vet").await;
    assert_eq!(status, 200);
    assert_eq!(body["user"]["nome"], "Dra. Ana Souza");
    assert_eq!(body["user"]["role"], "VET");
    assert!(body["token"].as_str().unwrap().contains('.'));
}

#[tokio::test]
async fn tutor_login_includes_pet_id() {
    let app = spawn_app().await;

    let (status, body) = app.login("joao@petcare.com", "senha-tutor").await;
    assert_eq!(status, 200);
    assert_eq!(body["user"]["role"], "CLI");
    assert_eq!(body["user"]["pet_id"], app.patient_id.as_str());
}

#[tokio::test]
async fn failed_logins_share_one_shape() {
    let app = spawn_app().await;

    let wrong_password = app.login("ana@petcare.com", "senha-errada").await;
    let unknown_email = app.login("ghost@petcare.com", "senha-vet").await;

    assert_eq!(wrong_password.0, 401);
    assert_eq!(unknown_email.0, 401);
    assert_eq!(wrong_password.1, unknown_email.1);
    assert_eq!(wrong_password.1, json!({"msg": "Acesso negado"}));
}

#[tokio::test]
async fn prescription_without_token_is_unauthorized() {
    let app = spawn_app().await;

    let (status, body) = app.post_prescription(None, &buscopan_body()).await;
    assert_eq!(status, 401);
    assert_eq!(body["msg"], "Acesso negado");
    assert_eq!(app.state.records.lock().unwrap().document_count().unwrap(), 0);
}

#[tokio::test]
async fn body_role_cannot_override_token_role() {
    let app = spawn_app().await;
    let tutor_token = app.token_for("joao@petcare.com", "senha-tutor").await;

    // The body claims VET; the token says tutor. The token wins.
    let (status, body) = app
        .post_prescription(Some(&tutor_token), &buscopan_body())
        .await;

    assert_eq!(status, 403);
    assert_eq!(body["msg"], "Apenas veterinários podem prescrever!");
    assert_eq!(app.state.records.lock().unwrap().document_count().unwrap(), 0);
}

#[tokio::test]
async fn admin_role_is_also_denied() {
    let app = spawn_app().await;
    let admin_token = app.token_for("adm@petcare.com", "senha-adm").await;

    let (status, _) = app
        .post_prescription(Some(&admin_token), &buscopan_body())
        .await;
    assert_eq!(status, 403);
}

#[tokio::test]
async fn unknown_tax_id_is_not_found() {
    let app = spawn_app().await;
    let vet_token = app.token_for("ana@petcare.com", "senha-vet").await;

    let mut body = buscopan_body();
    body["cpf_cliente"] = json!("99999999999");

    let (status, response) = app.post_prescription(Some(&vet_token), &body).await;
    assert_eq!(status, 404);
    assert_eq!(response["msg"], "Cliente/Pet não encontrado");
    assert_eq!(app.state.records.lock().unwrap().document_count().unwrap(), 0);
}

#[tokio::test]
async fn missing_fields_fail_validation() {
    let app = spawn_app().await;
    let vet_token = app.token_for("ana@petcare.com", "senha-vet").await;

    let mut body = buscopan_body();
    body["diagnostico"] = json!("");

    let (status, _) = app.post_prescription(Some(&vet_token), &body).await;
    assert_eq!(status, 400);
    assert_eq!(app.state.records.lock().unwrap().document_count().unwrap(), 0);
}

#[tokio::test]
async fn veterinarian_write_appends_to_history() {
    let app = spawn_app().await;
    let vet_token = app.token_for("ana@petcare.com", "senha-vet").await;

    let (status, body) = app
        .post_prescription(Some(&vet_token), &buscopan_body())
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["msg"], "Prescrição salva com sucesso!");
    assert_eq!(body["id_pet"], app.patient_id.as_str());

    let records = app.state.records.lock().unwrap();
    let history = records.history(&app.patient_id).unwrap().unwrap();
    assert_eq!(history.len(), 1);

    let entry = &history.entries[0];
    assert_eq!(entry.diagnosis, "Dor de barriga forte");
    assert_eq!(entry.veterinarian_license, 11223);
    assert_eq!(entry.medications[0].name, "Buscopan Pet");
    assert_eq!(entry.medications[0].dosage, "1 comprimido");
    assert_eq!(entry.medications[0].frequency, "A cada 8 horas");
}

#[tokio::test]
async fn numeric_cpf_is_accepted() {
    let app = spawn_app().await;
    let vet_token = app.token_for("ana@petcare.com", "senha-vet").await;

    let mut body = buscopan_body();
    body["cpf_cliente"] = json!(10000000002u64);

    let (status, response) = app.post_prescription(Some(&vet_token), &body).await;
    assert_eq!(status, 200);
    assert_eq!(response["id_pet"], app.patient_id.as_str());
}

#[tokio::test]
async fn two_writes_extend_history_in_order() {
    let app = spawn_app().await;
    let vet_token = app.token_for("ana@petcare.com", "senha-vet").await;

    let (status, _) = app
        .post_prescription(Some(&vet_token), &buscopan_body())
        .await;
    assert_eq!(status, 200);

    let mut second = buscopan_body();
    second["diagnostico"] = json!("Retorno: quadro estável");
    let (status, _) = app.post_prescription(Some(&vet_token), &second).await;
    assert_eq!(status, 200);

    let records = app.state.records.lock().unwrap();
    let history = records.history(&app.patient_id).unwrap().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history.entries[0].diagnosis, "Dor de barriga forte");
    assert_eq!(history.entries[1].diagnosis, "Retorno: quadro estável");
}

#[tokio::test]
async fn forged_token_is_rejected() {
    let app = spawn_app().await;

    let (status, _) = app
        .post_prescription(Some("abc.def.ghi"), &buscopan_body())
        .await;
    assert_eq!(status, 401);
}
