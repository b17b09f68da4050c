//! Full-loop tests: the real client against the real server.
//!
//! Covers login session persistence, token attachment on the write path,
//! and the role gate seen from the client side.

use std::sync::Arc;

use petcare_client::{ApiOutcome, ApiService, PrescriptionForm, SessionStore};
use petcare_core::auth::create_account;
use petcare_core::models::{ClientLink, Medication, Role, TaxId};
use petcare_server::{build_router, AppState};

const TUTOR_TAX_ID: &str = "10000000002";

async fn spawn_server() -> (String, Arc<AppState>, String) {
    let state = AppState::in_memory("test-secret").unwrap();

    let patient_id = {
        let db = state.db.lock().unwrap();

        let vet = create_account("ana@petcare.com", "Dra. Ana Souza", Role::Veterinarian, "senha-vet");
        db.insert_account(&vet).unwrap();

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

    (format!("http://{addr}"), state, patient_id)
}

fn fresh_service(base_url: &str, dir: &tempfile::TempDir) -> ApiService {
    let session = SessionStore::open(dir.path().join("session.json"));
    ApiService::new(base_url.to_string(), session)
}

fn buscopan_form() -> PrescriptionForm {
    PrescriptionForm {
        client_tax_id: TUTOR_TAX_ID.into(),
        diagnosis: "Dor de barriga forte".into(),
        medications: vec![Medication {
            name: "Buscopan Pet".into(),
            dosage: "1 comprimido".into(),
            frequency: "A cada 8 horas".into(),
        }],
        veterinarian_license: 11223,
    }
}

#[tokio::test]
async fn login_persists_session() {
    let (base_url, _state, _) = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let mut service = fresh_service(&base_url, &dir);

    let outcome = service.login("ana@petcare.com", "senha-vet").await.unwrap();
    assert!(outcome.is_success());

    assert!(service.session().is_authenticated());
    assert!(service.session().token().is_some());
    let profile = service.session().user().unwrap();
    assert_eq!(profile.name, "Dra. Ana Souza");
    assert_eq!(profile.role, Role::Veterinarian);
}

#[tokio::test]
async fn tutor_login_stores_pet_id() {
    let (base_url, _state, patient_id) = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let mut service = fresh_service(&base_url, &dir);

    let outcome = service.login("joao@petcare.com", "senha-tutor").await.unwrap();
    assert!(outcome.is_success());
    assert_eq!(service.session().pet_id(), Some(patient_id.as_str()));
}

#[tokio::test]
async fn failed_login_leaves_session_empty() {
    let (base_url, _state, _) = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let mut service = fresh_service(&base_url, &dir);

    let outcome = service.login("ana@petcare.com", "senha-errada").await.unwrap();
    assert_eq!(
        outcome,
        ApiOutcome::HttpError {
            status: 401,
            message: "Acesso negado".into()
        }
    );
    assert!(!service.session().is_authenticated());
    assert!(service.session().token().is_none());
}

#[tokio::test]
async fn veterinarian_submits_prescription_end_to_end() {
    let (base_url, state, patient_id) = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let mut service = fresh_service(&base_url, &dir);

    service.login("ana@petcare.com", "senha-vet").await.unwrap();
    let outcome = service.submit_prescription(&buscopan_form()).await;

    match outcome {
        ApiOutcome::Success { status, data } => {
            assert_eq!(status, 200);
            assert_eq!(data["msg"], "Prescrição salva com sucesso!");
            assert_eq!(data["id_pet"], patient_id.as_str());
        }
        other => panic!("expected success, got {:?}", other),
    }

    let records = state.records.lock().unwrap();
    let history = records.history(&patient_id).unwrap().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history.entries[0].diagnosis, "Dor de barriga forte");
}

#[tokio::test]
async fn tutor_submission_is_forbidden() {
    let (base_url, state, _) = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let mut service = fresh_service(&base_url, &dir);

    service.login("joao@petcare.com", "senha-tutor").await.unwrap();
    let outcome = service.submit_prescription(&buscopan_form()).await;

    assert_eq!(
        outcome,
        ApiOutcome::HttpError {
            status: 403,
            message: "Apenas veterinários podem prescrever!".into()
        }
    );
    assert_eq!(state.records.lock().unwrap().document_count().unwrap(), 0);
}

#[tokio::test]
async fn logged_out_submission_is_unauthorized() {
    let (base_url, _state, _) = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let mut service = fresh_service(&base_url, &dir);

    service.login("ana@petcare.com", "senha-vet").await.unwrap();
    service.logout().unwrap();

    let outcome = service.submit_prescription(&buscopan_form()).await;
    assert_eq!(outcome.status(), Some(401));
}
