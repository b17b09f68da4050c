//! Prescription write path.
//!
//! Pipeline: role gate → server-side validation → tax id resolution →
//! atomic history append. The gate runs first and short-circuits before
//! any store is touched. Resolution and the append are two independent
//! stores with no shared transaction: the resolved patient key is a
//! per-request snapshot. The one required atomicity guarantee, that
//! concurrent same-patient appends must both land, is carried by the
//! record store's single-statement upsert.

use crate::auth::authorize;
use crate::db::Database;
use crate::models::{
    Capability, PrescriptionEntry, PrescriptionRequest, SessionContext, TaxId,
};
use crate::records::PrescriptionStore;
use crate::CoreError;

/// Relational lookup seam for the write path.
pub trait ClientDirectory {
    /// Resolve a tax id to the internal patient key.
    fn patient_for_tax_id(&self, tax_id: &TaxId) -> Result<Option<String>, CoreError>;
}

/// Document-store seam for the write path.
pub trait RecordSink {
    /// Atomically create-or-append the entry under the patient key.
    fn append_prescription(
        &self,
        patient_id: &str,
        entry: &PrescriptionEntry,
    ) -> Result<(), CoreError>;
}

impl ClientDirectory for Database {
    fn patient_for_tax_id(&self, tax_id: &TaxId) -> Result<Option<String>, CoreError> {
        Database::patient_for_tax_id(self, tax_id).map_err(Into::into)
    }
}

impl RecordSink for PrescriptionStore {
    fn append_prescription(
        &self,
        patient_id: &str,
        entry: &PrescriptionEntry,
    ) -> Result<(), CoreError> {
        PrescriptionStore::append_prescription(self, patient_id, entry).map_err(Into::into)
    }
}

/// Re-validate the request server-side; the client's pre-flight checks are
/// a convenience, not an authority.
fn validate(request: &PrescriptionRequest) -> Result<TaxId, CoreError> {
    let tax_id = TaxId::parse(&request.client_tax_id)?;

    if request.diagnosis.trim().is_empty() {
        return Err(CoreError::Validation("missing field: diagnostico".into()));
    }
    if request.medications.is_empty() {
        return Err(CoreError::Validation("missing field: medicamentos".into()));
    }
    for medication in &request.medications {
        if medication.name.trim().is_empty()
            || medication.dosage.trim().is_empty()
            || medication.frequency.trim().is_empty()
        {
            return Err(CoreError::Validation("incomplete medication line".into()));
        }
    }
    if request.veterinarian_license == 0 {
        return Err(CoreError::Validation("missing field: crmv".into()));
    }

    Ok(tax_id)
}

/// Run the full write path for one prescription request.
///
/// Returns the internal patient key the entry was appended under.
pub fn submit_prescription(
    session: &SessionContext,
    directory: &impl ClientDirectory,
    records: &impl RecordSink,
    request: &PrescriptionRequest,
) -> Result<String, CoreError> {
    authorize(Capability::WritePrescription, session.role)?;

    let tax_id = validate(request)?;

    let patient_id = directory
        .patient_for_tax_id(&tax_id)?
        .ok_or(CoreError::NotFound)?;

    let entry = PrescriptionEntry::new(
        request.veterinarian_license,
        request.diagnosis.clone(),
        request.medications.clone(),
    );
    records.append_prescription(&patient_id, &entry)?;

    Ok(patient_id)
}
