use chrono::Local;

use crate::error::ValidationError;
use crate::record::{today_string, PatientRecord, UNASSIGNED_DOCTOR};
use crate::report::{export_patients_csv, DownloadSink};
use crate::storage::{load_patients, save_patients, KeyValueStore};
use crate::view::{compute_stats, project_rows, ViewMount};

/// Status every freshly registered patient starts with.
pub const INITIAL_STATUS: &str = "Under Review";

/// One row of the fallback presentation source the store seeds from when no
/// persisted state exists.
#[derive(Debug, Clone)]
pub struct SeedRow {
    pub name: String,
    pub age: String,
    pub disease: String,
    pub status: String,
}

/// Provider of pre-rendered rows. Called exactly once, and only when storage
/// holds nothing usable.
pub trait SeedSource {
    fn rows(&self) -> Vec<SeedRow>;
}

/// Registration form input, untrimmed.
#[derive(Debug, Clone, Default)]
pub struct RegistrationRequest {
    pub name: String,
    pub age: String,
    pub disease: String,
    pub doctor: String,
}

/// Owns the canonical ordered patient sequence. Every mutation persists the
/// full sequence and refreshes the mounted view before returning.
pub struct PatientStore<S: KeyValueStore> {
    storage: S,
    records: Vec<PatientRecord>,
}

impl<S: KeyValueStore> PatientStore<S> {
    /// Adopts persisted state when it is present and non-empty; otherwise
    /// derives an initial sequence from the seed source, persists it, and
    /// renders. The immediate persist keeps the seed path from ever running
    /// twice against the same storage.
    pub fn initialize(storage: S, seed: &dyn SeedSource, view: &mut dyn ViewMount) -> PatientStore<S> {
        let mut store = PatientStore {
            storage,
            records: Vec::new(),
        };
        match load_patients(&store.storage) {
            Some(records) if !records.is_empty() => {
                log::debug!("loaded {} persisted patient record(s)", records.len());
                store.records = records;
            }
            _ => {
                let today = today_string();
                store.records = seed
                    .rows()
                    .into_iter()
                    .map(|row| PatientRecord {
                        name: row.name,
                        age: row.age,
                        disease: row.disease,
                        doctor: UNASSIGNED_DOCTOR.to_string(),
                        status: row.status,
                        created_at: today.clone(),
                    })
                    .collect();
                log::debug!("seeded {} patient record(s) from the fallback table", store.records.len());
                save_patients(&mut store.storage, store.records.as_slice());
            }
        }
        store.refresh(view);
        store
    }

    /// Validates, appends, persists, re-renders, and exports the CSV
    /// snapshot. A blank field (after trimming) aborts before any state
    /// changes; the caller surfaces the error to the user.
    pub fn register(
        &mut self,
        request: &RegistrationRequest,
        view: &mut dyn ViewMount,
        downloads: &mut dyn DownloadSink,
    ) -> Result<PatientRecord, ValidationError> {
        let name = required(request.name.as_str(), "Patient name")?;
        let age = required(request.age.as_str(), "Patient age")?;
        let disease = required(request.disease.as_str(), "Disease")?;
        let doctor = required(request.doctor.as_str(), "Doctor")?;

        let record = PatientRecord {
            name,
            age,
            disease,
            doctor,
            status: INITIAL_STATUS.to_string(),
            created_at: today_string(),
        };
        self.records.push(record.clone());
        save_patients(&mut self.storage, self.records.as_slice());
        self.refresh(view);
        export_patients_csv(self.records.as_slice(), downloads);
        Ok(record)
    }

    /// Read-only snapshot of the canonical sequence.
    pub fn all(&self) -> &[PatientRecord] {
        self.records.as_slice()
    }

    fn refresh(&self, view: &mut dyn ViewMount) {
        let rows = project_rows(self.records.as_slice());
        let stats = compute_stats(self.records.as_slice(), Local::now());
        view.mount_rows(rows.as_slice());
        view.mount_stats(&stats);
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}
