use chrono::Local;
use serde::{Deserialize, Serialize};

/// Sentinel doctor value meaning "not yet assigned". Excluded from the
/// distinct-doctor dashboard count.
pub const UNASSIGNED_DOCTOR: &str = "N/A";

/// Conditions offered by the registration form. The store itself does not
/// enforce membership; the host presents this list as the only choices.
pub const DISEASE_OPTIONS: [&str; 8] = [
    "Flu",
    "Diabetes",
    "Hypertension",
    "Asthma",
    "Cardiac Arrhythmia",
    "Migraine",
    "Arthritis",
    "Seasonal Allergy",
];

/// The one persisted entity. Field names match the flat JSON blob the portal
/// has always written, so older persisted state loads unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub name: String,
    pub age: String,
    pub disease: String,
    pub doctor: String,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Display category derived from the free-form status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Stable,
    UnderReview,
    Critical,
}

impl StatusCategory {
    /// Case-insensitive substring rule: "review" wins, then "critical",
    /// anything else falls back to stable.
    pub fn from_status(status: &str) -> StatusCategory {
        let lower = status.to_lowercase();
        if lower.contains("review") {
            StatusCategory::UnderReview
        } else if lower.contains("critical") {
            StatusCategory::Critical
        } else {
            StatusCategory::Stable
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusCategory::Stable => "Stable",
            StatusCategory::UnderReview => "Under Review",
            StatusCategory::Critical => "Critical",
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            StatusCategory::Stable => "status-stable",
            StatusCategory::UnderReview => "status-review",
            StatusCategory::Critical => "status-critical",
        }
    }
}

/// Local calendar date as stored in `createdAt`.
pub fn today_string() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
