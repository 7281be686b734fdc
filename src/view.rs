use std::collections::HashSet;

use chrono::{DateTime, Local};

use crate::record::{PatientRecord, StatusCategory, UNASSIGNED_DOCTOR};

/// Placeholder doctor count shown while no real doctor has been assigned.
/// Long-standing display quirk the dashboard depends on; keep it.
const ACTIVE_DOCTORS_PLACEHOLDER: usize = 4;

/// One table row, ready for whatever mounts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRow {
    pub name: String,
    pub age: String,
    pub disease: String,
    pub status: String,
    pub status_class: &'static str,
}

/// The four dashboard counters plus the sync marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub registered_today: usize,
    pub pending_reports: usize,
    pub active_doctors: usize,
    pub last_sync: String,
}

/// Abstract "replace the rendered rows / counters" capability. Mount calls
/// fully replace the previous view; nothing is diffed.
pub trait ViewMount {
    fn mount_rows(&mut self, rows: &[PatientRow]);
    fn mount_stats(&mut self, stats: &DashboardStats);
}

/// Projects the snapshot into rows, preserving sequence order.
pub fn project_rows(records: &[PatientRecord]) -> Vec<PatientRow> {
    records
        .iter()
        .map(|record| PatientRow {
            name: record.name.clone(),
            age: record.age.clone(),
            disease: record.disease.clone(),
            status: record.status.clone(),
            status_class: StatusCategory::from_status(record.status.as_str()).class_name(),
        })
        .collect()
}

/// Derives the dashboard counters from the same snapshot the rows came from.
pub fn compute_stats(records: &[PatientRecord], now: DateTime<Local>) -> DashboardStats {
    let today = now.format("%Y-%m-%d").to_string();
    let registered_today = records
        .iter()
        .filter(|record| record.created_at.starts_with(today.as_str()))
        .count();
    let pending_reports = records
        .iter()
        .filter(|record| !record.status.eq_ignore_ascii_case("stable"))
        .count();

    let doctors: HashSet<&str> = records
        .iter()
        .map(|record| record.doctor.as_str())
        .filter(|doctor| *doctor != UNASSIGNED_DOCTOR)
        .collect();
    let active_doctors = if doctors.is_empty() {
        ACTIVE_DOCTORS_PLACEHOLDER
    } else {
        doctors.len()
    };

    DashboardStats {
        total: records.len(),
        registered_today,
        pending_reports,
        active_doctors,
        last_sync: now.format("%H:%M:%S").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(name: &str, doctor: &str, status: &str, created_at: &str) -> PatientRecord {
        PatientRecord {
            name: name.to_string(),
            age: "50".to_string(),
            disease: "Asthma".to_string(),
            doctor: doctor.to_string(),
            status: status.to_string(),
            created_at: created_at.to_string(),
        }
    }

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 25, 9, 30, 0).unwrap()
    }

    #[test]
    fn rows_keep_sequence_order_and_classify_status() {
        let records = vec![
            record("A", "N/A", "Pending Review", "2026-08-25"),
            record("B", "N/A", "Critical Alert", "2026-08-25"),
            record("C", "N/A", "Discharged", "2026-08-25"),
        ];
        let rows = project_rows(records.as_slice());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "A");
        assert_eq!(rows[0].status_class, "status-review");
        assert_eq!(rows[1].status_class, "status-critical");
        assert_eq!(rows[2].status_class, "status-stable");
    }

    #[test]
    fn registered_today_matches_date_prefix() {
        let records = vec![
            record("A", "N/A", "Stable", "2026-08-25"),
            record("B", "N/A", "Stable", "2026-08-24"),
            record("C", "N/A", "Stable", "2026-08-25"),
        ];
        let stats = compute_stats(records.as_slice(), fixed_now());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.registered_today, 2);
    }

    #[test]
    fn pending_reports_excludes_only_exactly_stable() {
        let records = vec![
            record("A", "N/A", "Stable", "2026-08-25"),
            record("B", "N/A", "STABLE", "2026-08-25"),
            record("C", "N/A", "Under Review", "2026-08-25"),
            record("D", "N/A", "Discharged", "2026-08-25"),
        ];
        let stats = compute_stats(records.as_slice(), fixed_now());
        assert_eq!(stats.pending_reports, 2);
    }

    #[test]
    fn active_doctors_counts_distinct_and_skips_sentinel() {
        let records = vec![
            record("A", "Dr. A", "Stable", "2026-08-25"),
            record("B", "N/A", "Stable", "2026-08-25"),
            record("C", "Dr. A", "Stable", "2026-08-25"),
            record("D", "Dr. B", "Stable", "2026-08-25"),
        ];
        let stats = compute_stats(records.as_slice(), fixed_now());
        assert_eq!(stats.active_doctors, 2);
    }

    #[test]
    fn active_doctors_falls_back_to_placeholder() {
        let records = vec![
            record("A", "N/A", "Stable", "2026-08-25"),
            record("B", "N/A", "Stable", "2026-08-25"),
        ];
        let stats = compute_stats(records.as_slice(), fixed_now());
        assert_eq!(stats.active_doctors, 4);

        let stats = compute_stats(&[], fixed_now());
        assert_eq!(stats.active_doctors, 4);
    }

    #[test]
    fn last_sync_formats_wall_clock_time() {
        let stats = compute_stats(&[], fixed_now());
        assert_eq!(stats.last_sync, "09:30:00");
    }
}
