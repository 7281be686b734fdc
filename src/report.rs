use std::fs;
use std::path::PathBuf;

use chrono::Local;
use rand::Rng;

use crate::record::PatientRecord;

/// Fixed CSV header for patient exports.
pub const CSV_COLUMNS: [&str; 6] = ["Name", "Age", "Disease", "Doctor", "Status", "Created At"];

pub const CSV_EXPORT_FILENAME: &str = "patients.csv";

/// File-download seam. Fire-and-forget: implementations report nothing back
/// and must not fail the calling operation.
pub trait DownloadSink {
    fn download(&mut self, filename: &str, content: &str);
}

/// Sink that drops generated files into a downloads directory.
#[derive(Debug)]
pub struct FsDownloadSink {
    dir: PathBuf,
}

impl FsDownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> FsDownloadSink {
        FsDownloadSink { dir: dir.into() }
    }
}

impl DownloadSink for FsDownloadSink {
    fn download(&mut self, filename: &str, content: &str) {
        if let Err(err) = fs::create_dir_all(self.dir.as_path()) {
            log::warn!("could not create downloads directory: {err}");
            return;
        }
        let path = self.dir.join(filename);
        match fs::write(path.as_path(), content) {
            Ok(()) => log::info!("saved {}", path.display()),
            Err(err) => log::warn!("could not save {filename}: {err}"),
        }
    }
}

/// Lower-cased identifier with whitespace runs collapsed to underscores,
/// used to key generated filenames.
pub fn report_slug(value: &str) -> String {
    let slug = value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    if slug.is_empty() {
        "patient".to_string()
    } else {
        slug
    }
}

pub fn patient_report_filename(name: &str) -> String {
    format!("{}_report.txt", report_slug(name))
}

pub fn download_item_filename(label: &str) -> String {
    format!("{}_demo.txt", report_slug(label))
}

pub fn department_report_filename(department: &str) -> String {
    format!("{}_department_report.txt", report_slug(department))
}

#[derive(Debug, Default, Clone)]
pub struct PatientReportRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DepartmentReportRequest {
    pub department: String,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

fn field_or_na(value: Option<&String>) -> &str {
    match value {
        Some(text) if !text.trim().is_empty() => text.as_str(),
        _ => "N/A",
    }
}

/// Synthetic per-patient report. The vital signs are uniform random draws
/// from fixed demo ranges; nothing here reads real clinical data.
pub fn build_patient_report<R: Rng>(rng: &mut R, request: &PatientReportRequest) -> String {
    let systolic = rng.gen_range(110..=139);
    let diastolic = rng.gen_range(70..=84);
    let sugar = rng.gen_range(80..=129);
    let heart_rate = rng.gen_range(65..=89);
    let generated = Local::now().format("%Y-%m-%d %H:%M:%S");

    format!(
        "CAREDESK MEDICAL CENTER\n\
         PATIENT HEALTH REPORT\n\
         =======================================\n\
         Patient ID: {id}\n\
         Patient Name: {name}\n\
         Report Period: {from} to {to}\n\
         Generated: {generated}\n\
         \n\
         VITAL SIGNS\n\
         ---------------------------------------\n\
         Blood Pressure: {systolic}/{diastolic} mmHg\n\
         Fasting Blood Sugar: {sugar} mg/dL\n\
         Heart Rate: {heart_rate} bpm\n\
         \n\
         NOTES\n\
         ---------------------------------------\n\
         All measurements were taken during routine observation.\n\
         This document is produced by the CareDesk demo portal and\n\
         contains synthetic values for demonstration purposes only.\n\
         Please consult your assigned physician before acting on any\n\
         figure in this report.\n",
        id = field_or_na(request.id.as_ref()),
        name = field_or_na(request.name.as_ref()),
        from = field_or_na(request.from_date.as_ref()),
        to = field_or_na(request.to_date.as_ref()),
    )
}

/// Synthetic department summary with three randomized metrics.
pub fn build_department_report<R: Rng>(rng: &mut R, request: &DepartmentReportRequest) -> String {
    let patients = rng.gen_range(20..=79);
    let average_stay = rng.gen_range(15..=55) as f64 / 10.0;
    let discharge_rate = rng.gen_range(850..=950) as f64 / 10.0;
    let generated = Local::now().format("%Y-%m-%d %H:%M:%S");

    format!(
        "CAREDESK MEDICAL CENTER\n\
         DEPARTMENT ACTIVITY REPORT\n\
         =======================================\n\
         Department: {department}\n\
         Report Period: {from} to {to}\n\
         Generated: {generated}\n\
         \n\
         KEY METRICS\n\
         ---------------------------------------\n\
         Patients Treated: {patients}\n\
         Average Stay: {average_stay:.1} days\n\
         Discharge Rate: {discharge_rate:.1}%\n\
         \n\
         NOTES\n\
         ---------------------------------------\n\
         Figures above are synthetic demo metrics generated by the\n\
         CareDesk portal and do not reflect real hospital activity.\n",
        department = request.department.as_str(),
        from = field_or_na(request.from_date.as_ref()),
        to = field_or_na(request.to_date.as_ref()),
    )
}

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Serializes the current snapshot as CSV, every field quoted. An empty
/// sequence yields `None` rather than a header-only file; callers must check.
pub fn patients_csv(records: &[PatientRecord]) -> Option<String> {
    if records.is_empty() {
        return None;
    }
    let mut lines: Vec<String> = Vec::with_capacity(records.len() + 1);
    lines.push(
        CSV_COLUMNS
            .iter()
            .map(|column| csv_field(column))
            .collect::<Vec<_>>()
            .join(","),
    );
    for record in records {
        let fields = [
            record.name.as_str(),
            record.age.as_str(),
            record.disease.as_str(),
            record.doctor.as_str(),
            record.status.as_str(),
            record.created_at.as_str(),
        ];
        lines.push(
            fields
                .iter()
                .map(|field| csv_field(field))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    Some(lines.join("\n"))
}

/// Hands the CSV snapshot to the sink. Returns whether anything was exported.
pub fn export_patients_csv(records: &[PatientRecord], sink: &mut dyn DownloadSink) -> bool {
    match patients_csv(records) {
        Some(csv) => {
            sink.download(CSV_EXPORT_FILENAME, csv.as_str());
            true
        }
        None => false,
    }
}
