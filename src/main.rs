use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use caredesk::filter::{apply_search, FilterEntry, PageSections};
use caredesk::notify::{NotificationSink, Severity};
use caredesk::record::DISEASE_OPTIONS;
use caredesk::report::{
    build_department_report, build_patient_report, department_report_filename,
    download_item_filename, export_patients_csv, patient_report_filename,
    DepartmentReportRequest, DownloadSink, FsDownloadSink, PatientReportRequest,
};
use caredesk::storage::FileStorage;
use caredesk::store::{PatientStore, RegistrationRequest, SeedRow, SeedSource};
use caredesk::view::{DashboardStats, PatientRow, ViewMount};

// Pre-rendered demo content for the portal sections. The seed table plays the
// part of the markup the store scrapes on first run; the other three feed the
// live search.
const SEED_TABLE: [(&str, &str, &str, &str); 4] = [
    ("John Smith", "45", "Diabetes", "Stable"),
    ("Sarah Johnson", "32", "Hypertension", "Under Review"),
    ("Michael Brown", "58", "Cardiac Arrhythmia", "Critical"),
    ("Emily Davis", "27", "Asthma", "Stable"),
];

const DOCTOR_CARDS: [&str; 4] = [
    "Dr. Anita Patel - Cardiology",
    "Dr. James Lee - Endocrinology",
    "Dr. Maria Garcia - Pulmonology",
    "Dr. Robert Chen - Neurology",
];

const DOWNLOAD_ITEMS: [&str; 3] = [
    "Annual Checkup Summary",
    "Lab Results Overview",
    "Vaccination History",
];

const DEPARTMENT_ROWS: [&str; 4] = [
    "Cardiology - Ward B - 24 beds",
    "Endocrinology - Ward C - 18 beds",
    "Pulmonology - Ward A - 20 beds",
    "Neurology - Ward D - 16 beds",
];

#[derive(Parser)]
#[command(
    name = "caredesk",
    version,
    about = "CareDesk patient portal demo runtime",
    long_about = "CareDesk is a demo patient portal: it keeps a patient list in a local\nstorage root, renders a table and dashboard counters, filters the page\nsections, and generates synthetic text/CSV reports.\n\nExamples:\n  caredesk list\n  caredesk register --name \"Jane Doe\" --age 34 --disease Flu --doctor \"Dr. Patel\"\n  caredesk search cardiology"
)]
struct Cli {
    /// Storage root (defaults to ~/.caredesk).
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the patient table and the dashboard counters.
    List,
    /// Register a new patient.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: String,
        /// One of the portal's disease options.
        #[arg(long)]
        disease: String,
        #[arg(long)]
        doctor: String,
    },
    /// Export the patient list as patients.csv.
    ExportCsv,
    /// Generate a per-patient text report.
    PatientReport {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_name = "YYYY-MM-DD")]
        from: Option<String>,
        #[arg(long, value_name = "YYYY-MM-DD")]
        to: Option<String>,
    },
    /// Generate the demo report behind a download-list entry.
    DownloadItem {
        /// Displayed text of the download-list entry.
        label: String,
    },
    /// Generate a department activity report.
    DepartmentReport {
        #[arg(long)]
        department: String,
        #[arg(long, value_name = "YYYY-MM-DD")]
        from: Option<String>,
        #[arg(long, value_name = "YYYY-MM-DD")]
        to: Option<String>,
    },
    /// Live-filter the four page sections by a search term.
    Search { term: String },
    /// Send a contact message (acknowledged, never stored).
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
    /// List the disease options the registration form offers.
    Diseases,
}

struct DemoTableSeed;

impl SeedSource for DemoTableSeed {
    fn rows(&self) -> Vec<SeedRow> {
        SEED_TABLE
            .iter()
            .map(|(name, age, disease, status)| SeedRow {
                name: name.to_string(),
                age: age.to_string(),
                disease: disease.to_string(),
                status: status.to_string(),
            })
            .collect()
    }
}

/// Console rendering of the table and counters.
#[derive(Default)]
struct ConsoleView {
    enabled: bool,
}

impl ConsoleView {
    fn visible() -> ConsoleView {
        ConsoleView { enabled: true }
    }
}

impl ViewMount for ConsoleView {
    fn mount_rows(&mut self, rows: &[PatientRow]) {
        if !self.enabled {
            return;
        }
        println!(
            "{:<24} {:>4}  {:<22} {}",
            "NAME".bold(),
            "AGE".bold(),
            "DISEASE".bold(),
            "STATUS".bold()
        );
        for row in rows {
            let status = match row.status_class {
                "status-critical" => row.status.red(),
                "status-review" => row.status.yellow(),
                _ => row.status.green(),
            };
            println!(
                "{:<24} {:>4}  {:<22} {status}",
                row.name, row.age, row.disease
            );
        }
    }

    fn mount_stats(&mut self, stats: &DashboardStats) {
        if !self.enabled {
            return;
        }
        println!();
        println!(
            "Total: {}  Registered today: {}  Pending reports: {}  Active doctors: {}  Last sync: {}",
            stats.total,
            stats.registered_today,
            stats.pending_reports,
            stats.active_doctors,
            stats.last_sync
        );
    }
}

struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => println!("{message}"),
            Severity::Warning => println!("{}", message.yellow()),
            Severity::Error => eprintln!("{}", message.red()),
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
}

fn storage_root(cli_dir: Option<PathBuf>) -> PathBuf {
    cli_dir
        .or_else(|| home_dir().map(|home| home.join(".caredesk")))
        .unwrap_or_else(|| PathBuf::from(".caredesk"))
}

fn open_store(
    root: &PathBuf,
    view: &mut dyn ViewMount,
) -> Result<PatientStore<FileStorage>, String> {
    let storage = FileStorage::open(root.as_path()).map_err(|err| err.to_string())?;
    Ok(PatientStore::initialize(storage, &DemoTableSeed, view))
}

fn page_sections(store: &PatientStore<FileStorage>) -> PageSections {
    PageSections {
        patients: store
            .all()
            .iter()
            .map(|record| {
                FilterEntry::new(format!(
                    "{} {} {} {} {}",
                    record.name, record.age, record.disease, record.doctor, record.status
                ))
            })
            .collect(),
        doctors: DOCTOR_CARDS.iter().copied().map(FilterEntry::new).collect(),
        downloads: DOWNLOAD_ITEMS.iter().copied().map(FilterEntry::new).collect(),
        departments: DEPARTMENT_ROWS.iter().copied().map(FilterEntry::new).collect(),
    }
}

fn print_section(title: &str, entries: &[FilterEntry]) {
    println!("{}", title.bold());
    for entry in entries {
        if entry.visible {
            println!("  {}", entry.text);
        } else {
            println!("  {}", format!("{} (hidden)", entry.text).dimmed());
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let root = storage_root(cli.data_dir);
    let mut notifier = ConsoleNotifier;
    let mut downloads = FsDownloadSink::new(root.join("downloads"));

    match cli.command {
        Command::List => {
            let mut view = ConsoleView::visible();
            open_store(&root, &mut view)?;
        }
        Command::Register {
            name,
            age,
            disease,
            doctor,
        } => {
            let mut quiet = ConsoleView::default();
            let mut store = open_store(&root, &mut quiet)?;
            let mut view = ConsoleView::visible();
            let request = RegistrationRequest {
                name,
                age,
                disease,
                doctor,
            };
            match store.register(&request, &mut view, &mut downloads) {
                Ok(record) => notifier.notify(
                    Severity::Info,
                    format!("Patient {} registered successfully.", record.name).as_str(),
                ),
                Err(err) => notifier.notify(Severity::Error, err.to_string().as_str()),
            }
        }
        Command::ExportCsv => {
            let mut quiet = ConsoleView::default();
            let store = open_store(&root, &mut quiet)?;
            if export_patients_csv(store.all(), &mut downloads) {
                notifier.notify(Severity::Info, "Exported patients.csv.");
            } else {
                notifier.notify(Severity::Warning, "No patients to export.");
            }
        }
        Command::PatientReport { id, name, from, to } => {
            let request = PatientReportRequest {
                id,
                name,
                from_date: from,
                to_date: to,
            };
            let filename = patient_report_filename(request.name.as_deref().unwrap_or(""));
            let report = build_patient_report(&mut rand::thread_rng(), &request);
            downloads.download(filename.as_str(), report.as_str());
            notifier.notify(Severity::Info, format!("Generated {filename}.").as_str());
        }
        Command::DownloadItem { label } => {
            let request = PatientReportRequest {
                name: Some(label.clone()),
                ..PatientReportRequest::default()
            };
            let filename = download_item_filename(label.as_str());
            let report = build_patient_report(&mut rand::thread_rng(), &request);
            downloads.download(filename.as_str(), report.as_str());
            notifier.notify(Severity::Info, format!("Generated {filename}.").as_str());
        }
        Command::DepartmentReport {
            department,
            from,
            to,
        } => {
            let request = DepartmentReportRequest {
                department: department.clone(),
                from_date: from,
                to_date: to,
            };
            let filename = department_report_filename(department.as_str());
            let report = build_department_report(&mut rand::thread_rng(), &request);
            downloads.download(filename.as_str(), report.as_str());
            notifier.notify(Severity::Info, format!("Generated {filename}.").as_str());
        }
        Command::Search { term } => {
            let mut quiet = ConsoleView::default();
            let store = open_store(&root, &mut quiet)?;
            let mut sections = page_sections(&store);
            apply_search(&mut sections, term.as_str());
            print_section("Patients", sections.patients.as_slice());
            print_section("Doctors", sections.doctors.as_slice());
            print_section("Downloads", sections.downloads.as_slice());
            print_section("Departments", sections.departments.as_slice());
        }
        Command::Contact {
            name,
            email,
            message,
        } => {
            let _ = message;
            notifier.notify(
                Severity::Info,
                format!("Thank you, {name}. We will reply to {email} shortly.").as_str(),
            );
        }
        Command::Diseases => {
            for option in DISEASE_OPTIONS {
                println!("{option}");
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{}", err.red());
        std::process::exit(1);
    }
}
