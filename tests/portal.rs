use caredesk::filter::{apply_search, FilterEntry, PageSections};
use caredesk::notify::{NotificationSink, Severity, SilentNotifier};
use caredesk::record::{today_string, UNASSIGNED_DOCTOR};
use caredesk::report::{export_patients_csv, DownloadSink};
use caredesk::storage::MemoryStorage;
use caredesk::store::{PatientStore, RegistrationRequest, SeedRow, SeedSource};
use caredesk::view::{DashboardStats, PatientRow, ViewMount};

struct JaneDoeTable;

impl SeedSource for JaneDoeTable {
    fn rows(&self) -> Vec<SeedRow> {
        vec![SeedRow {
            name: "Jane Doe".to_string(),
            age: "34".to_string(),
            disease: "Flu".to_string(),
            status: "Stable".to_string(),
        }]
    }
}

#[derive(Default)]
struct PageView {
    rows: Vec<PatientRow>,
    stats: Option<DashboardStats>,
}

impl ViewMount for PageView {
    fn mount_rows(&mut self, rows: &[PatientRow]) {
        self.rows = rows.to_vec();
    }

    fn mount_stats(&mut self, stats: &DashboardStats) {
        self.stats = Some(stats.clone());
    }
}

#[derive(Default)]
struct SavedFiles {
    files: Vec<(String, String)>,
}

impl DownloadSink for SavedFiles {
    fn download(&mut self, filename: &str, content: &str) {
        self.files.push((filename.to_string(), content.to_string()));
    }
}

#[test]
fn first_run_through_registration_and_export() {
    let mut view = PageView::default();
    let mut downloads = SavedFiles::default();
    let mut notifier = SilentNotifier;

    // First run: nothing persisted, so the pre-rendered table seeds the store.
    let mut store = PatientStore::initialize(MemoryStorage::new(), &JaneDoeTable, &mut view);
    assert_eq!(store.all().len(), 1);
    assert_eq!(store.all()[0].doctor, UNASSIGNED_DOCTOR);
    assert_eq!(store.all()[0].created_at, today_string());
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].status_class, "status-stable");

    // Registration appends, re-renders, and exports the CSV snapshot.
    let request = RegistrationRequest {
        name: "Alice Wong".to_string(),
        age: "41".to_string(),
        disease: "Diabetes".to_string(),
        doctor: "Dr. Patel".to_string(),
    };
    let record = store
        .register(&request, &mut view, &mut downloads)
        .unwrap_or_else(|err| {
            notifier.notify(Severity::Error, err.to_string().as_str());
            panic!("registration rejected: {err}");
        });
    assert_eq!(record.status, "Under Review");
    assert_eq!(store.all().len(), 2);
    assert_eq!(view.rows.len(), 2);

    let stats = view.stats.clone().unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.registered_today, 2);
    assert_eq!(stats.active_doctors, 1);

    assert_eq!(downloads.files.len(), 1);
    let (filename, csv) = &downloads.files[0];
    assert_eq!(filename, "patients.csv");
    assert_eq!(csv.lines().count(), 3);

    // Explicit export matches what registration produced.
    let mut again = SavedFiles::default();
    assert!(export_patients_csv(store.all(), &mut again));
    assert_eq!(again.files[0].1, *csv);
}

#[test]
fn search_filters_rendered_rows_without_touching_the_store() {
    let mut view = PageView::default();
    let store = PatientStore::initialize(MemoryStorage::new(), &JaneDoeTable, &mut view);

    let mut sections = PageSections {
        patients: view
            .rows
            .iter()
            .map(|row| FilterEntry::new(format!("{} {} {}", row.name, row.age, row.disease)))
            .collect(),
        doctors: vec![FilterEntry::new("Dr. Anita Patel - Cardiology")],
        downloads: vec![FilterEntry::new("Annual Checkup Summary")],
        departments: vec![FilterEntry::new("Cardiology - Ward B")],
    };

    apply_search(&mut sections, "flu");
    assert!(sections.patients[0].visible);
    assert!(!sections.doctors[0].visible);

    apply_search(&mut sections, "f");
    assert!(sections.doctors[0].visible);
    assert!(sections.downloads[0].visible);
    assert!(sections.departments[0].visible);

    // Filtering never altered the canonical sequence.
    assert_eq!(store.all().len(), 1);
}
