/// Terms shorter than this (after trimming) reset every section to fully
/// visible instead of filtering.
pub const MIN_SEARCH_LEN: usize = 2;

/// One searchable element: its rendered text and whether it is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    pub text: String,
    pub visible: bool,
}

impl FilterEntry {
    pub fn new(text: impl Into<String>) -> FilterEntry {
        FilterEntry {
            text: text.into(),
            visible: true,
        }
    }
}

/// The four independent collections the search box toggles. They never
/// interact; each is matched on its own.
#[derive(Debug, Default, Clone)]
pub struct PageSections {
    pub patients: Vec<FilterEntry>,
    pub doctors: Vec<FilterEntry>,
    pub downloads: Vec<FilterEntry>,
    pub departments: Vec<FilterEntry>,
}

/// Pure visibility toggle: substring containment, case-insensitive, no
/// tokenization. Does not touch the patient store or persisted state.
pub fn apply_search(sections: &mut PageSections, term: &str) {
    let needle = term.trim().to_lowercase();
    if needle.chars().count() < MIN_SEARCH_LEN {
        for entry in all_entries(sections) {
            entry.visible = true;
        }
        return;
    }
    for entry in all_entries(sections) {
        entry.visible = entry.text.to_lowercase().contains(needle.as_str());
    }
}

fn all_entries<'a>(
    sections: &'a mut PageSections,
) -> impl Iterator<Item = &'a mut FilterEntry> + 'a {
    sections
        .patients
        .iter_mut()
        .chain(sections.doctors.iter_mut())
        .chain(sections.downloads.iter_mut())
        .chain(sections.departments.iter_mut())
}
