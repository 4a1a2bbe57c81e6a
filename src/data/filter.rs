use super::model::LaunchRecord;

// ---------------------------------------------------------------------------
// Site selection: the dropdown value
// ---------------------------------------------------------------------------

/// Current launch-site selection. `All` is the sentinel meaning no site
/// filter is applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Text shown in the dropdown for this selection.
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => "All Sites",
            SiteSelection::Site(site) => site,
        }
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(selected) => selected == site,
        }
    }
}

// ---------------------------------------------------------------------------
// Record filters
// ---------------------------------------------------------------------------

/// Keep the records whose launch site matches the selection.
///
/// `SiteSelection::All` passes every record through unchanged; a site that
/// never occurs in the data yields an empty result, not an error.
pub fn filter_by_site<'a, I>(records: I, selection: &SiteSelection) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    records
        .into_iter()
        .filter(|rec| selection.matches(&rec.launch_site))
        .collect()
}

/// Keep the records whose payload mass lies in `[low, high]`, inclusive on
/// both ends. The range selector is responsible for `low <= high`; an
/// inverted range simply matches nothing.
pub fn filter_by_payload<'a, I>(records: I, low: f64, high: f64) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    records
        .into_iter()
        .filter(|rec| low <= rec.payload_mass_kg && rec.payload_mass_kg <= high)
        .collect()
}
