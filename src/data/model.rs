use std::collections::BTreeSet;
use std::fmt;

use super::error::DataError;

// ---------------------------------------------------------------------------
// Known launch sites and selector surface
// ---------------------------------------------------------------------------

/// Launch sites offered by the site dropdown, in display order.
pub const KNOWN_SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// Wire value of the "all sites" dropdown entry.
pub const ALL_SITES: &str = "ALL";

/// Payload slider bounds and step (kg).
pub const PAYLOAD_SLIDER_MIN: f64 = 0.0;
pub const PAYLOAD_SLIDER_MAX: f64 = 10_000.0;
pub const PAYLOAD_SLIDER_STEP: f64 = 500.0;
pub const PAYLOAD_MARK_STEP: f64 = 1_000.0;

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Binary launch outcome. Stored as `class` (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric `class` value used as the scatter y coordinate.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Success => 1,
            Outcome::Failure => 0,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl TryFrom<i64> for Outcome {
    type Error = DataError;

    fn try_from(class: i64) -> Result<Self, Self::Error> {
        match class {
            1 => Ok(Outcome::Success),
            0 => Ok(Outcome::Failure),
            other => Err(DataError::InvalidClass(other.to_string())),
        }
    }
}

impl TryFrom<f64> for Outcome {
    type Error = DataError;

    /// Pandas writes integer columns with missing values as floats (`1.0`).
    fn try_from(class: f64) -> Result<Self, Self::Error> {
        if class == 1.0 {
            Ok(Outcome::Success)
        } else if class == 0.0 {
            Ok(Outcome::Failure)
        } else {
            Err(DataError::InvalidClass(class.to_string()))
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Success"),
            Outcome::Failure => write!(f, "Failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// SiteSelection – value of the site dropdown
// ---------------------------------------------------------------------------

/// Either every site or a single named one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Parse a dropdown value; `"ALL"` is the all-sites sentinel.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// Whether a record launched from `site` passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(selected) => selected == site,
        }
    }

    /// Dropdown label ("All" for the sentinel).
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => "All",
            SiteSelection::Site(s) => s,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{ALL_SITES}"),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadRange – value of the range slider
// ---------------------------------------------------------------------------

/// Inclusive payload mass interval in kg. `min > max` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub min: f64,
    pub max: f64,
}

impl PayloadRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.min <= payload_mass_kg && payload_mass_kg <= self.max
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

impl Default for PayloadRange {
    fn default() -> Self {
        Self::new(PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_MAX)
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the launch table
// ---------------------------------------------------------------------------

/// A single launch.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
    pub flight_number: Option<u32>,
    pub booster_version: Option<String>,
}

impl LaunchRecord {
    pub fn new(
        launch_site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_version_category: impl Into<String>,
    ) -> Self {
        Self {
            launch_site: launch_site.into(),
            payload_mass_kg,
            outcome,
            booster_version_category: booster_version_category.into(),
            flight_number: None,
            booster_version: None,
        }
    }

    /// Numeric `class` column.
    pub fn class(&self) -> u8 {
        self.outcome.class()
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column indices.
///
/// Fields are private so the rows cannot change after construction.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    sites: BTreeSet<String>,
    booster_categories: BTreeSet<String>,
}

impl LaunchDataset {
    /// Build indices from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let sites = records.iter().map(|r| r.launch_site.clone()).collect();
        let booster_categories = records
            .iter()
            .map(|r| r.booster_version_category.clone())
            .collect();
        LaunchDataset {
            records,
            sites,
            booster_categories,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Distinct launch sites, sorted.
    pub fn sites(&self) -> &BTreeSet<String> {
        &self.sites
    }

    /// Distinct booster version categories, sorted.
    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    /// Observed `[min, max]` payload mass, or `None` for an empty dataset.
    pub fn payload_bounds(&self) -> Option<PayloadRange> {
        let mut iter = self.records.iter().map(|r| r.payload_mass_kg);
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(PayloadRange::new(min, max))
    }

    /// Dropdown options: all-sites first, then known sites, then any extra site in the data.
    pub fn site_options(&self) -> Vec<SiteSelection> {
        let mut options = vec![SiteSelection::All];
        options.extend(KNOWN_SITES.iter().map(|s| SiteSelection::Site(s.to_string())));
        options.extend(
            self.sites
                .iter()
                .filter(|s| !KNOWN_SITES.contains(&s.as_str()))
                .map(|s| SiteSelection::Site(s.clone())),
        );
        options
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("KSC LC-39A", 5300.0, Outcome::Success, "FT"),
            LaunchRecord::new("CCAFS LC-40", 0.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("Boca Chica", 9600.0, Outcome::Success, "B5"),
        ])
    }

    #[test]
    fn outcome_from_class() {
        assert_eq!(Outcome::try_from(1_i64).unwrap(), Outcome::Success);
        assert_eq!(Outcome::try_from(0_i64).unwrap(), Outcome::Failure);
        assert_eq!(Outcome::try_from(1.0_f64).unwrap(), Outcome::Success);
        assert!(matches!(Outcome::try_from(2_i64), Err(DataError::InvalidClass(v)) if v == "2"));
        assert!(Outcome::try_from(0.5_f64).is_err());
    }

    #[test]
    fn site_selection_parses_sentinel() {
        assert_eq!(SiteSelection::from_value("ALL"), SiteSelection::All);
        assert_eq!(
            SiteSelection::from_value("VAFB SLC-4E"),
            SiteSelection::Site("VAFB SLC-4E".into())
        );
        assert_eq!(SiteSelection::All.to_string(), "ALL");
        assert_eq!(SiteSelection::All.label(), "All");
    }

    #[test]
    fn payload_range_is_inclusive() {
        let range = PayloadRange::new(100.0, 200.0);
        assert!(range.contains(100.0));
        assert!(range.contains(200.0));
        assert!(!range.contains(200.5));
        assert!(PayloadRange::new(300.0, 100.0).is_empty());
    }

    #[test]
    fn indices_and_bounds() {
        let ds = dataset();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites().len(), 3);
        assert_eq!(
            ds.booster_categories().iter().collect::<Vec<_>>(),
            vec!["B5", "FT", "v1.0"]
        );
        assert_eq!(ds.payload_bounds(), Some(PayloadRange::new(0.0, 9600.0)));
        assert_eq!(LaunchDataset::default().payload_bounds(), None);
    }

    #[test]
    fn site_options_append_unknown_sites() {
        let options = dataset().site_options();
        assert_eq!(options.len(), 1 + KNOWN_SITES.len() + 1);
        assert_eq!(options[0], SiteSelection::All);
        assert_eq!(options[1], SiteSelection::Site("CCAFS LC-40".into()));
        assert_eq!(options.last(), Some(&SiteSelection::Site("Boca Chica".into())));
    }
}
