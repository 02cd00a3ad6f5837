use std::fmt;

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Binary launch outcome. Stored in the source data as `1` (success) or `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric class value as it appears in the dataset.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// Parse a textual class cell. Integral float spellings (`1.0`) are
    /// accepted because pandas writes them for int columns holding NaN.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(i) = s.parse::<i64>() {
            return Self::from_class(i);
        }
        match s.parse::<f64>() {
            Ok(f) if f == 0.0 => Some(Outcome::Failure),
            Ok(f) if f == 1.0 => Some(Outcome::Success),
            _ => None,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    /// Payload mass in kilograms, finite and non-negative.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
    pub flight_number: Option<u32>,
    pub booster_version: Option<String>,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Values derived once from the full dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub min_payload: f64,
    pub max_payload: f64,
    /// Distinct site names in order of first appearance.
    pub sites: Vec<String>,
}

impl DatasetSummary {
    /// `None` for an empty slice: there is no payload range to report.
    pub fn from_records(records: &[LaunchRecord]) -> Option<Self> {
        let first = records.first()?;
        let mut min_payload = first.payload_mass_kg;
        let mut max_payload = first.payload_mass_kg;
        let mut sites: Vec<String> = Vec::new();

        for rec in records {
            min_payload = min_payload.min(rec.payload_mass_kg);
            max_payload = max_payload.max(rec.payload_mass_kg);
            if !sites.iter().any(|s| *s == rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
        }

        Some(DatasetSummary {
            min_payload,
            max_payload,
            sites,
        })
    }
}

/// The full parsed dataset. Immutable once built.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    summary: DatasetSummary,
}

impl LaunchDataset {
    /// Build the dataset and its summary. Returns `None` when `records` is
    /// empty.
    pub fn from_records(records: Vec<LaunchRecord>) -> Option<Self> {
        let summary = DatasetSummary::from_records(&records)?;
        Some(LaunchDataset { records, summary })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn summary(&self) -> &DatasetSummary {
        &self.summary
    }

    pub fn sites(&self) -> &[String] {
        &self.summary.sites
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
pub(crate) fn record(site: &str, payload: f64, class: i64, booster: &str) -> LaunchRecord {
    LaunchRecord {
        launch_site: site.to_string(),
        payload_mass_kg: payload,
        outcome: Outcome::from_class(class).expect("class must be 0 or 1"),
        booster_category: booster.to_string(),
        flight_number: None,
        booster_version: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_parses_integral_spellings() {
        assert_eq!(Outcome::parse("1"), Some(Outcome::Success));
        assert_eq!(Outcome::parse(" 0 "), Some(Outcome::Failure));
        assert_eq!(Outcome::parse("1.0"), Some(Outcome::Success));
        assert_eq!(Outcome::parse("2"), None);
        assert_eq!(Outcome::parse("0.5"), None);
        assert_eq!(Outcome::parse("yes"), None);
    }

    #[test]
    fn summary_tracks_bounds_and_site_order() {
        let ds = LaunchDataset::from_records(vec![
            record("CCAFS LC-40", 500.0, 0, "v1.0"),
            record("VAFB SLC-4E", 9600.0, 1, "FT"),
            record("CCAFS LC-40", 0.0, 1, "v1.1"),
            record("KSC LC-39A", 3000.0, 1, "FT"),
        ])
        .unwrap();

        let summary = ds.summary();
        assert_eq!(summary.min_payload, 0.0);
        assert_eq!(summary.max_payload, 9600.0);
        assert_eq!(summary.sites, ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn empty_records_build_no_dataset() {
        assert!(LaunchDataset::from_records(Vec::new()).is_none());
    }
}
