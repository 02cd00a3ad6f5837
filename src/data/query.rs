use std::fmt;

use super::model::{LaunchDataset, Outcome};

// ---------------------------------------------------------------------------
// Selection inputs
// ---------------------------------------------------------------------------

/// Dropdown value that stands for every site.
pub const ALL_SITES: &str = "ALL";

/// Which launch sites a query covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteFilter {
    #[default]
    All,
    Site(String),
}

impl SiteFilter {
    /// Interpret a dropdown value: `"ALL"` selects every site, anything else
    /// names one site (possibly one that does not exist).
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteFilter::All
        } else {
            SiteFilter::Site(value.to_string())
        }
    }

    pub fn value(&self) -> &str {
        match self {
            SiteFilter::All => ALL_SITES,
            SiteFilter::Site(s) => s,
        }
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(s) => s == site,
        }
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteFilter::All => write!(f, "All Sites"),
            SiteFilter::Site(s) => write!(f, "{s}"),
        }
    }
}

/// Inclusive payload mass interval in kilograms. `low > high` is allowed and
/// contains nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    pub fn contains(&self, payload: f64) -> bool {
        self.low <= payload && payload <= self.high
    }
}

// ---------------------------------------------------------------------------
// Site summary (pie chart data)
// ---------------------------------------------------------------------------

/// What a summary slice counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliceKey {
    /// Successful launches from this site.
    Site(String),
    /// Launches with this outcome at the selected site.
    Outcome(Outcome),
}

impl fmt::Display for SliceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceKey::Site(s) => write!(f, "{s}"),
            SliceKey::Outcome(o) => write!(f, "{o}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySlice {
    pub key: SliceKey,
    pub count: usize,
}

/// Result of [`summarize`]. Slices appear in order of first occurrence in
/// the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSummary {
    pub site: SiteFilter,
    pub slices: Vec<SummarySlice>,
}

impl SiteSummary {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }
}

/// Count launches for the pie chart.
///
/// * `All` – successful launches only, one slice per site.
/// * `Site(s)` – every launch at `s`, one slice per outcome.
///
/// An unknown site yields no slices.
pub fn summarize(dataset: &LaunchDataset, site: &SiteFilter) -> SiteSummary {
    let mut slices: Vec<SummarySlice> = Vec::new();

    for rec in dataset.records() {
        let key = match site {
            SiteFilter::All if rec.outcome.is_success() => SliceKey::Site(rec.launch_site.clone()),
            SiteFilter::All => continue,
            SiteFilter::Site(s) if *s == rec.launch_site => SliceKey::Outcome(rec.outcome),
            SiteFilter::Site(_) => continue,
        };
        match slices.iter_mut().find(|s| s.key == key) {
            Some(slice) => slice.count += 1,
            None => slices.push(SummarySlice { key, count: 1 }),
        }
    }

    SiteSummary {
        site: site.clone(),
        slices,
    }
}

// ---------------------------------------------------------------------------
// Payload correlation (scatter chart data)
// ---------------------------------------------------------------------------

/// One launch plotted on the payload/outcome scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
    pub launch_site: String,
    pub flight_number: Option<u32>,
    pub booster_version: Option<String>,
}

/// Launches with payload inside `range` (and at `site` unless `All`), in
/// dataset order.
pub fn correlate(
    dataset: &LaunchDataset,
    site: &SiteFilter,
    range: PayloadRange,
) -> Vec<CorrelationPoint> {
    dataset
        .records()
        .iter()
        .filter(|rec| range.contains(rec.payload_mass_kg))
        .filter(|rec| site.matches(&rec.launch_site))
        .map(|rec| CorrelationPoint {
            payload_mass_kg: rec.payload_mass_kg,
            outcome: rec.outcome,
            booster_category: rec.booster_category.clone(),
            launch_site: rec.launch_site.clone(),
            flight_number: rec.flight_number,
            booster_version: rec.booster_version.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    impl SiteSummary {
        fn count_for(&self, key: &SliceKey) -> Option<usize> {
            self.slices.iter().find(|s| s.key == *key).map(|s| s.count)
        }
    }

    fn two_site_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("A", 100.0, 1, "v1.0"),
            record("B", 6000.0, 1, "FT"),
            record("A", 4000.0, 1, "v1.1"),
            record("B", 2500.0, 0, "FT"),
            record("A", 5000.0, 0, "B4"),
        ])
        .unwrap()
    }

    fn site(s: &str) -> SiteFilter {
        SiteFilter::from_value(s)
    }

    #[test]
    fn site_filter_from_dropdown_value() {
        assert_eq!(SiteFilter::from_value("ALL"), SiteFilter::All);
        assert_eq!(SiteFilter::from_value("all"), SiteFilter::Site("all".into()));
        assert_eq!(SiteFilter::All.value(), "ALL");
        assert_eq!(site("KSC LC-39A").value(), "KSC LC-39A");
    }

    #[test]
    fn summarize_all_counts_successes_per_site() {
        let summary = summarize(&two_site_dataset(), &SiteFilter::All);

        assert_eq!(
            summary.slices,
            vec![
                SummarySlice { key: SliceKey::Site("A".into()), count: 2 },
                SummarySlice { key: SliceKey::Site("B".into()), count: 1 },
            ]
        );
        let successes = two_site_dataset()
            .records()
            .iter()
            .filter(|r| r.outcome.is_success())
            .count();
        assert_eq!(summary.total(), successes);
    }

    #[test]
    fn summarize_site_splits_outcomes() {
        let summary = summarize(&two_site_dataset(), &site("A"));

        assert_eq!(summary.slices.len(), 2);
        assert_eq!(summary.count_for(&SliceKey::Outcome(Outcome::Success)), Some(2));
        assert_eq!(summary.count_for(&SliceKey::Outcome(Outcome::Failure)), Some(1));
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn summarize_all_skips_sites_without_success() {
        let ds = LaunchDataset::from_records(vec![
            record("A", 1.0, 1, "FT"),
            record("C", 1.0, 0, "FT"),
        ])
        .unwrap();
        let summary = summarize(&ds, &SiteFilter::All);
        assert_eq!(summary.slices.len(), 1);
        assert_eq!(summary.count_for(&SliceKey::Site("C".into())), None);
    }

    #[test]
    fn summarize_site_with_single_outcome_has_one_slice() {
        let ds = LaunchDataset::from_records(vec![
            record("A", 1.0, 1, "FT"),
            record("A", 2.0, 1, "FT"),
        ])
        .unwrap();
        let summary = summarize(&ds, &site("A"));
        assert_eq!(
            summary.slices,
            vec![SummarySlice { key: SliceKey::Outcome(Outcome::Success), count: 2 }]
        );
    }

    #[test]
    fn summarize_unknown_site_is_empty() {
        let summary = summarize(&two_site_dataset(), &site("Boca Chica"));
        assert!(summary.slices.is_empty());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn correlate_filters_inclusive_range_in_order() {
        let ds = LaunchDataset::from_records(vec![
            record("A", 100.0, 1, "v1.0"),
            record("A", 6000.0, 0, "FT"),
            record("B", 4000.0, 1, "FT"),
        ])
        .unwrap();

        let points = correlate(&ds, &SiteFilter::All, PayloadRange::new(0.0, 5000.0));
        let payloads: Vec<f64> = points.iter().map(|p| p.payload_mass_kg).collect();
        assert_eq!(payloads, [100.0, 4000.0]);
        assert_eq!(points[1].booster_category, "FT");
        assert_eq!(points[1].outcome, Outcome::Success);
    }

    #[test]
    fn correlate_bounds_are_inclusive() {
        let points = correlate(
            &two_site_dataset(),
            &SiteFilter::All,
            PayloadRange::new(100.0, 5000.0),
        );
        let payloads: Vec<f64> = points.iter().map(|p| p.payload_mass_kg).collect();
        assert_eq!(payloads, [100.0, 4000.0, 2500.0, 5000.0]);
    }

    #[test]
    fn correlate_inverted_range_is_empty() {
        let points = correlate(
            &two_site_dataset(),
            &SiteFilter::All,
            PayloadRange::new(5000.0, 100.0),
        );
        assert!(points.is_empty());
    }

    #[test]
    fn correlate_wide_range_returns_everything() {
        let ds = two_site_dataset();
        let points = correlate(&ds, &SiteFilter::All, PayloadRange::new(-1e9, 1e9));
        assert_eq!(points.len(), ds.len());
    }

    #[test]
    fn correlate_all_then_site_matches_direct_site_query() {
        let ds = two_site_dataset();
        let ranges = [
            PayloadRange::new(0.0, 10000.0),
            PayloadRange::new(100.0, 4000.0),
            PayloadRange::new(2500.0, 2500.0),
            PayloadRange::new(7000.0, 9000.0),
        ];

        for range in ranges {
            let all = correlate(&ds, &SiteFilter::All, range);
            for name in ds.sites() {
                let filtered: Vec<_> = all
                    .iter()
                    .filter(|p| p.launch_site == *name)
                    .cloned()
                    .collect();
                let direct = correlate(&ds, &site(name), range);
                assert_eq!(filtered, direct, "site {name}, range {range:?}");
                assert!(direct.iter().all(|p| range.contains(p.payload_mass_kg)));
                assert!(direct.iter().all(|p| p.launch_site == *name));
            }
        }
    }
}
