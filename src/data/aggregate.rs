use std::collections::BTreeMap;

use super::model::{LaunchDataset, Outcome, SiteSelection};

pub const ALL_SITES_TITLE: &str = "Success Percentage by Launch Site";

// ---------------------------------------------------------------------------
// Pie chart data
// ---------------------------------------------------------------------------

/// One wedge of the pie.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Set for Success/Failure wedges so the renderer can use the fixed outcome colours.
    pub outcome: Option<Outcome>,
}

/// Everything the renderer needs to draw the success pie.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn values(&self) -> Vec<f64> {
        self.slices.iter().map(|s| s.value).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.slices.iter().map(|s| s.label.as_str()).collect()
    }

    /// Sum of all wedge values; zero means there is nothing to draw.
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Build the pie for the current site selection.
///
/// * `All` → one wedge per site present in the data, valued at that site's
///   success percentage. Sites are ordered by name. A site only exists here
///   if it has at least one launch, so the percentage never divides by zero.
/// * `Site(s)` → exactly two wedges, `Success` and `Failure`, valued at the
///   launch counts for `s`. An unknown site gives two zero wedges.
pub fn pie_chart(dataset: &LaunchDataset, site: &SiteSelection) -> PieChart {
    match site {
        SiteSelection::All => success_rate_by_site(dataset),
        SiteSelection::Site(name) => outcome_counts(dataset, name),
    }
}

fn success_rate_by_site(dataset: &LaunchDataset) -> PieChart {
    // site → (successes, total)
    let mut groups: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for r in dataset.records() {
        let entry = groups.entry(r.launch_site.as_str()).or_default();
        if r.outcome.is_success() {
            entry.0 += 1;
        }
        entry.1 += 1;
    }

    let slices = groups
        .into_iter()
        .filter(|(_, (_, total))| *total > 0)
        .map(|(site, (successes, total))| PieSlice {
            label: site.to_string(),
            value: 100.0 * successes as f64 / total as f64,
            outcome: None,
        })
        .collect();

    PieChart {
        title: ALL_SITES_TITLE.to_string(),
        slices,
    }
}

fn outcome_counts(dataset: &LaunchDataset, site: &str) -> PieChart {
    let (successes, failures) = dataset
        .records()
        .iter()
        .filter(|r| r.launch_site == site)
        .fold((0usize, 0usize), |(s, f), r| match r.outcome {
            Outcome::Success => (s + 1, f),
            Outcome::Failure => (s, f + 1),
        });

    PieChart {
        title: format!("Launch Outcome for {site}"),
        slices: vec![
            PieSlice {
                label: Outcome::Success.to_string(),
                value: successes as f64,
                outcome: Some(Outcome::Success),
            },
            PieSlice {
                label: Outcome::Failure.to_string(),
                value: failures as f64,
                outcome: Some(Outcome::Failure),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;
    use proptest::prelude::*;

    fn scenario() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 100.0, Outcome::Success, "v1.0"),
            LaunchRecord::new("A", 200.0, Outcome::Failure, "FT"),
            LaunchRecord::new("B", 150.0, Outcome::Success, "B4"),
        ])
    }

    #[test]
    fn all_sites_gives_success_percentages() {
        let pie = pie_chart(&scenario(), &SiteSelection::All);
        assert_eq!(pie.title, "Success Percentage by Launch Site");
        assert_eq!(pie.labels(), vec!["A", "B"]);
        assert_eq!(pie.values(), vec![50.0, 100.0]);
        assert!(pie.slices.iter().all(|s| s.outcome.is_none()));
    }

    #[test]
    fn site_without_successes_is_zero_percent() {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 100.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("B", 100.0, Outcome::Success, "v1.0"),
        ]);
        let pie = pie_chart(&ds, &SiteSelection::All);
        assert_eq!(pie.values(), vec![0.0, 100.0]);
    }

    #[test]
    fn single_site_gives_outcome_counts() {
        let pie = pie_chart(&scenario(), &SiteSelection::Site("A".into()));
        assert_eq!(pie.title, "Launch Outcome for A");
        assert_eq!(pie.labels(), vec!["Success", "Failure"]);
        assert_eq!(pie.values(), vec![1.0, 1.0]);
        assert_eq!(pie.slices[0].outcome, Some(Outcome::Success));
        assert_eq!(pie.slices[1].outcome, Some(Outcome::Failure));
    }

    #[test]
    fn unknown_site_gives_empty_counts() {
        let pie = pie_chart(&scenario(), &SiteSelection::Site("Nowhere".into()));
        assert_eq!(pie.labels(), vec!["Success", "Failure"]);
        assert_eq!(pie.total(), 0.0);
    }

    #[test]
    fn empty_dataset_has_no_site_wedges() {
        let pie = pie_chart(&LaunchDataset::default(), &SiteSelection::All);
        assert!(pie.slices.is_empty());
        assert_eq!(pie.total(), 0.0);
    }

    fn arb_records() -> impl Strategy<Value = Vec<LaunchRecord>> {
        prop::collection::vec(
            (prop_oneof![Just("A"), Just("B"), Just("C"), Just("D")], any::<bool>()).prop_map(
                |(site, ok)| {
                    let outcome = if ok { Outcome::Success } else { Outcome::Failure };
                    LaunchRecord::new(site, 500.0, outcome, "FT")
                },
            ),
            0..80,
        )
    }

    proptest! {
        #[test]
        fn prop_site_counts_sum_to_site_rows(
            records in arb_records(),
            site in prop_oneof![Just("A"), Just("B"), Just("C"), Just("D")],
        ) {
            let ds = LaunchDataset::from_records(records);
            let pie = pie_chart(&ds, &SiteSelection::Site(site.to_string()));
            let expected = ds.records().iter().filter(|r| r.launch_site == site).count();
            prop_assert_eq!(pie.slices.len(), 2);
            prop_assert_eq!(pie.total() as usize, expected);
        }

        #[test]
        fn prop_all_sites_one_wedge_per_site_within_bounds(records in arb_records()) {
            let ds = LaunchDataset::from_records(records);
            let pie = pie_chart(&ds, &SiteSelection::All);
            let labels: Vec<&str> = pie.labels();
            let sites: Vec<&str> = ds.sites().iter().map(String::as_str).collect();
            prop_assert_eq!(labels, sites);
            for v in pie.values() {
                prop_assert!((0.0..=100.0).contains(&v));
            }
        }
    }
}
