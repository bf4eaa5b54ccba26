use super::model::{LaunchDataset, LaunchRecord, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Scatter filter: site + payload range predicates
// ---------------------------------------------------------------------------

/// Return the launches shown in the payload scatter chart.
///
/// A record passes when:
/// * `site` is `All`, or the record's launch site equals the selected one
/// * its payload mass lies in `range` (both ends inclusive)
///
/// Surviving rows keep their dataset order. An unknown site or an inverted
/// range (`min > max`) yields an empty vector; the dataset is never touched.
pub fn scatter_filter(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: PayloadRange,
) -> Vec<LaunchRecord> {
    if range.is_empty() {
        return Vec::new();
    }
    dataset
        .records()
        .iter()
        .filter(|r| site.matches(&r.launch_site))
        .filter(|r| range.contains(r.payload_mass_kg))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Outcome;
    use proptest::prelude::*;

    /// Accepts every non-negative payload.
    fn unbounded() -> PayloadRange {
        PayloadRange::new(0.0, f64::INFINITY)
    }

    fn scenario() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 100.0, Outcome::Success, "v1.0"),
            LaunchRecord::new("A", 200.0, Outcome::Failure, "FT"),
            LaunchRecord::new("B", 150.0, Outcome::Success, "B4"),
        ])
    }

    #[test]
    fn all_sites_within_range() {
        let ds = scenario();
        let rows = scatter_filter(&ds, &SiteSelection::All, PayloadRange::new(120.0, 300.0));
        let picked: Vec<(&str, f64)> = rows
            .iter()
            .map(|r| (r.launch_site.as_str(), r.payload_mass_kg))
            .collect();
        assert_eq!(picked, vec![("A", 200.0), ("B", 150.0)]);
    }

    #[test]
    fn single_site_restricts_rows() {
        let ds = scenario();
        let rows = scatter_filter(&ds, &SiteSelection::Site("A".into()), unbounded());
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.launch_site == "A"));
    }

    #[test]
    fn range_ends_are_inclusive() {
        let ds = scenario();
        let rows = scatter_filter(&ds, &SiteSelection::All, PayloadRange::new(100.0, 150.0));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn inverted_range_is_empty() {
        let ds = scenario();
        assert!(scatter_filter(&ds, &SiteSelection::All, PayloadRange::new(300.0, 100.0)).is_empty());
    }

    #[test]
    fn unknown_site_is_empty() {
        let ds = scenario();
        let rows = scatter_filter(&ds, &SiteSelection::Site("Nowhere".into()), unbounded());
        assert!(rows.is_empty());
    }

    #[test]
    fn dataset_is_left_untouched() {
        let ds = scenario();
        let before = ds.records().to_vec();
        let _ = scatter_filter(&ds, &SiteSelection::Site("B".into()), PayloadRange::new(0.0, 10.0));
        assert_eq!(ds.records(), before.as_slice());
    }

    fn arb_record() -> impl Strategy<Value = LaunchRecord> {
        (
            prop_oneof![Just("A"), Just("B"), Just("C")],
            0.0..10_000.0_f64,
            any::<bool>(),
        )
            .prop_map(|(site, payload, ok)| {
                let outcome = if ok { Outcome::Success } else { Outcome::Failure };
                LaunchRecord::new(site, payload, outcome, "FT")
            })
    }

    proptest! {
        #[test]
        fn prop_rows_satisfy_predicates(
            records in prop::collection::vec(arb_record(), 0..60),
            site in prop_oneof![Just("ALL"), Just("A"), Just("B"), Just("Z")],
            a in 0.0..10_000.0_f64,
            b in 0.0..10_000.0_f64,
        ) {
            let ds = LaunchDataset::from_records(records);
            let selection = SiteSelection::from_value(site);
            let range = PayloadRange::new(a, b);
            for r in scatter_filter(&ds, &selection, range) {
                prop_assert!(selection.matches(&r.launch_site));
                prop_assert!(a <= r.payload_mass_kg && r.payload_mass_kg <= b);
            }
            if a > b {
                prop_assert!(scatter_filter(&ds, &selection, range).is_empty());
            }
        }

        #[test]
        fn prop_unbounded_all_returns_everything_in_order(
            records in prop::collection::vec(arb_record(), 0..60),
        ) {
            let ds = LaunchDataset::from_records(records);
            let rows = scatter_filter(&ds, &SiteSelection::All, unbounded());
            prop_assert_eq!(rows.as_slice(), ds.records());
        }
    }
}
