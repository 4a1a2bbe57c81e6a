use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::filter::{filter_by_payload, filter_by_site, SiteSelection};
use super::model::{LaunchDataset, Outcome};

// ---------------------------------------------------------------------------
// Pie aggregation: success breakdown for the pie chart
// ---------------------------------------------------------------------------

/// One wedge of the pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

/// Chart-ready pie data plus the optional single-site success rate.
#[derive(Debug, Clone, PartialEq)]
pub struct PieBreakdown {
    pub title: String,
    pub slices: Vec<PieSlice>,
    /// Mean outcome over the selected site's records, in `[0, 1]`.
    /// `None` for the all-sites view and for an empty selection; the
    /// caption is omitted rather than shown as 0 or NaN.
    pub success_rate: Option<f64>,
}

/// Reduce the dataset to pie-chart rows for the current site selection.
///
/// All sites: one slice per launch site, valued by its total number of
/// successful launches. Single site: one slice per outcome class, valued by
/// its record count, plus the site's empirical success rate.
pub fn pie_breakdown(dataset: &LaunchDataset, selection: &SiteSelection) -> PieBreakdown {
    match selection {
        SiteSelection::All => {
            let mut successes: BTreeMap<&str, f64> = BTreeMap::new();
            for rec in &dataset.records {
                *successes.entry(rec.launch_site.as_str()).or_insert(0.0) +=
                    rec.outcome.value();
            }
            PieBreakdown {
                title: "Total Successful Launches by Site".to_string(),
                slices: successes
                    .into_iter()
                    .map(|(site, total)| PieSlice {
                        label: site.to_string(),
                        value: total,
                    })
                    .collect(),
                success_rate: None,
            }
        }
        SiteSelection::Site(site) => {
            let filtered = filter_by_site(&dataset.records, selection);
            let mut counts: BTreeMap<Outcome, usize> = BTreeMap::new();
            for rec in &filtered {
                *counts.entry(rec.outcome).or_insert(0) += 1;
            }
            let success_rate = if filtered.is_empty() {
                None
            } else {
                let sum: f64 = filtered.iter().map(|r| r.outcome.value()).sum();
                Some(sum / filtered.len() as f64)
            };
            PieBreakdown {
                title: format!("Launch Outcomes for {site}"),
                slices: counts
                    .into_iter()
                    .map(|(outcome, count)| PieSlice {
                        label: outcome.to_string(),
                        value: count as f64,
                    })
                    .collect(),
                success_rate,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter aggregation: payload vs outcome
// ---------------------------------------------------------------------------

/// One point of the payload-vs-outcome scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub booster_category: String,
    pub payload_mass_kg: f64,
    /// Mean outcome per group in the all-sites view, summed outcome per
    /// group in the single-site view.
    pub outcome_value: f64,
}

/// Group key ordering payloads numerically. Payloads are non-negative so
/// `total_cmp` gives the expected order; BTreeMap keeps groups sorted.
#[derive(Debug, Clone, PartialEq)]
struct PayloadKey(f64);

impl Eq for PayloadKey {}

impl PartialOrd for PayloadKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PayloadKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Reduce the dataset to scatter-chart rows for the current selectors.
///
/// Records are first narrowed to the inclusive payload range, then grouped
/// by `(booster version category, payload mass)`. The all-sites view plots
/// the mean outcome per group; a single-site view narrows to that site and
/// plots the summed outcome per group instead.
pub fn scatter_points(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
    payload_low: f64,
    payload_high: f64,
) -> Vec<ScatterPoint> {
    let in_range = filter_by_payload(&dataset.records, payload_low, payload_high);

    // (sum, count) per group; the branch below decides the reduction.
    let mut groups: BTreeMap<(&str, PayloadKey), (f64, usize)> = BTreeMap::new();
    let (records, mean) = match selection {
        SiteSelection::All => (in_range, true),
        SiteSelection::Site(_) => (filter_by_site(in_range, selection), false),
    };
    for rec in records {
        let key = (
            rec.booster_version_category.as_str(),
            PayloadKey(rec.payload_mass_kg),
        );
        let entry = groups.entry(key).or_insert((0.0, 0));
        entry.0 += rec.outcome.value();
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|((category, payload), (sum, count))| ScatterPoint {
            booster_category: category.to_string(),
            payload_mass_kg: payload.0,
            outcome_value: if mean { sum / count as f64 } else { sum },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    const EPS: f64 = 1e-9;

    fn rec(site: &str, payload: f64, booster: &str, class: i64) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: payload,
            booster_version_category: booster.to_string(),
            outcome: Outcome::from_class(class).unwrap(),
        }
    }

    fn sample() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            rec("A", 500.0, "v1", 1),
            rec("A", 1500.0, "v1", 0),
            rec("B", 800.0, "v2", 1),
        ])
    }

    fn slice_pairs(pie: &PieBreakdown) -> Vec<(&str, f64)> {
        pie.slices
            .iter()
            .map(|s| (s.label.as_str(), s.value))
            .collect()
    }

    #[test]
    fn pie_all_sites_sums_successes_per_site() {
        let pie = pie_breakdown(&sample(), &SiteSelection::All);
        assert_eq!(slice_pairs(&pie), vec![("A", 1.0), ("B", 1.0)]);
        assert_eq!(pie.success_rate, None);
    }

    #[test]
    fn pie_single_site_counts_outcomes_and_reports_rate() {
        let pie = pie_breakdown(&sample(), &SiteSelection::Site("A".into()));
        assert_eq!(slice_pairs(&pie), vec![("Failure", 1.0), ("Success", 1.0)]);
        let rate = pie.success_rate.expect("site A has records");
        assert!((rate - 0.5).abs() < EPS);
    }

    #[test]
    fn pie_unknown_site_is_empty_with_undefined_rate() {
        let pie = pie_breakdown(&sample(), &SiteSelection::Site("Z".into()));
        assert!(pie.slices.is_empty());
        assert_eq!(pie.success_rate, None);
    }

    #[test]
    fn pie_site_with_zero_successes_keeps_its_slice() {
        let ds = LaunchDataset::from_records(vec![
            rec("A", 500.0, "v1", 0),
            rec("B", 800.0, "v2", 1),
        ]);
        let pie = pie_breakdown(&ds, &SiteSelection::All);
        assert_eq!(slice_pairs(&pie), vec![("A", 0.0), ("B", 1.0)]);
    }

    #[test]
    fn scatter_all_sites_averages_outcome_per_group() {
        let points = scatter_points(&sample(), &SiteSelection::All, 0.0, 10000.0);
        let got: Vec<(&str, f64, f64)> = points
            .iter()
            .map(|p| (p.booster_category.as_str(), p.payload_mass_kg, p.outcome_value))
            .collect();
        assert_eq!(
            got,
            vec![
                ("v1", 500.0, 1.0),
                ("v1", 1500.0, 0.0),
                ("v2", 800.0, 1.0),
            ]
        );
    }

    #[test]
    fn scatter_all_sites_mean_over_repeated_group() {
        let ds = LaunchDataset::from_records(vec![
            rec("A", 500.0, "v1", 1),
            rec("B", 500.0, "v1", 0),
        ]);
        let points = scatter_points(&ds, &SiteSelection::All, 0.0, 10000.0);
        assert_eq!(points.len(), 1);
        assert!((points[0].outcome_value - 0.5).abs() < EPS);
    }

    #[test]
    fn scatter_single_site_sums_outcome_per_group() {
        // Two successful site-A launches in the same group: the summed
        // value is 2.0 where the all-sites branch would report 1.0.
        let ds = LaunchDataset::from_records(vec![
            rec("A", 500.0, "v1", 1),
            rec("A", 500.0, "v1", 1),
            rec("B", 800.0, "v2", 1),
        ]);
        let points = scatter_points(&ds, &SiteSelection::Site("A".into()), 0.0, 10000.0);
        assert_eq!(points.len(), 1);
        assert!((points[0].outcome_value - 2.0).abs() < EPS);
    }

    #[test]
    fn scatter_applies_payload_then_site_filters() {
        let points = scatter_points(&sample(), &SiteSelection::Site("A".into()), 0.0, 1000.0);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].booster_category, "v1");
        assert_eq!(points[0].payload_mass_kg, 500.0);
        assert!((points[0].outcome_value - 1.0).abs() < EPS);
    }

    #[test]
    fn scatter_bounds_are_inclusive() {
        let points = scatter_points(&sample(), &SiteSelection::All, 500.0, 1500.0);
        let payloads: Vec<f64> = points.iter().map(|p| p.payload_mass_kg).collect();
        assert_eq!(payloads, vec![500.0, 1500.0, 800.0]);
    }

    #[test]
    fn scatter_empty_range_yields_no_points() {
        assert!(scatter_points(&sample(), &SiteSelection::All, 2000.0, 3000.0).is_empty());
    }
}
