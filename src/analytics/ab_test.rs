use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::data::filter::FilteredView;
use crate::data::model::{CAMPAIGNS, RESPONSE};

use super::{mean, sample_var};

// ---------------------------------------------------------------------------
// Campaign A/B significance testing (Welch's t-test)
// ---------------------------------------------------------------------------

/// One campaign's test result: Welch's t between the response values of
/// exposed (indicator = 1) and not-exposed rows. `t_stat` and `p_value` are
/// NaN when the test is undefined for the current view.
#[derive(Debug, Clone)]
pub struct CampaignTest {
    pub campaign: &'static str,
    pub t_stat: f64,
    pub p_value: f64,
}

/// Run the five fixed campaign tests. Each campaign is independent; a
/// degenerate partition yields NaN for that campaign only.
pub fn campaign_significance(view: &FilteredView) -> Vec<CampaignTest> {
    let response = view.numeric(RESPONSE).unwrap_or_default();

    CAMPAIGNS
        .iter()
        .map(|&campaign| {
            let (t_stat, p_value) = match view.numeric(campaign) {
                Some(indicator) => {
                    let mut exposed = Vec::new();
                    let mut control = Vec::new();
                    for (&flag, &r) in indicator.iter().zip(&response) {
                        if flag >= 0.5 {
                            exposed.push(r);
                        } else {
                            control.push(r);
                        }
                    }
                    welch_t_test(&exposed, &control)
                }
                None => (f64::NAN, f64::NAN),
            };
            CampaignTest {
                campaign,
                t_stat,
                p_value,
            }
        })
        .collect()
}

/// Welch's two-sample t-test (unequal variances), two-sided p-value.
///
/// NaN observations are excluded from either sample first (`nan_policy =
/// omit`). Returns `(NaN, NaN)` rather than failing when either sample has
/// fewer than two observations or the pooled standard error is zero.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> (f64, f64) {
    let a: Vec<f64> = a.iter().copied().filter(|v| !v.is_nan()).collect();
    let b: Vec<f64> = b.iter().copied().filter(|v| !v.is_nan()).collect();

    if a.len() < 2 || b.len() < 2 {
        return (f64::NAN, f64::NAN);
    }

    let (na, nb) = (a.len() as f64, b.len() as f64);
    let (ma, mb) = (mean(&a), mean(&b));
    let (va, vb) = (sample_var(&a), sample_var(&b));

    let se = (va / na + vb / nb).sqrt();
    if se == 0.0 || !se.is_finite() {
        return (f64::NAN, f64::NAN);
    }
    let t_stat = (ma - mb) / se;

    // Welch–Satterthwaite degrees of freedom.
    let df = (va / na + vb / nb).powi(2)
        / ((va / na).powi(2) / (na - 1.0) + (vb / nb).powi(2) / (nb - 1.0));

    let p_value = match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => 2.0 * (1.0 - dist.cdf(t_stat.abs())),
        Err(_) => f64::NAN,
    };

    (t_stat, p_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CanonicalTable, Column, ColumnValues};
    use approx::assert_relative_eq;

    #[test]
    fn welch_matches_reference_values() {
        // Equal variances and sizes: se = 1 exactly, df = 8.
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [2.0, 3.0, 4.0, 5.0, 6.0];
        let (t, p) = welch_t_test(&a, &b);
        assert_relative_eq!(t, -1.0);
        assert_relative_eq!(p, 0.34659, epsilon = 1e-4);
    }

    #[test]
    fn nan_observations_are_omitted() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, f64::NAN];
        let b = [2.0, 3.0, 4.0, 5.0, 6.0];
        let (t, _) = welch_t_test(&a, &b);
        assert_relative_eq!(t, -1.0);
    }

    #[test]
    fn undersized_partition_is_nan() {
        let (t, p) = welch_t_test(&[1.0], &[2.0, 3.0, 4.0]);
        assert!(t.is_nan());
        assert!(p.is_nan());
    }

    #[test]
    fn zero_variance_on_both_sides_is_nan() {
        let (t, p) = welch_t_test(&[1.0, 1.0, 1.0], &[1.0, 1.0]);
        assert!(t.is_nan());
        assert!(p.is_nan());
    }

    fn campaign_table(cmp1: Vec<f64>) -> CanonicalTable {
        let n = cmp1.len();
        let response: Vec<f64> = (0..n).map(|i| (i % 2) as f64).collect();
        let mut columns = vec![
            Column {
                name: RESPONSE.to_string(),
                values: ColumnValues::Numeric(response),
            },
            Column {
                name: "AcceptedCmp1".to_string(),
                values: ColumnValues::Numeric(cmp1),
            },
        ];
        for name in &CAMPAIGNS[1..] {
            // Balanced indicator so the remaining campaigns stay testable.
            columns.push(Column {
                name: name.to_string(),
                values: ColumnValues::Numeric((0..n).map(|i| ((i / 2) % 2) as f64).collect()),
            });
        }
        CanonicalTable::new(columns)
    }

    #[test]
    fn constant_campaign_degrades_only_itself() {
        // AcceptedCmp1 all-zero: no exposed rows → NaN for that campaign.
        let t = campaign_table(vec![0.0; 8]);
        let view = FilteredView::all(&t);
        let results = campaign_significance(&view);

        assert_eq!(results.len(), 5);
        assert_eq!(results[0].campaign, "AcceptedCmp1");
        assert!(results[0].t_stat.is_nan());
        assert!(results[0].p_value.is_nan());
        for r in &results[1..] {
            assert!(r.t_stat.is_finite(), "{} should be testable", r.campaign);
            assert!(r.p_value.is_finite());
        }
    }

    #[test]
    fn empty_view_reports_five_nan_rows() {
        let t = campaign_table(vec![]);
        let view = FilteredView::all(&t);
        let results = campaign_significance(&view);
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.t_stat.is_nan()));
    }
}
