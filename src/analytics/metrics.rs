use crate::data::filter::FilteredView;
use crate::data::model::{CAMPAIGNS, COMPLAIN, RESPONSE, SPEND_COLUMNS};

use super::mean;

// ---------------------------------------------------------------------------
// Derived business metrics (the "Insights" widgets)
// ---------------------------------------------------------------------------

/// The campaign with the highest mean acceptance rate. Ties go to the
/// earlier-declared campaign; the rate is NaN on an empty view.
#[derive(Debug, Clone, PartialEq)]
pub struct BestCampaign {
    pub name: &'static str,
    pub rate: f64,
}

/// Scalar reductions over the filtered view. All rates are NaN when the
/// view is empty.
#[derive(Debug, Clone)]
pub struct DerivedMetrics {
    pub response_rate: f64,
    pub complaint_rate: f64,
    pub best_campaign: BestCampaign,
    /// Mean spend per product category, in fixed column order.
    pub mean_spend: Vec<(&'static str, f64)>,
}

pub fn derived_metrics(view: &FilteredView) -> DerivedMetrics {
    let rate = |column: &str| view.numeric(column).map_or(f64::NAN, |v| mean(&v));

    let mut best = BestCampaign {
        name: CAMPAIGNS[0],
        rate: rate(CAMPAIGNS[0]),
    };
    for &campaign in &CAMPAIGNS[1..] {
        let r = rate(campaign);
        // Strictly greater: exact ties keep the earlier campaign.
        if r > best.rate {
            best = BestCampaign {
                name: campaign,
                rate: r,
            };
        }
    }

    DerivedMetrics {
        response_rate: rate(RESPONSE),
        complaint_rate: rate(COMPLAIN),
        best_campaign: best,
        mean_spend: SPEND_COLUMNS
            .iter()
            .map(|&name| (name, rate(name)))
            .collect(),
    }
}
