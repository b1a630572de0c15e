use std::collections::BTreeMap;

use crate::data::filter::FilteredView;
use crate::data::model::{KIDHOME, RESPONSE};

// ---------------------------------------------------------------------------
// Response distribution grouped by number of kids at home
// ---------------------------------------------------------------------------

/// Accepted / declined counts of the final campaign response, one entry per
/// observed `Kidhome` value. Feeds the grouped bar chart.
#[derive(Debug, Clone, Default)]
pub struct GroupedCounts {
    /// Kidhome value → (declined, accepted) counts.
    pub groups: BTreeMap<i64, (u64, u64)>,
}

impl GroupedCounts {
    pub fn total(&self) -> u64 {
        self.groups.values().map(|&(d, a)| d + a).sum()
    }
}

pub fn response_by_dependents(view: &FilteredView) -> GroupedCounts {
    let (Some(response), Some(kidhome)) = (view.numeric(RESPONSE), view.numeric(KIDHOME)) else {
        return GroupedCounts::default();
    };

    let mut groups: BTreeMap<i64, (u64, u64)> = BTreeMap::new();
    for (&r, &k) in response.iter().zip(&kidhome) {
        let entry = groups.entry(k.round() as i64).or_default();
        if r >= 0.5 {
            entry.1 += 1;
        } else {
            entry.0 += 1;
        }
    }
    GroupedCounts { groups }
}
