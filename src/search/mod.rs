pub mod chain_search;
pub mod weights;

pub use chain_search::{SearchResult, Searcher};
pub use weights::WeightMatrix;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Re-run the search for every jump after the first. When off, later
    /// jumps take the first legal direction in Up, Down, Left, Right order.
    pub replan_each_step: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { replan_each_step: true }
    }
}
