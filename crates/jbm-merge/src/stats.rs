use serde::{Deserialize, Serialize};

/// Counters collected during one merge call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Object pairs merged key by key (the root pair included).
    pub objects_merged: usize,
    /// Array pairs concatenated.
    pub arrays_concatenated: usize,
    /// Key comparisons made by the sorted join.
    pub keys_compared: usize,
    /// Point lookups made by the lookup join.
    pub lookups: usize,
    /// Shared keys where the second value replaced the first.
    pub overrides: usize,
    /// Deepest object recursion reached. The root merge is depth 1.
    pub max_depth: usize,
}
