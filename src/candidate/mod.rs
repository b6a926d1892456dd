//! Candidate ranking and pruning.
//!
//! Includes confidence ordering and greedy IoU non-maximum suppression.

pub(crate) mod nms;
pub(crate) mod rank;
