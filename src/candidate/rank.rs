//! Confidence ordering for decoded candidates.

use std::cmp::Ordering;

use crate::bbox::Detection;

fn confidence_cmp_desc(a: &Detection, b: &Detection) -> Ordering {
    b.confidence.total_cmp(&a.confidence)
}

/// Sorts detections by descending confidence.
///
/// The sort is stable: equal confidences keep their decode order.
pub(crate) fn sort_by_confidence_desc(detections: &mut [Detection]) {
    detections.sort_by(confidence_cmp_desc);
}
