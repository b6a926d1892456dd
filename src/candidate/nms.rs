//! Non-maximum suppression for decoded detections.

use crate::bbox::{overlap_ratio, Detection};
use crate::candidate::rank::sort_by_confidence_desc;
use crate::trace::{trace_event, trace_span};

/// Applies greedy IoU non-maximum suppression.
///
/// Candidates are sorted by descending confidence. The best remaining box is
/// kept and every other remaining box whose IoU with it is at least
/// `iou_threshold` is discarded; this repeats until no candidates are left.
/// Suppression ignores class labels. A pair of degenerate boxes, whose union
/// is zero, never suppresses.
pub fn suppress(mut candidates: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    if candidates.is_empty() {
        return candidates;
    }

    let _span = trace_span!("suppress", candidates = candidates.len()).entered();

    sort_by_confidence_desc(&mut candidates);
    let mut kept: Vec<Detection> = Vec::new();

    for candidate in candidates {
        let overlaps_kept = kept.iter().any(|best| {
            matches!(overlap_ratio(best, &candidate), Some(ratio) if ratio >= iou_threshold)
        });
        if !overlaps_kept {
            kept.push(candidate);
        }
    }

    trace_event!("suppress_done", kept = kept.len());
    kept
}

#[cfg(test)]
mod tests {
    use super::suppress;
    use crate::bbox::test_box;

    #[test]
    fn keeps_higher_confidence_of_overlapping_pair() {
        let low = test_box(0.1, 0.1, 0.5, 0.5, 0.6);
        let high = test_box(0.12, 0.1, 0.52, 0.5, 0.9);
        let kept = suppress(vec![low, high.clone()], 0.5);
        assert_eq!(kept, vec![high]);
    }

    #[test]
    fn threshold_is_inclusive() {
        // IoU of these two boxes is exactly 1/3.
        let a = test_box(0.0, 0.0, 0.5, 0.5, 0.9);
        let b = test_box(0.25, 0.0, 0.75, 0.5, 0.8);
        assert_eq!(suppress(vec![a.clone(), b.clone()], 1.0 / 3.0).len(), 1);
        assert_eq!(suppress(vec![a, b], 0.34).len(), 2);
    }

    #[test]
    fn zero_area_boxes_survive_zero_threshold() {
        let a = test_box(0.5, 0.5, 0.5, 0.5, 0.9);
        let b = test_box(0.5, 0.5, 0.5, 0.5, 0.8);
        assert_eq!(suppress(vec![a, b], 0.0).len(), 2);
    }

    #[test]
    fn zero_area_box_next_to_regular_box_falls_to_zero_threshold() {
        let point = test_box(0.5, 0.5, 0.5, 0.5, 0.8);
        let full = test_box(0.0, 0.0, 1.0, 1.0, 0.9);
        assert_eq!(suppress(vec![point.clone(), full.clone()], 0.0), vec![full.clone()]);
        assert_eq!(suppress(vec![point, full], 0.1).len(), 2);
    }
}
