//! Decoding of plane-major detection output into candidate boxes.
//!
//! Each candidate position is scored by its best class plane, filtered by the
//! confidence threshold, and converted from center form to corners. Boxes
//! whose corners leave the normalized `[0, 1]` square are dropped rather than
//! clamped.

use crate::bbox::Detection;
use crate::labels::LabelTable;
use crate::tensor::{OutputTensor, PLANE_CX, PLANE_CY, PLANE_H, PLANE_W};
use crate::trace::{trace_event, trace_span};
use crate::util::math::{first_argmax, in_unit_range};
use crate::util::{YoloPostError, YoloPostResult};

#[cfg(feature = "rayon")]
pub mod rayon;

/// Decodes a single candidate position.
///
/// Returns `Ok(None)` when the best class score does not strictly exceed
/// `confidence_threshold`, or when the derived corners are out of range or
/// inverted. An `element` past the last candidate or a label table that does
/// not match the class planes is an error.
pub fn decode_candidate(
    tensor: OutputTensor<'_>,
    labels: &LabelTable,
    element: usize,
    confidence_threshold: f32,
) -> YoloPostResult<Option<Detection>> {
    if element >= tensor.num_elements() {
        return Err(YoloPostError::ElementOutOfRange {
            element,
            num_elements: tensor.num_elements(),
        });
    }
    labels.ensure_covers(tensor.num_classes())?;
    Ok(decode_at(tensor, labels, element, confidence_threshold))
}

/// Unchecked decode of one position; the caller has validated `element` and
/// the label table.
pub(crate) fn decode_at(
    tensor: OutputTensor<'_>,
    labels: &LabelTable,
    element: usize,
    confidence_threshold: f32,
) -> Option<Detection> {
    let (class_index, confidence) = first_argmax(tensor.class_scores(element))?;
    if confidence <= confidence_threshold || confidence_threshold.is_nan() {
        return None;
    }

    let cx = tensor.at(PLANE_CX, element);
    let cy = tensor.at(PLANE_CY, element);
    let w = tensor.at(PLANE_W, element);
    let h = tensor.at(PLANE_H, element);

    let x1 = cx - w / 2.0;
    let y1 = cy - h / 2.0;
    let x2 = cx + w / 2.0;
    let y2 = cy + h / 2.0;

    if ![x1, y1, x2, y2].into_iter().all(in_unit_range) {
        return None;
    }
    if x1 > x2 || y1 > y2 {
        return None;
    }

    let class_name = labels.get(class_index)?.to_owned();
    Some(Detection {
        x1,
        y1,
        x2,
        y2,
        cx,
        cy,
        w,
        h,
        confidence,
        class_index,
        class_name,
    })
}

/// Decodes every candidate position in ascending index order.
///
/// The result is unsorted by confidence and may be empty. A label table that
/// does not match the tensor's class planes is rejected before scanning.
pub fn decode(
    tensor: OutputTensor<'_>,
    labels: &LabelTable,
    confidence_threshold: f32,
) -> YoloPostResult<Vec<Detection>> {
    labels.ensure_covers(tensor.num_classes())?;

    let _span = trace_span!(
        "decode",
        elements = tensor.num_elements(),
        classes = tensor.num_classes()
    )
    .entered();

    let candidates: Vec<Detection> = (0..tensor.num_elements())
        .filter_map(|element| decode_at(tensor, labels, element, confidence_threshold))
        .collect();

    trace_event!("decode_done", candidates = candidates.len());
    Ok(candidates)
}
