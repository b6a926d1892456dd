//! Rayon-parallel candidate scan (feature-gated).
//!
//! Candidate positions are independent, so the scan is split across the
//! rayon pool. `collect` on an indexed parallel iterator keeps the original
//! order, which makes the output identical to [`super::decode`].

use crate::bbox::Detection;
use crate::decode::decode_at;
use crate::labels::LabelTable;
use crate::tensor::OutputTensor;
use crate::trace::{trace_event, trace_span};
use crate::util::YoloPostResult;
use rayon::prelude::*;

/// Parallel counterpart of [`super::decode`] with identical output.
pub fn decode_par(
    tensor: OutputTensor<'_>,
    labels: &LabelTable,
    confidence_threshold: f32,
) -> YoloPostResult<Vec<Detection>> {
    labels.ensure_covers(tensor.num_classes())?;

    let _span = trace_span!("decode_par", elements = tensor.num_elements()).entered();

    let candidates: Vec<Detection> = (0..tensor.num_elements())
        .into_par_iter()
        .filter_map(|element| decode_at(tensor, labels, element, confidence_threshold))
        .collect();

    trace_event!("decode_done", candidates = candidates.len());
    Ok(candidates)
}
