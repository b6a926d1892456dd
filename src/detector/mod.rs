//! High-level detection entry points.
//!
//! `detect` composes decoding and suppression for one output buffer.
//! `Detector` binds a label table and output shape once so that each frame
//! only supplies its buffer.

use std::time::{Duration, Instant};

use crate::bbox::Detection;
use crate::candidate::nms::suppress;
use crate::decode::decode;
use crate::labels::LabelTable;
use crate::tensor::{OutputShape, OutputTensor};
use crate::trace::{trace_event, trace_span};
use crate::util::{YoloPostError, YoloPostResult};

/// Default minimum class score (exclusive).
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.3;
/// Default IoU at or above which the weaker box is suppressed.
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.5;

/// Thresholds and execution options for detection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectConfig {
    /// Candidates whose best class score does not exceed this are dropped.
    pub confidence_threshold: f32,
    /// Overlap ratio at which a lower-confidence box is suppressed.
    pub iou_threshold: f32,
    /// Scan candidates on the rayon pool (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            parallel: false,
        }
    }
}

impl DetectConfig {
    /// Checks that both thresholds are finite and within `[0, 1]`.
    pub fn validate(&self) -> YoloPostResult<()> {
        check_threshold("confidence_threshold", self.confidence_threshold)?;
        check_threshold("iou_threshold", self.iou_threshold)?;
        Ok(())
    }
}

fn check_threshold(name: &'static str, value: f32) -> YoloPostResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(YoloPostError::InvalidThreshold { name, value });
    }
    Ok(())
}

/// Outcome of a detection pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DetectionResult {
    /// Nothing has been processed yet.
    #[default]
    Init,
    /// The buffer was processed and no candidate survived.
    Empty,
    /// Surviving detections in descending confidence order.
    Detected {
        detections: Vec<Detection>,
        /// Wall-clock time spent decoding and suppressing.
        elapsed: Duration,
    },
}

impl DetectionResult {
    /// Returns the detections, or an empty slice for `Init` and `Empty`.
    pub fn detections(&self) -> &[Detection] {
        match self {
            Self::Detected { detections, .. } => detections,
            Self::Init | Self::Empty => &[],
        }
    }

    /// Returns the processing time when detections were produced.
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            Self::Detected { elapsed, .. } => Some(*elapsed),
            Self::Init | Self::Empty => None,
        }
    }

    /// Returns true for [`DetectionResult::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Consumes the result and returns its detections.
    pub fn into_detections(self) -> Vec<Detection> {
        match self {
            Self::Detected { detections, .. } => detections,
            Self::Init | Self::Empty => Vec::new(),
        }
    }
}

/// Decodes and suppresses one output buffer.
///
/// An empty decode short-circuits to [`DetectionResult::Empty`] without
/// running suppression.
pub fn detect(
    tensor: OutputTensor<'_>,
    labels: &LabelTable,
    cfg: &DetectConfig,
) -> YoloPostResult<DetectionResult> {
    cfg.validate()?;
    let _span = trace_span!("detect", elements = tensor.num_elements()).entered();
    let start = Instant::now();

    let candidates = decode_with(tensor, labels, cfg)?;
    if candidates.is_empty() {
        trace_event!("detect_empty", elements = tensor.num_elements());
        return Ok(DetectionResult::Empty);
    }

    let detections = suppress(candidates, cfg.iou_threshold);
    let elapsed = start.elapsed();
    trace_event!(
        "detect_done",
        detections = detections.len(),
        elapsed_us = elapsed.as_micros() as u64
    );
    Ok(DetectionResult::Detected {
        detections,
        elapsed,
    })
}

#[cfg(feature = "rayon")]
fn decode_with(
    tensor: OutputTensor<'_>,
    labels: &LabelTable,
    cfg: &DetectConfig,
) -> YoloPostResult<Vec<Detection>> {
    if cfg.parallel {
        return crate::decode::rayon::decode_par(tensor, labels, cfg.confidence_threshold);
    }
    decode(tensor, labels, cfg.confidence_threshold)
}

// Without rayon the `parallel` flag falls back to the sequential scan.
#[cfg(not(feature = "rayon"))]
fn decode_with(
    tensor: OutputTensor<'_>,
    labels: &LabelTable,
    cfg: &DetectConfig,
) -> YoloPostResult<Vec<Detection>> {
    decode(tensor, labels, cfg.confidence_threshold)
}

/// Detector bound to one model's label table and output shape.
#[derive(Clone, Debug)]
pub struct Detector {
    labels: LabelTable,
    shape: OutputShape,
    cfg: DetectConfig,
}

impl Detector {
    /// Creates a detector, checking that `labels` covers every class plane.
    pub fn new(labels: LabelTable, shape: OutputShape) -> YoloPostResult<Self> {
        labels.ensure_covers(shape.num_classes())?;
        Ok(Self {
            labels,
            shape,
            cfg: DetectConfig::default(),
        })
    }

    /// Replaces the detection configuration.
    pub fn with_config(mut self, cfg: DetectConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DetectConfig {
        &self.cfg
    }

    /// Returns the bound label table.
    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Returns the bound output shape.
    pub fn shape(&self) -> OutputShape {
        self.shape
    }

    /// Runs decoding and suppression over `buffer`.
    pub fn detect(&self, buffer: &[f32]) -> YoloPostResult<DetectionResult> {
        let tensor = OutputTensor::new(buffer, self.shape)?;
        detect(tensor, &self.labels, &self.cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::{DetectConfig, DetectionResult};
    use crate::util::YoloPostError;

    #[test]
    fn default_config_uses_documented_thresholds() {
        let cfg = DetectConfig::default();
        assert_eq!(cfg.confidence_threshold, 0.3);
        assert_eq!(cfg.iou_threshold, 0.5);
        assert!(!cfg.parallel);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_thresholds() {
        let cfg = DetectConfig {
            iou_threshold: 1.5,
            ..DetectConfig::default()
        };
        assert_eq!(
            cfg.validate().err(),
            Some(YoloPostError::InvalidThreshold {
                name: "iou_threshold",
                value: 1.5,
            })
        );

        let cfg = DetectConfig {
            confidence_threshold: f32::NAN,
            ..DetectConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(YoloPostError::InvalidThreshold {
                name: "confidence_threshold",
                ..
            })
        ));
    }

    #[test]
    fn init_is_distinct_from_empty() {
        let init = DetectionResult::default();
        assert_eq!(init, DetectionResult::Init);
        assert!(!init.is_empty());
        assert!(DetectionResult::Empty.is_empty());
        assert!(init.detections().is_empty());
        assert_eq!(init.elapsed(), None);
    }
}
