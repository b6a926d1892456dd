//! yolopost turns raw YOLO-style detection output into labeled boxes.
//!
//! The input is a flat, plane-major `f32` buffer of shape
//! `[num_channels, num_elements]` where the first four planes carry
//! `cx, cy, w, h` and the rest carry per-class scores. Decoding picks each
//! candidate's best class, filters by confidence, and drops boxes that leave
//! the normalized `[0, 1]` square; greedy IoU suppression then removes
//! duplicates. Inference, image preprocessing, and rendering are out of scope.
//!
//! Decoding can run on the rayon pool with the `rayon` feature, and the
//! `tracing` feature instruments each stage.

mod bbox;
mod candidate;
pub mod decode;
pub mod detector;
pub mod io;
pub mod labels;
pub mod lowlevel;
pub mod tensor;
mod trace;
pub mod util;

pub use bbox::{iou, Detection};
pub use detector::{detect, DetectConfig, DetectionResult, Detector};
pub use labels::LabelTable;
pub use tensor::{OutputShape, OutputTensor};
pub use util::{YoloPostError, YoloPostResult};

pub use candidate::nms::suppress;
pub use decode::decode;
