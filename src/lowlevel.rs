//! Low-level building blocks for custom post-processing pipelines.
//!
//! These expose the individual decode and suppression stages for callers
//! that need to inspect candidates between them, for example to apply their
//! own filtering. Most users should prefer [`crate::Detector`] or
//! [`crate::detect`].

pub use crate::bbox::iou;
pub use crate::candidate::nms::suppress;
#[cfg(feature = "rayon")]
pub use crate::decode::rayon::decode_par;
pub use crate::decode::{decode, decode_candidate};
pub use crate::tensor::{GEOMETRY_PLANES, PLANE_CX, PLANE_CY, PLANE_H, PLANE_W};
