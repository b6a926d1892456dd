//! Detection records and box overlap.

/// A decoded, labeled bounding box in normalized model-input coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// Left edge, `cx - w / 2`.
    pub x1: f32,
    /// Top edge, `cy - h / 2`.
    pub y1: f32,
    /// Right edge, `cx + w / 2`.
    pub x2: f32,
    /// Bottom edge, `cy + h / 2`.
    pub y2: f32,
    /// Center x as emitted by the model.
    pub cx: f32,
    /// Center y as emitted by the model.
    pub cy: f32,
    /// Width as emitted by the model.
    pub w: f32,
    /// Height as emitted by the model.
    pub h: f32,
    /// Highest class score; strictly above the confidence threshold.
    pub confidence: f32,
    /// Index of the winning class plane, counted from the first class plane.
    pub class_index: usize,
    /// Label resolved from the table for `class_index`.
    pub class_name: String,
}

impl Detection {
    /// Box area from the stored model width and height, not from the corners.
    #[inline]
    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    /// Returns the corners as `[x1, y1, x2, y2]`.
    pub fn corners(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Area of the intersection with `other`, never negative.
    pub fn intersection(&self, other: &Detection) -> f32 {
        let ix1 = self.x1.max(other.x1);
        let iy1 = self.y1.max(other.y1);
        let ix2 = self.x2.min(other.x2);
        let iy2 = self.y2.min(other.y2);
        (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0)
    }
}

/// Intersection over union, or `None` when the union is degenerate.
///
/// A zero, negative, or non-finite union (both boxes collapsed to a line or a
/// point) has no meaningful overlap ratio.
pub(crate) fn overlap_ratio(a: &Detection, b: &Detection) -> Option<f32> {
    let inter = a.intersection(b);
    let union = a.area() + b.area() - inter;
    if !union.is_finite() || union <= 0.0 {
        return None;
    }
    let ratio = inter / union;
    ratio.is_finite().then_some(ratio)
}

/// Intersection over union of two detections.
///
/// Degenerate pairs (both boxes zero-area) report `0.0`. A single zero-area
/// box against a regular box yields a real ratio of `0.0`.
pub fn iou(a: &Detection, b: &Detection) -> f32 {
    overlap_ratio(a, b).unwrap_or(0.0)
}

#[cfg(test)]
pub(crate) fn test_box(x1: f32, y1: f32, x2: f32, y2: f32, confidence: f32) -> Detection {
    Detection {
        x1,
        y1,
        x2,
        y2,
        cx: (x1 + x2) / 2.0,
        cy: (y1 + y2) / 2.0,
        w: x2 - x1,
        h: y2 - y1,
        confidence,
        class_index: 0,
        class_name: "object".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{iou, overlap_ratio, test_box};

    #[test]
    fn iou_of_identical_boxes_is_one() {
        let a = test_box(0.0, 0.0, 1.0, 1.0, 0.9);
        assert_eq!(iou(&a, &a.clone()), 1.0);
    }

    #[test]
    fn iou_of_half_shifted_unit_boxes_is_one_third() {
        let a = test_box(0.0, 0.0, 1.0, 1.0, 0.9);
        let b = test_box(0.5, 0.0, 1.5, 1.0, 0.8);
        assert!((a.intersection(&b) - 0.5).abs() < 1e-6);
        assert!((iou(&a, &b) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_pair_has_no_ratio() {
        let a = test_box(0.5, 0.5, 0.5, 0.5, 0.9);
        assert_eq!(overlap_ratio(&a, &a.clone()), None);
        assert_eq!(iou(&a, &a.clone()), 0.0);
    }
}
