//! Output tensor shapes and plane-major views.
//!
//! A detection head emits `num_channels` planes of `num_elements` values each.
//! Planes 0..4 hold `cx, cy, w, h` and the remaining planes hold one class
//! score per candidate. The value for candidate `c` on plane `j` lives at
//! `c + num_elements * j`; that arithmetic is fixed by the exported model and
//! must not be reordered.

use crate::util::{YoloPostError, YoloPostResult};

/// Number of leading geometry planes (`cx, cy, w, h`).
pub const GEOMETRY_PLANES: usize = 4;

/// Plane index of the center x coordinate.
pub const PLANE_CX: usize = 0;
/// Plane index of the center y coordinate.
pub const PLANE_CY: usize = 1;
/// Plane index of the box width.
pub const PLANE_W: usize = 2;
/// Plane index of the box height.
pub const PLANE_H: usize = 3;

/// Validated dimensions of a detection output tensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputShape {
    num_channels: usize,
    num_elements: usize,
}

impl OutputShape {
    /// Creates a shape, requiring at least one class plane and one candidate.
    pub fn new(num_channels: usize, num_elements: usize) -> YoloPostResult<Self> {
        if num_channels <= GEOMETRY_PLANES || num_elements == 0 {
            return Err(YoloPostError::InvalidShape {
                num_channels,
                num_elements,
            });
        }
        num_channels
            .checked_mul(num_elements)
            .ok_or(YoloPostError::InvalidShape {
                num_channels,
                num_elements,
            })?;
        Ok(Self {
            num_channels,
            num_elements,
        })
    }

    /// Builds a shape from model output dims, `[1, C, N]` or `[C, N]`.
    pub fn from_dims(dims: &[usize]) -> YoloPostResult<Self> {
        match *dims {
            [1, num_channels, num_elements] | [num_channels, num_elements] => {
                Self::new(num_channels, num_elements)
            }
            _ => Err(YoloPostError::UnsupportedOutputDims {
                dims: dims.to_vec(),
            }),
        }
    }

    /// Returns the number of planes, geometry included.
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Returns the number of candidate positions per plane.
    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    /// Returns the number of class planes.
    pub fn num_classes(&self) -> usize {
        self.num_channels - GEOMETRY_PLANES
    }

    /// Returns the flat buffer length this shape requires.
    pub fn buffer_len(&self) -> usize {
        self.num_channels * self.num_elements
    }
}

/// Borrowed plane-major view over a flat detection output buffer.
#[derive(Copy, Clone, Debug)]
pub struct OutputTensor<'a> {
    data: &'a [f32],
    shape: OutputShape,
}

impl<'a> OutputTensor<'a> {
    /// Creates a view after checking the buffer length against `shape`.
    pub fn new(data: &'a [f32], shape: OutputShape) -> YoloPostResult<Self> {
        let expected = shape.buffer_len();
        if data.len() != expected {
            return Err(YoloPostError::BufferLengthMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { data, shape })
    }

    /// Validates raw dimensions and creates a view in one step.
    pub fn from_slice(
        data: &'a [f32],
        num_channels: usize,
        num_elements: usize,
    ) -> YoloPostResult<Self> {
        Self::new(data, OutputShape::new(num_channels, num_elements)?)
    }

    /// Returns the validated shape.
    pub fn shape(&self) -> OutputShape {
        self.shape
    }

    /// Returns the number of candidate positions.
    pub fn num_elements(&self) -> usize {
        self.shape.num_elements
    }

    /// Returns the number of class planes.
    pub fn num_classes(&self) -> usize {
        self.shape.num_classes()
    }

    /// Returns the backing slice.
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    /// Returns the contiguous plane `plane`, if it exists.
    pub fn plane(&self, plane: usize) -> Option<&'a [f32]> {
        if plane >= self.shape.num_channels {
            return None;
        }
        let start = plane * self.shape.num_elements;
        self.data.get(start..start + self.shape.num_elements)
    }

    /// Returns the value of candidate `element` on plane `plane`.
    pub fn get(&self, plane: usize, element: usize) -> Option<f32> {
        if plane >= self.shape.num_channels || element >= self.shape.num_elements {
            return None;
        }
        self.data
            .get(element + self.shape.num_elements * plane)
            .copied()
    }

    /// Reads a value, panicking if either index is out of range.
    #[inline]
    pub(crate) fn at(&self, plane: usize, element: usize) -> f32 {
        self.data[element + self.shape.num_elements * plane]
    }

    /// Iterates the class scores of candidate `element` in plane order.
    pub(crate) fn class_scores(&self, element: usize) -> impl Iterator<Item = f32> + 'a {
        let data = self.data;
        let stride = self.shape.num_elements;
        (GEOMETRY_PLANES..self.shape.num_channels).map(move |plane| data[element + stride * plane])
    }
}
