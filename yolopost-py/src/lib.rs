//! Python bindings for the yolopost detection post-processing library.
//!
//! Exposes the detector and its result types so a model's raw output array
//! can be turned into labeled boxes directly from Python.

use numpy::{PyReadonlyArrayDyn, PyUntypedArrayMethods};
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use yolopost::{
    DetectConfig as RustDetectConfig, Detection as RustDetection,
    DetectionResult as RustDetectionResult, Detector as RustDetector, LabelTable, OutputShape,
    OutputTensor, YoloPostError,
};

/// Convert a YoloPostError to a Python exception.
fn to_py_err(err: YoloPostError) -> PyErr {
    match err {
        YoloPostError::LabelIo { .. } | YoloPostError::TensorIo { .. } => {
            PyIOError::new_err(err.to_string())
        }
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// A labeled bounding box in normalized coordinates.
#[pyclass]
#[derive(Clone)]
pub struct Detection {
    #[pyo3(get)]
    pub x1: f32,
    #[pyo3(get)]
    pub y1: f32,
    #[pyo3(get)]
    pub x2: f32,
    #[pyo3(get)]
    pub y2: f32,
    #[pyo3(get)]
    pub cx: f32,
    #[pyo3(get)]
    pub cy: f32,
    #[pyo3(get)]
    pub w: f32,
    #[pyo3(get)]
    pub h: f32,
    /// Winning class score.
    #[pyo3(get)]
    pub confidence: f32,
    /// Index into the label table.
    #[pyo3(get)]
    pub class_index: usize,
    /// Resolved label.
    #[pyo3(get)]
    pub class_name: String,
}

#[pymethods]
impl Detection {
    /// Corners as a tuple `(x1, y1, x2, y2)`.
    fn corners(&self) -> (f32, f32, f32, f32) {
        (self.x1, self.y1, self.x2, self.y2)
    }

    fn __repr__(&self) -> String {
        format!(
            "Detection(class_name='{}', confidence={:.4}, box=({:.4}, {:.4}, {:.4}, {:.4}))",
            self.class_name, self.confidence, self.x1, self.y1, self.x2, self.y2
        )
    }
}

impl From<RustDetection> for Detection {
    fn from(d: RustDetection) -> Self {
        Self {
            x1: d.x1,
            y1: d.y1,
            x2: d.x2,
            y2: d.y2,
            cx: d.cx,
            cy: d.cy,
            w: d.w,
            h: d.h,
            confidence: d.confidence,
            class_index: d.class_index,
            class_name: d.class_name,
        }
    }
}

/// Thresholds for decoding and suppression.
#[pyclass]
#[derive(Clone)]
pub struct DetectConfig {
    inner: RustDetectConfig,
}

#[pymethods]
impl DetectConfig {
    /// Create a new DetectConfig.
    ///
    /// Args:
    ///     confidence_threshold: Minimum class score, exclusive (default: 0.3)
    ///     iou_threshold: IoU at which weaker boxes are suppressed (default: 0.5)
    ///     parallel: Decode candidates in parallel (default: False)
    #[new]
    #[pyo3(signature = (confidence_threshold=0.3, iou_threshold=0.5, parallel=false))]
    fn new(confidence_threshold: f32, iou_threshold: f32, parallel: bool) -> PyResult<Self> {
        let inner = RustDetectConfig {
            confidence_threshold,
            iou_threshold,
            parallel,
        };
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    #[getter]
    fn confidence_threshold(&self) -> f32 {
        self.inner.confidence_threshold
    }

    #[getter]
    fn iou_threshold(&self) -> f32 {
        self.inner.iou_threshold
    }

    #[getter]
    fn parallel(&self) -> bool {
        self.inner.parallel
    }

    fn __repr__(&self) -> String {
        format!(
            "DetectConfig(confidence_threshold={}, iou_threshold={}, parallel={})",
            self.inner.confidence_threshold,
            self.inner.iou_threshold,
            if self.inner.parallel { "True" } else { "False" }
        )
    }
}

/// Outcome of one detection pass.
///
/// `status` is "detected" when boxes survived, "empty" when the output was
/// processed but nothing passed, and "init" before any processing.
#[pyclass]
pub struct DetectionResult {
    inner: RustDetectionResult,
}

#[pymethods]
impl DetectionResult {
    #[getter]
    fn status(&self) -> &'static str {
        match self.inner {
            RustDetectionResult::Init => "init",
            RustDetectionResult::Empty => "empty",
            RustDetectionResult::Detected { .. } => "detected",
        }
    }

    /// Detections in descending confidence order.
    #[getter]
    fn detections(&self) -> Vec<Detection> {
        self.inner
            .detections()
            .iter()
            .cloned()
            .map(Detection::from)
            .collect()
    }

    /// Post-processing time in milliseconds, or None without detections.
    #[getter]
    fn elapsed_ms(&self) -> Option<f64> {
        self.inner.elapsed().map(|d| d.as_secs_f64() * 1e3)
    }

    fn __len__(&self) -> usize {
        self.inner.detections().len()
    }

    fn __repr__(&self) -> String {
        format!(
            "DetectionResult(status='{}', detections={})",
            self.status(),
            self.inner.detections().len()
        )
    }
}

impl From<RustDetectionResult> for DetectionResult {
    fn from(inner: RustDetectionResult) -> Self {
        Self { inner }
    }
}

/// Detector bound to a label table and output shape.
#[pyclass]
pub struct Detector {
    inner: RustDetector,
}

#[pymethods]
impl Detector {
    /// Create a detector.
    ///
    /// Args:
    ///     labels: Class names, one per class plane
    ///     output_dims: Model output dims, (1, C, N) or (C, N)
    ///     config: DetectConfig (default: DetectConfig())
    #[new]
    #[pyo3(signature = (labels, output_dims, config = None))]
    fn new(
        labels: Vec<String>,
        output_dims: Vec<usize>,
        config: Option<DetectConfig>,
    ) -> PyResult<Self> {
        let labels = LabelTable::new(labels).map_err(to_py_err)?;
        Self::build(labels, &output_dims, config)
    }

    /// Create a detector with labels read from a text file.
    ///
    /// Args:
    ///     path: Label file, one label per line
    ///     output_dims: Model output dims, (1, C, N) or (C, N)
    ///     config: DetectConfig (default: DetectConfig())
    #[staticmethod]
    #[pyo3(signature = (path, output_dims, config = None))]
    fn from_label_file(
        path: &str,
        output_dims: Vec<usize>,
        config: Option<DetectConfig>,
    ) -> PyResult<Self> {
        let labels = yolopost::io::load_labels(path).map_err(to_py_err)?;
        Self::build(labels, &output_dims, config)
    }

    /// Decode and suppress one model output array.
    ///
    /// Args:
    ///     output: float32 numpy array shaped like the model output
    fn detect(&self, output: PyReadonlyArrayDyn<'_, f32>) -> PyResult<DetectionResult> {
        let shape = OutputShape::from_dims(output.shape()).map_err(to_py_err)?;
        if shape != self.inner.shape() {
            return Err(PyValueError::new_err(format!(
                "output shape {:?} does not match detector shape ({}, {})",
                output.shape(),
                self.inner.shape().num_channels(),
                self.inner.shape().num_elements()
            )));
        }
        let data = output.as_slice()?;
        let result = self.inner.detect(data).map_err(to_py_err)?;
        Ok(result.into())
    }

    #[getter]
    fn labels(&self) -> Vec<String> {
        self.inner.labels().names().to_vec()
    }

    fn __repr__(&self) -> String {
        let shape = self.inner.shape();
        format!(
            "Detector(num_channels={}, num_elements={}, classes={})",
            shape.num_channels(),
            shape.num_elements(),
            self.inner.labels().len()
        )
    }
}

impl Detector {
    fn build(
        labels: LabelTable,
        output_dims: &[usize],
        config: Option<DetectConfig>,
    ) -> PyResult<Self> {
        let shape = OutputShape::from_dims(output_dims).map_err(to_py_err)?;
        let cfg = config.map(|c| c.inner).unwrap_or_default();
        cfg.validate().map_err(to_py_err)?;
        let inner = RustDetector::new(labels, shape)
            .map_err(to_py_err)?
            .with_config(cfg);
        Ok(Self { inner })
    }
}

/// One-shot detection over a model output array.
///
/// Args:
///     output: float32 numpy array, shape (1, C, N) or (C, N)
///     labels: Class names, one per class plane
///     confidence_threshold: Minimum class score, exclusive (default: 0.3)
///     iou_threshold: IoU at which weaker boxes are suppressed (default: 0.5)
///
/// Returns:
///     DetectionResult
#[pyfunction]
#[pyo3(signature = (output, labels, confidence_threshold = 0.3, iou_threshold = 0.5))]
fn detect(
    output: PyReadonlyArrayDyn<'_, f32>,
    labels: Vec<String>,
    confidence_threshold: f32,
    iou_threshold: f32,
) -> PyResult<DetectionResult> {
    let shape = OutputShape::from_dims(output.shape()).map_err(to_py_err)?;
    let labels = LabelTable::new(labels).map_err(to_py_err)?;
    let data = output.as_slice()?;
    let tensor = OutputTensor::new(data, shape).map_err(to_py_err)?;
    let cfg = RustDetectConfig {
        confidence_threshold,
        iou_threshold,
        ..RustDetectConfig::default()
    };
    let result = yolopost::detect(tensor, &labels, &cfg).map_err(to_py_err)?;
    Ok(result.into())
}

/// Python module for yolopost.
#[pymodule]
fn _yolopost(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Detection>()?;
    m.add_class::<DetectConfig>()?;
    m.add_class::<DetectionResult>()?;
    m.add_class::<Detector>()?;
    m.add_function(wrap_pyfunction!(detect, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
