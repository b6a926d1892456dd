use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use yolopost::io::{load_labels, load_tensor_f32};
use yolopost::{DetectConfig, Detection, DetectionResult, Detector, OutputShape};

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "yolopost CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for each pipeline stage.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DetectConfigJson {
    confidence_threshold: f32,
    iou_threshold: f32,
    parallel: bool,
}

impl Default for DetectConfigJson {
    fn default() -> Self {
        let cfg = DetectConfig::default();
        Self {
            confidence_threshold: cfg.confidence_threshold,
            iou_threshold: cfg.iou_threshold,
            parallel: cfg.parallel,
        }
    }
}

impl From<DetectConfigJson> for DetectConfig {
    fn from(value: DetectConfigJson) -> Self {
        Self {
            confidence_threshold: value.confidence_threshold,
            iou_threshold: value.iou_threshold,
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    tensor_path: String,
    labels_path: String,
    output_dims: Vec<usize>,
    output_path: Option<String>,
    detect: DetectConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tensor_path: String::new(),
            labels_path: String::new(),
            output_dims: Vec::new(),
            output_path: None,
            detect: DetectConfigJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    class_index: usize,
    class_name: String,
    confidence: f32,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    cx: f32,
    cy: f32,
    w: f32,
    h: f32,
}

impl From<Detection> for DetectionRecord {
    fn from(value: Detection) -> Self {
        Self {
            class_index: value.class_index,
            class_name: value.class_name,
            confidence: value.confidence,
            x1: value.x1,
            y1: value.y1,
            x2: value.x2,
            y2: value.y2,
            cx: value.cx,
            cy: value.cy,
            w: value.w,
            h: value.h,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum Status {
    Init,
    Detected,
    Empty,
}

#[derive(Debug, Serialize)]
struct Output {
    status: Status,
    elapsed_ms: Option<f64>,
    detections: Vec<DetectionRecord>,
}

impl From<DetectionResult> for Output {
    fn from(value: DetectionResult) -> Self {
        match value {
            DetectionResult::Detected {
                detections,
                elapsed,
            } => Self {
                status: Status::Detected,
                elapsed_ms: Some(elapsed.as_secs_f64() * 1e3),
                detections: detections.into_iter().map(DetectionRecord::from).collect(),
            },
            DetectionResult::Init => Self {
                status: Status::Init,
                elapsed_ms: None,
                detections: Vec::new(),
            },
            DetectionResult::Empty => Self {
                status: Status::Empty,
                elapsed_ms: None,
                detections: Vec::new(),
            },
        }
    }
}

fn load_tensor(path: &Path) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let text = fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&text)?);
    }
    Ok(load_tensor_f32(path)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("yolopost=debug".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.tensor_path.is_empty() || config.labels_path.is_empty() {
        return Err("tensor_path and labels_path must be set in the config".into());
    }

    let shape = OutputShape::from_dims(&config.output_dims)?;
    let labels = load_labels(&config.labels_path)?;
    let cfg: DetectConfig = config.detect.into();
    cfg.validate()?;
    let detector = Detector::new(labels, shape)?.with_config(cfg);

    let buffer = load_tensor(Path::new(&config.tensor_path))?;
    tracing::info!(
        values = buffer.len(),
        channels = shape.num_channels(),
        elements = shape.num_elements(),
        "loaded output tensor"
    );
    let result = detector.detect(&buffer)?;
    let output = Output::from(result);
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
