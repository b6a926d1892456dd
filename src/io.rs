//! File helpers for label tables and raw output dumps.

use crate::labels::LabelTable;
use crate::util::{YoloPostError, YoloPostResult};
use std::path::Path;

/// Loads a label table from a text file with one label per line.
pub fn load_labels<P: AsRef<Path>>(path: P) -> YoloPostResult<LabelTable> {
    let text = std::fs::read_to_string(path.as_ref()).map_err(|err| YoloPostError::LabelIo {
        reason: format!("{}: {err}", path.as_ref().display()),
    })?;
    LabelTable::from_text(&text)
}

/// Loads a raw little-endian `f32` buffer, as dumped from an inference run.
pub fn load_tensor_f32<P: AsRef<Path>>(path: P) -> YoloPostResult<Vec<f32>> {
    let bytes = std::fs::read(path.as_ref()).map_err(|err| YoloPostError::TensorIo {
        reason: format!("{}: {err}", path.as_ref().display()),
    })?;
    tensor_from_le_bytes(&bytes)
}

/// Reinterprets little-endian bytes as `f32` values.
pub fn tensor_from_le_bytes(bytes: &[u8]) -> YoloPostResult<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(YoloPostError::TensorIo {
            reason: format!("byte length {} is not a multiple of 4", bytes.len()),
        });
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::tensor_from_le_bytes;
    use crate::util::YoloPostError;

    #[test]
    fn le_bytes_decode_in_order() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0.5f32.to_le_bytes());
        bytes.extend_from_slice(&(-2.0f32).to_le_bytes());
        assert_eq!(tensor_from_le_bytes(&bytes).unwrap(), vec![0.5, -2.0]);
    }

    #[test]
    fn truncated_bytes_are_rejected() {
        assert!(matches!(
            tensor_from_le_bytes(&[0u8; 6]),
            Err(YoloPostError::TensorIo { .. })
        ));
    }
}
