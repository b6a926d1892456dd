use yolopost::{Detector, LabelTable, OutputShape, OutputTensor, YoloPostError};

#[test]
fn output_shape_rejects_missing_class_planes() {
    let err = OutputShape::new(4, 10).err().unwrap();
    assert_eq!(
        err,
        YoloPostError::InvalidShape {
            num_channels: 4,
            num_elements: 10,
        }
    );

    let err = OutputShape::new(6, 0).err().unwrap();
    assert_eq!(
        err,
        YoloPostError::InvalidShape {
            num_channels: 6,
            num_elements: 0,
        }
    );
}

#[test]
fn output_shape_from_model_dims() {
    let shape = OutputShape::from_dims(&[1, 84, 8400]).unwrap();
    assert_eq!(shape.num_channels(), 84);
    assert_eq!(shape.num_elements(), 8400);
    assert_eq!(shape.num_classes(), 80);
    assert_eq!(shape.buffer_len(), 84 * 8400);

    assert_eq!(OutputShape::from_dims(&[6, 3]).unwrap(), OutputShape::new(6, 3).unwrap());

    let err = OutputShape::from_dims(&[2, 84, 8400]).err().unwrap();
    assert_eq!(
        err,
        YoloPostError::UnsupportedOutputDims {
            dims: vec![2, 84, 8400],
        }
    );
    assert!(OutputShape::from_dims(&[84]).is_err());
}

#[test]
fn output_tensor_rejects_length_mismatch() {
    let data = [0.0f32; 11];
    let err = OutputTensor::from_slice(&data, 6, 2).err().unwrap();
    assert_eq!(
        err,
        YoloPostError::BufferLengthMismatch {
            expected: 12,
            got: 11,
        }
    );
}

#[test]
fn output_tensor_planes_are_strided_by_num_elements() {
    let data: Vec<f32> = (0..15).map(|v| v as f32).collect();
    let tensor = OutputTensor::from_slice(&data, 5, 3).unwrap();

    assert_eq!(tensor.num_classes(), 1);
    assert_eq!(tensor.plane(0).unwrap(), &[0.0f32, 1.0, 2.0]);
    assert_eq!(tensor.plane(4).unwrap(), &[12.0f32, 13.0, 14.0]);
    assert!(tensor.plane(5).is_none());

    // offset = element + num_elements * plane
    assert_eq!(tensor.get(2, 1), Some(7.0));
    assert_eq!(tensor.get(4, 2), Some(14.0));
    assert_eq!(tensor.get(0, 3), None);
    assert_eq!(tensor.as_slice().len(), 15);
}

#[test]
fn detector_requires_matching_label_count() {
    let labels = LabelTable::from_text("person\ncar\n").unwrap();
    let shape = OutputShape::new(7, 4).unwrap();
    let err = Detector::new(labels, shape).err().unwrap();
    assert_eq!(
        err,
        YoloPostError::LabelCountMismatch {
            expected: 3,
            got: 2,
        }
    );
}

#[test]
fn detector_rejects_wrong_buffer_length() {
    let labels = LabelTable::from_text("person\ncar\n").unwrap();
    let detector = Detector::new(labels, OutputShape::new(6, 2).unwrap()).unwrap();
    let err = detector.detect(&[0.0; 6]).err().unwrap();
    assert_eq!(
        err,
        YoloPostError::BufferLengthMismatch {
            expected: 12,
            got: 6,
        }
    );
}

#[test]
fn empty_label_text_is_rejected() {
    assert_eq!(
        LabelTable::from_text("").err(),
        Some(YoloPostError::EmptyLabels)
    );
    assert_eq!(
        LabelTable::new(Vec::new()).err(),
        Some(YoloPostError::EmptyLabels)
    );
}

#[test]
fn label_file_round_trip_through_disk() {
    let path = std::env::temp_dir().join(format!("yolopost-labels-{}.txt", std::process::id()));
    std::fs::write(&path, "person\nbicycle\n\nignored\n").unwrap();
    let table = yolopost::io::load_labels(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.get(1), Some("bicycle"));
}

#[test]
fn missing_label_file_reports_io_error() {
    let err = yolopost::io::load_labels("/nonexistent/yolopost/labels.txt")
        .err()
        .unwrap();
    assert!(matches!(err, YoloPostError::LabelIo { .. }));
}
