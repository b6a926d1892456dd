#![cfg(feature = "rayon")]

use yolopost::lowlevel::{decode, decode_par};
use yolopost::{DetectConfig, Detector, LabelTable, OutputShape, OutputTensor};

fn make_output(num_classes: usize, num_elements: usize) -> Vec<f32> {
    let num_channels = num_classes + 4;
    let mut data = vec![0.0f32; num_channels * num_elements];
    for element in 0..num_elements {
        let t = element as f32 / num_elements as f32;
        data[element] = (t * 7.3).fract();
        data[element + num_elements] = (t * 3.1 + 0.2).fract();
        data[element + 2 * num_elements] = 0.05 + 0.2 * (t * 5.0).fract();
        data[element + 3 * num_elements] = 0.05 + 0.2 * (t * 11.0).fract();
        for class in 0..num_classes {
            let score = ((element * 31 + class * 17) % 101) as f32 / 100.0;
            data[element + (4 + class) * num_elements] = score;
        }
    }
    data
}

fn labels(count: usize) -> LabelTable {
    LabelTable::new((0..count).map(|idx| format!("c{idx}")).collect()).unwrap()
}

#[test]
fn parallel_decode_matches_sequential() {
    let num_classes = 12;
    let num_elements = 4000;
    let data = make_output(num_classes, num_elements);
    let tensor = OutputTensor::from_slice(&data, num_classes + 4, num_elements).unwrap();
    let table = labels(num_classes);

    let seq = decode(tensor, &table, 0.5).unwrap();
    let par = decode_par(tensor, &table, 0.5).unwrap();
    assert!(!seq.is_empty());
    assert_eq!(seq, par);
}

#[test]
fn parallel_detector_matches_sequential() {
    let num_classes = 6;
    let num_elements = 3000;
    let data = make_output(num_classes, num_elements);
    let shape = OutputShape::new(num_classes + 4, num_elements).unwrap();

    let seq = Detector::new(labels(num_classes), shape).unwrap();
    let par = seq.clone().with_config(DetectConfig {
        parallel: true,
        ..DetectConfig::default()
    });

    let seq_out = seq.detect(&data).unwrap().into_detections();
    let par_out = par.detect(&data).unwrap().into_detections();
    assert_eq!(seq_out, par_out);
}
