//! Test fixtures and constants.

use async_trait::async_trait;
use base64::Engine as _;
use digit_canvas::services::{Activation, Classifier, ClassifierError, DenseLayer, DenseModel};
use digit_downsample::TensorInput;
use serde_json::json;

/// Default canvas side in pixels (28 cells at scale 21)
pub const CANVAS_SIDE: u32 = 588;

/// Default block size
pub const SCALE: u32 = 21;

pub const BLACK: [u8; 4] = [0, 0, 0, 255];
pub const WHITE: [u8; 4] = [255, 255, 255, 255];

/// RGBA bytes of a solid canvas
pub fn solid_pixels(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    rgba.repeat(width as usize * height as usize)
}

/// Black canvas with a white vertical bar covering grid columns
/// `first_col..=last_col`, the way a drawn "1" lands on the grid
pub fn stroke_pixels(side: u32, scale: u32, first_col: u32, last_col: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((side * side * 4) as usize);
    for _y in 0..side {
        for x in 0..side {
            let col = x / scale;
            if (first_col..=last_col).contains(&col) {
                pixels.extend_from_slice(&WHITE);
            } else {
                pixels.extend_from_slice(&BLACK);
            }
        }
    }
    pixels
}

pub fn encode(pixels: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(pixels)
}

/// Request body for the canvas endpoints
pub fn canvas_request(width: u32, height: u32, pixels: &[u8]) -> serde_json::Value {
    json!({
        "width": width,
        "height": height,
        "pixels": encode(pixels),
    })
}

/// Default-sized solid canvas request
pub fn solid_request(rgba: [u8; 4]) -> serde_json::Value {
    canvas_request(
        CANVAS_SIDE,
        CANVAS_SIDE,
        &solid_pixels(CANVAS_SIDE, CANVAS_SIDE, rgba),
    )
}

/// Single softmax layer over 784 inputs whose bias strongly favors `digit`
pub fn biased_model(digit: usize) -> DenseModel {
    let mut bias = vec![0.0; 10];
    bias[digit] = 10.0;
    DenseModel::new(vec![DenseLayer {
        weights: vec![vec![0.0; 784]; 10],
        bias,
        activation: Activation::Softmax,
    }])
    .expect("valid model")
}

/// Model that scores digit 1 by the ink in the middle column and
/// digit 0 by the rest, so a centered vertical stroke reads as "1"
pub fn stroke_model() -> DenseModel {
    let mut one = vec![0.0; 784];
    for row in 0..28 {
        one[row * 28 + 14] = 1.0;
    }
    let mut zero = vec![0.1; 784];
    for row in 0..28 {
        zero[row * 28 + 14] = 0.0;
    }
    let mut weights = vec![vec![0.0; 784]; 10];
    weights[0] = zero;
    weights[1] = one;

    DenseModel::new(vec![DenseLayer {
        weights,
        bias: vec![0.0; 10],
        activation: Activation::Softmax,
    }])
    .expect("valid model")
}

/// Classifier that ignores its input and returns fixed scores
pub struct FixedClassifier(pub Vec<f32>);

#[async_trait]
impl Classifier for FixedClassifier {
    async fn predict(&self, _input: &TensorInput) -> Result<Vec<f32>, ClassifierError> {
        Ok(self.0.clone())
    }
}
