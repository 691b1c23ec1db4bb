//! Classifier seam and a minimal dense-network implementation.
//!
//! The server only needs "tensor in, class probabilities out". [`Classifier`]
//! is that boundary; [`DenseModel`] is a small fully-connected network read
//! from a JSON weights file so the service can run without an external
//! inference runtime.

use async_trait::async_trait;
use digit_downsample::TensorInput;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use utoipa::ToSchema;

/// Error from loading or running a classifier
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Failed to read model: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model: {0}")]
    Invalid(String),

    #[error("Model expects {expected} input values, got {actual}")]
    InputSize { expected: usize, actual: usize },

    #[error("Inference task failed: {0}")]
    Task(String),
}

/// Anything that turns a normalized canvas into per-class probabilities.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Class probabilities for `input`, index = class label.
    async fn predict(&self, input: &TensorInput) -> Result<Vec<f32>, ClassifierError>;
}

/// Activation applied after a dense layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Sigmoid,
    Softmax,
}

impl Activation {
    fn apply(self, values: &mut [f32]) {
        match self {
            Activation::Linear => {}
            Activation::Relu => values.iter_mut().for_each(|v| *v = v.max(0.0)),
            Activation::Sigmoid => values
                .iter_mut()
                .for_each(|v| *v = 1.0 / (1.0 + (-*v).exp())),
            Activation::Softmax => softmax_inplace(values),
        }
    }
}

fn softmax_inplace(values: &mut [f32]) {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0f32;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    if sum > 0.0 {
        let inv = 1.0 / sum;
        values.iter_mut().for_each(|v| *v *= inv);
    }
}

/// One fully-connected layer: `out[j] = activation(bias[j] + weights[j] . x)`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DenseLayer {
    /// One row per output unit, each `inputs` long
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
    #[serde(default)]
    pub activation: Activation,
}

impl DenseLayer {
    pub fn inputs(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    pub fn outputs(&self) -> usize {
        self.weights.len()
    }

    fn forward(&self, input: &[f32]) -> Vec<f32> {
        let mut out: Vec<f32> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, &b)| b + row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>())
            .collect();
        self.activation.apply(&mut out);
        out
    }
}

/// Feed-forward network of dense layers.
///
/// The input tensor is consumed in row-major order, so both tensor layouts
/// feed the same network.
///
/// ```json
/// { "layers": [ { "weights": [[...784 values...], ...], "bias": [...], "activation": "softmax" } ] }
/// ```
///
/// Layers are shared, so clones are cheap.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DenseModel {
    layers: Arc<Vec<DenseLayer>>,
}

impl DenseModel {
    /// Build a model, checking that layer shapes chain.
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self, ClassifierError> {
        let model = Self {
            layers: Arc::new(layers),
        };
        model.validate()?;
        Ok(model)
    }

    /// Parse a model from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, ClassifierError> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Load a model from a JSON weights file
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let json = std::fs::read_to_string(path)?;
        let model = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            layers = model.layers.len(),
            inputs = model.input_len(),
            outputs = model.output_len(),
            "Loaded classifier model"
        );
        Ok(model)
    }

    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    /// Number of input features
    pub fn input_len(&self) -> usize {
        self.layers.first().map_or(0, DenseLayer::inputs)
    }

    /// Number of classes
    pub fn output_len(&self) -> usize {
        self.layers.last().map_or(0, DenseLayer::outputs)
    }

    fn validate(&self) -> Result<(), ClassifierError> {
        if self.layers.is_empty() {
            return Err(ClassifierError::Invalid("model has no layers".to_string()));
        }

        let mut expected_inputs = self.input_len();
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.outputs() == 0 || layer.inputs() == 0 {
                return Err(ClassifierError::Invalid(format!("layer {i} is empty")));
            }
            if let Some(row) = layer.weights.iter().position(|r| r.len() != layer.inputs()) {
                return Err(ClassifierError::Invalid(format!(
                    "layer {i} row {row} has {} weights, expected {}",
                    layer.weights[row].len(),
                    layer.inputs()
                )));
            }
            if layer.bias.len() != layer.outputs() {
                return Err(ClassifierError::Invalid(format!(
                    "layer {i} has {} biases for {} outputs",
                    layer.bias.len(),
                    layer.outputs()
                )));
            }
            if layer.inputs() != expected_inputs {
                return Err(ClassifierError::Invalid(format!(
                    "layer {i} takes {} inputs but previous layer produces {}",
                    layer.inputs(),
                    expected_inputs
                )));
            }
            expected_inputs = layer.outputs();
        }

        Ok(())
    }

    /// Run the network on a flat input vector
    pub fn forward(&self, input: &[f32]) -> Result<Vec<f32>, ClassifierError> {
        if input.len() != self.input_len() {
            return Err(ClassifierError::InputSize {
                expected: self.input_len(),
                actual: input.len(),
            });
        }

        let mut activations = input.to_vec();
        for layer in self.layers.iter() {
            activations = layer.forward(&activations);
        }
        Ok(activations)
    }
}

#[async_trait]
impl Classifier for DenseModel {
    /// Runs the forward pass on the blocking pool.
    async fn predict(&self, input: &TensorInput) -> Result<Vec<f32>, ClassifierError> {
        let model = self.clone();
        let values = input.values().to_vec();
        tokio::task::spawn_blocking(move || model.forward(&values))
            .await
            .map_err(|e| ClassifierError::Task(e.to_string()))?
    }
}

/// A class label with its confidence
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Prediction {
    /// Class index (the digit)
    pub digit: usize,
    /// Confidence in percent, rounded to 4 decimal places
    pub probability: f64,
}

/// Rank class probabilities for display.
///
/// Probabilities become percentages rounded to 4 decimal places; entries
/// that round to zero are dropped. Sorted by descending confidence, ties in
/// ascending digit order.
pub fn rank_predictions(probabilities: &[f32]) -> Vec<Prediction> {
    let mut ranked: Vec<Prediction> = probabilities
        .iter()
        .enumerate()
        .map(|(digit, &p)| Prediction {
            digit,
            probability: (p as f64 * 100.0 * 10_000.0).round() / 10_000.0,
        })
        .filter(|prediction| prediction.probability > 0.0)
        .collect();

    // Stable sort keeps equal entries in digit order
    ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    ranked
}
