use crate::model::{ActivationResult, InputMap, NetworkConfig, WeightId, WeightMap};

/// Fixed bias added to every weighted sum.
pub const BIAS: f64 = 0.1;

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Hands out weights in ascending id order, counting ids absent from the map.
struct WeightCursor<'a> {
    weights: &'a WeightMap,
    next: usize,
    missing: usize,
}

impl<'a> WeightCursor<'a> {
    fn new(weights: &'a WeightMap) -> Self {
        Self {
            weights,
            next: 1,
            missing: 0,
        }
    }

    fn take(&mut self) -> f64 {
        let id = WeightId(self.next);
        self.next += 1;
        self.weights.get(id).unwrap_or_else(|| {
            self.missing += 1;
            0.0
        })
    }
}

fn layer_step(prev: &[f64], size: usize, cursor: &mut WeightCursor) -> Vec<f64> {
    (0..size)
        .map(|_| {
            let sum: f64 = prev.iter().map(|&x| x * cursor.take()).sum();
            sigmoid(sum + BIAS)
        })
        .collect()
}

/// Forward pass through every hidden layer and then the output layer.
///
/// Inputs are read in `X1..Xn` order. A weight id missing from `weights`
/// contributes 0 to its sum; this happens while a config change is still
/// settling and never aborts the pass.
pub fn propagate(
    config: &NetworkConfig,
    inputs: &InputMap,
    weights: &WeightMap,
) -> ActivationResult {
    let mut cursor = WeightCursor::new(weights);
    let mut prev = inputs.values();
    let mut hidden = Vec::with_capacity(config.hidden_layers.len());

    for &size in &config.hidden_layers {
        let layer = layer_step(&prev, size, &mut cursor);
        hidden.push(layer.clone());
        prev = layer;
    }
    let outputs = layer_step(&prev, config.output_neurons, &mut cursor);

    if cursor.missing > 0 {
        log::warn!(
            "{} of {} weights missing during propagation, treated as 0",
            cursor.missing,
            cursor.next - 1
        );
    }
    log::debug!("propagated {} hidden layers, outputs {:?}", hidden.len(), outputs);

    ActivationResult { hidden, outputs }
}
