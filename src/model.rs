use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Layer sizes of a fully-connected feed-forward network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_neurons: usize,
    pub hidden_layers: Vec<usize>,
    pub output_neurons: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            input_neurons: 5,
            hidden_layers: vec![4, 3, 2, 3],
            output_neurons: 1,
        }
    }
}

impl NetworkConfig {
    /// Every layer size in propagation order: input, hidden..., output.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden_layers.len() + 2);
        sizes.push(self.input_neurons);
        sizes.extend_from_slice(&self.hidden_layers);
        sizes.push(self.output_neurons);
        sizes
    }

    /// `(prev_size, layer_size)` for each consecutive pair of layers.
    pub fn transitions(&self) -> Vec<(usize, usize)> {
        self.layer_sizes().windows(2).map(|w| (w[0], w[1])).collect()
    }

    /// Copy of this config with every layer size raised to at least 1.
    pub fn sanitized(&self) -> Self {
        Self {
            input_neurons: self.input_neurons.max(1),
            hidden_layers: self.hidden_layers.iter().map(|&n| n.max(1)).collect(),
            output_neurons: self.output_neurons.max(1),
        }
    }
}

/// 1-based input identifier, displayed as `X1`, `X2`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InputId(pub usize);

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X{}", self.0)
    }
}

/// 1-based weight identifier, sequential across the whole network, displayed as `W1`, `W2`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeightId(pub usize);

impl fmt::Display for WeightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W{}", self.0)
    }
}

/// Input values, iterated in generation order (`X1..Xn`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputMap(BTreeMap<InputId, f64>);

impl InputMap {
    pub fn get(&self, id: InputId) -> Option<f64> {
        self.0.get(&id).copied()
    }

    pub fn set(&mut self, id: InputId, value: f64) {
        self.0.insert(id, value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (InputId, f64)> + '_ {
        self.0.iter().map(|(&id, &v)| (id, v))
    }

    pub fn values(&self) -> Vec<f64> {
        self.0.values().copied().collect()
    }
}

impl FromIterator<(InputId, f64)> for InputMap {
    fn from_iter<T: IntoIterator<Item = (InputId, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Edge weights keyed by sequential [`WeightId`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightMap(BTreeMap<WeightId, f64>);

impl WeightMap {
    pub fn get(&self, id: WeightId) -> Option<f64> {
        self.0.get(&id).copied()
    }

    pub fn set(&mut self, id: WeightId, value: f64) {
        self.0.insert(id, value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WeightId, f64)> + '_ {
        self.0.iter().map(|(&id, &v)| (id, v))
    }
}

impl FromIterator<(WeightId, f64)> for WeightMap {
    fn from_iter<T: IntoIterator<Item = (WeightId, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Post-sigmoid activations of every non-input neuron.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivationResult {
    pub hidden: Vec<Vec<f64>>,
    pub outputs: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPosition {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// Neuron positions grouped by layer (input first, output last) plus canvas bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkLayout {
    pub layers: Vec<Vec<LayoutPosition>>,
    pub width: f64,
    pub height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_sizes_without_hidden_layers() {
        let config = NetworkConfig {
            input_neurons: 3,
            hidden_layers: vec![],
            output_neurons: 2,
        };
        assert_eq!(config.layer_sizes(), vec![3, 2]);
        assert_eq!(config.transitions(), vec![(3, 2)]);
    }

    #[test]
    fn transitions_follow_config_order() {
        let config = NetworkConfig::default();
        assert_eq!(config.transitions(), vec![(5, 4), (4, 3), (3, 2), (2, 3), (3, 1)]);
    }

    #[test]
    fn sanitized_raises_zero_sizes() {
        let config = NetworkConfig {
            input_neurons: 0,
            hidden_layers: vec![0, 4],
            output_neurons: 0,
        };
        let clean = config.sanitized();
        assert_eq!(clean.input_neurons, 1);
        assert_eq!(clean.hidden_layers, vec![1, 4]);
        assert_eq!(clean.output_neurons, 1);
    }

    #[test]
    fn ids_display_with_prefix() {
        assert_eq!(InputId(3).to_string(), "X3");
        assert_eq!(WeightId(12).to_string(), "W12");
    }

    #[test]
    fn input_map_iterates_numerically() {
        let map: InputMap = (1..=12).rev().map(|i| (InputId(i), i as f64)).collect();
        let order: Vec<usize> = map.iter().map(|(id, _)| id.0).collect();
        assert_eq!(order, (1..=12).collect::<Vec<_>>());
    }
}
