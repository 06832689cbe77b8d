use crate::model::{ActivationResult, InputId, InputMap, NetworkConfig, WeightId, WeightMap};
use crate::propagate::propagate;
use crate::topology::derive_state;

/// A discrete edit of the network topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigEdit {
    SetInputNeurons(usize),
    SetOutputNeurons(usize),
    /// Appends a hidden layer with one neuron.
    AddHiddenLayer,
    RemoveHiddenLayer(usize),
    ResizeHiddenLayer(usize, usize),
}

/// Config plus everything derived from it.
///
/// Each mutation runs the whole pipeline before returning, so readers
/// never see inputs or weights that disagree with the config.
#[derive(Debug, Clone)]
pub struct Calculator {
    config: NetworkConfig,
    inputs: InputMap,
    weights: WeightMap,
    results: ActivationResult,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(NetworkConfig::default())
    }
}

impl Calculator {
    pub fn new(config: NetworkConfig) -> Self {
        let config = config.sanitized();
        let (inputs, weights) = derive_state(&config);
        let results = propagate(&config, &inputs, &weights);
        Self {
            config,
            inputs,
            weights,
            results,
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn inputs(&self) -> &InputMap {
        &self.inputs
    }

    pub fn weights(&self) -> &WeightMap {
        &self.weights
    }

    pub fn results(&self) -> &ActivationResult {
        &self.results
    }

    /// Applies `edit`, regenerates inputs and weights, and re-propagates.
    ///
    /// Returns `false` when the edit names a hidden layer that does not exist;
    /// the state is left untouched in that case.
    pub fn apply(&mut self, edit: ConfigEdit) -> bool {
        let hidden = &mut self.config.hidden_layers;
        match edit {
            ConfigEdit::SetInputNeurons(n) => self.config.input_neurons = n.max(1),
            ConfigEdit::SetOutputNeurons(n) => self.config.output_neurons = n.max(1),
            ConfigEdit::AddHiddenLayer => hidden.push(1),
            ConfigEdit::RemoveHiddenLayer(index) if index < hidden.len() => {
                hidden.remove(index);
            }
            ConfigEdit::ResizeHiddenLayer(index, n) if index < hidden.len() => {
                hidden[index] = n.max(1);
            }
            ConfigEdit::RemoveHiddenLayer(_) | ConfigEdit::ResizeHiddenLayer(..) => {
                log::warn!("ignoring {edit:?}: only {} hidden layers", hidden.len());
                return false;
            }
        }
        log::debug!("applied {edit:?}");

        let (inputs, weights) = derive_state(&self.config);
        self.inputs = inputs;
        self.weights = weights;
        self.recompute();
        true
    }

    /// Overwrites one input value and re-propagates. Unknown ids are ignored.
    pub fn set_input(&mut self, id: InputId, value: f64) {
        if self.inputs.get(id).is_none() {
            log::warn!("ignoring edit of unknown input {id}");
            return;
        }
        self.inputs.set(id, value);
        self.recompute();
    }

    /// Overwrites one weight value and re-propagates. Unknown ids are ignored.
    pub fn set_weight(&mut self, id: WeightId, value: f64) {
        if self.weights.get(id).is_none() {
            log::warn!("ignoring edit of unknown weight {id}");
            return;
        }
        self.weights.set(id, value);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.results = propagate(&self.config, &self.inputs, &self.weights);
    }
}
