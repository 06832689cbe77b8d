use crate::config::LayoutSettings;
use crate::model::{
    ActivationResult, InputId, InputMap, LayoutPosition, NetworkConfig, NetworkLayout, WeightId,
    WeightMap,
};

/// Default inputs `X1..Xn` with `Xi = 10 * i`.
pub fn generate_inputs(input_neurons: usize) -> InputMap {
    (1..=input_neurons)
        .map(|i| (InputId(i), (i * 10) as f64))
        .collect()
}

/// Total number of edges in the fully-connected network.
pub fn weight_count(config: &NetworkConfig) -> usize {
    config.transitions().iter().map(|(prev, curr)| prev * curr).sum()
}

/// One weight per edge, numbered `W1..Wm` across all transitions in order.
/// Each weight starts out equal to its own index.
pub fn generate_weights(config: &NetworkConfig) -> WeightMap {
    let mut weights = WeightMap::default();
    let mut next = 1;
    for (prev_size, layer_size) in config.transitions() {
        for _ in 0..prev_size * layer_size {
            weights.set(WeightId(next), next as f64);
            next += 1;
        }
    }
    weights
}

/// Fresh inputs and weights for `config`. Both maps are rebuilt from scratch.
pub fn derive_state(config: &NetworkConfig) -> (InputMap, WeightMap) {
    let inputs = generate_inputs(config.input_neurons);
    let weights = generate_weights(config);
    log::debug!(
        "derived {} inputs and {} weights for {:?}",
        inputs.len(),
        weights.len(),
        config.layer_sizes()
    );
    (inputs, weights)
}

/// Weight id of the edge `from -> to` in the given transition (0 = input to first layer).
///
/// Matches the order propagation consumes weights in: the source neuron varies fastest.
pub fn edge_weight_id(
    config: &NetworkConfig,
    transition: usize,
    from: usize,
    to: usize,
) -> Option<WeightId> {
    let transitions = config.transitions();
    let &(prev_size, layer_size) = transitions.get(transition)?;
    if from >= prev_size || to >= layer_size {
        return None;
    }
    let offset: usize = transitions[..transition].iter().map(|(p, c)| p * c).sum();
    Some(WeightId(offset + to * prev_size + from + 1))
}

/// Places every neuron on the canvas: layers are columns left to right,
/// neurons are rows top to bottom.
pub fn compute_layout(
    config: &NetworkConfig,
    inputs: &InputMap,
    results: &ActivationResult,
    settings: &LayoutSettings,
) -> NetworkLayout {
    let mut layers = Vec::with_capacity(config.hidden_layers.len() + 2);
    let row = |n: usize| settings.y_start + n as f64 * settings.neuron_spacing;
    let mut x = settings.x_start;

    layers.push(
        inputs
            .iter()
            .enumerate()
            .map(|(n, (id, value))| LayoutPosition {
                id: id.to_string(),
                x,
                y: row(n),
                value,
            })
            .collect(),
    );

    for (l, &size) in config.hidden_layers.iter().enumerate() {
        x += settings.layer_spacing;
        let activations = results.hidden.get(l);
        layers.push(
            (0..size)
                .map(|n| LayoutPosition {
                    id: format!("h{l}_{n}"),
                    x,
                    y: row(n),
                    value: activations.and_then(|a| a.get(n)).copied().unwrap_or(0.0),
                })
                .collect(),
        );
    }

    x += settings.layer_spacing;
    layers.push(
        (0..config.output_neurons)
            .map(|n| LayoutPosition {
                id: format!("out{n}"),
                x,
                y: row(n),
                value: results.outputs.get(n).copied().unwrap_or(0.0),
            })
            .collect(),
    );

    let tallest = layers.iter().map(Vec::len).max().unwrap_or(0);
    let height = tallest as f64 * settings.neuron_spacing + settings.height_margin;
    let width = (layers.len() - 1) as f64 * settings.layer_spacing + settings.width_margin;

    NetworkLayout {
        layers,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn random_config(rng: &mut impl Rng) -> NetworkConfig {
        let hidden = rng.gen_range(0..5);
        NetworkConfig {
            input_neurons: rng.gen_range(1..8),
            hidden_layers: (0..hidden).map(|_| rng.gen_range(1..8)).collect(),
            output_neurons: rng.gen_range(1..8),
        }
    }

    #[test]
    fn inputs_are_ten_times_their_index() {
        for n in 1..20 {
            let inputs = generate_inputs(n);
            assert_eq!(inputs.len(), n);
            for (k, (id, value)) in inputs.iter().enumerate() {
                assert_eq!(id.to_string(), format!("X{}", k + 1));
                assert_eq!(value, 10.0 * (k + 1) as f64);
            }
        }
    }

    #[test]
    fn weights_are_contiguous_and_self_valued() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let config = random_config(&mut rng);
            let weights = generate_weights(&config);
            let expected: usize = config
                .layer_sizes()
                .windows(2)
                .map(|w| w[0] * w[1])
                .sum();
            assert_eq!(weights.len(), expected);
            assert_eq!(weight_count(&config), expected);
            for (k, (id, value)) in weights.iter().enumerate() {
                assert_eq!(id, WeightId(k + 1));
                assert_eq!(value, (k + 1) as f64);
            }
        }
    }

    #[test]
    fn no_hidden_layers_connects_input_to_output() {
        let config = NetworkConfig {
            input_neurons: 3,
            hidden_layers: vec![],
            output_neurons: 2,
        };
        assert_eq!(generate_weights(&config).len(), 6);
    }

    #[test]
    fn removing_a_hidden_layer_renumbers_weights() {
        let mut config = NetworkConfig {
            input_neurons: 2,
            hidden_layers: vec![3, 4],
            output_neurons: 1,
        };
        assert_eq!(generate_weights(&config).len(), 2 * 3 + 3 * 4 + 4);

        config.hidden_layers.remove(0);
        let weights = generate_weights(&config);
        assert_eq!(config.hidden_layers, vec![4]);
        assert_eq!(weights.len(), 2 * 4 + 4);
        assert_eq!(weights.get(WeightId(12)), Some(12.0));
        assert_eq!(weights.get(WeightId(13)), None);
    }

    #[test]
    fn edge_ids_follow_source_major_order() {
        let config = NetworkConfig {
            input_neurons: 2,
            hidden_layers: vec![2],
            output_neurons: 1,
        };
        assert_eq!(edge_weight_id(&config, 0, 0, 0), Some(WeightId(1)));
        assert_eq!(edge_weight_id(&config, 0, 1, 0), Some(WeightId(2)));
        assert_eq!(edge_weight_id(&config, 0, 0, 1), Some(WeightId(3)));
        assert_eq!(edge_weight_id(&config, 0, 1, 1), Some(WeightId(4)));
        assert_eq!(edge_weight_id(&config, 1, 0, 0), Some(WeightId(5)));
        assert_eq!(edge_weight_id(&config, 1, 1, 0), Some(WeightId(6)));
        assert_eq!(edge_weight_id(&config, 1, 2, 0), None);
        assert_eq!(edge_weight_id(&config, 2, 0, 0), None);
    }

    #[test]
    fn edge_ids_cover_every_weight_once() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let config = random_config(&mut rng);
            let mut seen = Vec::new();
            for (t, (prev, curr)) in config.transitions().into_iter().enumerate() {
                for from in 0..prev {
                    for to in 0..curr {
                        seen.push(edge_weight_id(&config, t, from, to).unwrap().0);
                    }
                }
            }
            seen.sort_unstable();
            assert_eq!(seen, (1..=weight_count(&config)).collect::<Vec<_>>());
        }
    }

    #[test]
    fn layout_places_columns_and_rows() {
        let config = NetworkConfig {
            input_neurons: 2,
            hidden_layers: vec![3],
            output_neurons: 1,
        };
        let inputs = generate_inputs(2);
        let results = ActivationResult {
            hidden: vec![vec![0.25, 0.5, 0.75]],
            outputs: vec![0.9],
        };
        let layout = compute_layout(&config, &inputs, &results, &LayoutSettings::default());

        assert_eq!(layout.layers.len(), 3);
        let ids: Vec<Vec<&str>> = layout
            .layers
            .iter()
            .map(|l| l.iter().map(|p| p.id.as_str()).collect())
            .collect();
        assert_eq!(ids, vec![vec!["X1", "X2"], vec!["h0_0", "h0_1", "h0_2"], vec!["out0"]]);

        assert_eq!(layout.layers[0][1].x, 50.0);
        assert_eq!(layout.layers[0][1].y, 150.0);
        assert_eq!(layout.layers[0][1].value, 20.0);
        assert_eq!(layout.layers[1][2].x, 230.0);
        assert_eq!(layout.layers[1][2].y, 250.0);
        assert_eq!(layout.layers[1][2].value, 0.75);
        assert_eq!(layout.layers[2][0].x, 410.0);
        assert_eq!(layout.layers[2][0].value, 0.9);

        assert_eq!(layout.height, 3.0 * 100.0 + 100.0);
        assert_eq!(layout.width, 2.0 * 180.0 + 200.0);
    }

    #[test]
    fn layout_defaults_missing_activations_to_zero() {
        let config = NetworkConfig {
            input_neurons: 1,
            hidden_layers: vec![2],
            output_neurons: 2,
        };
        let layout = compute_layout(
            &config,
            &generate_inputs(1),
            &ActivationResult::default(),
            &LayoutSettings::default(),
        );
        assert!(layout.layers[1..].iter().flatten().all(|p| p.value == 0.0));
    }

    #[test]
    fn layout_bounds_contain_every_neuron() {
        let mut rng = rand::thread_rng();
        let settings = LayoutSettings::default();
        for _ in 0..100 {
            let mut config = random_config(&mut rng);
            if rng.gen_bool(0.3) {
                config.hidden_layers.push(rng.gen_range(20..40));
            }
            let layout = compute_layout(
                &config,
                &generate_inputs(config.input_neurons),
                &ActivationResult::default(),
                &settings,
            );
            assert_eq!(layout.layers.len(), config.hidden_layers.len() + 2);
            for p in layout.layers.iter().flatten() {
                assert!(p.x < layout.width);
                assert!(p.y < layout.height);
            }
        }
    }
}
