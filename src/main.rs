mod calculator;
mod config;
mod error;
mod model;
mod propagate;
mod topology;
mod view;

use anyhow::Context;
use egui_plot::{Bar, BarChart, Plot};

use calculator::{Calculator, ConfigEdit};
use config::{AppConfig, LayoutSettings};
use model::{InputId, WeightId};
use topology::{compute_layout, edge_weight_id, weight_count};

fn count_field(n: &mut usize) -> egui::DragValue<'_> {
    egui::DragValue::new(n)
        .range(1..=usize::MAX)
        .custom_parser(|text| Some(config::parse_count(text) as f64))
}

fn value_field(v: &mut f64, speed: f64) -> egui::DragValue<'_> {
    egui::DragValue::new(v)
        .speed(speed)
        .custom_parser(|text| Some(config::parse_value(text)))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Config,
    Inputs,
    Weights,
    Results,
}

struct CalculatorApp {
    calculator: Calculator,
    layout: LayoutSettings,
    tab: Tab,
    zoom: f32,
}

impl CalculatorApp {
    fn new(config: AppConfig) -> Self {
        Self {
            calculator: Calculator::new(config.network),
            layout: config.layout,
            tab: Tab::Config,
            zoom: 1.0,
        }
    }

    fn summary(&self) -> String {
        let config = self.calculator.config();
        format!(
            "{} inputs, {} hidden layers, {} outputs, {} weights",
            config.input_neurons,
            config.hidden_layers.len(),
            config.output_neurons,
            weight_count(config)
        )
    }

    fn draw_config_tab(&mut self, ui: &mut egui::Ui) {
        let config = self.calculator.config().clone();
        let mut edits = Vec::new();

        ui.horizontal(|ui| {
            ui.label("Input Neurons");
            let mut n = config.input_neurons;
            if ui.add(count_field(&mut n)).changed() && n != config.input_neurons {
                edits.push(ConfigEdit::SetInputNeurons(n));
            }
            ui.add_space(24.0);
            ui.label("Output Neurons");
            let mut n = config.output_neurons;
            if ui.add(count_field(&mut n)).changed() && n != config.output_neurons {
                edits.push(ConfigEdit::SetOutputNeurons(n));
            }
        });
        ui.separator();

        ui.horizontal(|ui| {
            ui.heading("Hidden Layers");
            if ui.button("Add Layer").clicked() {
                edits.push(ConfigEdit::AddHiddenLayer);
            }
        });
        for (i, &size) in config.hidden_layers.iter().enumerate() {
            ui.horizontal(|ui| {
                ui.label(format!("Layer {}", i + 1));
                let mut n = size;
                if ui.add(count_field(&mut n)).changed() && n != size {
                    edits.push(ConfigEdit::ResizeHiddenLayer(i, n));
                }
                if ui.button("Remove").clicked() {
                    edits.push(ConfigEdit::RemoveHiddenLayer(i));
                }
            });
        }

        // Indices refer to the config as drawn; apply removals last, highest first.
        edits.sort_by_key(|edit| match edit {
            ConfigEdit::RemoveHiddenLayer(i) => (1, usize::MAX - i),
            _ => (0, 0),
        });
        for edit in edits {
            self.calculator.apply(edit);
        }
    }

    fn draw_inputs_tab(&mut self, ui: &mut egui::Ui) {
        let mut edits: Vec<(InputId, f64)> = Vec::new();
        egui::Grid::new("inputs").num_columns(10).show(ui, |ui| {
            for (k, (id, value)) in self.calculator.inputs().iter().enumerate() {
                let mut v = value;
                ui.label(id.to_string());
                if ui.add(value_field(&mut v, 0.1)).changed() {
                    edits.push((id, v));
                }
                if k % 5 == 4 {
                    ui.end_row();
                }
            }
        });
        for (id, v) in edits {
            self.calculator.set_input(id, v);
        }
    }

    fn draw_weights_tab(&mut self, ui: &mut egui::Ui) {
        let mut edits: Vec<(WeightId, f64)> = Vec::new();
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("weights").num_columns(12).show(ui, |ui| {
                for (k, (id, value)) in self.calculator.weights().iter().enumerate() {
                    let mut v = value;
                    ui.label(id.to_string());
                    if ui.add(value_field(&mut v, 0.05)).changed() {
                        edits.push((id, v));
                    }
                    if k % 6 == 5 {
                        ui.end_row();
                    }
                }
            });
        });
        for (id, v) in edits {
            self.calculator.set_weight(id, v);
        }
    }

    fn draw_results_tab(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("-").clicked() {
                self.zoom = (self.zoom * 0.9).max(0.2);
            }
            if ui.button("+").clicked() {
                self.zoom = (self.zoom * 1.1).min(5.0);
            }
            ui.label(format!("Zoom: {:.2}x", self.zoom));
            if ui.button("Reset View").clicked() {
                self.zoom = 1.0;
            }
            if ui.button("Copy results as JSON").clicked() {
                match serde_json::to_string_pretty(self.calculator.results()) {
                    Ok(json) => ui.ctx().copy_text(json),
                    Err(e) => log::error!("failed to serialize results: {e}"),
                }
            }
        });

        let bars: Vec<Bar> = self
            .calculator
            .results()
            .outputs
            .iter()
            .enumerate()
            .map(|(i, &v)| Bar::new(i as f64, v).name(format!("out{i}")))
            .collect();
        Plot::new("outputs")
            .height(140.0)
            .include_y(0.0)
            .include_y(1.0)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Outputs"));
            });
        ui.separator();

        egui::ScrollArea::both().show(ui, |ui| self.draw_network(ui));
    }

    fn draw_network(&self, ui: &mut egui::Ui) {
        let config = self.calculator.config();
        let layout = compute_layout(
            config,
            self.calculator.inputs(),
            self.calculator.results(),
            &self.layout,
        );
        let zoom = self.zoom;
        let size = egui::vec2(layout.width as f32, layout.height as f32) * zoom;
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let origin = response.rect.min;
        let to_screen = |x: f64, y: f64| origin + egui::vec2(x as f32, y as f32) * zoom;
        let pointer = response.hover_pos();

        // Connections
        let mut hovered = None;
        for (l, pair) in layout.layers.windows(2).enumerate() {
            for (from_idx, from) in pair[0].iter().enumerate() {
                for (to_idx, to) in pair[1].iter().enumerate() {
                    let a = to_screen(from.x, from.y);
                    let b = to_screen(to.x, to.y);
                    let is_hovered =
                        hovered.is_none() && pointer.is_some_and(|p| view::edge_hit(p, a, b, zoom));
                    if is_hovered {
                        hovered = Some((l, from_idx, to_idx, a, b));
                    } else {
                        let stroke = egui::Stroke::new(1.0, egui::Color32::from_gray(204));
                        painter.line_segment([a, b], stroke);
                    }
                }
            }
        }
        if let Some((l, from_idx, to_idx, a, b)) = hovered {
            painter.line_segment([a, b], egui::Stroke::new(2.0, egui::Color32::BLACK));
            let weight = edge_weight_id(config, l, from_idx, to_idx)
                .and_then(|id| self.calculator.weights().get(id));
            painter.text(
                a + (b - a) / 2.0 - egui::vec2(0.0, 5.0 * zoom),
                egui::Align2::CENTER_BOTTOM,
                view::format_weight(weight),
                egui::FontId::proportional(13.0 * zoom),
                ui.visuals().strong_text_color(),
            );
        }

        // Neurons
        let radius = self.layout.neuron_radius as f32 * zoom;
        for (l, layer) in layout.layers.iter().enumerate() {
            for neuron in layer {
                let center = to_screen(neuron.x, neuron.y);
                painter.circle_filled(center, radius, view::layer_color(l));
                let outline = egui::Stroke::new(1.0, egui::Color32::from_gray(102));
                painter.circle_stroke(center, radius, outline);
                let font = egui::FontId::proportional(11.0 * zoom);
                painter.text(
                    center - egui::vec2(0.0, 5.0 * zoom),
                    egui::Align2::CENTER_BOTTOM,
                    &neuron.id,
                    font.clone(),
                    egui::Color32::BLACK,
                );
                painter.text(
                    center + egui::vec2(0.0, 10.0 * zoom),
                    egui::Align2::CENTER_BOTTOM,
                    view::format_value(neuron.value),
                    font,
                    egui::Color32::BLACK,
                );
            }
        }
    }
}

impl eframe::App for CalculatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Artificial Neural Networks (Forward Propagation)");
            ui.label(self.summary());
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Config, "Network Configuration");
                ui.selectable_value(&mut self.tab, Tab::Inputs, "Inputs");
                ui.selectable_value(&mut self.tab, Tab::Weights, "Weights");
                ui.selectable_value(&mut self.tab, Tab::Results, "Results");
            });
            ui.separator();
            match self.tab {
                Tab::Config => self.draw_config_tab(ui),
                Tab::Inputs => self.draw_inputs_tab(ui),
                Tab::Weights => self.draw_weights_tab(ui),
                Tab::Results => self.draw_results_tab(ui),
            }
        });
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = AppConfig::from_env().context("failed to load configuration")?;
    log::info!("starting with layers {:?}", config.network.layer_sizes());

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "ANN Calculator",
        options,
        Box::new(|_cc| Ok(Box::new(CalculatorApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start window: {e}"))
}
