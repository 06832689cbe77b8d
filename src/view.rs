/// Fill colour for neurons of a layer: hue steps 45 degrees per layer,
/// saturation 70%, lightness 90%.
pub fn layer_color(layer_idx: usize) -> egui::Color32 {
    let [r, g, b] = hsl_to_rgb((layer_idx * 45 % 360) as f32, 0.7, 0.9);
    egui::Color32::from_rgb(r, g, b)
}

fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [u8; 3] {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_byte(r), to_byte(g), to_byte(b)]
}

/// Neuron value as drawn inside its circle.
pub fn format_value(value: f64) -> String {
    format!("{value:.4}")
}

/// Connection label shown on hover.
pub fn format_weight(weight: Option<f64>) -> String {
    match weight {
        Some(w) => format!("W={w:.2}"),
        None => "W=".to_string(),
    }
}

/// Pick radius around a connection at zoom 1.0, in screen pixels.
const EDGE_PICK_RADIUS: f32 = 4.0;

/// Whether the pointer is close enough to the connection `a -> b` to select it.
pub fn edge_hit(p: egui::Pos2, a: egui::Pos2, b: egui::Pos2, zoom: f32) -> bool {
    distance_to_segment(p, a, b) < (EDGE_PICK_RADIUS * zoom).max(2.0)
}

/// Distance from a point to a line segment.
pub fn distance_to_segment(p: egui::Pos2, a: egui::Pos2, b: egui::Pos2) -> f32 {
    let ab = b - a;
    let ap = p - a;
    let ab_len = ab.length_sq();
    if ab_len == 0.0 {
        return ap.length();
    }
    let t = (ap.x * ab.x + ap.y * ab.y) / ab_len;
    let t = t.clamp(0.0, 1.0);
    let proj = a + ab * t;
    (p - proj).length()
}
