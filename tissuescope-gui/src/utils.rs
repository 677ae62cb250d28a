use eframe::egui::Color32;

/// Truncates to `max_chars` characters, ending in "..." when shortened.
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// `#rrggbb` to a colour, grey when unparsable.
pub fn hex_to_color32(hex: &str) -> Color32 {
    let [r, g, b] = dataset::laser::parse_hex_color(hex).unwrap_or([128, 128, 128]);
    Color32::from_rgb(r, g, b)
}

pub fn rgb_to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

pub fn format_optional(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.digits$}"),
        _ => "-".to_string(),
    }
}

pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}
