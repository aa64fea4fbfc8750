use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use eframe::egui::Color32;

/// Opaque `#rrggbb` colors only; short and alpha forms are rejected.
pub fn parse_hex_color(value: &str) -> Option<Color32> {
    let value = value.trim();
    if value.len() != 7 {
        return None;
    }
    Color32::from_hex(value).ok()
}

pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    let mut truncated = text.chars().take(max_chars.saturating_sub(1)).collect::<String>();
    truncated.push('…');
    truncated
}

/// Stable pseudo-random value in `[0, 1)` derived from `id`.
pub fn stable_unit(id: &str) -> f32 {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    ((hash & 0xffff_ffff) as f64 / (u32::MAX as f64 + 1.0)) as f32
}
