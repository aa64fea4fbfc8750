use eframe::egui::Color32;

use crate::insight::Insight;

/// RGB multiplier applied to a bloom color when its shadow reading is shown.
pub const SHADOW_DARKENING: f32 = 0.3;

fn shows_shadow(insight: &Insight, shadow_mode: bool) -> bool {
    shadow_mode && insight.shadow_self.is_some()
}

pub fn displayed_text(insight: &Insight, shadow_mode: bool) -> &str {
    match &insight.shadow_self {
        Some(shadow) if shadow_mode => shadow.inversion.as_str(),
        _ => insight.content.as_str(),
    }
}

pub fn displayed_color(insight: &Insight, shadow_mode: bool) -> Color32 {
    if shows_shadow(insight, shadow_mode) {
        darken(insight.bloom.color, SHADOW_DARKENING)
    } else {
        insight.bloom.color
    }
}

/// `(label, text)` lines describing the shadow reading, empty outside shadow
/// mode.
pub fn shadow_details(insight: &Insight, shadow_mode: bool) -> Vec<(&'static str, &str)> {
    let Some(shadow) = insight.shadow_self.as_ref().filter(|_| shadow_mode) else {
        return Vec::new();
    };

    let mut lines = Vec::with_capacity(2);
    if let Some(fear) = &shadow.underlying_fear {
        lines.push(("Underlying fear", fear.as_str()));
    }
    if let Some(avoidance) = &shadow.avoidance {
        lines.push(("Avoidance", avoidance.as_str()));
    }
    lines
}

fn darken(color: Color32, factor: f32) -> Color32 {
    let scale = |channel: u8| (channel as f32 * factor).round() as u8;
    Color32::from_rgba_unmultiplied(
        scale(color.r()),
        scale(color.g()),
        scale(color.b()),
        color.a(),
    )
}
