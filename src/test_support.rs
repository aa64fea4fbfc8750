use eframe::egui::Color32;

use crate::insight::{
    AmbientConfig, ArboretumData, Bloom, Connection, ConnectionType, Emotion, EmotionalTone,
    Insight, ShadowSelf, Temporal, ThematicBranch,
};

pub fn insight(id: &str, branch: ThematicBranch, year: i32, foundational: bool) -> Insight {
    Insight {
        id: id.to_owned(),
        title: format!("{id} title"),
        content: format!("{id} content"),
        branch,
        temporal: Temporal {
            year,
            is_foundational: foundational,
        },
        emotion: Emotion {
            tone: EmotionalTone::Peace,
            intensity: 0.5,
            buoyancy: 0.0,
        },
        shadow_self: None,
        bloom: Bloom {
            color: Color32::from_rgb(200, 120, 60),
            size: 1.0,
            glow: 0.5,
        },
        tags: Vec::new(),
        connections: Vec::new(),
        updated_at: String::new(),
    }
}

fn connect(from: &mut Insight, to: &str, kind: ConnectionType, strength: f32) {
    from.connections.push(Connection {
        target_id: to.to_owned(),
        kind,
        strength,
    });
}

/// I1 (growth, 2015, foundational), I2 (joy, 2020, 0.9, 0.5, with a shadow
/// reading), I3 (trauma, 2018, 0.4, -0.6); I2 -> I3 contrasts at 0.8.
pub fn worked_example() -> ArboretumData {
    let i1 = insight("I1", ThematicBranch::Growth, 2015, true);

    let mut i2 = insight("I2", ThematicBranch::Joy, 2020, false);
    i2.emotion.intensity = 0.9;
    i2.emotion.buoyancy = 0.5;
    i2.shadow_self = Some(ShadowSelf {
        inversion: "joy as a performance".to_owned(),
        underlying_fear: None,
        avoidance: Some("quiet evenings".to_owned()),
    });
    connect(&mut i2, "I3", ConnectionType::Contrasts, 0.8);

    let mut i3 = insight("I3", ThematicBranch::Trauma, 2018, false);
    i3.emotion.intensity = 0.4;
    i3.emotion.buoyancy = -0.6;

    ArboretumData::new(vec![i1, i2, i3], AmbientConfig::default()).expect("valid fixture")
}

pub fn worked_example_with_dangling() -> ArboretumData {
    let mut insights = worked_example().insights().to_vec();
    connect(&mut insights[0], "missing", ConnectionType::Heals, 0.7);
    ArboretumData::new(insights, AmbientConfig::default()).expect("valid fixture")
}

/// A -> B -> C -> A, plus C -> ghost which does not exist.
pub fn cyclic_example() -> ArboretumData {
    let mut a = insight("A", ThematicBranch::Identity, 2000, true);
    a.content = "first".to_owned();
    connect(&mut a, "B", ConnectionType::LedTo, 0.6);

    let mut b = insight("B", ThematicBranch::Career, 2005, false);
    connect(&mut b, "C", ConnectionType::Transforms, 0.4);

    let mut c = insight("C", ThematicBranch::Purpose, 2010, false);
    connect(&mut c, "ghost", ConnectionType::Echoes, 0.9);
    connect(&mut c, "A", ConnectionType::Echoes, 0.5);

    ArboretumData::new(vec![a, b, c], AmbientConfig::default()).expect("valid fixture")
}
