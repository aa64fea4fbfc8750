use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use eframe::egui::Color32;

use super::error::DataError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThematicBranch {
    Relationships,
    Career,
    Trauma,
    Joy,
    Growth,
    Identity,
    Purpose,
}

impl ThematicBranch {
    pub const ALL: [Self; 7] = [
        Self::Identity,
        Self::Purpose,
        Self::Career,
        Self::Growth,
        Self::Joy,
        Self::Relationships,
        Self::Trauma,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Relationships => "relationships",
            Self::Career => "career",
            Self::Trauma => "trauma",
            Self::Joy => "joy",
            Self::Growth => "growth",
            Self::Identity => "identity",
            Self::Purpose => "purpose",
        }
    }

    /// Fixed angle in degrees. The table spans -90°..180° in 45° steps.
    pub fn angle_degrees(self) -> f32 {
        match self {
            Self::Identity => -90.0,
            Self::Purpose => -45.0,
            Self::Career => 0.0,
            Self::Growth => 45.0,
            Self::Joy => 90.0,
            Self::Relationships => 135.0,
            Self::Trauma => 180.0,
        }
    }

    pub fn angle(self) -> f32 {
        self.angle_degrees().to_radians()
    }

    pub fn color(self) -> Color32 {
        match self {
            Self::Relationships => Color32::from_rgb(236, 130, 160),
            Self::Career => Color32::from_rgb(110, 160, 230),
            Self::Trauma => Color32::from_rgb(150, 90, 120),
            Self::Joy => Color32::from_rgb(250, 205, 90),
            Self::Growth => Color32::from_rgb(120, 200, 130),
            Self::Identity => Color32::from_rgb(175, 140, 235),
            Self::Purpose => Color32::from_rgb(240, 150, 90),
        }
    }
}

impl FromStr for ThematicBranch {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|branch| branch.label() == value)
            .ok_or(())
    }
}

impl fmt::Display for ThematicBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmotionalTone {
    Joy,
    Sorrow,
    Fear,
    Anger,
    Peace,
    Longing,
    Wonder,
    Shame,
    Pride,
    Love,
}

impl EmotionalTone {
    pub const ALL: [Self; 10] = [
        Self::Joy,
        Self::Sorrow,
        Self::Fear,
        Self::Anger,
        Self::Peace,
        Self::Longing,
        Self::Wonder,
        Self::Shame,
        Self::Pride,
        Self::Love,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Sorrow => "sorrow",
            Self::Fear => "fear",
            Self::Anger => "anger",
            Self::Peace => "peace",
            Self::Longing => "longing",
            Self::Wonder => "wonder",
            Self::Shame => "shame",
            Self::Pride => "pride",
            Self::Love => "love",
        }
    }
}

impl FromStr for EmotionalTone {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|tone| tone.label() == value)
            .ok_or(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectionType {
    CausedBy,
    LedTo,
    Echoes,
    Contrasts,
    Transforms,
    Heals,
}

impl ConnectionType {
    pub const ALL: [Self; 6] = [
        Self::CausedBy,
        Self::LedTo,
        Self::Echoes,
        Self::Contrasts,
        Self::Transforms,
        Self::Heals,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::CausedBy => "caused_by",
            Self::LedTo => "led_to",
            Self::Echoes => "echoes",
            Self::Contrasts => "contrasts",
            Self::Transforms => "transforms",
            Self::Heals => "heals",
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            Self::CausedBy => Color32::from_rgb(214, 96, 88),
            Self::LedTo => Color32::from_rgb(98, 170, 222),
            Self::Echoes => Color32::from_rgb(186, 150, 232),
            Self::Contrasts => Color32::from_rgb(240, 176, 72),
            Self::Transforms => Color32::from_rgb(96, 206, 170),
            Self::Heals => Color32::from_rgb(140, 222, 110),
        }
    }

    pub fn is_dashed(self) -> bool {
        matches!(self, Self::Echoes)
    }
}

impl FromStr for ConnectionType {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == value)
            .ok_or(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Temporal {
    pub year: i32,
    pub is_foundational: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emotion {
    pub tone: EmotionalTone,
    /// Always within `[0, 1]`.
    pub intensity: f32,
    /// Always within `[-1, 1]`; positive floats upward.
    pub buoyancy: f32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShadowSelf {
    pub inversion: String,
    pub underlying_fear: Option<String>,
    pub avoidance: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bloom {
    pub color: Color32,
    pub size: f32,
    pub glow: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
    pub target_id: String,
    pub kind: ConnectionType,
    pub strength: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Insight {
    pub id: String,
    pub title: String,
    pub content: String,
    pub branch: ThematicBranch,
    pub temporal: Temporal,
    pub emotion: Emotion,
    pub shadow_self: Option<ShadowSelf>,
    pub bloom: Bloom,
    pub tags: Vec<String>,
    pub connections: Vec<Connection>,
    pub updated_at: String,
}

impl Insight {
    pub fn is_foundational(&self) -> bool {
        self.temporal.is_foundational
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleFlow {
    /// Loops per second at full connection strength.
    pub speed: f32,
    pub size: f32,
}

impl Default for ParticleFlow {
    fn default() -> Self {
        Self {
            speed: 0.35,
            size: 3.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientConfig {
    pub growth_rings_per_year: f32,
    pub particle_flow: ParticleFlow,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            growth_rings_per_year: 1.0,
            particle_flow: ParticleFlow::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DanglingReference {
    pub source_id: String,
    pub target_id: String,
}

/// Immutable snapshot of the insight graph for one view session.
#[derive(Clone, Debug)]
pub struct ArboretumData {
    insights: Vec<Insight>,
    index_by_id: HashMap<String, usize>,
    ambient: AmbientConfig,
}

impl ArboretumData {
    pub fn new(insights: Vec<Insight>, ambient: AmbientConfig) -> Result<Self, DataError> {
        let mut index_by_id = HashMap::with_capacity(insights.len());
        for (index, insight) in insights.iter().enumerate() {
            if insight.id.trim().is_empty() {
                return Err(DataError::EmptyId { position: index });
            }
            if index_by_id.insert(insight.id.clone(), index).is_some() {
                return Err(DataError::DuplicateId(insight.id.clone()));
            }
        }

        Ok(Self {
            insights,
            index_by_id,
            ambient,
        })
    }

    pub fn insights(&self) -> &[Insight] {
        &self.insights
    }

    pub fn ambient(&self) -> &AmbientConfig {
        &self.ambient
    }

    pub fn len(&self) -> usize {
        self.insights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insights.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&Insight> {
        self.index_of(id).map(|index| &self.insights[index])
    }

    pub fn connection_count(&self) -> usize {
        self.insights
            .iter()
            .map(|insight| insight.connections.len())
            .sum()
    }

    /// Earliest year in the dataset, used as the origin of the volumetric trunk.
    pub fn base_year(&self) -> Option<i32> {
        self.insights
            .iter()
            .map(|insight| insight.temporal.year)
            .min()
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.insights
            .iter()
            .map(|insight| insight.temporal.year)
            .max()
    }

    pub fn foundational_count(&self) -> usize {
        self.insights
            .iter()
            .filter(|insight| insight.is_foundational())
            .count()
    }

    /// Every connection whose target is not part of this dataset, in
    /// declaration order.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut reported = HashSet::new();
        let mut dangling = Vec::new();
        for insight in &self.insights {
            for connection in &insight.connections {
                if self.index_by_id.contains_key(&connection.target_id) {
                    continue;
                }
                if reported.insert((insight.id.as_str(), connection.target_id.as_str())) {
                    dangling.push(DanglingReference {
                        source_id: insight.id.clone(),
                        target_id: connection.target_id.clone(),
                    });
                }
            }
        }
        dangling
    }

    /// Resolved targets of `index`'s connections in declaration order; dangling
    /// targets are omitted.
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        let Some(insight) = self.insights.get(index) else {
            return Vec::new();
        };

        insight
            .connections
            .iter()
            .filter_map(|connection| self.index_of(&connection.target_id))
            .collect()
    }
}
