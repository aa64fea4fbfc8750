//! Progressive reveal driven by a season and its progress.
//!
//! The season control collapses into one scalar level in `[0, 1]`; a single
//! threshold table maps that level to a visibility stage. The stages are
//! nested, so raising the level never hides anything.

use std::fmt;

use crate::insight::{ArboretumData, Insight};

/// Below this level only foundational insights are shown.
pub const EARLY_REVEAL_LEVEL: f32 = 0.2;
/// From this level on every insight is shown.
pub const FULL_REVEAL_LEVEL: f32 = 0.4;
/// During the early stage, insights strictly more intense than this are shown.
pub const EARLY_INTENSITY_THRESHOLD: f32 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Season {
    #[default]
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub const ALL: [Self; 4] = [Self::Winter, Self::Spring, Self::Summer, Self::Autumn];

    pub fn index(self) -> usize {
        match self {
            Self::Winter => 0,
            Self::Spring => 1,
            Self::Summer => 2,
            Self::Autumn => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Winter => "Winter",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Autumn => "Autumn",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealStage {
    RootsOnly,
    Early,
    Full,
}

impl RevealStage {
    pub fn for_level(level: f32) -> Self {
        if level < EARLY_REVEAL_LEVEL {
            Self::RootsOnly
        } else if level < FULL_REVEAL_LEVEL {
            Self::Early
        } else {
            Self::Full
        }
    }

    pub fn admits(self, insight: &Insight) -> bool {
        match self {
            Self::RootsOnly => insight.is_foundational(),
            Self::Early => {
                insight.is_foundational() || insight.emotion.intensity > EARLY_INTENSITY_THRESHOLD
            }
            Self::Full => true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RevealState {
    season: Season,
    progress: f32,
}

impl RevealState {
    pub fn new(season: Season, progress: f32) -> Self {
        Self {
            season,
            progress: if progress.is_finite() {
                progress.clamp(0.0, 1.0)
            } else {
                0.0
            },
        }
    }

    pub fn season(&self) -> Season {
        self.season
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn level(&self) -> f32 {
        self.season.index() as f32 * 0.25 + self.progress * 0.25
    }

    pub fn stage(&self) -> RevealStage {
        RevealStage::for_level(self.level())
    }
}

pub fn is_visible(insight: &Insight, level: f32) -> bool {
    RevealStage::for_level(level).admits(insight)
}

/// Visibility mask over the dataset, indexed like `ArboretumData::insights`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibleSet {
    mask: Vec<bool>,
    count: usize,
}

impl VisibleSet {
    pub fn compute(data: &ArboretumData, level: f32) -> Self {
        let stage = RevealStage::for_level(level);
        let mask = data
            .insights()
            .iter()
            .map(|insight| stage.admits(insight))
            .collect::<Vec<_>>();
        let count = mask.iter().filter(|visible| **visible).count();
        Self { mask, count }
    }

    pub fn all(len: usize) -> Self {
        Self {
            mask: vec![true; len],
            count: len,
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.mask.get(index).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(index, visible)| visible.then_some(index))
    }

    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.indices().all(|index| other.contains(index))
    }
}
