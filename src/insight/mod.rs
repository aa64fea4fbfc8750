mod error;
mod load;
mod model;
mod parse;

pub use error::DataError;
pub use load::{bundled_sample, load_arboretum};
pub use model::{
    AmbientConfig, ArboretumData, Bloom, Connection, ConnectionType, DanglingReference, Emotion,
    EmotionalTone, Insight, ParticleFlow, ShadowSelf, Temporal, ThematicBranch,
};
pub use parse::parse_arboretum;
