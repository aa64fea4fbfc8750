pub mod ambient;
pub mod app;
pub mod insight;
pub mod layout;
pub mod navigation;
pub mod reveal;
pub mod shadow;
pub mod threads;
pub mod util;

#[cfg(test)]
mod test_support;

pub use insight::{ArboretumData, DataError, Insight, bundled_sample, load_arboretum, parse_arboretum};
pub use layout::{LayoutCache, LayoutEngine, SceneSize};
pub use navigation::{InsightSelected, NavigationError, ViewController};
pub use reveal::{RevealState, Season, VisibleSet};
