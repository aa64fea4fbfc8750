use std::sync::Arc;

use tracing::debug;

use crate::insight::ArboretumData;

use super::{LayoutEngine, PlanarPlacement, SceneSize, VolumetricPlacement};

/// Placements for every insight in dataset order, in both coordinate systems.
#[derive(Clone, Debug)]
pub struct SceneLayout {
    pub planar: Vec<PlanarPlacement>,
    /// Shared across scene sizes; the tree layout does not depend on them.
    pub volumetric: Arc<Vec<VolumetricPlacement>>,
}

fn pixel_size(scene: SceneSize) -> (u32, u32) {
    (scene.width.round() as u32, scene.height.round() as u32)
}

/// Memoizes layout. The tree placements are keyed on dataset identity only,
/// the radial ones additionally on whole-pixel scene size. Per-frame motion
/// never goes through here.
pub struct LayoutCache {
    engine: LayoutEngine,
    /// Holding the dataset keeps its address from being reused by another one
    /// while the cache entry is alive.
    dataset: Option<Arc<ArboretumData>>,
    volumetric: Option<Arc<Vec<VolumetricPlacement>>>,
    size: Option<(u32, u32)>,
    layout: Option<Arc<SceneLayout>>,
    planar_revision: u64,
    volumetric_revision: u64,
}

impl LayoutCache {
    pub fn new(engine: LayoutEngine) -> Self {
        Self {
            engine,
            dataset: None,
            volumetric: None,
            size: None,
            layout: None,
            planar_revision: 0,
            volumetric_revision: 0,
        }
    }

    pub fn layout(&mut self, data: &Arc<ArboretumData>, scene: SceneSize) -> Arc<SceneLayout> {
        let same_dataset = self
            .dataset
            .as_ref()
            .is_some_and(|cached| Arc::ptr_eq(cached, data));
        let size = pixel_size(scene);
        if same_dataset
            && self.size == Some(size)
            && let Some(layout) = &self.layout
        {
            return Arc::clone(layout);
        }

        let volumetric = if same_dataset && let Some(cached) = &self.volumetric {
            Arc::clone(cached)
        } else {
            self.volumetric_revision = self.volumetric_revision.wrapping_add(1);
            debug!(
                revision = self.volumetric_revision,
                insights = data.len(),
                "recomputing tree layout"
            );
            let fresh = Arc::new(self.engine.volumetric(data));
            self.volumetric = Some(Arc::clone(&fresh));
            self.dataset = Some(Arc::clone(data));
            fresh
        };

        self.planar_revision = self.planar_revision.wrapping_add(1);
        debug!(
            revision = self.planar_revision,
            width = size.0,
            height = size.1,
            insights = data.len(),
            "recomputing radial layout"
        );
        let layout = Arc::new(SceneLayout {
            planar: self.engine.planar(data, scene),
            volumetric,
        });
        self.layout = Some(Arc::clone(&layout));
        self.size = Some(size);
        layout
    }

    /// Number of times the radial and tree layouts have been computed.
    #[cfg(test)]
    fn revisions(&self) -> (u64, u64) {
        (self.planar_revision, self.volumetric_revision)
    }
}
