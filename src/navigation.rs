//! View state owner: reveal level, shadow flag, connection toggle, hover, and
//! the single selection with its drill-down navigation.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::insight::{ArboretumData, Insight};
use crate::reveal::{RevealState, Season, VisibleSet};
use crate::threads::ThreadFocus;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsightSelected {
    pub id: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no insight is selected")]
    NoSelection,

    #[error("insight {0} does not exist")]
    UnknownInsight(String),

    #[error("insight {target} is not connected from {from}")]
    NotANeighbor { from: String, target: String },
}

pub struct ViewController {
    data: Arc<ArboretumData>,
    reveal: RevealState,
    shadow_mode: bool,
    show_connections: bool,
    selected: Option<usize>,
    hovered: Option<usize>,
    visible: VisibleSet,
}

impl ViewController {
    pub fn new(data: Arc<ArboretumData>) -> Self {
        let reveal = RevealState::default();
        let visible = VisibleSet::compute(&data, reveal.level());
        Self {
            data,
            reveal,
            shadow_mode: false,
            show_connections: true,
            selected: None,
            hovered: None,
            visible,
        }
    }

    pub fn data(&self) -> &Arc<ArboretumData> {
        &self.data
    }

    pub fn reveal(&self) -> RevealState {
        self.reveal
    }

    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    pub fn shadow_mode(&self) -> bool {
        self.shadow_mode
    }

    pub fn show_connections(&self) -> bool {
        self.show_connections
    }

    pub fn set_reveal(&mut self, season: Season, progress: f32) {
        let next = RevealState::new(season, progress);
        if next == self.reveal {
            return;
        }

        self.reveal = next;
        self.visible = VisibleSet::compute(&self.data, next.level());
        debug!(
            season = %next.season(),
            level = next.level(),
            visible = self.visible.len(),
            "reveal level changed"
        );
    }

    pub fn set_shadow_mode(&mut self, enabled: bool) {
        self.shadow_mode = enabled;
    }

    pub fn toggle_shadow_mode(&mut self) {
        self.shadow_mode = !self.shadow_mode;
    }

    pub fn set_show_connections(&mut self, enabled: bool) {
        self.show_connections = enabled;
    }

    pub fn hover(&mut self, id: Option<&str>) {
        self.hovered = id.and_then(|id| self.data.index_of(id));
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The canonical dataset record of the current selection.
    pub fn selected_insight(&self) -> Option<&Insight> {
        self.selected.map(|index| &self.data.insights()[index])
    }

    pub fn focus(&self) -> ThreadFocus {
        ThreadFocus {
            hovered: self.hovered,
            selected: self.selected,
        }
    }

    /// Selects `id`. Returns the outbound event when the selection changed.
    pub fn select(&mut self, id: &str) -> Result<Option<InsightSelected>, NavigationError> {
        let index = self
            .data
            .index_of(id)
            .ok_or_else(|| NavigationError::UnknownInsight(id.to_owned()))?;
        Ok(self.select_index(index))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Resolved neighbors of the selection in declaration order.
    pub fn neighbors(&self) -> Vec<&Insight> {
        let Some(selected) = self.selected else {
            return Vec::new();
        };

        self.data
            .neighbors(selected)
            .into_iter()
            .map(|index| &self.data.insights()[index])
            .collect()
    }

    /// Re-targets the selection to a neighbor of the current selection. There
    /// is no back stack.
    pub fn drill_into(&mut self, neighbor_id: &str) -> Result<InsightSelected, NavigationError> {
        let selected = self.selected.ok_or(NavigationError::NoSelection)?;
        let target = self
            .data
            .index_of(neighbor_id)
            .ok_or_else(|| NavigationError::UnknownInsight(neighbor_id.to_owned()))?;

        if !self.data.neighbors(selected).contains(&target) {
            return Err(NavigationError::NotANeighbor {
                from: self.data.insights()[selected].id.clone(),
                target: neighbor_id.to_owned(),
            });
        }

        self.selected = Some(target);
        Ok(InsightSelected {
            id: self.data.insights()[target].id.clone(),
        })
    }

    fn select_index(&mut self, index: usize) -> Option<InsightSelected> {
        if self.selected == Some(index) {
            return None;
        }

        self.selected = Some(index);
        let id = self.data.insights()[index].id.clone();
        debug!(insight = id.as_str(), "insight selected");
        Some(InsightSelected { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cyclic_example, worked_example};

    #[test]
    fn starts_in_winter_with_roots_visible() {
        let controller = ViewController::new(Arc::new(worked_example()));
        assert_eq!(controller.reveal().season(), Season::Winter);
        assert_eq!(controller.visible().len(), 1);
        assert!(controller.visible().contains(0));
        assert!(controller.show_connections());
        assert!(!controller.shadow_mode());
    }

    #[test]
    fn reveal_changes_recompute_visible_set() {
        let mut controller = ViewController::new(Arc::new(worked_example()));
        controller.set_reveal(Season::Spring, 0.4);
        assert_eq!(controller.visible().len(), 2);
        controller.set_reveal(Season::Summer, 1.0);
        assert_eq!(controller.visible().len(), 3);
    }

    #[test]
    fn shadow_toggle_keeps_visible_count() {
        let mut controller = ViewController::new(Arc::new(worked_example()));
        controller.set_reveal(Season::Spring, 0.4);
        let before = controller.visible().len();
        controller.toggle_shadow_mode();
        assert!(controller.shadow_mode());
        assert_eq!(controller.visible().len(), before);
    }

    #[test]
    fn selecting_emits_event_once() {
        let mut controller = ViewController::new(Arc::new(worked_example()));
        assert_eq!(
            controller.select("I2").unwrap(),
            Some(InsightSelected { id: "I2".into() })
        );
        assert_eq!(controller.select("I2").unwrap(), None);
        assert_eq!(
            controller.select("nope"),
            Err(NavigationError::UnknownInsight("nope".into()))
        );
        assert_eq!(controller.selected_index(), Some(1));
    }

    #[test]
    fn drill_down_round_trip_returns_canonical_record() {
        let data = Arc::new(cyclic_example());
        let mut controller = ViewController::new(Arc::clone(&data));
        controller.select("A").unwrap();
        let original = controller.selected_insight().unwrap() as *const Insight;

        let neighbor_ids = controller
            .neighbors()
            .iter()
            .map(|insight| insight.id.clone())
            .collect::<Vec<_>>();
        assert_eq!(neighbor_ids, ["B"]);

        controller.drill_into("B").unwrap();
        controller.drill_into("C").unwrap();
        let event = controller.drill_into("A").unwrap();
        assert_eq!(event.id, "A");

        let returned = controller.selected_insight().unwrap();
        assert!(std::ptr::eq(returned, original));
        assert!(std::ptr::eq(returned, &data.insights()[0]));
        assert_eq!(returned.content, "first");
    }

    #[test]
    fn drill_down_rejects_non_neighbors() {
        let mut controller = ViewController::new(Arc::new(cyclic_example()));
        assert_eq!(controller.drill_into("B"), Err(NavigationError::NoSelection));

        controller.select("A").unwrap();
        assert_eq!(
            controller.drill_into("C"),
            Err(NavigationError::NotANeighbor {
                from: "A".into(),
                target: "C".into()
            })
        );
        assert_eq!(controller.selected_insight().unwrap().id, "A");
    }

    #[test]
    fn neighbors_skip_dangling_targets() {
        let mut controller = ViewController::new(Arc::new(cyclic_example()));
        controller.select("C").unwrap();
        let ids = controller
            .neighbors()
            .iter()
            .map(|insight| insight.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["A"]);
    }

    #[test]
    fn focus_reflects_hover_and_selection() {
        let mut controller = ViewController::new(Arc::new(worked_example()));
        controller.hover(Some("I3"));
        controller.select("I1").unwrap();
        assert_eq!(
            controller.focus(),
            ThreadFocus {
                hovered: Some(2),
                selected: Some(0)
            }
        );
        controller.hover(None);
        controller.clear_selection();
        assert_eq!(controller.focus(), ThreadFocus::default());
    }
}
