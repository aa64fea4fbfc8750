//! End-to-end checks of the insight engine through the public library API.

use std::sync::Arc;

use arboretum::insight::ThematicBranch;
use arboretum::layout::{JITTER_RADIANS, PlacementBand};
use arboretum::reveal::RevealStage;
use arboretum::shadow::{displayed_color, displayed_text};
use arboretum::threads::{
    BASE_OPACITY, DropReason, EdgeResolution, ThreadFocus, planar_threads, resolve_edges,
    volumetric_threads,
};
use arboretum::{
    ArboretumData, LayoutEngine, NavigationError, RevealState, SceneSize, Season, ViewController,
    VisibleSet, bundled_sample, parse_arboretum,
};

const WORKED_EXAMPLE: &str = r##"{
  "insights": [
    {
      "id": "I1", "title": "Roots", "content": "Where it started",
      "branch": "growth",
      "temporal": { "year": 2015, "isFoundational": true },
      "emotion": { "tone": "peace", "intensity": 0.4, "buoyancy": 0.0 },
      "bloom": { "color": "#aabbcc", "size": 1.0, "glow": 0.2 }
    },
    {
      "id": "I2", "title": "Turning point", "content": "I chose to leave",
      "branch": "joy",
      "temporal": { "year": 2020 },
      "emotion": { "tone": "fear", "intensity": 0.9, "buoyancy": 0.5 },
      "shadowSelf": { "inversion": "I ran away", "avoidance": "quiet evenings" },
      "bloom": { "color": "#ff8800", "size": 1.2, "glow": 0.5 },
      "connections": [ { "targetId": "I3", "type": "contrasts", "strength": 0.8 } ]
    },
    {
      "id": "I3", "title": "Later", "content": "Calmer now",
      "branch": "trauma",
      "temporal": { "year": 2018 },
      "emotion": { "tone": "sorrow", "intensity": 0.4, "buoyancy": -0.6 },
      "bloom": { "color": "#33cc66", "size": 0.8, "glow": 0.0 },
      "connections": [ { "targetId": "nowhere", "type": "echoes", "strength": 0.4 } ]
    }
  ]
}"##;

fn worked_example() -> ArboretumData {
    parse_arboretum(WORKED_EXAMPLE).unwrap()
}

fn visible_ids(data: &ArboretumData, visible: &VisibleSet) -> Vec<String> {
    visible
        .indices()
        .map(|index| data.insights()[index].id.clone())
        .collect()
}

#[test]
fn worked_example_reveals_through_the_year() {
    let data = worked_example();

    let winter = RevealState::new(Season::Winter, 0.0);
    assert_eq!(winter.stage(), RevealStage::RootsOnly);
    assert_eq!(visible_ids(&data, &VisibleSet::compute(&data, winter.level())), ["I1"]);

    let spring = RevealState::new(Season::Spring, 0.4);
    assert_eq!(spring.stage(), RevealStage::Early);
    assert_eq!(
        visible_ids(&data, &VisibleSet::compute(&data, spring.level())),
        ["I1", "I2"]
    );

    let summer = RevealState::new(Season::Summer, 1.0);
    assert_eq!(summer.stage(), RevealStage::Full);
    assert_eq!(
        visible_ids(&data, &VisibleSet::compute(&data, summer.level())),
        ["I1", "I2", "I3"]
    );
}

#[test]
fn reveal_is_monotonic_over_the_bundled_sample() {
    let data = bundled_sample().unwrap();
    let mut previous = VisibleSet::compute(&data, 0.0);
    for step in 1..=100 {
        let current = VisibleSet::compute(&data, step as f32 / 100.0);
        assert!(previous.is_subset_of(&current), "reveal shrank at step {step}");
        previous = current;
    }
    assert_eq!(previous.len(), data.len());
}

#[test]
fn planar_placements_stay_on_their_branch() {
    let data = bundled_sample().unwrap();
    let scene = SceneSize::new(1200.0, 800.0);

    for seed in 0..8 {
        let placements = LayoutEngine::seeded(seed).planar(&data, scene);
        assert_eq!(placements.len(), data.len());

        for (insight, placement) in data.insights().iter().zip(&placements) {
            let drift = placement.angle - insight.branch.angle();
            assert!(drift.abs() <= JITTER_RADIANS + 1e-5, "{} drifted {drift}", insight.id);

            if insight.is_foundational() {
                assert_eq!(placement.band, PlacementBand::Root);
                let radius = placement.position.length();
                assert!(radius >= 0.05 * 800.0 - 1e-3 && radius <= 0.10 * 800.0 + 1e-3);
            } else {
                assert_eq!(placement.band, PlacementBand::Canopy);
            }
        }
    }
}

#[test]
fn volumetric_roots_sit_below_the_canopy() {
    let data = bundled_sample().unwrap();
    let placements = LayoutEngine::seeded(3).volumetric(&data);

    for (insight, placement) in data.insights().iter().zip(&placements) {
        if insight.is_foundational() {
            assert!(placement.position.y < 0.0, "{} is above ground", insight.id);
        } else {
            assert!(placement.position.y > 0.0, "{} is below ground", insight.id);
            let drift = placement.angle - insight.branch.angle();
            assert!(drift.abs() <= JITTER_RADIANS + 1e-5);
        }
    }
}

#[test]
fn branch_angles_follow_the_compass() {
    assert_eq!(ThematicBranch::Identity.angle_degrees(), -90.0);
    assert_eq!(ThematicBranch::Career.angle_degrees(), 0.0);
    assert_eq!(ThematicBranch::Joy.angle_degrees(), 90.0);
    assert_eq!(ThematicBranch::Trauma.angle_degrees(), 180.0);
}

#[test]
fn worked_example_thread_appears_once_both_ends_are_revealed() {
    let data = worked_example();
    let placements = LayoutEngine::seeded(11).planar(&data, SceneSize::new(800.0, 800.0));

    let spring = VisibleSet::compute(&data, 0.35);
    assert!(planar_threads(&data, &placements, &spring, ThreadFocus::default()).is_empty());

    let summer = VisibleSet::compute(&data, 0.75);
    let threads = planar_threads(&data, &placements, &summer, ThreadFocus::default());
    assert_eq!(threads.len(), 1);
    let thread = &threads[0];
    assert_eq!(data.insights()[thread.edge.key.source].id, "I2");
    assert_eq!(data.insights()[thread.edge.target].id, "I3");
    assert!((thread.style.opacity - 0.8 * BASE_OPACITY).abs() < 1e-6);
    assert!(!thread.style.dashed);
}

#[test]
fn dangling_connections_never_render() {
    let data = worked_example();
    assert_eq!(data.dangling_references().len(), 1);

    let everything = VisibleSet::all(data.len());
    let resolutions = resolve_edges(&data, &everything);
    let dropped = resolutions
        .iter()
        .filter_map(|resolution| match resolution {
            EdgeResolution::Dropped(dropped) => Some(dropped),
            EdgeResolution::Resolved(_) => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].target_id, "nowhere");
    assert_eq!(dropped[0].reason, DropReason::UnknownTarget);

    let placements = LayoutEngine::seeded(1).volumetric(&data);
    let threads = volumetric_threads(&data, &placements, &everything, ThreadFocus::default());
    assert_eq!(threads.len(), 1);
}

#[test]
fn shadow_mode_changes_presentation_only() {
    let mut controller = ViewController::new(Arc::new(worked_example()));
    controller.set_reveal(Season::Summer, 1.0);
    let visible_before = controller.visible().clone();
    let data = Arc::clone(controller.data());
    let turning_point = data.get("I2").unwrap();
    let roots = data.get("I1").unwrap();

    controller.toggle_shadow_mode();
    assert!(controller.shadow_mode());
    assert_eq!(controller.visible(), &visible_before);
    assert_eq!(displayed_text(turning_point, controller.shadow_mode()), "I ran away");
    assert_eq!(displayed_text(roots, controller.shadow_mode()), "Where it started");

    let lit = displayed_color(turning_point, false);
    let shaded = displayed_color(turning_point, true);
    assert!(shaded.r() < lit.r());
    assert_eq!(shaded.a(), lit.a());

    controller.toggle_shadow_mode();
    assert_eq!(displayed_text(turning_point, controller.shadow_mode()), "I chose to leave");
}

#[test]
fn drill_down_returns_canonical_records() {
    let data = Arc::new(worked_example());
    let mut controller = ViewController::new(Arc::clone(&data));

    let event = controller.select("I2").unwrap();
    assert_eq!(event.map(|event| event.id), Some("I2".to_owned()));
    assert_eq!(controller.select("I2").unwrap(), None);

    let neighbors = controller.neighbors();
    assert_eq!(neighbors.len(), 1);
    assert!(std::ptr::eq(neighbors[0], data.get("I3").unwrap()));

    let event = controller.drill_into("I3").unwrap();
    assert_eq!(event.id, "I3");
    assert!(std::ptr::eq(
        controller.selected_insight().unwrap(),
        data.get("I3").unwrap()
    ));
    assert!(controller.neighbors().is_empty());

    assert_eq!(
        controller.drill_into("I1"),
        Err(NavigationError::NotANeighbor {
            from: "I3".to_owned(),
            target: "I1".to_owned(),
        })
    );
    assert_eq!(
        controller.select("nowhere"),
        Err(NavigationError::UnknownInsight("nowhere".to_owned()))
    );
}
