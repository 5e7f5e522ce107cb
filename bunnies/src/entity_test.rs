#![allow(clippy::float_cmp)]

use super::*;
use crate::surface::SceneSurface;

// =============================================================
// Helpers
// =============================================================

fn registry() -> EntityRegistry<SceneSurface> {
    registry_with(SceneConfig::default())
}

fn registry_with(config: SceneConfig) -> EntityRegistry<SceneSurface> {
    EntityRegistry::new(SceneSurface::new(config.surface_width, config.surface_height), &config)
}

fn fill(reg: &mut EntityRegistry<SceneSurface>, n: u32) {
    for i in 0..n {
        reg.create(EntityId(i), 1.0, 0.0).unwrap();
    }
}

// =============================================================
// GridLayout
// =============================================================

#[test]
fn layout_first_slot_is_margin() {
    let grid = GridLayout { surface_width: 800.0, item_size: 50.0, margin: 10.0 };
    assert_eq!(grid.slot(0), Point::new(10.0, 10.0));
}

#[test]
fn layout_fills_row_left_to_right() {
    let grid = GridLayout { surface_width: 800.0, item_size: 50.0, margin: 10.0 };
    assert_eq!(grid.max_per_row(), 16);
    assert_eq!(grid.slot(1), Point::new(60.0, 10.0));
    assert_eq!(grid.slot(15), Point::new(760.0, 10.0));
}

#[test]
fn layout_wraps_when_row_is_full() {
    let grid = GridLayout { surface_width: 800.0, item_size: 50.0, margin: 10.0 };
    assert_eq!(grid.slot(16), Point::new(10.0, 60.0));
    assert_eq!(grid.slot(33), Point::new(60.0, 110.0));
}

#[test]
fn layout_floors_partial_cells() {
    let grid = GridLayout { surface_width: 175.0, item_size: 50.0, margin: 10.0 };
    assert_eq!(grid.max_per_row(), 3);
    assert_eq!(grid.slot(3), Point::new(10.0, 60.0));
}

#[test]
fn layout_narrow_surface_stacks_one_per_row() {
    let grid = GridLayout { surface_width: 20.0, item_size: 50.0, margin: 10.0 };
    assert_eq!(grid.max_per_row(), 1);
    assert_eq!(grid.slot(2), Point::new(10.0, 110.0));
}

// =============================================================
// create / destroy
// =============================================================

#[test]
fn create_assigns_slot_from_live_count() {
    let mut reg = registry();
    fill(&mut reg, 3);
    let e = reg.create(EntityId(3), 1.2, 0.0).unwrap();
    assert_eq!(e.position, Point::new(160.0, 10.0));
}

#[test]
fn create_applies_scale_and_rotation() {
    let mut reg = registry();
    let e = reg.create(EntityId(0), 1.4, -0.2).unwrap().clone();
    assert_eq!(e.scale, 1.4);
    assert_eq!(e.rotation, -0.2);

    let visual = reg.surface().visual(e.handle).copied().unwrap();
    assert_eq!(visual.scale, 1.4);
    assert_eq!(visual.rotation, -0.2);
    assert_eq!(visual.position, e.position);
}

#[test]
fn create_converts_degrees_for_surface() {
    let mut reg = registry_with(SceneConfig { rotation_unit: RotationUnit::Degrees, ..SceneConfig::default() });
    let e = reg.create(EntityId(0), 1.0, 90.0).unwrap().clone();
    assert_eq!(e.rotation, 90.0);
    let visual = reg.surface().visual(e.handle).copied().unwrap();
    assert!((visual.rotation - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn create_duplicate_id_errors() {
    let mut reg = registry();
    fill(&mut reg, 2);
    let err = reg.create(EntityId(1), 1.0, 0.0).unwrap_err();
    assert_eq!(err, ControlError::DuplicateEntity(EntityId(1)));
    assert_eq!(reg.count(), 2);
    assert_eq!(reg.surface().len(), 2);
}

#[test]
fn destroy_removes_entity_and_visual() {
    let mut reg = registry();
    fill(&mut reg, 3);
    let removed = reg.destroy(EntityId(2)).unwrap();
    assert_eq!(removed.id, EntityId(2));
    assert_eq!(reg.count(), 2);
    assert!(reg.get(EntityId(2)).is_none());
    assert!(reg.surface().visual(removed.handle).is_none());
    assert_eq!(reg.surface().len(), 2);
}

#[test]
fn destroy_unknown_returns_none() {
    let mut reg = registry();
    fill(&mut reg, 1);
    assert!(reg.destroy(EntityId(5)).is_none());
    assert_eq!(reg.count(), 1);
}

#[test]
fn destroy_does_not_reflow_remaining() {
    let mut reg = registry();
    fill(&mut reg, 4);
    let before = reg.get(EntityId(3)).map(|e| e.position);
    reg.destroy(EntityId(1));
    assert_eq!(reg.get(EntityId(3)).map(|e| e.position), before);
}

// =============================================================
// ids
// =============================================================

#[test]
fn next_id_starts_at_zero() {
    let reg = registry();
    assert_eq!(reg.next_id(), EntityId(0));
    assert!(reg.last_id().is_none());
}

#[test]
fn next_id_follows_last_live_id() {
    let mut reg = registry();
    fill(&mut reg, 5);
    assert_eq!(reg.next_id(), EntityId(5));
    reg.destroy(EntityId(4));
    reg.destroy(EntityId(3));
    assert_eq!(reg.next_id(), EntityId(3));
}

#[test]
fn iter_is_creation_order() {
    let mut reg = registry();
    fill(&mut reg, 4);
    let ids: Vec<u32> = reg.iter().map(|e| e.id.0).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

// =============================================================
// set_scale / set_rotation
// =============================================================

#[test]
fn set_scale_updates_entity_and_visual() {
    let mut reg = registry();
    fill(&mut reg, 2);
    assert!(reg.set_scale(EntityId(1), 1.6));
    let e = reg.get(EntityId(1)).unwrap();
    assert_eq!(e.scale, 1.6);
    assert_eq!(reg.surface().visual(e.handle).map(|v| v.scale), Some(1.6));
    assert_eq!(reg.get(EntityId(0)).map(|e| e.scale), Some(1.0));
}

#[test]
fn set_rotation_updates_entity_and_visual() {
    let mut reg = registry();
    fill(&mut reg, 1);
    assert!(reg.set_rotation(EntityId(0), 0.7));
    let e = reg.get(EntityId(0)).unwrap();
    assert_eq!(e.rotation, 0.7);
    assert_eq!(reg.surface().visual(e.handle).map(|v| v.rotation), Some(0.7));
}

#[test]
fn set_on_missing_entity_returns_false() {
    let mut reg = registry();
    assert!(!reg.set_scale(EntityId(9), 1.5));
    assert!(!reg.set_rotation(EntityId(9), 0.5));
}

// =============================================================
// entity_at
// =============================================================

#[test]
fn entity_at_hits_unrotated_footprint() {
    let mut reg = registry();
    fill(&mut reg, 3);
    assert_eq!(reg.entity_at(Point::new(12.0, 12.0)), Some(EntityId(0)));
    assert_eq!(reg.entity_at(Point::new(85.0, 30.0)), Some(EntityId(1)));
}

#[test]
fn entity_at_misses_margin() {
    let mut reg = registry();
    fill(&mut reg, 1);
    assert_eq!(reg.entity_at(Point::new(5.0, 5.0)), None);
}

#[test]
fn entity_at_prefers_topmost() {
    let mut reg = registry();
    reg.create(EntityId(0), 1.6, 0.0).unwrap();
    reg.create(EntityId(1), 1.0, 0.0).unwrap();
    // Entity 0 spans x 10..90 scaled; entity 1 starts at x 60.
    assert_eq!(reg.entity_at(Point::new(70.0, 20.0)), Some(EntityId(1)));
    assert_eq!(reg.entity_at(Point::new(40.0, 20.0)), Some(EntityId(0)));
}

#[test]
fn entity_at_accounts_for_scale() {
    let mut reg = registry();
    reg.create(EntityId(0), 1.5, 0.0).unwrap();
    assert_eq!(reg.entity_at(Point::new(80.0, 80.0)), Some(EntityId(0)));
    assert_eq!(reg.entity_at(Point::new(90.0, 90.0)), None);
}

#[test]
fn entity_at_accounts_for_rotation() {
    let mut reg = registry();
    reg.create(EntityId(0), 1.0, std::f64::consts::FRAC_PI_2).unwrap();
    // A quarter turn clockwise swings the sprite to the left of its anchor.
    assert_eq!(reg.entity_at(Point::new(0.0, 20.0)), Some(EntityId(0)));
    assert_eq!(reg.entity_at(Point::new(20.0, 20.0)), None);
}
