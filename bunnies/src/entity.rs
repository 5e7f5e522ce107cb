//! Entity registry: the live bunnies, keyed by stable id.
//!
//! Each bunny gets its id from its ordinal slot at creation time and keeps it
//! for life. Selection and batch edits address bunnies through that id only;
//! the registry never resolves an id by recomputing a positional index. The
//! registry also owns the render surface and is its only writer.
//!
//! Grid slots are computed once, when a bunny is created. Removing bunnies
//! does not reflow the ones that remain.

#[cfg(test)]
#[path = "entity_test.rs"]
mod entity_test;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{RotationUnit, SceneConfig};
use crate::error::ControlError;
use crate::surface::{Point, RenderSurface, Visual, VisualHandle};

/// Stable identifier of a bunny.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One bunny on the stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub id: EntityId,
    /// Top-left anchor of the grid slot assigned at creation.
    pub position: Point,
    /// Uniform scale on both axes.
    pub scale: f64,
    /// Rotation in the configured rotation unit.
    pub rotation: f64,
    #[serde(skip)]
    pub handle: VisualHandle,
}

/// Row-major grid: left to right, wrapping to a new row when full.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub surface_width: f64,
    pub item_size: f64,
    pub margin: f64,
}

impl GridLayout {
    /// Cells per row; never less than one so narrow stages still stack.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn max_per_row(&self) -> usize {
        let fit = (self.surface_width / self.item_size).floor();
        if fit.is_finite() && fit >= 1.0 { fit as usize } else { 1 }
    }

    /// Top-left corner of the cell for ordinal `index`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn slot(&self, index: usize) -> Point {
        let per_row = self.max_per_row();
        let col = (index % per_row) as f64;
        let row = (index / per_row) as f64;
        Point::new(col.mul_add(self.item_size, self.margin), row.mul_add(self.item_size, self.margin))
    }
}

/// Owns the live bunnies and the surface they are drawn on.
pub struct EntityRegistry<S> {
    surface: S,
    entities: BTreeMap<EntityId, Entity>,
    item_size: f64,
    margin: f64,
    rotation_unit: RotationUnit,
}

impl<S: RenderSurface> EntityRegistry<S> {
    /// Create an empty registry drawing onto `surface`.
    #[must_use]
    pub fn new(surface: S, config: &SceneConfig) -> Self {
        Self {
            surface,
            entities: BTreeMap::new(),
            item_size: config.item_size,
            margin: config.margin,
            rotation_unit: config.rotation_unit,
        }
    }

    /// The grid as it stands for the surface's current width.
    #[must_use]
    pub fn layout(&self) -> GridLayout {
        GridLayout { surface_width: self.surface.width(), item_size: self.item_size, margin: self.margin }
    }

    /// Instantiate a bunny in the next free grid slot and add its visual.
    ///
    /// The slot is the bunny's ordinal position among live bunnies, which is
    /// the current count.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::DuplicateEntity`] if `id` is already live.
    pub fn create(&mut self, id: EntityId, scale: f64, rotation: f64) -> Result<&Entity, ControlError> {
        if self.entities.contains_key(&id) {
            return Err(ControlError::DuplicateEntity(id));
        }

        let position = self.layout().slot(self.entities.len());
        let handle = self
            .surface
            .add_visual(&Visual { position, scale, rotation: self.rotation_unit.to_radians(rotation) });
        tracing::debug!(%id, x = position.x, y = position.y, scale, rotation, "entity created");

        Ok(&*self.entities.entry(id).or_insert(Entity { id, position, scale, rotation, handle }))
    }

    /// Remove a bunny and its visual, returning it if it was live.
    pub fn destroy(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(&id)?;
        self.surface.remove_visual(entity.handle);
        tracing::debug!(%id, "entity destroyed");
        Some(entity)
    }

    /// Set a bunny's scale. Returns `false` if `id` is not live.
    pub fn set_scale(&mut self, id: EntityId, scale: f64) -> bool {
        self.mutate(id, |entity| entity.scale = scale)
    }

    /// Set a bunny's rotation. Returns `false` if `id` is not live.
    pub fn set_rotation(&mut self, id: EntityId, rotation: f64) -> bool {
        self.mutate(id, |entity| entity.rotation = rotation)
    }

    fn mutate(&mut self, id: EntityId, apply: impl FnOnce(&mut Entity)) -> bool {
        let Some(entity) = self.entities.get_mut(&id) else {
            return false;
        };
        apply(entity);
        let visual = Visual {
            position: entity.position,
            scale: entity.scale,
            rotation: self.rotation_unit.to_radians(entity.rotation),
        };
        self.surface.update_visual(entity.handle, &visual);
        true
    }

    /// The topmost bunny whose scaled, rotated footprint covers `pt`.
    #[must_use]
    pub fn entity_at(&self, pt: Point) -> Option<EntityId> {
        self.entities
            .values()
            .rev()
            .find(|entity| self.covers(entity, pt))
            .map(|entity| entity.id)
    }

    fn covers(&self, entity: &Entity, pt: Point) -> bool {
        if entity.scale <= 0.0 {
            return false;
        }
        let theta = self.rotation_unit.to_radians(entity.rotation);
        let (sin, cos) = theta.sin_cos();
        let dx = pt.x - entity.position.x;
        let dy = pt.y - entity.position.y;
        // Undo rotation, then scale, around the top-left anchor.
        let local_x = dx.mul_add(cos, dy * sin) / entity.scale;
        let local_y = dy.mul_add(cos, -dx * sin) / entity.scale;
        (0.0..=self.item_size).contains(&local_x) && (0.0..=self.item_size).contains(&local_y)
    }
}

impl<S> EntityRegistry<S> {
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Live bunnies in creation (id) order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Entity> {
        self.entities.values()
    }

    /// The most recently created live bunny.
    #[must_use]
    pub fn last_id(&self) -> Option<EntityId> {
        self.entities.keys().next_back().copied()
    }

    /// Id the next created bunny receives: one past the last live id.
    #[must_use]
    pub fn next_id(&self) -> EntityId {
        self.last_id().map_or(EntityId(0), |EntityId(n)| EntityId(n + 1))
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[must_use]
    pub fn rotation_unit(&self) -> RotationUnit {
        self.rotation_unit
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access for viewport changes. Visuals must only be
    /// touched through the registry.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
