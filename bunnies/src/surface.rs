//! Render surface contract and the retained in-memory stage.
//!
//! The registry is the only writer of a surface. A surface knows nothing about
//! entities, selection, or the panel: it holds positioned, scaled, rotated
//! visuals addressed by opaque handles. [`SceneSurface`] keeps them in memory;
//! the browser engine draws it with [`crate::render::draw`].

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A point in stage space (CSS pixels, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Opaque handle to a visual added to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VisualHandle(pub u64);

/// What a surface draws for one sprite.
///
/// `position` is the sprite's top-left anchor; scale and rotation pivot
/// around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub position: Point,
    /// Uniform scale applied to both axes.
    pub scale: f64,
    /// Clockwise rotation in radians.
    pub rotation: f64,
}

/// Retained-mode drawing target.
pub trait RenderSurface {
    /// Stage width in CSS pixels.
    fn width(&self) -> f64;

    /// Stage height in CSS pixels.
    fn height(&self) -> f64;

    /// Add a visual on top of everything already present.
    fn add_visual(&mut self, visual: &Visual) -> VisualHandle;

    /// Replace the transform of an existing visual. Unknown handles are ignored.
    fn update_visual(&mut self, handle: VisualHandle, visual: &Visual);

    /// Remove a visual. Unknown handles are ignored.
    fn remove_visual(&mut self, handle: VisualHandle);
}

/// In-memory stage: visuals in draw order, bottom first.
#[derive(Debug, Clone)]
pub struct SceneSurface {
    width: f64,
    height: f64,
    next_handle: u64,
    visuals: BTreeMap<VisualHandle, Visual>,
}

impl SceneSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, next_handle: 0, visuals: BTreeMap::new() }
    }

    /// Change the stage size. Existing visuals keep their positions.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    #[must_use]
    pub fn visual(&self, handle: VisualHandle) -> Option<&Visual> {
        self.visuals.get(&handle)
    }

    /// Visuals in draw order (earliest added first).
    pub fn visuals(&self) -> impl Iterator<Item = (VisualHandle, &Visual)> {
        self.visuals.iter().map(|(handle, visual)| (*handle, visual))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }
}

impl RenderSurface for SceneSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn add_visual(&mut self, visual: &Visual) -> VisualHandle {
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        self.visuals.insert(handle, *visual);
        handle
    }

    fn update_visual(&mut self, handle: VisualHandle, visual: &Visual) {
        if let Some(existing) = self.visuals.get_mut(&handle) {
            *existing = *visual;
        }
    }

    fn remove_visual(&mut self, handle: VisualHandle) {
        self.visuals.remove(&handle);
    }
}
