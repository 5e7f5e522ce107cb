//! Reconciliation controller: keeps the panel, the registry, and the selection
//! in agreement after every input event.
//!
//! Three triggers drive it:
//!
//! - **Count change**: clears the selection, then grows or shrinks the registry
//!   from the tail. Surviving bunnies keep their own scale and rotation; new
//!   ones take the panel's current values.
//! - **Scale / rotation change**: updates the panel field, and if anything is
//!   selected, applies the value to exactly the selected bunnies.
//! - **Bunny click**: toggles that bunny's membership in the selection.
//!
//! Every trigger runs to completion synchronously and reports what changed as
//! a list of [`Action`]s. Rejected input comes back as a [`ControlError`] with
//! nothing mutated.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use serde::Serialize;

use crate::config::SceneConfig;
use crate::entity::{Entity, EntityId, EntityRegistry};
use crate::error::ControlError;
use crate::panel::{ControlField, ControlPanel, FieldId};
use crate::selection::Selection;
use crate::surface::{Point, RenderSurface};

/// Input delivered to the controller by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// A panel widget reported a new raw value.
    FieldChanged { field: FieldId, raw: String },
    /// A bunny reported a click.
    EntityClicked(EntityId),
    /// The pointer went down somewhere on the stage.
    PointerDown(Point),
}

/// Effects reported back to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    EntityCreated(Entity),
    EntityDestroyed { id: EntityId },
    EntityUpdated { id: EntityId, scale: f64, rotation: f64 },
    FieldChanged { field: FieldId, value: f64 },
    SelectionChanged { count: usize },
    RenderNeeded,
}

/// Whether any of `actions` asks the host to redraw.
#[must_use]
pub fn needs_render(actions: &[Action]) -> bool {
    actions.iter().any(|action| matches!(action, Action::RenderNeeded))
}

/// One bunny as reported in a [`SceneSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySnapshot {
    #[serde(flatten)]
    pub entity: Entity,
    pub selected: bool,
}

/// Serializable view of the whole stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub fields: Vec<ControlField>,
    pub entities: Vec<EntitySnapshot>,
    pub selected_count: usize,
}

/// Per-entity property a panel field can push onto the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Property {
    Scale,
    Rotation,
}

impl Property {
    fn field(self) -> FieldId {
        match self {
            Self::Scale => FieldId::Scale,
            Self::Rotation => FieldId::Rotation,
        }
    }
}

/// Owns the three stores and reconciles them.
///
/// The stores are read-only from outside; every write goes through a
/// trigger so a selected id always names a live bunny.
pub struct Controller<S> {
    panel: ControlPanel,
    registry: EntityRegistry<S>,
    selection: Selection,
    mounted: bool,
}

impl<S: RenderSurface> Controller<S> {
    /// A controller with default panel values and an empty stage.
    /// Call [`Controller::mount`] before delivering events.
    #[must_use]
    pub fn new(surface: S, config: &SceneConfig) -> Self {
        Self::with_panel(ControlPanel::new(), surface, config)
    }

    #[must_use]
    pub fn with_panel(panel: ControlPanel, surface: S, config: &SceneConfig) -> Self {
        Self { panel, registry: EntityRegistry::new(surface, config), selection: Selection::new(), mounted: false }
    }

    // --- Startup ---

    /// Create the initial bunnies from the panel's current values.
    ///
    /// Mounting an already mounted controller does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::NotWholeNumber`] or
    /// [`ControlError::CountOutOfRange`] if the panel's count is not a valid
    /// target; nothing is created and the controller stays unmounted.
    pub fn mount(&mut self) -> Result<Vec<Action>, ControlError> {
        if self.mounted {
            return Ok(Vec::new());
        }
        let target = self.checked_count(self.panel.field(FieldId::Count).value)?;
        let mut actions = Vec::new();
        self.resize_to(target, &mut actions)?;
        self.mounted = true;
        tracing::info!(count = self.registry.count(), "stage mounted");
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    #[must_use]
    pub fn registry(&self) -> &EntityRegistry<S> {
        &self.registry
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The stage, for viewport changes.
    pub fn surface_mut(&mut self) -> &mut S {
        self.registry.surface_mut()
    }

    // --- Event inbox ---

    /// Dispatch one input event.
    ///
    /// # Errors
    ///
    /// Propagates the rejection from the targeted trigger; see
    /// [`Controller::on_field_change`].
    pub fn handle(&mut self, event: ControlEvent) -> Result<Vec<Action>, ControlError> {
        match event {
            ControlEvent::FieldChanged { field, raw } => self.on_field_change(field, &raw),
            ControlEvent::EntityClicked(id) => Ok(self.toggle(id)),
            ControlEvent::PointerDown(pt) => Ok(self.on_pointer_down(pt)),
        }
    }

    /// Coerce a raw widget value and route it to the matching trigger.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::InvalidNumber`] for unparseable input, and the
    /// count rejections of [`Controller::set_count`].
    pub fn on_field_change(&mut self, field: FieldId, raw: &str) -> Result<Vec<Action>, ControlError> {
        let value = self.panel.field(field).coerce(raw)?;
        match field {
            FieldId::Count => self.set_count(value),
            FieldId::Scale => Ok(self.set_scale(value)),
            FieldId::Rotation => Ok(self.set_rotation(value)),
        }
    }

    // --- Triggers ---

    /// Grow or shrink the stage to `target` bunnies.
    ///
    /// The selection is always cleared, even when `target` equals the current
    /// count.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::NotWholeNumber`] or
    /// [`ControlError::CountOutOfRange`] without touching any store.
    pub fn set_count(&mut self, target: f64) -> Result<Vec<Action>, ControlError> {
        let count = self.checked_count(target)?;

        let mut actions = Vec::new();
        self.selection.clear();
        actions.push(Action::SelectionChanged { count: 0 });

        let value = self.panel.set_field(FieldId::Count, target);
        actions.push(Action::FieldChanged { field: FieldId::Count, value });

        let from = self.registry.count();
        self.resize_to(count, &mut actions)?;
        tracing::debug!(from, to = self.registry.count(), "count reconciled");

        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Set the scale field; also rescales every selected bunny.
    pub fn set_scale(&mut self, value: f64) -> Vec<Action> {
        self.set_property(Property::Scale, value)
    }

    /// Set the rotation field; also rotates every selected bunny.
    pub fn set_rotation(&mut self, value: f64) -> Vec<Action> {
        self.set_property(Property::Rotation, value)
    }

    /// Flip selection of a live bunny. Clicks on ids that are not live are
    /// ignored.
    pub fn toggle(&mut self, id: EntityId) -> Vec<Action> {
        if self.registry.get(id).is_none() {
            tracing::debug!(%id, "click on unknown entity ignored");
            return Vec::new();
        }
        let selected = self.selection.toggle(id);
        tracing::debug!(%id, selected, count = self.selection.len(), "selection toggled");
        vec![Action::SelectionChanged { count: self.selection.len() }, Action::RenderNeeded]
    }

    /// Hit-test the stage and toggle whichever bunny is under `pt`.
    pub fn on_pointer_down(&mut self, pt: Point) -> Vec<Action> {
        match self.registry.entity_at(pt) {
            Some(id) => self.toggle(id),
            None => Vec::new(),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            fields: self.panel.fields().to_vec(),
            entities: self
                .registry
                .iter()
                .map(|entity| EntitySnapshot { entity: entity.clone(), selected: self.selection.contains(entity.id) })
                .collect(),
            selected_count: self.selection.len(),
        }
    }

    // --- Internals ---

    /// Whole number within the count field's bounds.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn checked_count(&self, target: f64) -> Result<usize, ControlError> {
        let field = self.panel.field(FieldId::Count);
        if target.fract() != 0.0 {
            return Err(ControlError::NotWholeNumber { field: FieldId::Count, value: target });
        }
        if !field.contains(target) {
            return Err(ControlError::CountOutOfRange { requested: target, min: field.min, max: field.max });
        }
        Ok(target as usize)
    }

    fn set_property(&mut self, property: Property, value: f64) -> Vec<Action> {
        let field = property.field();
        let value = self.panel.set_field(field, value);
        let mut actions = vec![Action::FieldChanged { field, value }];

        for &id in self.selection.members() {
            let applied = match property {
                Property::Scale => self.registry.set_scale(id, value),
                Property::Rotation => self.registry.set_rotation(id, value),
            };
            if !applied {
                tracing::warn!(%id, %field, "selected entity is not live; skipped");
                continue;
            }
            if let Some(entity) = self.registry.get(id) {
                actions.push(Action::EntityUpdated { id, scale: entity.scale, rotation: entity.rotation });
            }
        }

        tracing::debug!(%field, value, targets = self.selection.len(), "property applied");
        if !self.selection.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Destroy from the tail or create at the tail until `target` bunnies live.
    fn resize_to(&mut self, target: usize, actions: &mut Vec<Action>) -> Result<(), ControlError> {
        while self.registry.count() > target {
            let Some(id) = self.registry.last_id() else {
                break;
            };
            if self.registry.destroy(id).is_some() {
                actions.push(Action::EntityDestroyed { id });
            }
        }

        let defaults = self.panel.defaults();
        while self.registry.count() < target {
            let id = self.registry.next_id();
            let entity = self.registry.create(id, defaults.scale, defaults.rotation)?;
            actions.push(Action::EntityCreated(entity.clone()));
        }
        Ok(())
    }
}
