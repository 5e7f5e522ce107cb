//! JavaScript entry point for the browser build.
//!
//! [`BunnyStage`] is what the host page constructs. It forwards widget and
//! pointer events to the [`Engine`] and hands back plain values: a `bool`
//! telling the page whether to call `render`, counts, and JSON snapshots.

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlImageElement};

use crate::config::{RotationUnit, SceneConfig};
use crate::controller::needs_render;
use crate::engine::Engine;
use crate::error::ControlError;

#[wasm_bindgen]
pub struct BunnyStage {
    engine: Engine,
}

#[wasm_bindgen]
impl BunnyStage {
    /// Mount the default bunnies on `canvas`. `rotation_unit` is `radians`
    /// (the default) or `degrees`.
    ///
    /// # Errors
    ///
    /// Rejects an unknown rotation unit or a failed mount.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, rotation_unit: Option<String>) -> Result<BunnyStage, JsValue> {
        let mut config = SceneConfig::default();
        if let Some(unit) = rotation_unit {
            config.rotation_unit = RotationUnit::parse(&unit).map_err(to_js)?;
        }
        let engine = Engine::new(canvas, config).map_err(to_js)?;
        Ok(Self { engine })
    }

    #[wasm_bindgen(js_name = setSprite)]
    pub fn set_sprite(&mut self, img: HtmlImageElement) {
        self.engine.set_sprite(img);
    }

    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.engine.set_viewport(width_css, height_css, dpr);
    }

    /// Returns `true` when the stage should be redrawn.
    #[wasm_bindgen(js_name = onFieldChange)]
    pub fn on_field_change(&mut self, field: &str, raw: &str) -> bool {
        needs_render(&self.engine.on_field_change(field, raw))
    }

    /// Returns `true` when the stage should be redrawn.
    #[wasm_bindgen(js_name = onPointerDown)]
    pub fn on_pointer_down(&mut self, x: f64, y: f64) -> bool {
        needs_render(&self.engine.on_pointer_down(x, y))
    }

    /// # Errors
    ///
    /// Propagates canvas failures.
    pub fn render(&self) -> Result<(), JsValue> {
        self.engine.render()
    }

    #[wasm_bindgen(js_name = selectedCount)]
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.engine.selected_count()
    }

    /// Panel fields, bunnies, and selection as JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer's message if encoding fails.
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.core.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

fn to_js(err: ControlError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
