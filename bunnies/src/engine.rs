use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::config::SceneConfig;
use crate::controller::{Action, ControlEvent, Controller};
use crate::error::ControlError;
use crate::panel::FieldId;
use crate::render;
use crate::surface::{Point, RenderSurface, SceneSurface, VisualHandle};

/// The browser engine. Wraps [`Controller`] and owns the canvas element.
///
/// Rejected input is logged and swallowed here; the panel never shows an
/// error for it.
pub struct Engine {
    canvas: HtmlCanvasElement,
    sprite: Option<HtmlImageElement>,
    item_size: f64,
    dpr: f64,
    pub core: Controller<SceneSurface>,
}

impl Engine {
    /// Bind to `canvas`, size the stage from its CSS box, and create the
    /// initial bunnies.
    ///
    /// # Errors
    ///
    /// Returns the controller's error if mounting fails.
    pub fn new(canvas: HtmlCanvasElement, config: SceneConfig) -> Result<Self, ControlError> {
        let width = f64::from(canvas.client_width());
        let height = f64::from(canvas.client_height());
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());

        let mut core = Controller::new(SceneSurface::new(width, height), &config);
        core.mount()?;

        let mut engine = Self { canvas, sprite: None, item_size: config.item_size, dpr, core };
        engine.set_viewport(width, height, dpr);
        Ok(engine)
    }

    /// Use `img` for every bunny once it has loaded.
    pub fn set_sprite(&mut self, img: HtmlImageElement) {
        self.sprite = Some(img);
    }

    // --- Viewport ---

    /// Update stage size and device pixel ratio. Existing bunnies keep their
    /// slots; only bunnies created afterwards use the new row width.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.dpr = dpr;
        self.core.surface_mut().resize(width_css, height_css);
        self.canvas.set_width((width_css * dpr).round().max(0.0) as u32);
        self.canvas.set_height((height_css * dpr).round().max(0.0) as u32);
    }

    // --- Input events ---

    /// A panel widget changed. `field` is the widget id (`count`/`amount`,
    /// `scale`, `rotation`) and `raw` its unparsed value.
    pub fn on_field_change(&mut self, field: &str, raw: &str) -> Vec<Action> {
        let event = match field.parse::<FieldId>() {
            Ok(field) => ControlEvent::FieldChanged { field, raw: raw.to_owned() },
            Err(e) => {
                tracing::warn!(error = %e, "field change ignored");
                return Vec::new();
            }
        };
        self.dispatch(event)
    }

    /// Pointer pressed at `(x, y)` in CSS pixels relative to the canvas.
    pub fn on_pointer_down(&mut self, x: f64, y: f64) -> Vec<Action> {
        self.dispatch(ControlEvent::PointerDown(Point::new(x, y)))
    }

    fn dispatch(&mut self, event: ControlEvent) -> Vec<Action> {
        match self.core.handle(event) {
            Ok(actions) => actions,
            Err(e) => {
                tracing::warn!(error = %e, "control event rejected");
                Vec::new()
            }
        }
    }

    // --- Render ---

    /// Draw the current stage to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;

        let selected: Vec<VisualHandle> = self
            .core
            .selection()
            .members()
            .iter()
            .filter_map(|id| self.core.registry().get(*id).map(|e| e.handle))
            .collect();
        let surface = self.core.registry().surface();

        render::draw(
            &ctx,
            surface,
            &selected,
            self.sprite.as_ref(),
            self.item_size,
            surface.width(),
            surface.height(),
            self.dpr,
        )
    }

    // --- Delegated queries ---

    /// Number shown next to "Selected Bunnies".
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.core.selection().len()
    }
}
