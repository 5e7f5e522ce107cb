//! Canvas drawing for the bunny stage.
//!
//! Each frame wipes the canvas, paints every visual of the [`SceneSurface`]
//! bottom-up (the loaded sprite, or a drawn stand-in bunny until the image
//! is ready), and finishes with a dashed box around each selected bunny.
//! Drawing reads the stage and never writes to it; canvas failures surface
//! as `JsValue` errors to [`crate::engine::Engine::render`].

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::consts::{SELECTION_DASH_PX, SELECTION_PAD_PX};
use crate::surface::{SceneSurface, Visual, VisualHandle};

/// Fill used for the placeholder bunny while the sprite image loads.
const PLACEHOLDER_FILL: &str = "#F4F1EA";

/// Outline used for the placeholder bunny.
const PLACEHOLDER_STROKE: &str = "#6B5E55";

/// Selection outline color.
const SELECTION_STROKE: &str = "#1E90FF";

/// Draw every visual bottom-up, then outlines around the selected ones.
///
/// `item_size` is the unscaled sprite footprint. `viewport_w` and
/// `viewport_h` are in CSS pixels; `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns the first failing canvas call's error.
#[allow(clippy::too_many_arguments)]
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    scene: &SceneSurface,
    selected: &[VisualHandle],
    sprite: Option<&HtmlImageElement>,
    item_size: f64,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    // Scale to device pixels and wipe.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport_w, viewport_h);

    let sprite = sprite.filter(|img| img.complete() && img.natural_width() > 0);
    for (_, visual) in scene.visuals() {
        match sprite {
            Some(img) => draw_sprite(ctx, visual, img, item_size)?,
            None => draw_placeholder(ctx, visual, item_size)?,
        }
    }

    // Outlines go on top of every sprite.
    for handle in selected {
        if let Some(visual) = scene.visual(*handle) {
            draw_selection(ctx, visual, item_size)?;
        }
    }

    Ok(())
}

fn draw_sprite(
    ctx: &CanvasRenderingContext2d,
    visual: &Visual,
    img: &HtmlImageElement,
    item_size: f64,
) -> Result<(), JsValue> {
    ctx.save();
    apply_transform(ctx, visual)?;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, item_size, item_size)?;
    ctx.restore();
    Ok(())
}

/// Two ears over a round body, sized to the footprint.
fn draw_placeholder(ctx: &CanvasRenderingContext2d, visual: &Visual, item_size: f64) -> Result<(), JsValue> {
    ctx.save();
    apply_transform(ctx, visual)?;

    let s = item_size;
    ctx.set_fill_style_str(PLACEHOLDER_FILL);
    ctx.set_stroke_style_str(PLACEHOLDER_STROKE);
    ctx.set_line_width(1.5);

    for ear_x in [0.38, 0.62] {
        ctx.begin_path();
        ctx.ellipse(s * ear_x, s * 0.25, s * 0.08, s * 0.22, 0.0, 0.0, 2.0 * PI)?;
        ctx.fill();
        ctx.stroke();
    }

    ctx.begin_path();
    ctx.ellipse(s * 0.5, s * 0.68, s * 0.3, s * 0.28, 0.0, 0.0, 2.0 * PI)?;
    ctx.fill();
    ctx.stroke();

    ctx.restore();
    Ok(())
}

fn draw_selection(ctx: &CanvasRenderingContext2d, visual: &Visual, item_size: f64) -> Result<(), JsValue> {
    ctx.save();
    apply_transform(ctx, visual)?;

    // Keep dash and pad constant on screen regardless of sprite scale.
    let scale = visual.scale.max(f64::EPSILON);
    let pad = SELECTION_PAD_PX / scale;
    let dash = SELECTION_DASH_PX / scale;

    ctx.set_stroke_style_str(SELECTION_STROKE);
    ctx.set_line_width(1.0 / scale);
    let dash_array = js_sys::Array::new();
    dash_array.push(&dash.into());
    dash_array.push(&dash.into());
    ctx.set_line_dash(&dash_array)?;

    ctx.stroke_rect(-pad, -pad, item_size + pad * 2.0, item_size + pad * 2.0);
    ctx.set_line_dash(&js_sys::Array::new())?;

    ctx.restore();
    Ok(())
}

/// Move the origin to the sprite anchor, then rotate and scale around it.
fn apply_transform(ctx: &CanvasRenderingContext2d, visual: &Visual) -> Result<(), JsValue> {
    ctx.translate(visual.position.x, visual.position.y)?;
    ctx.rotate(visual.rotation)?;
    ctx.scale(visual.scale, visual.scale)?;
    Ok(())
}
