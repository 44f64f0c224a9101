//! Canvas2D backend: replays a [`Scene`] on a browser 2D context

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scene::{DrawCommand, Scene};

/// Clear the surface and draw every command in order
pub fn draw_scene(ctx: &CanvasRenderingContext2d, scene: &Scene) -> Result<(), JsValue> {
    let (w, h) = (scene.width as f64, scene.height as f64);
    ctx.clear_rect(0.0, 0.0, w, h);
    if let Some(background) = scene.background {
        ctx.set_fill_style_str(&background.to_css());
        ctx.fill_rect(0.0, 0.0, w, h);
    }

    for command in &scene.commands {
        match command {
            DrawCommand::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                ctx.set_fill_style_str(&fill.to_css());
                ctx.fill();
                if let Some((color, width)) = stroke {
                    ctx.set_stroke_style_str(&color.to_css());
                    ctx.set_line_width(*width as f64);
                    ctx.stroke();
                }
            }
            DrawCommand::Rect { origin, size, fill } => {
                ctx.set_fill_style_str(&fill.to_css());
                ctx.fill_rect(
                    origin.x as f64,
                    origin.y as f64,
                    size.x as f64,
                    size.y as f64,
                );
            }
            DrawCommand::Text {
                pos,
                text,
                size_px,
                align,
                fill,
            } => {
                ctx.set_font(&format!("{}px Arial", size_px));
                ctx.set_text_align(align.as_str());
                ctx.set_fill_style_str(&fill.to_css());
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
        }
    }
    Ok(())
}
