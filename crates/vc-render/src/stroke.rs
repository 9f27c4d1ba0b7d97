//! Stroke renderer: the single-segment primitive freehand input reduces to.

use crate::surface::RenderContext;
use tiny_skia::{Paint, PathBuilder, Stroke};
use vc_core::{Color, Position};

/// Stroke one segment `from → to` in logical units, with the context's
/// round caps and joins. Touches no history; callers snapshot before the
/// first segment of a gesture.
pub fn draw_line(ctx: &mut RenderContext<'_>, from: Position, to: Position, color: Color, width: f32) {
    let mut pb = PathBuilder::new();
    pb.move_to(from.x, from.y);
    pb.line_to(to.x, to.y);
    let Some(path) = pb.finish() else {
        log::trace!("skipping degenerate segment at ({}, {})", from.x, from.y);
        return;
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;

    let stroke = Stroke {
        width,
        line_cap: ctx.line_cap,
        line_join: ctx.line_join,
        ..Stroke::default()
    };

    log::trace!(
        "LINE ({}, {}) -> ({}, {}) {} w={width}",
        from.x,
        from.y,
        to.x,
        to.y,
        color.to_hex()
    );
    ctx.target.stroke_path(&path, &paint, &stroke, ctx.transform, None);
}
