//! Cairo-based rendering of scenes and scene objects.

use super::color::Color;
use super::scene::{ObjectRole, Scene, SceneObject};
use super::shape::{Point, Shape};
use super::style::{Composite, LineCap, LineJoin, StrokeStyle};

/// Number of widening passes used to approximate a glow blur.
const GLOW_PASSES: u32 = 4;

/// Renders the whole scene: background, then artwork, then guides.
///
/// Artwork is painted inside an isolated group so that eraser strokes
/// (destination-out) only remove artwork and reveal the background beneath.
/// Guides are painted last and are therefore never erased.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `scene` - Scene to paint, objects in paint order
pub fn render_scene(ctx: &cairo::Context, scene: &Scene) -> Result<(), cairo::Error> {
    render_background(ctx, scene.background())?;

    ctx.push_group();
    for object in scene
        .objects()
        .iter()
        .filter(|obj| obj.visible && obj.role != ObjectRole::Guide)
    {
        render_object(ctx, object);
    }
    ctx.pop_group_to_source()?;
    ctx.paint()?;

    for guide in scene
        .objects()
        .iter()
        .filter(|obj| obj.visible && obj.role == ObjectRole::Guide)
    {
        render_object(ctx, guide);
    }
    Ok(())
}

/// Fills the entire surface with the background color.
pub fn render_background(ctx: &cairo::Context, color: Color) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    let painted = ctx.paint();
    ctx.restore()?;
    painted
}

/// Renders a single object with its own style.
pub fn render_object(ctx: &cairo::Context, object: &SceneObject) {
    ctx.save().ok();
    ctx.new_path();
    append_path(ctx, &object.shape);
    paint_path(ctx, &object.style, object.shape.is_closed());
    ctx.restore().ok();
}

/// Renders an in-progress freehand stroke from borrowed strands.
///
/// Used for provisional rendering while the pointer is down, avoiding a clone
/// of the accumulated points on every frame. Erase strokes are painted in their
/// stroke color since there is no isolated artwork group to punch through.
pub fn render_strands(ctx: &cairo::Context, strands: &[Vec<Point>], style: &StrokeStyle) {
    ctx.save().ok();
    ctx.new_path();
    append_strands(ctx, strands);
    let style = StrokeStyle {
        composite: Composite::Over,
        ..style.clone()
    };
    paint_path(ctx, &style, false);
    ctx.restore().ok();
}

/// Fills (when closed) and strokes the current path with `style`.
fn paint_path(ctx: &cairo::Context, style: &StrokeStyle, closed: bool) {
    apply_stroke_params(ctx, style);
    if style.composite == Composite::Erase {
        ctx.set_operator(cairo::Operator::DestOut);
    }

    if let Some(glow) = style.glow {
        render_glow(ctx, style, glow.color, glow.blur);
    }

    if let Some(fill) = style.effective_fill().filter(|_| closed) {
        ctx.set_source_rgba(fill.r, fill.g, fill.b, fill.a);
        let _ = ctx.fill_preserve();
    }

    let color = style.effective_color();
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(style.width);
    let _ = ctx.stroke();
}

/// Strokes the current path several times, wider and fainter each pass.
fn render_glow(ctx: &cairo::Context, style: &StrokeStyle, color: Color, blur: f64) {
    if blur <= 0.0 {
        return;
    }
    let base_alpha = color.a * style.opacity;
    for pass in (1..=GLOW_PASSES).rev() {
        let spread = blur * f64::from(pass) / f64::from(GLOW_PASSES);
        let alpha = base_alpha * 0.35 / f64::from(pass);
        ctx.set_source_rgba(color.r, color.g, color.b, alpha);
        ctx.set_line_width(style.width + spread * 2.0);
        let _ = ctx.stroke_preserve();
    }
}

fn apply_stroke_params(ctx: &cairo::Context, style: &StrokeStyle) {
    ctx.set_line_width(style.width);
    ctx.set_line_cap(match style.line_cap {
        LineCap::Butt => cairo::LineCap::Butt,
        LineCap::Round => cairo::LineCap::Round,
        LineCap::Square => cairo::LineCap::Square,
    });
    ctx.set_line_join(match style.line_join {
        LineJoin::Miter => cairo::LineJoin::Miter,
        LineJoin::Round => cairo::LineJoin::Round,
        LineJoin::Bevel => cairo::LineJoin::Bevel,
    });
    ctx.set_dash(&style.dash, 0.0);
}

/// Appends the shape's outline to the current path without stroking it.
///
/// Mirrored shapes are traced under a reflecting transform that is popped
/// again before returning, so the stroke width stays in surface units.
fn append_path(ctx: &cairo::Context, shape: &Shape) {
    match shape {
        Shape::Freehand { strands } => append_strands(ctx, strands),
        Shape::Line { x1, y1, x2, y2 } => {
            ctx.move_to(*x1, *y1);
            ctx.line_to(*x2, *y2);
        }
        Shape::Rect {
            left,
            top,
            width,
            height,
        } => {
            ctx.rectangle(*left, *top, *width, *height);
        }
        Shape::Circle { cx, cy, radius } => {
            if *radius <= 0.0 {
                return;
            }
            ctx.new_sub_path();
            ctx.arc(*cx, *cy, *radius, 0.0, 2.0 * std::f64::consts::PI);
            ctx.close_path();
        }
        Shape::Polygon { points } => {
            let Some(first) = points.first() else {
                return;
            };
            ctx.move_to(first.x, first.y);
            for point in &points[1..] {
                ctx.line_to(point.x, point.y);
            }
            ctx.close_path();
        }
        Shape::Mirrored {
            source,
            flip_x,
            flip_y,
            center_x,
            center_y,
        } => {
            ctx.save().ok();
            ctx.translate(*center_x, *center_y);
            ctx.scale(
                if *flip_x { -1.0 } else { 1.0 },
                if *flip_y { -1.0 } else { 1.0 },
            );
            ctx.translate(-center_x, -center_y);
            append_path(ctx, source);
            ctx.restore().ok();
        }
    }
}

fn append_strands(ctx: &cairo::Context, strands: &[Vec<Point>]) {
    for strand in strands {
        let Some(first) = strand.first() else {
            continue;
        };
        ctx.move_to(first.x, first.y);
        if strand.len() == 1 {
            // Single tap: zero-length segment renders as a dot with round caps.
            ctx.line_to(first.x, first.y);
        }
        for point in &strand[1..] {
            ctx.line_to(point.x, point.y);
        }
    }
}
