//! Brush profiles and point sinks for freehand strokes.

use super::tool::BrushKind;
use crate::draw::{Color, Composite, Glow, LineCap, LineJoin, Point, StrokeStyle};
use crate::symmetry::{SymmetryMode, mirror_point};

/// Stroke style and sampling derived for one brush stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushProfile {
    pub style: StrokeStyle,
    /// Minimum distance in pixels between accepted points
    pub decimate: f64,
}

impl BrushProfile {
    /// Derives the profile for `kind` from the current style state.
    ///
    /// `background` is used as the eraser's stroke color so that hosts which
    /// ignore the erase composite still paint over with the canvas color.
    pub fn for_brush(kind: BrushKind, color: Color, width: f64, background: Color) -> Self {
        let base = StrokeStyle::outline(color, width);
        match kind {
            BrushKind::Pencil => Self {
                style: base,
                decimate: 8.0,
            },
            BrushKind::Marker => Self {
                style: StrokeStyle {
                    width: width * 1.5,
                    ..base
                },
                decimate: 4.0,
            },
            BrushKind::Watercolor => Self {
                style: StrokeStyle {
                    width: width * 2.0,
                    opacity: 0.3,
                    ..base
                },
                decimate: 2.0,
            },
            BrushKind::Neon => Self {
                style: StrokeStyle {
                    glow: Some(Glow {
                        color,
                        blur: width * 2.0,
                    }),
                    ..base
                },
                decimate: 8.0,
            },
            BrushKind::Pixel => Self {
                style: StrokeStyle {
                    width: pixel_width(width),
                    line_cap: LineCap::Square,
                    line_join: LineJoin::Miter,
                    ..base
                },
                decimate: 15.0,
            },
            BrushKind::Eraser => Self {
                style: StrokeStyle {
                    color: background,
                    width: width * 2.0,
                    composite: Composite::Erase,
                    ..base
                },
                decimate: 8.0,
            },
        }
    }
}

/// Width snapped down to a multiple of 5, never below 5.
fn pixel_width(width: f64) -> f64 {
    ((width / 5.0).floor() * 5.0).max(5.0)
}

/// Receives the points of a live stroke.
pub trait PointSink {
    /// Offers a point for `strand`. Forced points skip decimation.
    fn push(&mut self, strand: usize, point: Point, force: bool);

    /// Offers a pointer sample of the drawn path.
    fn consume(&mut self, point: Point) {
        self.push(0, point, false);
    }

    /// Offers the final (pointer-up) point of the drawn path.
    fn finish(&mut self, point: Point) {
        self.push(0, point, true);
    }
}

/// Base sink: accumulates decimated points per strand.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    strands: Vec<Vec<Point>>,
    decimate: f64,
}

impl PathBuilder {
    pub fn new(decimate: f64) -> Self {
        Self {
            strands: Vec::new(),
            decimate,
        }
    }

    pub fn strands(&self) -> &[Vec<Point>] {
        &self.strands
    }

    pub fn into_strands(self) -> Vec<Vec<Point>> {
        self.strands
    }
}

impl PointSink for PathBuilder {
    fn push(&mut self, strand: usize, point: Point, force: bool) {
        if self.strands.len() <= strand {
            self.strands.resize_with(strand + 1, Vec::new);
        }
        let points = &mut self.strands[strand];
        if let Some(last) = points.last() {
            if *last == point {
                return;
            }
            if !force && last.distance(point) < self.decimate {
                return;
            }
        }
        points.push(point);
    }
}

/// Decorator feeding mirrored copies of every drawn point into extra strands.
///
/// Strand 0 receives the pointer samples; strands 1..=3 receive their
/// reflections in the order produced by [`mirror_point`].
#[derive(Debug, Clone)]
pub struct SymmetrySink<S> {
    inner: S,
    mode: SymmetryMode,
    width: u32,
    height: u32,
}

impl<S: PointSink> SymmetrySink<S> {
    pub fn new(inner: S, mode: SymmetryMode, width: u32, height: u32) -> Self {
        Self {
            inner,
            mode,
            width,
            height,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: PointSink> PointSink for SymmetrySink<S> {
    fn push(&mut self, strand: usize, point: Point, force: bool) {
        self.inner.push(strand, point, force);
        if strand != 0 {
            return;
        }
        let mirrored = mirror_point(point, self.mode, self.width, self.height);
        for (offset, mirrored_point) in mirrored.as_slice().iter().enumerate() {
            self.inner.push(offset + 1, *mirrored_point, force);
        }
    }
}
