// ============================================================================
// SOFTWARE RASTERIZER
// ============================================================================

use crate::font::LabelFont;
use crate::geometry::{Point, Rect, Size};
use crate::paint::{Paint, PaintStyle};
use crate::style::Color;

/// 2D affine transform mapping `(x, y)` to
/// `(a * x + c * y + e, b * x + d * y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Clockwise rotation on a y-down surface about `pivot`.
    pub fn rotation(degrees: f32, pivot: Point) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: pivot.x - pivot.x * cos + pivot.y * sin,
            f: pivot.y - pivot.x * sin - pivot.y * cos,
        }
    }

    /// Transform that applies `inner` first and then `self`.
    pub fn concat(&self, inner: &Transform) -> Self {
        Self {
            a: self.a * inner.a + self.c * inner.b,
            b: self.b * inner.a + self.d * inner.b,
            c: self.a * inner.c + self.c * inner.d,
            d: self.b * inner.c + self.d * inner.d,
            e: self.a * inner.e + self.c * inner.f + self.e,
            f: self.b * inner.e + self.d * inner.f + self.f,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn invert(&self) -> Option<Self> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() <= f32::EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }
}

/// An RGBA8 frame buffer with a save/restore transform stack.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
    transform: Transform,
    saved: Vec<Transform>,
}

impl<'a> Canvas<'a> {
    /// Wraps `frame` as a `width` x `height` surface. A frame too short for
    /// that many rows is drawn into only as far as it reaches.
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        let rows = match width {
            0 => 0,
            _ => frame.len() / (width * 4),
        };
        if rows < height {
            tracing::warn!(width, height, rows, "frame buffer too short; clipping canvas");
        }
        let height = height.min(rows);
        Self {
            frame,
            width,
            height,
            transform: Transform::IDENTITY,
            saved: Vec::new(),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut out = [0; 4];
        out.copy_from_slice(&self.frame[idx..idx + 4]);
        Some(out)
    }

    pub fn save(&mut self) {
        self.saved.push(self.transform);
    }

    /// Pops the last saved transform. Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(transform) => self.transform = transform,
            None => tracing::trace!("restore without matching save"),
        }
    }

    pub fn rotate(&mut self, degrees: f32, pivot: Point) {
        self.transform = self
            .transform
            .concat(&Transform::rotation(degrees, pivot));
    }

    /// Draws a circle outline or disc depending on the paint style.
    ///
    /// Only the center is transformed; the active transforms are rigid.
    pub fn draw_circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        if radius <= 0.0 {
            return;
        }
        let center = self.transform.apply(center);
        let half_stroke = stroke_half_width(paint);
        let reach = radius + half_stroke + 1.0;

        self.fill_region(
            center.x - reach,
            center.y - reach,
            center.x + reach,
            center.y + reach,
            paint,
            |x, y| {
                let dist = ((x - center.x).powi(2) + (y - center.y).powi(2)).sqrt();
                match paint.style {
                    PaintStyle::Fill => dist - radius,
                    PaintStyle::Stroke => (dist - radius).abs() - half_stroke,
                }
            },
        );
    }

    /// Draws `rect` in the current transform with corners of `corner_radius`.
    pub fn draw_round_rect(&mut self, rect: Rect, corner_radius: f32, paint: &Paint) {
        let rect = rect.sorted();
        if rect.is_empty() {
            return;
        }
        let Some(inverse) = self.transform.invert() else {
            return;
        };

        let center = rect.center();
        let half_w = rect.width() / 2.0;
        let half_h = rect.height() / 2.0;
        let radius = corner_radius.max(0.0).min(half_w).min(half_h);
        let half_stroke = stroke_half_width(paint);

        let corners = [
            Point::new(rect.left, rect.top),
            Point::new(rect.right, rect.top),
            Point::new(rect.right, rect.bottom),
            Point::new(rect.left, rect.bottom),
        ]
        .map(|corner| self.transform.apply(corner));
        let pad = half_stroke + 1.0;
        let min_x = corners.iter().map(|p| p.x).fold(f32::INFINITY, f32::min) - pad;
        let max_x = corners.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max) + pad;
        let min_y = corners.iter().map(|p| p.y).fold(f32::INFINITY, f32::min) - pad;
        let max_y = corners.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max) + pad;

        self.fill_region(min_x, min_y, max_x, max_y, paint, |x, y| {
            let local = inverse.apply(Point::new(x, y));
            let sd = round_rect_distance(
                local.x - center.x,
                local.y - center.y,
                half_w,
                half_h,
                radius,
            );
            match paint.style {
                PaintStyle::Fill => sd,
                PaintStyle::Stroke => sd.abs() - half_stroke,
            }
        });
    }

    /// Draws `text` so that its ink box's bottom-left corner is at `origin`.
    ///
    /// Glyphs are not rotated; only the origin follows the transform.
    pub fn draw_label(&mut self, origin: Point, text: &str, font: &LabelFont, paint: &Paint) {
        let (glyphs, bounds) = font.layout(text, paint.text_size);
        let Some((min_x, min_y, _, max_y)) = bounds else {
            return;
        };
        let origin = self.transform.apply(origin);
        let left = origin.x.round() as i32;
        let top = origin.y.round() as i32 - (max_y - min_y);
        let color = paint.color;

        for glyph in &glyphs {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = left + gx as i32 + bb.min.x - min_x;
                let py = top + gy as i32 + bb.min.y - min_y;
                if px >= 0 && py >= 0 {
                    let alpha = if paint.anti_alias {
                        coverage
                    } else if coverage >= 0.5 {
                        1.0
                    } else {
                        0.0
                    };
                    self.blend_pixel(px as usize, py as usize, color, alpha);
                }
            });
        }
    }

    /// Paints every pixel in the box whose center has a signed distance
    /// (negative inside) of at most half a pixel from the shape.
    fn fill_region<F>(
        &mut self,
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
        paint: &Paint,
        sd: F,
    ) where
        F: Fn(f32, f32) -> f32,
    {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let x0 = min_x.floor().max(0.0) as usize;
        let y0 = min_y.floor().max(0.0) as usize;
        let x1 = (max_x.ceil().max(0.0) as usize).min(self.width - 1);
        let y1 = (max_y.ceil().max(0.0) as usize).min(self.height - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let dist = sd(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = if paint.anti_alias {
                    (0.5 - dist).clamp(0.0, 1.0)
                } else if dist <= 0.0 {
                    1.0
                } else {
                    0.0
                };
                if coverage > 0.0 {
                    self.blend_pixel(x, y, paint.color, coverage);
                }
            }
        }
    }

    fn blend_pixel(&mut self, x: usize, y: usize, color: Color, coverage: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let alpha = coverage * color.a as f32 / 255.0;
        let idx = (y * self.width + x) * 4;
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (channel, value) in src.iter().enumerate() {
            let dst = self.frame[idx + channel] as f32;
            self.frame[idx + channel] = (value * alpha + dst * (1.0 - alpha)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }
}

fn stroke_half_width(paint: &Paint) -> f32 {
    match paint.style {
        PaintStyle::Fill => 0.0,
        PaintStyle::Stroke => paint.stroke_width.max(1.0) / 2.0,
    }
}

/// Signed distance from `(px, py)`, relative to the rectangle's center, to a
/// rectangle of half extents `half_w` x `half_h` with rounded corners.
fn round_rect_distance(px: f32, py: f32, half_w: f32, half_h: f32, radius: f32) -> f32 {
    let qx = px.abs() - (half_w - radius);
    let qy = py.abs() - (half_h - radius);
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    let inside = qx.max(qy).min(0.0);
    outside + inside - radius
}
