/// Width and height of a drawing surface in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle given by its edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Swaps edges so that `left <= right` and `top <= bottom`.
    pub fn sorted(self) -> Self {
        Self {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

/// Distance between the dial edge and the hour label anchors.
pub const LABEL_INSET: f32 = 20.0;

/// Per-frame dial geometry, always derived from the current bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGeometry {
    pub width: f32,
    pub height: f32,
    pub radius: f32,
    pub center: Point,
}

impl FrameGeometry {
    pub fn new(size: Size) -> Self {
        let radius = size.width.min(size.height) / 2;
        Self {
            width: size.width as f32,
            height: size.height as f32,
            radius: radius as f32,
            center: Point::new((size.width / 2) as f32, (size.height / 2) as f32),
        }
    }

    /// Bottom-left corner of a label box of `text_width` x `text_height`
    /// centered on the hour position `angle_degrees` clockwise from 12.
    pub fn label_origin(&self, angle_degrees: f32, text_width: f32, text_height: f32) -> Point {
        let angle = angle_degrees.to_radians();
        let reach = self.radius - LABEL_INSET;
        Point::new(
            (self.width - text_width) / 2.0 + reach * angle.sin(),
            (self.height + text_height) / 2.0 - reach * angle.cos(),
        )
    }

    /// Unrotated hand rectangle: `width` wide, rising `length` from the
    /// center towards 12 o'clock.
    pub fn hand_rect(&self, length: f32, width: f32) -> Rect {
        Rect::new(
            (self.width - width) / 2.0,
            self.center.y - length,
            (self.width + width) / 2.0,
            self.center.y,
        )
    }
}
