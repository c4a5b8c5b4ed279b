use crate::types::Edges;

/// A point or a size, depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Component on the given axis; `0` is horizontal, `1` vertical.
    pub fn axis(&self, axis: usize) -> f32 {
        if axis == 0 {
            self.x
        } else {
            self.y
        }
    }

    pub fn axis_mut(&mut self, axis: usize) -> &mut f32 {
        if axis == 0 {
            &mut self.x
        } else {
            &mut self.y
        }
    }

    pub fn distance_squared(&self, other: Vector2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl std::ops::Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(size: Vector2) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.x,
            height: size.y,
        }
    }

    pub const fn start(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn end(&self) -> Vector2 {
        Vector2::new(self.right(), self.bottom())
    }

    pub const fn size(&self) -> Vector2 {
        Vector2::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Shrink the rectangle by the given edges. Never produces a negative size.
    pub fn shrink(self, edges: &Edges) -> Self {
        let left = f32::from(edges.left);
        let top = f32::from(edges.top);
        Self {
            x: self.x + left,
            y: self.y + top,
            width: (self.width - f32::from(edges.horizontal_total())).max(0.0),
            height: (self.height - f32::from(edges.vertical_total())).max(0.0),
        }
    }

    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Overlapping part of both rectangles; empty (zero-sized) if they don't touch.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}
