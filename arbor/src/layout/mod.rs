mod rect;

pub use rect::{Rect, Vector2};

/// Placement of a node inside the box its parent assigns, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisAlign {
    #[default]
    Start,
    Center,
    End,
    /// Take the whole extent given by the parent.
    Fill,
}

/// How a node wants to be laid out by its container.
///
/// `expand` is the node's share of leftover space along the container's
/// primary axis; `0` means the node only takes its minimum size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layout {
    pub expand: u32,
    /// Horizontal and vertical alignment.
    pub align: [AxisAlign; 2],
}

impl Layout {
    pub const fn new(expand: u32) -> Self {
        Self {
            expand,
            align: [AxisAlign::Start, AxisAlign::Start],
        }
    }

    /// Expand by 1 and fill on both axes.
    pub const fn fill() -> Self {
        Self {
            expand: 1,
            align: [AxisAlign::Fill, AxisAlign::Fill],
        }
    }

    pub const fn expand(mut self, expand: u32) -> Self {
        self.expand = expand;
        self
    }

    pub const fn align(mut self, horizontal: AxisAlign, vertical: AxisAlign) -> Self {
        self.align = [horizontal, vertical];
        self
    }

    pub const fn align_both(mut self, align: AxisAlign) -> Self {
        self.align = [align, align];
        self
    }

    /// Position a box of `size` inside `space` according to the alignment.
    ///
    /// `Fill` consumes the entire available extent; the other modes keep
    /// `size` and justify the remainder. A size bigger than the space is kept
    /// as is, so the node overflows (and gets clipped) instead of shrinking.
    pub fn place(&self, space: Rect, size: Vector2) -> Rect {
        let mut result = Rect::new(space.x, space.y, size.x, size.y);

        for axis in 0..2 {
            let (start, extent) = if axis == 0 {
                (space.x, space.width)
            } else {
                (space.y, space.height)
            };
            let own = size.axis(axis);
            let free = (extent - own).max(0.0);

            let (position, length) = match self.align[axis] {
                AxisAlign::Start => (start, own),
                AxisAlign::Center => (start + free / 2.0, own),
                AxisAlign::End => (start + free, own),
                AxisAlign::Fill => (start, extent.max(own)),
            };

            if axis == 0 {
                result.x = position;
                result.width = length;
            } else {
                result.y = position;
                result.height = length;
            }
        }

        result
    }
}
