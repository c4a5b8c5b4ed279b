/// Per-side box metrics (margin, border, padding), in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Edges {
    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn all(value: u16) -> Self {
        Self::new(value, value, value, value)
    }

    pub const fn symmetric(vertical: u16, horizontal: u16) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Build from a `[top, right, bottom, left]` array.
    pub const fn from_array(sides: [u16; 4]) -> Self {
        Self::new(sides[0], sides[1], sides[2], sides[3])
    }

    pub const fn to_array(self) -> [u16; 4] {
        [self.top, self.right, self.bottom, self.left]
    }

    pub const fn horizontal_total(&self) -> u16 {
        self.left + self.right
    }

    pub const fn vertical_total(&self) -> u16 {
        self.top + self.bottom
    }

    pub const fn is_zero(&self) -> bool {
        self.top == 0 && self.right == 0 && self.bottom == 0 && self.left == 0
    }
}

impl std::ops::Add for Edges {
    type Output = Edges;

    fn add(self, rhs: Edges) -> Edges {
        Edges::new(
            self.top + rhs.top,
            self.right + rhs.right,
            self.bottom + rhs.bottom,
            self.left + rhs.left,
        )
    }
}
