use palette::{IntoColor, Oklch, Srgb};

/// An sRGB color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from OKLCH coordinates (lightness 0–1, chroma, hue in degrees).
    pub fn oklch(l: f32, c: f32, h: f32) -> Self {
        from_oklch(Oklch::new(l, c, h), 255)
    }

    pub const fn with_alpha(mut self, a: u8) -> Self {
        self.a = a;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Shift perceptual lightness up by `amount` (0–1).
    pub fn lighten(self, amount: f32) -> Self {
        let mut oklch = self.to_oklch();
        oklch.l = (oklch.l + amount).clamp(0.0, 1.0);
        from_oklch(oklch, self.a)
    }

    /// Shift perceptual lightness down by `amount` (0–1).
    pub fn darken(self, amount: f32) -> Self {
        self.lighten(-amount)
    }

    /// Linear blend towards `other`; `amount` of 0 keeps `self`, 1 gives `other`.
    pub fn mix(self, other: Color, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let blend = |a: u8, b: u8| -> u8 {
            (f32::from(a) * (1.0 - amount) + f32::from(b) * amount).round() as u8
        };
        Self {
            r: blend(self.r, other.r),
            g: blend(self.g, other.g),
            b: blend(self.b, other.b),
            a: blend(self.a, other.a),
        }
    }

    /// Multiply by a tint, channel by channel. `WHITE` leaves the color unchanged.
    pub fn tint(self, tint: Color) -> Self {
        let mul = |a: u8, b: u8| -> u8 { ((u16::from(a) * u16::from(b)) / 255) as u8 };
        Self {
            r: mul(self.r, tint.r),
            g: mul(self.g, tint.g),
            b: mul(self.b, tint.b),
            a: mul(self.a, tint.a),
        }
    }

    fn to_oklch(self) -> Oklch {
        let srgb: Srgb<f32> = Srgb::new(self.r, self.g, self.b).into_format();
        srgb.into_color()
    }
}

fn from_oklch(oklch: Oklch, alpha: u8) -> Color {
    let srgb: Srgb = oklch.into_color();
    let (r, g, b) = srgb.into_format::<u8>().into_components();
    Color::rgba(r, g, b, alpha)
}
