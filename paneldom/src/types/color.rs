use palette::{IntoColor, Mix, Oklab, Srgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Mix toward `other` by `amount` (0.0 keeps `self`, 1.0 yields `other`).
    ///
    /// Mixing happens in Oklab so partially faded glyphs keep a perceptually
    /// even ramp instead of muddying through sRGB.
    pub fn mix(self, other: Rgb, amount: f32) -> Rgb {
        let amount = amount.clamp(0.0, 1.0);
        if amount <= 0.0 {
            return self;
        }
        if amount >= 1.0 {
            return other;
        }

        let from: Oklab = self.to_srgb().into_color();
        let to: Oklab = other.to_srgb().into_color();
        let mixed: Srgb = from.mix(to, amount).into_color();

        Rgb::new(
            channel_to_u8(mixed.red),
            channel_to_u8(mixed.green),
            channel_to_u8(mixed.blue),
        )
    }

    fn to_srgb(self) -> Srgb {
        Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
