//! Linear interpolation for style parameters.

/// Trait for types that can be linearly interpolated.
pub trait Lerp: Clone {
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }
}

impl Lerp for [f32; 3] {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        [
            self[0].lerp(&other[0], t),
            self[1].lerp(&other[1], t),
            self[2].lerp(&other[2], t),
        ]
    }
}

/// Interpolate a `u8` channel and round to the nearest integer
#[inline]
pub fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    let v = a as f32 + t * (b as f32 - a as f32);
    v.round().clamp(0.0, 255.0) as u8
}
