use core::ops::{Add, Neg, Sub};

/// 26.6 fixed-point value: the low 6 bits hold 1/64 pixel fractions.
///
/// This is the native unit of font rasterizers; metrics stay in it until
/// they are converted with [`Fixed::to_f32`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Fixed(pub i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(64);

    /// Whole pixels.
    #[inline]
    pub const fn from_int(px: i32) -> Self {
        Fixed(px << 6)
    }

    /// Nearest 1/64 pixel.
    #[inline]
    pub fn from_f32(px: f32) -> Self {
        Fixed((px * 64.0).round() as i32)
    }

    /// Raw value divided by 64.
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / 64.0
    }

    /// Largest whole pixel not greater than `self`.
    #[inline]
    pub const fn floor(self) -> i32 {
        self.0 >> 6
    }

    /// Smallest whole pixel not less than `self`.
    #[inline]
    pub const fn ceil(self) -> i32 {
        (self.0 + 63) >> 6
    }
}

impl Add for Fixed {
    type Output = Fixed;
    #[inline]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 + rhs.0)
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    #[inline]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 - rhs.0)
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    #[inline]
    fn neg(self) -> Fixed {
        Fixed(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_f32_divides_by_64() {
        assert_eq!(Fixed(96).to_f32(), 1.5);
        assert_eq!(Fixed(-32).to_f32(), -0.5);
    }

    #[test]
    fn floor_and_ceil_round_toward_infinities() {
        assert_eq!(Fixed(100).floor(), 1);
        assert_eq!(Fixed(100).ceil(), 2);
        assert_eq!(Fixed(-1).floor(), -1);
        assert_eq!(Fixed(-1).ceil(), 0);
        assert_eq!(Fixed::from_int(3).floor(), 3);
    }

    #[test]
    fn from_f32_rounds_to_nearest_sixty_fourth() {
        assert_eq!(Fixed::from_f32(1.0), Fixed::ONE);
        assert_eq!(Fixed::from_f32(0.25), Fixed(16));
        assert_eq!(Fixed::from_f32(-2.5).to_f32(), -2.5);
    }
}
