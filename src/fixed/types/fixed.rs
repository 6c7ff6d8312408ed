// src/fixed/types/fixed.rs

use core::fmt;
use core::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// Generates a fixed-point scalar over a signed storage integer `$raw`,
/// using `$wide` as the intermediate for products.
///
/// Arithmetic rule shared by every generated type:
/// - addition and subtraction wrap (two's complement),
/// - multiplication rounds half up: `(a * b + 2^(F2-1)) >> F2`,
/// - narrowing the fractional width truncates (arithmetic shift).
macro_rules! fixed_point {
    ($(#[$doc:meta])* $name:ident, $raw:ty, $wide:ty) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name<const FRAC: u32>($raw);

        impl<const FRAC: u32> $name<FRAC> {
            pub const ZERO: Self = Self(0);

            /// Creates a value from the raw integer (without shift).
            #[inline]
            pub const fn from_bits(bits: $raw) -> Self {
                Self(bits)
            }

            /// Creates a value from an integer, applying the necessary shift.
            /// E.g.: `from_int(1)` with FRAC = 15 stores 32768.
            #[inline]
            pub fn from_int(value: $raw) -> Self {
                Self(value.wrapping_shl(FRAC))
            }

            /// Converts an f64, rounding to the nearest representable value.
            pub fn from_f64(value: f64) -> Self {
                let scaling_factor = (1u128 << FRAC) as f64;
                Self(libm::round(value * scaling_factor) as $raw)
            }

            /// Returns the stored raw value.
            #[inline]
            pub const fn to_bits(self) -> $raw {
                self.0
            }

            pub fn to_f64(self) -> f64 {
                self.0 as f64 / (1u128 << FRAC) as f64
            }

            /// Divides the raw value by an integer, truncating toward zero.
            #[inline]
            pub fn div_int(self, divisor: $raw) -> Self {
                Self(self.0.wrapping_div(divisor))
            }

            #[inline]
            pub fn saturating_neg(self) -> Self {
                Self(self.0.saturating_neg())
            }

            #[inline]
            pub fn convert<const TO_FRAC: u32>(self) -> $name<TO_FRAC> {
                if TO_FRAC > FRAC {
                    $name::from_bits(self.0.wrapping_shl(TO_FRAC - FRAC))
                } else {
                    $name::from_bits(self.0 >> (FRAC - TO_FRAC))
                }
            }
        }

        impl<const F1: u32, const F2: u32> Add<$name<F2>> for $name<F1> {
            type Output = $name<F1>;

            #[inline]
            fn add(self, rhs: $name<F2>) -> Self::Output {
                // When F1 == F2, convert is a no-op and we just add the raw values
                let rhs_converted: $name<F1> = rhs.convert();
                $name(self.0.wrapping_add(rhs_converted.0))
            }
        }

        impl<const F1: u32, const F2: u32> AddAssign<$name<F2>> for $name<F1> {
            #[inline]
            fn add_assign(&mut self, rhs: $name<F2>) {
                *self = *self + rhs;
            }
        }

        impl<const F1: u32, const F2: u32> Sub<$name<F2>> for $name<F1> {
            type Output = $name<F1>;

            #[inline]
            fn sub(self, rhs: $name<F2>) -> Self::Output {
                let rhs_converted: $name<F1> = rhs.convert();
                $name(self.0.wrapping_sub(rhs_converted.0))
            }
        }

        impl<const F1: u32, const F2: u32> SubAssign<$name<F2>> for $name<F1> {
            #[inline]
            fn sub_assign(&mut self, rhs: $name<F2>) {
                *self = *self - rhs;
            }
        }

        impl<const F1: u32, const F2: u32> Mul<$name<F2>> for $name<F1> {
            type Output = $name<F1>;

            #[inline]
            fn mul(self, rhs: $name<F2>) -> Self::Output {
                let product = (self.0 as $wide) * (rhs.0 as $wide);

                // If F2 > 0, add 2^(F2-1) for rounding
                let rounded = if F2 > 0 {
                    let offset: $wide = 1 << (F2 - 1);
                    (product + offset) >> F2
                } else {
                    product
                };

                $name(rounded as $raw)
            }
        }

        impl<const FRAC: u32> fmt::Display for $name<FRAC> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:.6}", self.to_f64())
            }
        }

        impl<const FRAC: u32> fmt::Debug for $name<FRAC> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // In Debug, show both the decimal value and the raw value in parentheses
                write!(f, "{:.6} (raw: {})", self.to_f64(), self.0)
            }
        }
    };
}

fixed_point!(
    /// Fixed-point value with FRAC fractional bits stored in an `i32`.
    /// Used for the narrow sample path (CIC, FIR, FFT input).
    Fixed, i32, i64
);

fixed_point!(
    /// Fixed-point value with FRAC fractional bits stored in an `i64`.
    /// Used for the FFT's internal growth.
    Fixed64, i64, i128
);

impl<const FRAC: u32> Fixed<FRAC> {
    /// Moves the value into 64-bit storage, rescaling to TO_FRAC bits.
    #[inline]
    pub fn widen<const TO_FRAC: u32>(self) -> Fixed64<TO_FRAC> {
        Fixed64::<FRAC>::from_bits(i64::from(self.0)).convert()
    }
}

impl<const FRAC: u32> Fixed64<FRAC> {
    /// Moves the value into 32-bit storage, rescaling to TO_FRAC bits.
    /// Out-of-range values saturate.
    #[inline]
    pub fn narrow<const TO_FRAC: u32>(self) -> Fixed<TO_FRAC> {
        let scaled: Fixed64<TO_FRAC> = self.convert();
        let clamped = scaled.0.clamp(i64::from(i32::MIN), i64::from(i32::MAX));
        Fixed::from_bits(clamped as i32)
    }
}
