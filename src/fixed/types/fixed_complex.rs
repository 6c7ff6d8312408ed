use super::fixed::{Fixed, Fixed64};
use core::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use num_complex::Complex;

/// Generates a complex pair over one of the fixed-point scalars.
macro_rules! complex_fixed {
    ($(#[$doc:meta])* $name:ident, $scalar:ident, $raw:ty) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name<const FRAC: u32> {
            pub re: $scalar<FRAC>,
            pub im: $scalar<FRAC>,
        }

        impl<const FRAC: u32> $name<FRAC> {
            pub const ZERO: Self = Self {
                re: $scalar::<FRAC>::ZERO,
                im: $scalar::<FRAC>::ZERO,
            };

            pub fn new(re: $scalar<FRAC>, im: $scalar<FRAC>) -> Self {
                Self { re, im }
            }

            /// Builds a value straight from raw component integers.
            pub const fn from_bits(re: $raw, im: $raw) -> Self {
                Self {
                    re: $scalar::from_bits(re),
                    im: $scalar::from_bits(im),
                }
            }

            /// Returns the complex conjugate (a - bi)
            #[inline]
            pub fn conj(self) -> Self {
                Self {
                    re: self.re,
                    im: self.im.saturating_neg(),
                }
            }

            /// Divides each component by an integer, truncating toward zero.
            #[inline]
            pub fn div_int(self, divisor: $raw) -> Self {
                Self {
                    re: self.re.div_int(divisor),
                    im: self.im.div_int(divisor),
                }
            }

            pub fn to_complex64(self) -> Complex<f64> {
                Complex::new(self.re.to_f64(), self.im.to_f64())
            }

            pub fn from_complex64(value: Complex<f64>) -> Self {
                Self {
                    re: $scalar::from_f64(value.re),
                    im: $scalar::from_f64(value.im),
                }
            }
        }

        impl<const F1: u32, const F2: u32> Add<$name<F2>> for $name<F1> {
            type Output = $name<F1>;

            #[inline]
            fn add(self, rhs: $name<F2>) -> Self::Output {
                $name {
                    re: self.re + rhs.re,
                    im: self.im + rhs.im,
                }
            }
        }

        impl<const F1: u32, const F2: u32> AddAssign<$name<F2>> for $name<F1> {
            #[inline]
            fn add_assign(&mut self, rhs: $name<F2>) {
                self.re += rhs.re;
                self.im += rhs.im;
            }
        }

        impl<const F1: u32, const F2: u32> Sub<$name<F2>> for $name<F1> {
            type Output = $name<F1>;

            #[inline]
            fn sub(self, rhs: $name<F2>) -> Self::Output {
                $name {
                    re: self.re - rhs.re,
                    im: self.im - rhs.im,
                }
            }
        }

        impl<const F1: u32, const F2: u32> SubAssign<$name<F2>> for $name<F1> {
            #[inline]
            fn sub_assign(&mut self, rhs: $name<F2>) {
                self.re -= rhs.re;
                self.im -= rhs.im;
            }
        }

        // The result keeps the precision of the left operand.
        impl<const F1: u32, const F2: u32> Mul<$name<F2>> for $name<F1> {
            type Output = $name<F1>;

            #[inline]
            fn mul(self, rhs: $name<F2>) -> Self::Output {
                // (ac - bd)
                let re = (self.re * rhs.re) - (self.im * rhs.im);
                // (ad + bc)
                let im = (self.re * rhs.im) + (self.im * rhs.re);

                $name { re, im }
            }
        }
    };
}

complex_fixed!(
    /// Complex pair of 32-bit fixed-point values.
    ComplexFixed, Fixed, i32
);

complex_fixed!(
    /// Complex pair of 64-bit fixed-point values.
    ComplexFixed64, Fixed64, i64
);

impl<const FRAC: u32> ComplexFixed<FRAC> {
    #[inline]
    pub fn widen<const TO_FRAC: u32>(self) -> ComplexFixed64<TO_FRAC> {
        ComplexFixed64::new(self.re.widen(), self.im.widen())
    }
}

impl<const FRAC: u32> ComplexFixed64<FRAC> {
    /// Truncates to 32-bit storage; out-of-range components saturate.
    #[inline]
    pub fn narrow<const TO_FRAC: u32>(self) -> ComplexFixed<TO_FRAC> {
        ComplexFixed::new(self.re.narrow(), self.im.narrow())
    }
}
