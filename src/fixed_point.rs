//! Fixed-point scalar types
//!
//! Each type stores a signed integer with an implicit binary point
//! `FRAC_BITS` bits from the right. Products are formed in an accumulator
//! type twice as wide as the storage so that long sums of products cannot
//! overflow; the only lossy step is [`from_accumulator`](Q16::from_accumulator),
//! which shifts right by `FRAC_BITS` (truncating toward negative infinity)
//! and saturates into the storage range.
//!
//! | type  | storage | fractional bits | accumulator | float bridge |
//! |-------|---------|-----------------|-------------|--------------|
//! | `Q16` | `i16`   | 12              | `i64`       | `f32`        |
//! | `Q32` | `i32`   | 16              | `i128`      | `f64`        |

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

macro_rules! fixed_point_type {
    (
        $(#[$meta:meta])*
        $name:ident, storage = $storage:ty, acc = $acc:ty, float = $float:ty, frac = $frac:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name($storage);

        impl $name {
            /// Number of fractional bits
            pub const FRAC_BITS: u32 = $frac;
            /// Number of integer bits, including the sign bit
            pub const INT_BITS: u32 = <$storage>::BITS - $frac;

            pub const ZERO: Self = Self(0);
            pub const ONE: Self = Self(1 << $frac);
            pub const MIN: Self = Self(<$storage>::MIN);
            pub const MAX: Self = Self(<$storage>::MAX);
            /// Smallest positive step (one LSB)
            pub const EPSILON: Self = Self(1);

            /// Wrap a raw integer representation
            pub const fn from_bits(bits: $storage) -> Self {
                Self(bits)
            }

            /// Raw integer representation
            pub const fn to_bits(self) -> $storage {
                self.0
            }

            /// Quantize a real number, rounding to nearest
            ///
            /// Values outside the representable range saturate; NaN maps to zero.
            pub fn from_float(x: $float) -> Self {
                // float -> int `as` casts saturate and send NaN to 0
                Self((x * Self::scale()).round() as $storage)
            }

            /// Exact real value of this quantity
            pub fn to_float(self) -> $float {
                self.0 as $float / Self::scale()
            }

            /// Full-precision product in the accumulator type
            pub fn widening_mul(self, rhs: Self) -> $acc {
                (self.0 as $acc) * (rhs.0 as $acc)
            }

            /// Reduce an accumulated sum of products back to storage width
            pub fn from_accumulator(acc: $acc) -> Self {
                let shifted = acc >> $frac;
                Self(shifted.clamp(<$storage>::MIN as $acc, <$storage>::MAX as $acc) as $storage)
            }

            fn scale() -> $float {
                (1u64 << $frac) as $float
            }
        }

        impl Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self(self.0.saturating_add(rhs.0))
            }
        }

        impl Sub for $name {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                Self(self.0.saturating_sub(rhs.0))
            }
        }

        impl Neg for $name {
            type Output = Self;

            fn neg(self) -> Self {
                Self(self.0.saturating_neg())
            }
        }

        impl Mul for $name {
            type Output = Self;

            fn mul(self, rhs: Self) -> Self {
                Self::from_accumulator(self.widening_mul(rhs))
            }
        }

        impl From<$name> for $float {
            fn from(value: $name) -> $float {
                value.to_float()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.to_float(), f)
            }
        }
    };
}

fixed_point_type! {
    /// 16-bit fixed-point value in Q4.12 format
    Q16, storage = i16, acc = i64, float = f32, frac = 12
}

fixed_point_type! {
    /// 32-bit fixed-point value in Q16.16 format
    Q32, storage = i32, acc = i128, float = f64, frac = 16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_q16_constants() {
        assert_eq!(Q16::ONE.to_bits(), 4096);
        assert_eq!(Q16::INT_BITS, 4);
        assert_eq!(Q16::ONE.to_float(), 1.0);
        assert_eq!(Q32::ONE.to_float(), 1.0);
        assert_eq!(Q32::INT_BITS, 16);
    }

    #[test]
    fn test_q16_round_trip() {
        for i in -8000..8000 {
            let x = i as f32 * 0.000_977;
            let q = Q16::from_float(x);
            assert_eq!(Q16::from_float(q.to_float()), q, "x = {}", x);
            assert!((q.to_float() - x).abs() <= 1.0 / 4096.0);
        }
    }

    #[test]
    fn test_q32_round_trip() {
        for i in -5000..5000 {
            let x = i as f64 * 0.123_457;
            let q = Q32::from_float(x);
            assert_eq!(Q32::from_float(q.to_float()), q);
            assert!((q.to_float() - x).abs() <= 1.0 / 65536.0);
        }
    }

    #[test]
    fn test_from_float_saturates() {
        assert_eq!(Q16::from_float(100.0), Q16::MAX);
        assert_eq!(Q16::from_float(-100.0), Q16::MIN);
        assert_eq!(Q16::from_float(f32::NAN), Q16::ZERO);
        assert_eq!(Q32::from_float(1e12), Q32::MAX);
    }

    #[test]
    fn test_reduction_truncates_toward_negative_infinity() {
        // -1 LSB * 1 LSB = -1 in the accumulator, which shifts to -1 (not 0)
        let tiny = Q16::EPSILON;
        assert_eq!(Q16::from_accumulator((-tiny).widening_mul(tiny)).to_bits(), -1);
        assert_eq!(Q16::from_accumulator(tiny.widening_mul(tiny)).to_bits(), 0);
    }

    #[test]
    fn test_mul() {
        let a = Q16::from_float(1.5);
        let b = Q16::from_float(-2.25);
        assert_eq!((a * b).to_float(), -3.375);
        assert_eq!(Q16::from_float(7.0) * Q16::from_float(7.0), Q16::MAX);
    }

    #[test]
    fn test_saturating_add_sub() {
        assert_eq!(Q16::MAX + Q16::ONE, Q16::MAX);
        assert_eq!(Q16::MIN - Q16::ONE, Q16::MIN);
        assert_eq!(-Q16::MIN, Q16::MAX);
        assert_eq!((Q16::ONE + Q16::ONE).to_float(), 2.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{:.3}", Q16::from_float(0.5)), "0.500");
    }
}
