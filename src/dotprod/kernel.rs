use crate::fixed_point::{Q16, Q32};
use num_complex::Complex32;

/// Multiply-accumulate rule for a coefficient type `Self` applied to inputs `X`
///
/// The accumulator is allowed to be wider than either operand; `finish`
/// performs the one reduction back to the output type.
pub trait MulAcc<X: Copy>: Copy {
    type Acc: Copy;
    type Output;

    fn zero() -> Self::Acc;

    fn mul_acc(acc: Self::Acc, h: Self, x: X) -> Self::Acc;

    fn finish(acc: Self::Acc) -> Self::Output;
}

impl MulAcc<Q16> for Q16 {
    type Acc = i64;
    type Output = Q16;

    fn zero() -> i64 {
        0
    }

    #[inline(always)]
    fn mul_acc(acc: i64, h: Q16, x: Q16) -> i64 {
        acc + h.widening_mul(x)
    }

    fn finish(acc: i64) -> Q16 {
        Q16::from_accumulator(acc)
    }
}

impl MulAcc<Q32> for Q32 {
    type Acc = i128;
    type Output = Q32;

    fn zero() -> i128 {
        0
    }

    #[inline(always)]
    fn mul_acc(acc: i128, h: Q32, x: Q32) -> i128 {
        acc + h.widening_mul(x)
    }

    fn finish(acc: i128) -> Q32 {
        Q32::from_accumulator(acc)
    }
}

impl MulAcc<f32> for f32 {
    type Acc = f32;
    type Output = f32;

    fn zero() -> f32 {
        0.0
    }

    #[inline(always)]
    fn mul_acc(acc: f32, h: f32, x: f32) -> f32 {
        acc + h * x
    }

    fn finish(acc: f32) -> f32 {
        acc
    }
}

impl MulAcc<Complex32> for f32 {
    type Acc = Complex32;
    type Output = Complex32;

    fn zero() -> Complex32 {
        Complex32::new(0.0, 0.0)
    }

    #[inline(always)]
    fn mul_acc(acc: Complex32, h: f32, x: Complex32) -> Complex32 {
        acc + x * h
    }

    fn finish(acc: Complex32) -> Complex32 {
        acc
    }
}

impl MulAcc<Complex32> for Complex32 {
    type Acc = Complex32;
    type Output = Complex32;

    fn zero() -> Complex32 {
        Complex32::new(0.0, 0.0)
    }

    #[inline(always)]
    fn mul_acc(acc: Complex32, h: Complex32, x: Complex32) -> Complex32 {
        acc + h * x
    }

    fn finish(acc: Complex32) -> Complex32 {
        acc
    }
}

/// Reference dot product: straight-line accumulation of `h[i] * x[i]`
///
/// # Panics
/// Panics if `h` and `x` differ in length.
pub fn run<H, X>(h: &[H], x: &[X]) -> H::Output
where
    H: MulAcc<X>,
    X: Copy,
{
    assert_eq!(h.len(), x.len(), "dot product operands differ in length");

    let mut acc = H::zero();
    for (&hi, &xi) in h.iter().zip(x) {
        acc = H::mul_acc(acc, hi, xi);
    }
    H::finish(acc)
}

/// Dot product unrolled in groups of four with a cleanup tail
///
/// Accumulates in the same order as [`run`], so fixed-point results are
/// bit-identical.
///
/// # Panics
/// Panics if `h` and `x` differ in length.
pub fn run4<H, X>(h: &[H], x: &[X]) -> H::Output
where
    H: MulAcc<X>,
    X: Copy,
{
    assert_eq!(h.len(), x.len(), "dot product operands differ in length");

    let mut acc = H::zero();

    let mut h_quads = h.chunks_exact(4);
    let mut x_quads = x.chunks_exact(4);
    for (hq, xq) in (&mut h_quads).zip(&mut x_quads) {
        acc = H::mul_acc(acc, hq[0], xq[0]);
        acc = H::mul_acc(acc, hq[1], xq[1]);
        acc = H::mul_acc(acc, hq[2], xq[2]);
        acc = H::mul_acc(acc, hq[3], xq[3]);
    }

    // n mod 4 leftovers
    for (&hi, &xi) in h_quads.remainder().iter().zip(x_quads.remainder()) {
        acc = H::mul_acc(acc, hi, xi);
    }

    H::finish(acc)
}
