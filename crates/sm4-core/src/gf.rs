//! Arithmetic in GF(2^8) under the SM4 polynomial.
//!
//! The field is `GF(2)[x] / (x^8 + x^7 + x^6 + x^5 + x^4 + x^2 + 1)`. Two
//! interchangeable forms are provided:
//! - [`gf_mul`] / [`gf_inv`]: straightforward reference code that branches on
//!   operand bits.
//! - [`gf_mul_ct`] / [`gf_inv_ct`]: branch-free versions whose instruction
//!   stream and memory accesses do not depend on the operands. These back
//!   [`ComputedSbox`](crate::ComputedSbox).

/// Low eight bits of the reduction polynomial (the `x^8` term is implicit).
pub const REDUCTION_POLY: u8 = 0xf5;

/// Multiplies two field elements, branching on operand bits.
pub fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    for _ in 0..8 {
        if b & 1 != 0 {
            product ^= a;
        }
        let hi_bit_set = a & 0x80;
        a <<= 1;
        if hi_bit_set != 0 {
            a ^= REDUCTION_POLY;
        }
        b >>= 1;
    }
    product
}

/// Expands the low bit of `bit` into `0x00` or `0xff`.
#[inline(always)]
fn mask(bit: u8) -> u8 {
    (bit & 1).wrapping_neg()
}

/// Multiplies two field elements without secret-dependent branches.
#[inline]
pub fn gf_mul_ct(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    for _ in 0..8 {
        product ^= a & mask(b);
        let carry = mask(a >> 7);
        a = (a << 1) ^ (REDUCTION_POLY & carry);
        b >>= 1;
    }
    product
}

/// Raises `a` to the power 254 with the supplied multiplier.
///
/// Squaring seeds the result with `a^2`; six further square-and-multiply
/// steps fold in `a^4 .. a^128`, giving `a^(2+4+...+128) = a^254`.
#[inline(always)]
fn pow254(a: u8, mul: impl Fn(u8, u8) -> u8) -> u8 {
    let mut base = mul(a, a);
    let mut result = base;
    for _ in 0..6 {
        base = mul(base, base);
        result = mul(result, base);
    }
    result
}

/// Multiplicative inverse, with `gf_inv(0) == 0`.
pub fn gf_inv(a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    pow254(a, gf_mul)
}

/// Constant-time multiplicative inverse.
///
/// No zero test is needed: `0^254` is already `0`.
#[inline]
pub fn gf_inv_ct(a: u8) -> u8 {
    pow254(a, gf_mul_ct)
}
