//! SM4 round transformations.

use crate::sbox::Substitutor;

/// Number of rounds in both the cipher and the key schedule.
pub const ROUNDS: usize = 32;

/// Linear diffusion `L` of the round function.
#[inline]
pub fn l(b: u32) -> u32 {
    b ^ b.rotate_left(2) ^ b.rotate_left(10) ^ b.rotate_left(18) ^ b.rotate_left(24)
}

/// Linear diffusion `L'` of the key schedule.
#[inline]
pub fn l_key(b: u32) -> u32 {
    b ^ b.rotate_left(13) ^ b.rotate_left(23)
}

/// Round transform `T = L ∘ tau`.
#[inline]
pub fn t<S: Substitutor>(sbox: &S, x: u32) -> u32 {
    l(sbox.substitute(x))
}

/// Key-schedule transform `T' = L' ∘ tau`.
#[inline]
pub fn t_key<S: Substitutor>(sbox: &S, x: u32) -> u32 {
    l_key(sbox.substitute(x))
}

/// Runs the 32 cipher rounds over `x`, consuming `rk` front to back.
///
/// Round `i` updates word `i % 4` with `T` of the other three words and
/// `rk[i]`; after 32 rounds every word is back in its starting slot.
/// Encryption passes the schedule as expanded, decryption passes it reversed.
#[inline]
pub fn crypt_words<S: Substitutor>(sbox: &S, x: [u32; 4], rk: &[u32; ROUNDS]) -> [u32; 4] {
    let [mut x0, mut x1, mut x2, mut x3] = x;
    for i in (0..ROUNDS).step_by(4) {
        x0 ^= t(sbox, x1 ^ x2 ^ x3 ^ rk[i]);
        x1 ^= t(sbox, x2 ^ x3 ^ x0 ^ rk[i + 1]);
        x2 ^= t(sbox, x3 ^ x0 ^ x1 ^ rk[i + 2]);
        x3 ^= t(sbox, x0 ^ x1 ^ x2 ^ rk[i + 3]);
    }
    [x0, x1, x2, x3]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbox::{ComputedSbox, LookupSbox};

    #[test]
    fn l_spreads_single_bit() {
        assert_eq!(l(1), 0x0104_0405);
        assert_eq!(l(0), 0);
    }

    #[test]
    fn l_key_spreads_single_bit() {
        assert_eq!(l_key(1), 0x0080_2001);
        assert_eq!(l_key(0), 0);
    }

    #[test]
    fn diffusion_is_linear() {
        let a = 0xdead_beef;
        let b = 0x0123_4567;
        assert_eq!(l(a ^ b), l(a) ^ l(b));
        assert_eq!(l_key(a ^ b), l_key(a) ^ l_key(b));
    }

    #[test]
    fn t_composes_substitution_and_diffusion() {
        let x = 0x0001_0203;
        assert_eq!(t(&LookupSbox, x), l(0xd690_e9fe));
        assert_eq!(t_key(&LookupSbox, x), l_key(0xd690_e9fe));
        assert_eq!(t(&ComputedSbox, x), t(&LookupSbox, x));
    }

    #[test]
    fn rounds_match_sliding_window_form() {
        let rk: [u32; ROUNDS] = core::array::from_fn(|i| (i as u32).wrapping_mul(0x9e37_79b9));
        let input = [0x0123_4567, 0x89ab_cdef, 0xfedc_ba98, 0x7654_3210];

        let mut window = input;
        for &key in rk.iter() {
            let next = window[0] ^ t(&LookupSbox, window[1] ^ window[2] ^ window[3] ^ key);
            window = [window[1], window[2], window[3], next];
        }

        assert_eq!(crypt_words(&LookupSbox, input, &rk), window);
    }
}
