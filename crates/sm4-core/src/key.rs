//! Key types for SM4.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::Sm4Error;
use crate::round::ROUNDS;

/// Master key size in bytes.
pub const KEY_SIZE: usize = 16;

/// SM4 master key. Wiped when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Sm4Key(pub [u8; KEY_SIZE]);

impl From<[u8; KEY_SIZE]> for Sm4Key {
    fn from(value: [u8; KEY_SIZE]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Sm4Key {
    type Error = Sm4Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; KEY_SIZE] = value.try_into().map_err(|_| Sm4Error::InvalidKeyLength {
            expected: KEY_SIZE,
            got: value.len(),
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Sm4Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sm4Key(..)")
    }
}

/// Expanded round keys `rk[0..32]` in encryption order. Wiped when dropped.
///
/// Only the key schedule can build one, so every instance is fully populated.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys(pub(crate) [u32; ROUNDS]);

impl RoundKeys {
    /// Returns the round key at the requested index (0..32).
    #[inline]
    pub fn get(&self, round: usize) -> u32 {
        self.0[round]
    }

    /// All round keys in encryption order.
    #[inline]
    pub fn as_words(&self) -> &[u32; ROUNDS] {
        &self.0
    }

    /// The schedule in decryption order, `rk[31]` first.
    #[inline]
    pub fn reversed(&self) -> RoundKeys {
        RoundKeys(core::array::from_fn(|i| self.0[ROUNDS - 1 - i]))
    }
}

impl fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RoundKeys(..)")
    }
}
