//! Reusable cipher handle bundling a key schedule with an S-box backend.

use crate::block::{Block, BLOCK_SIZE};
use crate::cipher::{decrypt_block_with, encrypt_block_with, expand_key_with};
use crate::error::Sm4Error;
use crate::key::{RoundKeys, Sm4Key};
use crate::sbox::{DefaultSbox, Substitutor};

/// SM4 cipher keyed with an expanded schedule.
///
/// Block operations borrow `&self` and may run from many threads at once;
/// [`Sm4::rekey`] needs `&mut self` and so cannot overlap with them.
#[derive(Clone, Debug)]
pub struct Sm4<S: Substitutor = DefaultSbox> {
    round_keys: RoundKeys,
    sbox: S,
}

impl Sm4<DefaultSbox> {
    /// Expands `key` using the default backend.
    pub fn new(key: &Sm4Key) -> Self {
        Self::with_sbox(key, DefaultSbox::default())
    }

    /// Expands a key given as a byte slice, which must be 16 bytes long.
    pub fn from_slice(key: &[u8]) -> Result<Self, Sm4Error> {
        let key = Sm4Key::try_from(key)?;
        Ok(Self::new(&key))
    }
}

impl<S: Substitutor> Sm4<S> {
    /// Expands `key` using the given backend.
    pub fn with_sbox(key: &Sm4Key, sbox: S) -> Self {
        let round_keys = expand_key_with(&sbox, key);
        Self { round_keys, sbox }
    }

    /// Replaces the schedule with one derived from `key`.
    pub fn rekey(&mut self, key: &Sm4Key) {
        self.round_keys = expand_key_with(&self.sbox, key);
    }

    /// Expanded round keys in encryption order.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// Encrypts one block.
    pub fn encrypt_block(&self, block: &Block) -> Block {
        encrypt_block_with(&self.sbox, block, &self.round_keys)
    }

    /// Decrypts one block.
    pub fn decrypt_block(&self, block: &Block) -> Block {
        decrypt_block_with(&self.sbox, block, &self.round_keys)
    }

    /// Encrypts `buf` in place. `buf` must be exactly one block.
    pub fn encrypt_in_place(&self, buf: &mut [u8]) -> Result<(), Sm4Error> {
        let block = as_block(buf)?;
        buf.copy_from_slice(&self.encrypt_block(&block));
        Ok(())
    }

    /// Decrypts `buf` in place. `buf` must be exactly one block.
    pub fn decrypt_in_place(&self, buf: &mut [u8]) -> Result<(), Sm4Error> {
        let block = as_block(buf)?;
        buf.copy_from_slice(&self.decrypt_block(&block));
        Ok(())
    }
}

fn as_block(buf: &[u8]) -> Result<Block, Sm4Error> {
    buf.try_into().map_err(|_| Sm4Error::InvalidBlockLength {
        expected: BLOCK_SIZE,
        got: buf.len(),
    })
}
