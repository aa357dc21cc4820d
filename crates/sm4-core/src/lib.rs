//! SM4 block cipher (GM/T 0002-2012, GB/T 32907-2016).
//!
//! This crate provides:
//! - GF(2^8) arithmetic under the SM4 polynomial, in branching and
//!   branch-free forms.
//! - Two S-box backends behind the [`Substitutor`] trait: a lookup table and
//!   a constant-time computation.
//! - Key schedule and single-block encryption and decryption.
//!
//! No mode of operation or padding is defined here; every call transforms
//! exactly one 16-byte block.
//!
//! The default backend is [`LookupSbox`], whose table accesses depend on
//! secret data. Enable the `constant-time` feature, or pick
//! [`ComputedSbox`] explicitly, where cache-timing leaks matter.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod context;
mod error;
pub mod gf;
mod key;
mod round;
mod sbox;

pub use crate::block::{Block, BLOCK_SIZE};
pub use crate::cipher::{
    decrypt_block, decrypt_block_with, encrypt_block, encrypt_block_with, expand_key,
    expand_key_with, CK, FK,
};
pub use crate::context::Sm4;
pub use crate::error::Sm4Error;
pub use crate::key::{RoundKeys, Sm4Key, KEY_SIZE};
pub use crate::round::{l, l_key, t, t_key, ROUNDS};
pub use crate::sbox::{affine, ComputedSbox, DefaultSbox, LookupSbox, Substitutor, SBOX};
