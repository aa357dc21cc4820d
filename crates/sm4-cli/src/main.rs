//! Command-line interface for `sm4-core`.

#![forbid(unsafe_code)]

use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sm4_core::gf::{gf_inv, gf_mul};
use sm4_core::{Block, ComputedSbox, LookupSbox, Sm4, Sm4Key, Substitutor, BLOCK_SIZE, SBOX};

/// Key and plaintext of GM/T 0002-2012 Appendix A.1.
const STD_KEY: &str = "0123456789abcdeffedcba9876543210";
/// Expected ciphertext of Appendix A.1.
const STD_CIPHER: &str = "681edf34d206965e86b3e94f536e4246";

/// SM4 CLI.
#[derive(Parser)]
#[command(
    name = "sm4",
    version,
    author,
    about = "SM4 block cipher CLI (GM/T 0002-2012)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// S-box implementation to run with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// 256-entry lookup table.
    Lookup,
    /// Constant-time field inversion and affine maps.
    Computed,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a single 16-byte block.
    Enc {
        /// SM4 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Plaintext block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
        /// S-box backend.
        #[arg(long, value_enum, default_value_t = Backend::Lookup)]
        backend: Backend,
    },
    /// Decrypt a single 16-byte block.
    Dec {
        /// SM4 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Ciphertext block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
        /// S-box backend.
        #[arg(long, value_enum, default_value_t = Backend::Lookup)]
        backend: Backend,
    },
    /// Verify the standard test vector, S-box equivalence and random round trips.
    Check {
        /// Number of random samples to test.
        #[arg(long, default_value_t = 64)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
        /// S-box backend.
        #[arg(long, value_enum, default_value_t = Backend::Lookup)]
        backend: Backend,
    },
    /// Measure single-block encryption throughput.
    Speed {
        /// Amount of data to encrypt, in MiB.
        #[arg(long, default_value_t = 64)]
        megabytes: u64,
        /// S-box backend.
        #[arg(long, value_enum, default_value_t = Backend::Lookup)]
        backend: Backend,
    },
    /// Multiply and invert bytes in GF(2^8) under the SM4 polynomial.
    Gf {
        /// First operand as 2 hex characters (an optional `0x` prefix is accepted).
        #[arg(long, value_name = "HEX")]
        a: String,
        /// Second operand as 2 hex characters.
        #[arg(long, value_name = "HEX")]
        b: String,
    },
    /// Run a local demo: random key and block, encrypt, decrypt back.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
        /// S-box backend.
        #[arg(long, value_enum, default_value_t = Backend::Lookup)]
        backend: Backend,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Enc {
            key_hex,
            block_hex,
            backend,
        } => cmd_crypt(&key_hex, &block_hex, backend, Direction::Encrypt),
        Commands::Dec {
            key_hex,
            block_hex,
            backend,
        } => cmd_crypt(&key_hex, &block_hex, backend, Direction::Decrypt),
        Commands::Check {
            samples,
            seed,
            backend,
        } => match backend {
            Backend::Lookup => cmd_check(LookupSbox, ComputedSbox, samples, seed),
            Backend::Computed => cmd_check(ComputedSbox, LookupSbox, samples, seed),
        },
        Commands::Speed { megabytes, backend } => match backend {
            Backend::Lookup => cmd_speed(LookupSbox, megabytes),
            Backend::Computed => cmd_speed(ComputedSbox, megabytes),
        },
        Commands::Gf { a, b } => cmd_gf(&a, &b),
        Commands::Demo { seed, backend } => match backend {
            Backend::Lookup => cmd_demo(LookupSbox, seed),
            Backend::Computed => cmd_demo(ComputedSbox, seed),
        },
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

fn cmd_crypt(key_hex: &str, block_hex: &str, backend: Backend, direction: Direction) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let block = parse_block_hex(block_hex)?;
    let out = match backend {
        Backend::Lookup => crypt_with(&Sm4::with_sbox(&key, LookupSbox), &block, direction),
        Backend::Computed => crypt_with(&Sm4::with_sbox(&key, ComputedSbox), &block, direction),
    };
    println!("{}", hex::encode(out));
    Ok(())
}

fn crypt_with<S: Substitutor>(cipher: &Sm4<S>, block: &Block, direction: Direction) -> Block {
    match direction {
        Direction::Encrypt => cipher.encrypt_block(block),
        Direction::Decrypt => cipher.decrypt_block(block),
    }
}

fn cmd_check<S, O>(sbox: S, other: O, samples: usize, seed: Option<u64>) -> Result<()>
where
    S: Substitutor + Copy,
    O: Substitutor + Copy,
{
    let key = parse_key_hex(STD_KEY)?;
    let plain = parse_block_hex(STD_KEY)?;
    let expected = parse_block_hex(STD_CIPHER)?;
    let cipher = Sm4::with_sbox(&key, sbox);
    let ct = cipher.encrypt_block(&plain);
    if ct != expected {
        bail!(
            "standard vector mismatch: got {}, expected {}",
            hex::encode(ct),
            STD_CIPHER
        );
    }
    if cipher.decrypt_block(&ct) != plain {
        bail!("standard vector did not decrypt back to the plaintext");
    }
    println!("standard vector: ok");

    for x in 0..=255u8 {
        if sbox.sub_byte(x) != SBOX[usize::from(x)] {
            bail!("s-box mismatch at {x:#04x}");
        }
    }
    println!("s-box table: ok");

    let mut rng = seeded_rng(seed);
    for _ in 0..samples {
        let mut key_bytes = [0u8; 16];
        let mut block = [0u8; BLOCK_SIZE];
        rng.fill_bytes(&mut key_bytes);
        rng.fill_bytes(&mut block);
        let key = Sm4Key::from(key_bytes);
        let cipher = Sm4::with_sbox(&key, sbox);
        let reference = Sm4::with_sbox(&key, other);

        let ct = cipher.encrypt_block(&block);
        if ct != reference.encrypt_block(&block) {
            bail!("backends disagree for key {}", hex::encode(key_bytes));
        }
        if cipher.decrypt_block(&ct) != block {
            bail!("round trip failed for key {}", hex::encode(key_bytes));
        }
    }
    println!("random round trips: {samples} ok");
    Ok(())
}

fn cmd_speed<S: Substitutor>(sbox: S, megabytes: u64) -> Result<()> {
    if megabytes == 0 {
        bail!("--megabytes must be at least 1");
    }
    let key = parse_key_hex(STD_KEY)?;
    let cipher = Sm4::with_sbox(&key, sbox);
    let blocks = megabytes * 1024 * 1024 / BLOCK_SIZE as u64;

    let mut block = parse_block_hex(STD_KEY)?;
    let start = Instant::now();
    for _ in 0..blocks {
        block = cipher.encrypt_block(&block);
    }
    let elapsed = start.elapsed().as_secs_f64();

    let mb_per_sec = megabytes as f64 / elapsed;
    println!("encrypted {megabytes} MiB ({blocks} blocks) in {elapsed:.3}s");
    println!("throughput: {mb_per_sec:.2} MiB/s");
    println!("final block: {}", hex::encode(block));
    Ok(())
}

fn cmd_gf(a_hex: &str, b_hex: &str) -> Result<()> {
    let a = parse_byte_hex(a_hex).context("parse operand a")?;
    let b = parse_byte_hex(b_hex).context("parse operand b")?;
    let a_inv = gf_inv(a);
    println!("{a:#04x} * {b:#04x} = {:#04x}", gf_mul(a, b));
    println!("inv({a:#04x}) = {a_inv:#04x}");
    println!("inv({b:#04x}) = {:#04x}", gf_inv(b));
    if a != 0 {
        println!("{a:#04x} * inv({a:#04x}) = {:#04x}", gf_mul(a, a_inv));
    }
    Ok(())
}

fn cmd_demo<S: Substitutor>(sbox: S, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key_bytes = [0u8; 16];
    let mut block = [0u8; BLOCK_SIZE];
    rng.fill_bytes(&mut key_bytes);
    rng.fill_bytes(&mut block);

    let cipher = Sm4::with_sbox(&Sm4Key::from(key_bytes), sbox);
    let ciphertext = cipher.encrypt_block(&block);
    let decrypted = cipher.decrypt_block(&ciphertext);

    println!("demo key: {}", hex::encode(key_bytes));
    println!("plaintext: {}", hex::encode(block));
    println!("ciphertext: {}", hex::encode(ciphertext));
    println!("decrypted: {}", hex::encode(decrypted));
    if decrypted != block {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn parse_key_hex(hex_str: &str) -> Result<Sm4Key> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    Sm4Key::try_from(bytes.as_slice()).context("SM4 key must be 16 bytes (32 hex characters)")
}

fn parse_block_hex(hex_str: &str) -> Result<Block> {
    let bytes = hex::decode(hex_str.trim()).context("decode block hex")?;
    match <Block>::try_from(bytes.as_slice()) {
        Ok(block) => Ok(block),
        Err(_) => bail!(
            "block must be {BLOCK_SIZE} bytes (32 hex characters), got {}",
            bytes.len()
        ),
    }
}

fn parse_byte_hex(hex_str: &str) -> Result<u8> {
    let trimmed = hex_str.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let bytes = hex::decode(digits).context("decode byte hex")?;
    match bytes.as_slice() {
        [byte] => Ok(*byte),
        _ => bail!("expected exactly one byte (2 hex characters)"),
    }
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
