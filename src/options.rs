//! Engine configuration: word size, IV length, and randomness source.
//!
//! All configuration is immutable once a [`Vigenere`](crate::Vigenere)
//! engine is built; validation happens in the constructor so that
//! `encrypt`/`decrypt` never have to re-check it.

/// IV lengths accepted by the engine, in bytes.
pub const PERMITTED_IV_LENGTHS: [usize; 6] = [8, 16, 32, 64, 128, 256];

/// Width of the atomic transform unit.
///
/// Words are little-endian unsigned integers; all cipher arithmetic is
/// performed modulo `2^(8 * width)`. The width is an enumerated choice
/// rather than a numeric generic so that wraparound semantics stay
/// explicit per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordSize {
    /// 1-byte words (modulo 2^8). The classic byte-wise cipher.
    #[default]
    W8,
    /// 2-byte words (modulo 2^16).
    W16,
    /// 4-byte words (modulo 2^32).
    W32,
}

impl WordSize {
    /// Width of one word in bytes.
    pub fn bytes(self) -> usize {
        match self {
            WordSize::W8 => 1,
            WordSize::W16 => 2,
            WordSize::W32 => 4,
        }
    }

    /// The modulus of word arithmetic: `2^(8 * bytes)`.
    pub fn range(self) -> u64 {
        1u64 << (8 * self.bytes() as u32)
    }
}

/// Source of randomness for IV and key generation.
///
/// Surfacing this as configuration is deliberate: the original engine
/// used a non-cryptographic generator, and silently upgrading it would
/// change observable behavior. Callers pick one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RandomSource {
    /// A fast, non-cryptographic PRNG ([`rand::rngs::SmallRng`]),
    /// freshly seeded from system entropy on every call. Matches the
    /// original engine's behavior. Do not use where IV or key secrecy
    /// matters.
    #[default]
    Fast,
    /// The operating-system CSPRNG ([`rand::rngs::OsRng`]). The
    /// security-grade upgrade path.
    Os,
}

/// Immutable configuration for a [`Vigenere`](crate::Vigenere) engine.
///
/// # Examples
///
/// ```
/// use polyalpha::{EngineOptions, Vigenere, WordSize};
///
/// let engine = Vigenere::with_options(EngineOptions {
///     iv_length: 32,
///     word_size: WordSize::W16,
///     ..EngineOptions::default()
/// })
/// .unwrap();
/// let key = engine.generate_key(8);
/// assert_eq!(key.len(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// IV length in bytes; one of [`PERMITTED_IV_LENGTHS`].
    pub iv_length: usize,
    /// Width of the transform word.
    pub word_size: WordSize,
    /// Word-width promotion: read 8-bit input words but emit 32-bit
    /// output words (4x expansion), enlarging the keyspace per symbol.
    /// Only valid together with [`WordSize::W8`].
    pub widen: bool,
    /// Randomness source for [`generate_key`](crate::Vigenere::generate_key)
    /// and per-message IVs.
    pub random: RandomSource,
}

impl Default for EngineOptions {
    /// Defaults match the original engine: 16-byte IV, byte-wise words,
    /// no widening, fast non-cryptographic randomness.
    fn default() -> Self {
        EngineOptions {
            iv_length: 16,
            word_size: WordSize::W8,
            widen: false,
            random: RandomSource::Fast,
        }
    }
}
