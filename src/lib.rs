//! polyalpha: word-parameterized repeating-key stream cipher engine.
//!
//! polyalpha is a generalized Vigenère cipher over fixed-width binary
//! words (1, 2, or 4 bytes, little-endian). Each message mixes the
//! static key with a fresh IV into a derived keystream, and the IV is
//! embedded in the ciphertext so decryption can rebuild it.
//!
//! **This cipher is not cryptographically secure.** Modular addition
//! against a short repeating key falls to classical frequency analysis,
//! and the frame carries no authentication tag. It exists for
//! obfuscation and teaching, not for protecting secrets.
//!
//! # Architecture
//!
//! ```text
//! word_codec  (atomic unit — fixed-width little-endian word reads/writes)
//!     ↑ used by
//! transform   (modular add/subtract pass over words, cyclic key + IV,
//!              plus the key-derivation step and the widened variant)
//!     ↑ driven by
//! Vigenere    (facade — key generation, padding, IV framing,
//!              encrypt / decrypt end to end)
//! ```
//!
//! # Examples
//!
//! Encrypt and decrypt a message:
//!
//! ```
//! use polyalpha::Vigenere;
//!
//! let engine = Vigenere::new();
//! let key = engine.generate_key(16);
//!
//! let ciphertext = engine.encrypt(b"meet me at noon", &key).unwrap();
//! assert_ne!(&ciphertext[16..], b"meet me at noon".as_slice());
//!
//! let plaintext = engine.decrypt(&ciphertext, &key).unwrap();
//! assert_eq!(plaintext, b"meet me at noon");
//! ```
//!
//! Use 4-byte words and the OS random source:
//!
//! ```
//! use polyalpha::{EngineOptions, RandomSource, Vigenere, WordSize};
//!
//! let engine = Vigenere::with_options(EngineOptions {
//!     iv_length: 32,
//!     word_size: WordSize::W32,
//!     random: RandomSource::Os,
//!     ..EngineOptions::default()
//! })
//! .unwrap();
//!
//! let key = engine.generate_key(12);
//! let ciphertext = engine.encrypt(b"wide words", &key).unwrap();
//! assert_eq!(engine.decrypt(&ciphertext, &key).unwrap(), b"wide words");
//! ```

#![deny(clippy::all)]

pub mod error;

mod options;
pub mod transform;
mod vigenere;
pub mod word_codec;

pub use error::{Error, Result};
pub use options::{EngineOptions, RandomSource, WordSize, PERMITTED_IV_LENGTHS};
pub use vigenere::Vigenere;
