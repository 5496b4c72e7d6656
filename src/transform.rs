//! The modular add/subtract transform, the crate's sole cipher primitive.
//!
//! Operates word-by-word over an input buffer against a cyclically
//! repeated key and a cyclically repeated IV:
//!
//! ```text
//! encrypt:  out[i] = (in[i] + key[i % kw] + iv[i % vw]) mod 2^(8*w)
//! decrypt:  out[i] = (in[i] - key[i % kw] - iv[i % vw]) mod 2^(8*w)
//! ```
//!
//! Subtraction is normalized so the result is always in `[0, 2^(8*w))`
//! before being written back. Cyclic indexing uses plain modulo for both
//! key and IV: these functions accept arbitrary word-aligned lengths, so
//! the power-of-two mask form is not valid over their input domain.

use crate::error::{Error, Result};
use crate::options::WordSize;
use crate::word_codec::{read_word, write_word};

/// Whether the transform adds or subtracts the keystream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Add key and IV contributions.
    Encrypt,
    /// Subtract key and IV contributions, normalizing into range.
    Decrypt,
}

/// Applies the repeating-key transform to `input`.
///
/// The transform is a pure function: fixed inputs always produce the
/// same output, which is what lets decryption reproduce the derived
/// keystream from the embedded IV.
///
/// # Parameters
/// - `input`: Word-aligned buffer to transform; not modified.
/// - `key`: Cyclically repeated key, word-aligned, at least one word.
/// - `iv`: Optional cyclically repeated IV; `None` (or empty) means a
///   zero IV contribution, as used during key derivation.
/// - `direction`: [`Direction::Encrypt`] or [`Direction::Decrypt`].
/// - `word`: Word width for input, key, IV, and output alike.
///
/// # Returns
/// A freshly allocated buffer of the same length as `input`.
///
/// # Errors
/// Returns [`Error::InvalidKey`] if the key is empty or not a whole
/// number of words.
///
/// # Panics
/// Debug builds panic if `input` or `iv` are not word-aligned; the
/// framing layer guarantees alignment before calling in.
pub fn transform(
    input: &[u8],
    key: &[u8],
    iv: Option<&[u8]>,
    direction: Direction,
    word: WordSize,
) -> Result<Vec<u8>> {
    let width = word.bytes();
    if key.is_empty() || !key.len().is_multiple_of(width) {
        return Err(Error::InvalidKey);
    }
    debug_assert!(input.len().is_multiple_of(width), "input not word-aligned");

    let iv = iv.filter(|iv| !iv.is_empty());
    if let Some(iv) = iv {
        debug_assert!(iv.len().is_multiple_of(width), "IV not word-aligned");
    }

    let range = word.range();
    let key_words = key.len() / width;
    let iv_words = iv.map_or(0, |iv| iv.len() / width);
    let num_words = input.len() / width;

    let mut output = vec![0u8; input.len()];
    for i in 0..num_words {
        let x = read_word(input, i * width, word);
        let k = read_word(key, (i % key_words) * width, word);
        let v = match iv {
            Some(iv) => read_word(iv, (i % iv_words) * width, word),
            None => 0,
        };
        let y = match direction {
            Direction::Encrypt => (x + k + v) % range,
            // x < range and k + v < 2*range, so adding 2*range keeps the
            // difference non-negative before reduction.
            Direction::Decrypt => (x + 2 * range - k - v) % range,
        };
        write_word(&mut output, i * width, word, y);
    }
    Ok(output)
}

/// The word-width promotion variant: 8-bit input words, 32-bit output
/// words (4x expansion) on encrypt, and the symmetric narrowing on
/// decrypt.
///
/// Key and IV contributions are read at byte width and byte index on
/// both sides; only the ciphertext words are wide. Arithmetic is modulo
/// 2^32.
///
/// # Errors
/// Returns [`Error::InvalidKey`] if the key is empty.
///
/// # Panics
/// Debug builds panic if a decrypt-direction `input` is not a whole
/// number of 32-bit words; the framing layer rejects such bodies as
/// malformed before calling in.
pub fn transform_widened(
    input: &[u8],
    key: &[u8],
    iv: Option<&[u8]>,
    direction: Direction,
) -> Result<Vec<u8>> {
    if key.is_empty() {
        return Err(Error::InvalidKey);
    }
    let iv = iv.filter(|iv| !iv.is_empty());
    let range = WordSize::W32.range();
    let wide = WordSize::W32.bytes();

    match direction {
        Direction::Encrypt => {
            let mut output = vec![0u8; input.len() * wide];
            for (i, &byte) in input.iter().enumerate() {
                let k = key[i % key.len()] as u64;
                let v = iv.map_or(0, |iv| iv[i % iv.len()] as u64);
                write_word(&mut output, i * wide, WordSize::W32, byte as u64 + k + v);
            }
            Ok(output)
        }
        Direction::Decrypt => {
            debug_assert!(
                input.len().is_multiple_of(wide),
                "widened body not a whole number of 32-bit words"
            );
            let num_words = input.len() / wide;
            let mut output = vec![0u8; num_words];
            for (i, out) in output.iter_mut().enumerate() {
                let x = read_word(input, i * wide, WordSize::W32);
                let k = key[i % key.len()] as u64;
                let v = iv.map_or(0, |iv| iv[i % iv.len()] as u64);
                *out = ((x + range - k - v) % range) as u8;
            }
            Ok(output)
        }
    }
}

/// Derives the per-message keystream key by encrypting the static key
/// under the IV.
///
/// `derived = transform(input = key, key = iv, iv = None, Encrypt)`, so
/// the derived key has the same length as `key` and never repeats
/// across messages as long as the IV is fresh. Deterministic for fixed
/// `(key, iv)`, which is what lets the decrypt side rebuild it.
///
/// # Errors
/// Returns [`Error::InvalidKey`] if `iv` is empty or not word-aligned
/// (the IV stands in as the key of the inner transform call).
pub fn derive_key(key: &[u8], iv: &[u8], word: WordSize) -> Result<Vec<u8>> {
    transform(key, iv, None, Direction::Encrypt, word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_vector_byte_words() {
        // Word size 1, IV [0,0,0,0], key [0x01,0x02], plaintext "ABC".
        let key = [0x01u8, 0x02];
        let iv = [0u8; 4];
        let plaintext = [0x41u8, 0x42, 0x43];

        // All-zero IV leaves the derived key unchanged.
        let derived = derive_key(&key, &iv, WordSize::W8).unwrap();
        assert_eq!(derived, key);

        let body = transform(&plaintext, &derived, Some(&iv), Direction::Encrypt, WordSize::W8)
            .unwrap();
        assert_eq!(body, [0x42, 0x44, 0x44]);

        let back = transform(&body, &derived, Some(&iv), Direction::Decrypt, WordSize::W8)
            .unwrap();
        assert_eq!(back, plaintext);
    }

    #[test]
    fn test_encrypt_wraps_modulo_range() {
        let out = transform(&[0xFF], &[0x02], None, Direction::Encrypt, WordSize::W8).unwrap();
        assert_eq!(out, [0x01]);
    }

    #[test]
    fn test_decrypt_normalizes_negative_difference() {
        // 0x00 - 0x01 must wrap to 0xFF, not underflow.
        let out = transform(&[0x00], &[0x01], None, Direction::Decrypt, WordSize::W8).unwrap();
        assert_eq!(out, [0xFF]);
    }

    #[test]
    fn test_missing_iv_means_zero_contribution() {
        let input = [0x10u8, 0x20, 0x30];
        let key = [0x05u8];
        let none = transform(&input, &key, None, Direction::Encrypt, WordSize::W8).unwrap();
        let zeros = transform(&input, &key, Some(&[0, 0]), Direction::Encrypt, WordSize::W8)
            .unwrap();
        let empty = transform(&input, &key, Some(&[]), Direction::Encrypt, WordSize::W8).unwrap();
        assert_eq!(none, zeros);
        assert_eq!(none, empty);
    }

    #[test]
    fn test_key_cycles_at_word_granularity() {
        // One 16-bit key word over four input words: every output word
        // must differ from its input word by the same constant.
        let input = [0x00u8, 0x10, 0x01, 0x10, 0x02, 0x10, 0x03, 0x10];
        let key = [0x34u8, 0x12];
        let out = transform(&input, &key, None, Direction::Encrypt, WordSize::W16).unwrap();
        for i in 0..4 {
            let x = read_word(&input, i * 2, WordSize::W16);
            let y = read_word(&out, i * 2, WordSize::W16);
            assert_eq!(
                (y + WordSize::W16.range() - x) % WordSize::W16.range(),
                0x1234,
                "word {} not shifted by the key constant",
                i
            );
        }
    }

    #[test]
    fn test_iv_cycles_independently_of_key() {
        // Key of 1 word, IV of 2 words: contribution at word i is
        // key[0] + iv[i % 2].
        let input = [0u8; 4];
        let key = [0x10u8];
        let iv = [0x01u8, 0x02];
        let out = transform(&input, &key, Some(&iv), Direction::Encrypt, WordSize::W8).unwrap();
        assert_eq!(out, [0x11, 0x12, 0x11, 0x12]);
    }

    #[test]
    fn test_transform_is_deterministic() {
        let input = [7u8, 13, 29, 31];
        let key = [3u8, 5];
        let iv = [11u8, 17, 19, 23];
        let a = transform(&input, &key, Some(&iv), Direction::Encrypt, WordSize::W8).unwrap();
        let b = transform(&input, &key, Some(&iv), Direction::Encrypt, WordSize::W8).unwrap();
        assert_eq!(a, b, "pure function must repeat itself");
    }

    #[test]
    fn test_empty_key_rejected() {
        assert_eq!(
            transform(&[1, 2], &[], None, Direction::Encrypt, WordSize::W8),
            Err(Error::InvalidKey)
        );
        assert_eq!(
            transform_widened(&[1, 2], &[], None, Direction::Encrypt),
            Err(Error::InvalidKey)
        );
    }

    #[test]
    fn test_unaligned_key_rejected() {
        assert_eq!(
            transform(&[1, 2, 3, 4], &[1, 2, 3], None, Direction::Encrypt, WordSize::W16),
            Err(Error::InvalidKey)
        );
    }

    #[test]
    fn test_roundtrip_all_word_sizes() {
        let input: Vec<u8> = (0u8..=255).collect();
        let key = [0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x23, 0x45, 0x67];
        let iv = [9u8, 8, 7, 6, 5, 4, 3, 2];
        for word in [WordSize::W8, WordSize::W16, WordSize::W32] {
            let enc = transform(&input, &key, Some(&iv), Direction::Encrypt, word).unwrap();
            assert_eq!(enc.len(), input.len());
            let dec = transform(&enc, &key, Some(&iv), Direction::Decrypt, word).unwrap();
            assert_eq!(dec, input, "roundtrip failed for {:?}", word);
        }
    }

    #[test]
    fn test_derived_key_same_length_as_key() {
        let key = [1u8, 2, 3, 4, 5, 6];
        let iv = [0x40u8, 0x41, 0x42, 0x43];
        let derived = derive_key(&key, &iv, WordSize::W8).unwrap();
        assert_eq!(derived.len(), key.len());
        assert_ne!(derived, key, "non-zero IV must change the key");
    }

    #[test]
    fn test_derived_key_differs_per_iv() {
        let key = [1u8, 2, 3, 4];
        let a = derive_key(&key, &[0x10, 0x20, 0x30, 0x40], WordSize::W8).unwrap();
        let b = derive_key(&key, &[0x11, 0x20, 0x30, 0x40], WordSize::W8).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_widened_expansion_and_roundtrip() {
        let input = [0x41u8, 0x42, 0x43, 0xFF, 0x00];
        let key = [0x01u8, 0x02];
        let iv = [0x0Au8, 0x0B, 0x0C, 0x0D];
        let wide = transform_widened(&input, &key, Some(&iv), Direction::Encrypt).unwrap();
        assert_eq!(wide.len(), input.len() * 4, "one 32-bit word per input byte");
        let back = transform_widened(&wide, &key, Some(&iv), Direction::Decrypt).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn test_widened_words_carry_byte_sums() {
        // 0x41 + 0x01 + 0x0A = 0x4C as a little-endian 32-bit word.
        let wide =
            transform_widened(&[0x41], &[0x01], Some(&[0x0A]), Direction::Encrypt).unwrap();
        assert_eq!(wide, [0x4C, 0x00, 0x00, 0x00]);
    }
}
