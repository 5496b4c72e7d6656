//! Vigenere engine facade: key generation, framing, encrypt and decrypt.
//!
//! Drives the transform end to end. Encryption pads the plaintext to a
//! word boundary, draws a fresh IV, folds it into the key, transforms,
//! and emits `[padding count]? ++ IV ++ body`. Decryption parses the
//! frame, rebuilds the derived key from the embedded IV, and reverses
//! the transform.

use log::{debug, trace};
use rand::rngs::{OsRng, SmallRng};
use rand::{RngCore, SeedableRng};
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::options::{EngineOptions, RandomSource, WordSize, PERMITTED_IV_LENGTHS};
use crate::transform::{derive_key, transform, transform_widened, Direction};

/// Filler byte appended to reach word alignment (ASCII space).
/// The value is arbitrary; the padding-count byte in the frame is what
/// makes it reversible.
const PAD_FILLER: u8 = 0x20;

/// Width of the ciphertext words emitted by the widened variant.
const WIDENED_BYTES: usize = 4;

/// Repeating-key word cipher with a self-derived keystream and an
/// embedded IV.
///
/// The engine holds only immutable configuration, so a single instance
/// can serve concurrent `encrypt`/`decrypt` calls from multiple threads;
/// each call owns its buffers and randomness.
///
/// # Security
///
/// This is a modular add/subtract cipher with a short repeating key. It
/// is trivially breakable and carries no authentication tag. Use it for
/// obfuscation and puzzles, never to protect secrets.
///
/// # Examples
///
/// ```
/// use polyalpha::Vigenere;
///
/// let engine = Vigenere::new();
/// let key = engine.generate_key(16);
///
/// let ciphertext = engine.encrypt(b"attack at dawn", &key).unwrap();
/// let plaintext = engine.decrypt(&ciphertext, &key).unwrap();
/// assert_eq!(plaintext, b"attack at dawn");
/// ```
///
/// Two encryptions of the same message differ, because each draws a
/// fresh IV:
///
/// ```
/// use polyalpha::Vigenere;
///
/// let engine = Vigenere::new();
/// let key = engine.generate_key(16);
/// let a = engine.encrypt(b"same message", &key).unwrap();
/// let b = engine.encrypt(b"same message", &key).unwrap();
/// assert_ne!(a, b);
/// ```
pub struct Vigenere {
    options: EngineOptions,
}

impl Default for Vigenere {
    fn default() -> Self {
        Self::new()
    }
}

impl Vigenere {
    /// Creates an engine with the default options: 16-byte IV, 1-byte
    /// words, no widening, fast non-cryptographic randomness.
    ///
    /// # Examples
    ///
    /// ```
    /// use polyalpha::Vigenere;
    ///
    /// let engine = Vigenere::new();
    /// assert_eq!(engine.options().iv_length, 16);
    /// ```
    pub fn new() -> Self {
        Vigenere {
            options: EngineOptions::default(),
        }
    }

    /// Creates an engine with explicit options.
    ///
    /// # Parameters
    /// - `options`: Engine configuration; validated here so the
    ///   operation methods never re-check it.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfiguration`] if the IV length is not
    /// one of [`PERMITTED_IV_LENGTHS`], or if `widen` is combined with
    /// a word size other than [`WordSize::W8`].
    ///
    /// # Examples
    ///
    /// ```
    /// use polyalpha::{EngineOptions, Vigenere};
    ///
    /// let result = Vigenere::with_options(EngineOptions {
    ///     iv_length: 7,
    ///     ..EngineOptions::default()
    /// });
    /// assert!(result.is_err());
    /// ```
    pub fn with_options(options: EngineOptions) -> Result<Self> {
        if !PERMITTED_IV_LENGTHS.contains(&options.iv_length) {
            return Err(Error::InvalidConfiguration(format!(
                "IV length {} is not supported, choose one of {:?}",
                options.iv_length, PERMITTED_IV_LENGTHS
            )));
        }
        if options.widen && options.word_size != WordSize::W8 {
            return Err(Error::InvalidConfiguration(format!(
                "word-width promotion requires 1-byte input words, got {:?}",
                options.word_size
            )));
        }
        Ok(Vigenere { options })
    }

    /// Returns the engine's configuration.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Generates a random key of `length` bytes, rounded up to the next
    /// word boundary.
    ///
    /// Passing `length == 0` falls back to the configured IV length.
    /// The bytes come from the configured [`RandomSource`]; with the
    /// default [`RandomSource::Fast`] they are **not** suitable for
    /// security-sensitive keys.
    ///
    /// # Parameters
    /// - `length`: Requested key length in bytes.
    ///
    /// # Returns
    /// Raw random bytes, not further encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use polyalpha::{EngineOptions, Vigenere, WordSize};
    ///
    /// let engine = Vigenere::with_options(EngineOptions {
    ///     word_size: WordSize::W32,
    ///     ..EngineOptions::default()
    /// })
    /// .unwrap();
    /// // 5 rounds up to the next 4-byte word boundary.
    /// assert_eq!(engine.generate_key(5).len(), 8);
    /// ```
    pub fn generate_key(&self, length: usize) -> Vec<u8> {
        let requested = if length == 0 {
            self.options.iv_length
        } else {
            length
        };
        let width = self.options.word_size.bytes();
        let rounded = requested.div_ceil(width) * width;
        let mut key = vec![0u8; rounded];
        self.fill_random(&mut key);
        trace!("generated {} key bytes ({} requested)", rounded, requested);
        key
    }

    /// Encrypts `plaintext` under `key` with a fresh random IV.
    ///
    /// The same plaintext and key never produce the same ciphertext
    /// twice (barring IV collision), because each call draws a new IV
    /// and folds it into the key before the transform.
    ///
    /// # Parameters
    /// - `plaintext`: Bytes to encrypt; read only.
    /// - `key`: Key bytes, at least 1 byte; keys that are not a whole
    ///   number of words are filled up to the boundary internally.
    ///
    /// # Returns
    /// The wire frame `[padding count]? ++ IV ++ body`. The padding
    /// count byte is present exactly when the word size is wider than
    /// one byte.
    ///
    /// # Errors
    /// Returns [`Error::InvalidKey`] if the key is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use polyalpha::Vigenere;
    ///
    /// let engine = Vigenere::new();
    /// let ciphertext = engine.encrypt(b"hello", b"key").unwrap();
    /// // 16-byte IV prefix plus one body byte per plaintext byte.
    /// assert_eq!(ciphertext.len(), 16 + 5);
    /// ```
    pub fn encrypt(&self, plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        let iv = self.generate_key(self.options.iv_length);
        self.encrypt_with_iv(plaintext, key, &iv)
    }

    /// Encrypts `plaintext` under `key` with a caller-supplied IV.
    ///
    /// Exists for reproducibility: with a fixed IV the whole pipeline
    /// is deterministic, which is what tests and debugging need.
    /// Production callers should prefer [`encrypt`](Self::encrypt),
    /// which draws a fresh IV per message.
    ///
    /// # Errors
    /// Returns [`Error::InvalidKey`] if the key is empty, or
    /// [`Error::InvalidConfiguration`] if `iv` is not exactly the
    /// configured IV length.
    pub fn encrypt_with_iv(&self, plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        if key.is_empty() {
            return Err(Error::InvalidKey);
        }
        if iv.len() != self.options.iv_length {
            return Err(Error::InvalidConfiguration(format!(
                "IV must be exactly {} bytes, got {}",
                self.options.iv_length,
                iv.len()
            )));
        }

        let width = self.options.word_size.bytes();
        let pad_count = (width - plaintext.len() % width) % width;
        let mut padded = Vec::with_capacity(plaintext.len() + pad_count);
        padded.extend_from_slice(plaintext);
        padded.resize(plaintext.len() + pad_count, PAD_FILLER);

        let mut derived = self.derived_key(key, iv)?;
        let body = if self.options.widen {
            transform_widened(&padded, &derived, Some(iv), Direction::Encrypt)?
        } else {
            transform(&padded, &derived, Some(iv), Direction::Encrypt, self.options.word_size)?
        };
        derived.zeroize();
        padded.zeroize();

        let marker = self.marker_len();
        let mut frame = Vec::with_capacity(marker + iv.len() + body.len());
        if marker == 1 {
            frame.push(pad_count as u8);
        }
        frame.extend_from_slice(iv);
        frame.extend_from_slice(&body);
        debug!(
            "encrypted {} plaintext bytes ({} padding) into a {} byte frame",
            plaintext.len(),
            pad_count,
            frame.len()
        );
        Ok(frame)
    }

    /// Decrypts a frame produced by [`encrypt`](Self::encrypt) under
    /// the same key and options.
    ///
    /// # Parameters
    /// - `ciphertext`: The wire frame; read only.
    /// - `key`: Key bytes, at least 1 byte.
    ///
    /// # Returns
    /// The recovered plaintext with any alignment padding stripped.
    ///
    /// # Errors
    /// Returns [`Error::InvalidKey`] if the key is empty, or
    /// [`Error::MalformedCiphertext`] if the frame is shorter than the
    /// minimum, carries an impossible padding count, or has a body that
    /// does not split into whole words.
    ///
    /// Decrypting with the *wrong* key is not detected: the frame has
    /// no integrity check, so the output is silently garbage.
    ///
    /// # Examples
    ///
    /// ```
    /// use polyalpha::{Error, Vigenere};
    ///
    /// let engine = Vigenere::new();
    /// // Shorter than the 16-byte IV prefix.
    /// let result = engine.decrypt(&[0u8; 5], b"key");
    /// assert!(matches!(result, Err(Error::MalformedCiphertext { .. })));
    /// ```
    pub fn decrypt(&self, ciphertext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        if key.is_empty() {
            return Err(Error::InvalidKey);
        }

        let width = self.options.word_size.bytes();
        let marker = self.marker_len();
        let min_frame = marker + self.options.iv_length;
        if ciphertext.len() < min_frame {
            return Err(Error::MalformedCiphertext {
                context: "minimum frame length",
                expected: min_frame,
                actual: ciphertext.len(),
            });
        }

        let (pad_count, rest) = if marker == 1 {
            (ciphertext[0] as usize, &ciphertext[1..])
        } else {
            (0, ciphertext)
        };
        if marker == 1 && pad_count >= width {
            return Err(Error::MalformedCiphertext {
                context: "padding count",
                expected: width - 1,
                actual: pad_count,
            });
        }

        let (iv, body) = rest.split_at(self.options.iv_length);
        let body_word = if self.options.widen {
            WIDENED_BYTES
        } else {
            width
        };
        if !body.len().is_multiple_of(body_word) {
            return Err(Error::MalformedCiphertext {
                context: "body word alignment",
                expected: body.len() / body_word * body_word,
                actual: body.len(),
            });
        }

        let mut derived = self.derived_key(key, iv)?;
        let mut padded = if self.options.widen {
            transform_widened(body, &derived, Some(iv), Direction::Decrypt)?
        } else {
            transform(body, &derived, Some(iv), Direction::Decrypt, self.options.word_size)?
        };
        derived.zeroize();

        if pad_count > padded.len() {
            return Err(Error::MalformedCiphertext {
                context: "padding count",
                expected: padded.len(),
                actual: pad_count,
            });
        }
        padded.truncate(padded.len() - pad_count);
        debug!(
            "decrypted a {} byte frame into {} plaintext bytes",
            ciphertext.len(),
            padded.len()
        );
        Ok(padded)
    }

    // ──────── Internal helpers ────────

    /// Length of the padding-count marker in the frame: present exactly
    /// when words are wider than one byte.
    fn marker_len(&self) -> usize {
        usize::from(self.options.word_size.bytes() > 1)
    }

    /// Derives the per-message key by encrypting the user key under the
    /// IV. Keys that are not a whole number of words are filled up to
    /// the boundary with [`PAD_FILLER`] first; the copy is zeroized.
    fn derived_key(&self, key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        let word = self.options.word_size;
        let width = word.bytes();
        if key.len().is_multiple_of(width) {
            derive_key(key, iv, word)
        } else {
            let aligned_len = key.len().div_ceil(width) * width;
            let mut aligned = Vec::with_capacity(aligned_len);
            aligned.extend_from_slice(key);
            aligned.resize(aligned_len, PAD_FILLER);
            let derived = derive_key(&aligned, iv, word);
            aligned.zeroize();
            derived
        }
    }

    /// Fills `buf` from the configured randomness source.
    fn fill_random(&self, buf: &mut [u8]) {
        match self.options.random {
            RandomSource::Fast => SmallRng::from_entropy().fill_bytes(buf),
            RandomSource::Os => OsRng.fill_bytes(buf),
        }
    }
}
