//! Cryptan Cipher: classical cipher primitives
//!
//! The keyed transforms the cryptanalysis engine treats as a black box,
//! together with the English sample material used to exercise it.
//!
//! # Modules
//! - `ciphers` - Rotation, Affine, Vigenère and Substitution transforms
//! - `keys` - Key representation for each cipher family
//! - `corpus` - Embedded English passages and the word dictionary
//! - `sampler` - Random ciphertext samples and the plaintext oracle
//!
//! All text is handled as bytes. ASCII letters are transformed with their
//! case preserved, every other byte passes through untouched.

pub mod ciphers;
pub mod keys;
pub mod corpus;
pub mod sampler;

pub use ciphers::{Cipher, AFFINE_MULTIPLIERS};
pub use keys::CipherKey;
pub use corpus::{Dictionary, DictWord};
pub use sampler::{check_plaintext, letter_agreement, Sample, Sampler, Verdict};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of symbols in the alphabet every cipher works over
pub const ALPHABET_SIZE: usize = 26;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unknown cipher: {0}")]
    UnknownCipher(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Cipher families the engine knows how to attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherKind {
    Rotation,
    Affine,
    Vigenere,
    Substitution,
}

impl CipherKind {
    /// Every kind, in the order the trial harness walks them
    pub const ALL: [CipherKind; 4] = [
        CipherKind::Rotation,
        CipherKind::Affine,
        CipherKind::Vigenere,
        CipherKind::Substitution,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CipherKind::Rotation => "ROT-X Cipher",
            CipherKind::Affine => "Affine Cipher",
            CipherKind::Vigenere => "Vigenère Cipher",
            CipherKind::Substitution => "Substitution Cipher",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            CipherKind::Rotation => "rotation",
            CipherKind::Affine => "affine",
            CipherKind::Vigenere => "vigenere",
            CipherKind::Substitution => "substitution",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            CipherKind::Rotation | CipherKind::Affine | CipherKind::Substitution => {
                "Monoalphabetic"
            }
            CipherKind::Vigenere => "Polyalphabetic",
        }
    }
}

impl fmt::Display for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for CipherKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "rotation" | "rot" | "rotx" | "caesar" => Ok(CipherKind::Rotation),
            "affine" | "affi" => Ok(CipherKind::Affine),
            "vigenere" | "vige" => Ok(CipherKind::Vigenere),
            "substitution" | "subs" => Ok(CipherKind::Substitution),
            other => Err(Error::UnknownCipher(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!("ROTX".parse::<CipherKind>().unwrap(), CipherKind::Rotation);
        assert_eq!("caesar".parse::<CipherKind>().unwrap(), CipherKind::Rotation);
        assert_eq!(" vige ".parse::<CipherKind>().unwrap(), CipherKind::Vigenere);
        assert!(matches!(
            "playfair".parse::<CipherKind>(),
            Err(Error::UnknownCipher(_))
        ));
    }

    #[test]
    fn test_kind_display_round_trips() {
        for kind in CipherKind::ALL {
            assert_eq!(kind.to_string().parse::<CipherKind>().unwrap(), kind);
        }
    }
}
