//! Cipher keys
//!
//! One representation per cipher family. Keys print in the same textual
//! form `CipherKey::parse` accepts.

use crate::ciphers::{gcd, is_permutation};
use crate::{CipherKind, Error, Result, ALPHABET_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cipher", content = "key", rename_all = "lowercase")]
pub enum CipherKey {
    /// Additive shift in [0, 26)
    Rotation(u8),
    /// `a` coprime to 26, `b` in [0, 26)
    Affine { a: u8, b: u8 },
    /// Per-position shifts, repeated over the text
    Vigenere(Vec<u8>),
    /// Decryption table: entry `c` is the plaintext letter for ciphertext `c`
    Substitution([u8; ALPHABET_SIZE]),
}

impl CipherKey {
    pub fn kind(&self) -> CipherKind {
        match self {
            CipherKey::Rotation(_) => CipherKind::Rotation,
            CipherKey::Affine { .. } => CipherKind::Affine,
            CipherKey::Vigenere(_) => CipherKind::Vigenere,
            CipherKey::Substitution(_) => CipherKind::Substitution,
        }
    }

    /// Parse the textual key form for `kind`:
    /// - rotation: `3` or a single letter (`D`)
    /// - affine: `5,8`
    /// - vigenere: letters (`LEMON`)
    /// - substitution: 26 letters, the plaintext for ciphertext A..Z
    pub fn parse(kind: CipherKind, text: &str) -> Result<Self> {
        let text = text.trim();
        match kind {
            CipherKind::Rotation => parse_shift(text).map(CipherKey::Rotation),
            CipherKind::Affine => {
                let parts: Vec<&str> = text
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|p| !p.is_empty())
                    .collect();
                if parts.len() != 2 {
                    return Err(Error::InvalidKey(format!(
                        "Affine key must be 'a,b', got '{text}'"
                    )));
                }
                let a = parse_number(parts[0])?;
                let b = parse_number(parts[1])?;
                if gcd(a as u32, ALPHABET_SIZE as u32) != 1 {
                    return Err(Error::InvalidKey(format!("'a' = {a} must be coprime to 26")));
                }
                Ok(CipherKey::Affine { a, b })
            }
            CipherKind::Vigenere => {
                if text.is_empty() || !text.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(Error::InvalidKey("Key must be non-empty alphabetic".into()));
                }
                Ok(CipherKey::Vigenere(
                    text.bytes().map(|b| b.to_ascii_uppercase() - b'A').collect(),
                ))
            }
            CipherKind::Substitution => {
                if text.len() != ALPHABET_SIZE || !text.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(Error::InvalidKey(
                        "Substitution key must be 26 letters".into(),
                    ));
                }
                let mut mapping = [0u8; ALPHABET_SIZE];
                for (slot, b) in mapping.iter_mut().zip(text.bytes()) {
                    *slot = b.to_ascii_uppercase() - b'A';
                }
                if !is_permutation(&mapping) {
                    return Err(Error::InvalidKey(
                        "Substitution key must use every letter exactly once".into(),
                    ));
                }
                Ok(CipherKey::Substitution(mapping))
            }
        }
    }
}

impl fmt::Display for CipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherKey::Rotation(shift) => write!(f, "{shift}"),
            CipherKey::Affine { a, b } => write!(f, "{a},{b}"),
            CipherKey::Vigenere(shifts) => {
                for &s in shifts {
                    write!(f, "{}", (b'A' + s % ALPHABET_SIZE as u8) as char)?;
                }
                Ok(())
            }
            CipherKey::Substitution(mapping) => {
                for &m in mapping {
                    write!(f, "{}", (b'A' + m % ALPHABET_SIZE as u8) as char)?;
                }
                Ok(())
            }
        }
    }
}

fn parse_number(text: &str) -> Result<u8> {
    let value: u32 = text
        .parse()
        .map_err(|_| Error::InvalidKey(format!("'{text}' is not a number")))?;
    Ok((value % ALPHABET_SIZE as u32) as u8)
}

fn parse_shift(text: &str) -> Result<u8> {
    match text.as_bytes() {
        [c] if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase() - b'A'),
        _ => parse_number(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rotation() {
        assert_eq!(CipherKey::parse(CipherKind::Rotation, "3").unwrap(), CipherKey::Rotation(3));
        assert_eq!(CipherKey::parse(CipherKind::Rotation, "d").unwrap(), CipherKey::Rotation(3));
        assert_eq!(CipherKey::parse(CipherKind::Rotation, "29").unwrap(), CipherKey::Rotation(3));
        assert!(CipherKey::parse(CipherKind::Rotation, "x1").is_err());
    }

    #[test]
    fn test_parse_affine() {
        assert_eq!(
            CipherKey::parse(CipherKind::Affine, "5, 8").unwrap(),
            CipherKey::Affine { a: 5, b: 8 }
        );
        assert!(CipherKey::parse(CipherKind::Affine, "4,8").is_err());
        assert!(CipherKey::parse(CipherKind::Affine, "5").is_err());
    }

    #[test]
    fn test_parse_vigenere() {
        assert_eq!(
            CipherKey::parse(CipherKind::Vigenere, "Lemon").unwrap(),
            CipherKey::Vigenere(vec![11, 4, 12, 14, 13])
        );
        assert!(CipherKey::parse(CipherKind::Vigenere, "le mon").is_err());
    }

    #[test]
    fn test_parse_substitution() {
        let key = CipherKey::parse(CipherKind::Substitution, "ZYXWVUTSRQPONMLKJIHGFEDCBA").unwrap();
        assert_eq!(key.kind(), CipherKind::Substitution);
        assert!(CipherKey::parse(CipherKind::Substitution, "AAXWVUTSRQPONMLKJIHGFEDCBA").is_err());
        assert!(CipherKey::parse(CipherKind::Substitution, "ABC").is_err());
    }

    #[test]
    fn test_display_parses_back() {
        let keys = [
            CipherKey::Rotation(17),
            CipherKey::Affine { a: 7, b: 20 },
            CipherKey::Vigenere(vec![2, 0, 19]),
            CipherKey::parse(CipherKind::Substitution, "QWERTYUIOPASDFGHJKLZXCVBNM").unwrap(),
        ];
        for key in keys {
            let text = key.to_string();
            assert_eq!(CipherKey::parse(key.kind(), &text).unwrap(), key, "{text}");
        }
    }

    #[test]
    fn test_serializes_with_cipher_tag() {
        let json = serde_json::to_string(&CipherKey::Affine { a: 5, b: 8 }).unwrap();
        assert_eq!(json, r#"{"cipher":"affine","key":{"a":5,"b":8}}"#);
    }
}
