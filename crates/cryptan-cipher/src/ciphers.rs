//! Classic Ciphers
//!
//! Rotation, Affine, Vigenère and general Substitution over the 26-letter
//! alphabet. The decryptions that key searches call in a loop also come as
//! `_into` variants writing into a caller-owned buffer, so one allocation
//! serves every trial.

use crate::{CipherKey, Error, Result, ALPHABET_SIZE};

/// Multiplicative affine constants: every residue in [1, 26) coprime to 26
pub const AFFINE_MULTIPLIERS: [u8; 12] = [1, 3, 5, 7, 9, 11, 15, 17, 19, 21, 23, 25];

pub struct Cipher;

impl Cipher {
    // ═══════════════════════════════════════════════════════════
    // ROTATION (ROT-X / CAESAR)
    // ═══════════════════════════════════════════════════════════

    pub fn rotation_encrypt(input: &[u8], shift: u8) -> Vec<u8> {
        let mut out = Vec::with_capacity(input.len());
        Self::rotate_into(input, shift, &mut out);
        out
    }

    pub fn rotation_decrypt(input: &[u8], shift: u8) -> Vec<u8> {
        let mut out = Vec::with_capacity(input.len());
        Self::rotation_decrypt_into(input, shift, &mut out);
        out
    }

    pub fn rotation_decrypt_into(input: &[u8], shift: u8, out: &mut Vec<u8>) {
        let back = (ALPHABET_SIZE as u8 - shift % ALPHABET_SIZE as u8) % ALPHABET_SIZE as u8;
        Self::rotate_into(input, back, out);
    }

    /// Add `shift` to every letter, wrapping within its case
    pub fn rotate_into(input: &[u8], shift: u8, out: &mut Vec<u8>) {
        let shift = shift % ALPHABET_SIZE as u8;
        map_letters_into(input, out, |_, x| (x + shift) % ALPHABET_SIZE as u8);
    }

    // ═══════════════════════════════════════════════════════════
    // AFFINE
    // ═══════════════════════════════════════════════════════════

    pub fn affine_encrypt(input: &[u8], a: u8, b: u8) -> Result<Vec<u8>> {
        if gcd(a as u32, ALPHABET_SIZE as u32) != 1 {
            return Err(Error::InvalidKey(format!("'a' = {a} must be coprime to 26")));
        }
        let (a, b) = (a as u32, b as u32 % ALPHABET_SIZE as u32);

        let mut out = Vec::with_capacity(input.len());
        map_letters_into(input, &mut out, |_, x| {
            ((a * x as u32 + b) % ALPHABET_SIZE as u32) as u8
        });
        Ok(out)
    }

    pub fn affine_decrypt(input: &[u8], a: u8, b: u8) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(input.len());
        Self::affine_decrypt_into(input, a, b, &mut out)?;
        Ok(out)
    }

    /// x = a⁻¹ · (y − b) mod 26 for every letter y
    pub fn affine_decrypt_into(input: &[u8], a: u8, b: u8, out: &mut Vec<u8>) -> Result<()> {
        let a_inv = inverse_modulo(a as u32, ALPHABET_SIZE as u32)
            .ok_or_else(|| Error::InvalidKey(format!("No modular inverse for 'a' = {a}")))?;
        let b = b as u32 % ALPHABET_SIZE as u32;

        map_letters_into(input, out, |_, y| {
            ((a_inv * (y as u32 + ALPHABET_SIZE as u32 - b)) % ALPHABET_SIZE as u32) as u8
        });
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════
    // VIGENÈRE
    // ═══════════════════════════════════════════════════════════
    //
    // The key schedule advances on every byte position, letter or not,
    // so position i is always enciphered with key[i % key.len()].

    pub fn vigenere_encrypt(input: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        check_vigenere_key(key)?;
        let mut out = Vec::with_capacity(input.len());
        map_letters_into(input, &mut out, |i, x| {
            (x + key[i % key.len()]) % ALPHABET_SIZE as u8
        });
        Ok(out)
    }

    pub fn vigenere_decrypt(input: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        check_vigenere_key(key)?;
        let mut out = Vec::with_capacity(input.len());
        map_letters_into(input, &mut out, |i, y| {
            (y + ALPHABET_SIZE as u8 - key[i % key.len()]) % ALPHABET_SIZE as u8
        });
        Ok(out)
    }

    // ═══════════════════════════════════════════════════════════
    // SUBSTITUTION
    // ═══════════════════════════════════════════════════════════
    //
    // A substitution key is the decryption table: mapping[c] is the
    // plaintext letter for ciphertext letter c.

    pub fn substitution_encrypt(input: &[u8], mapping: &[u8; ALPHABET_SIZE]) -> Result<Vec<u8>> {
        check_permutation(mapping)?;
        let forward = invert_mapping(mapping);
        let mut out = Vec::with_capacity(input.len());
        map_letters_into(input, &mut out, |_, x| forward[x as usize]);
        Ok(out)
    }

    pub fn substitution_decrypt(input: &[u8], mapping: &[u8; ALPHABET_SIZE]) -> Result<Vec<u8>> {
        check_permutation(mapping)?;
        let mut out = Vec::with_capacity(input.len());
        Self::substitution_decrypt_into(input, mapping, &mut out);
        Ok(out)
    }

    /// Apply a mapping without validating it; callers own the permutation
    pub fn substitution_decrypt_into(
        input: &[u8],
        mapping: &[u8; ALPHABET_SIZE],
        out: &mut Vec<u8>,
    ) {
        map_letters_into(input, out, |_, y| mapping[y as usize]);
    }

    // ═══════════════════════════════════════════════════════════
    // KEYED DISPATCH
    // ═══════════════════════════════════════════════════════════

    pub fn encrypt(key: &CipherKey, input: &[u8]) -> Result<Vec<u8>> {
        match key {
            CipherKey::Rotation(shift) => Ok(Self::rotation_encrypt(input, *shift)),
            CipherKey::Affine { a, b } => Self::affine_encrypt(input, *a, *b),
            CipherKey::Vigenere(shifts) => Self::vigenere_encrypt(input, shifts),
            CipherKey::Substitution(mapping) => Self::substitution_encrypt(input, mapping),
        }
    }

    pub fn decrypt(key: &CipherKey, input: &[u8]) -> Result<Vec<u8>> {
        match key {
            CipherKey::Rotation(shift) => Ok(Self::rotation_decrypt(input, *shift)),
            CipherKey::Affine { a, b } => Self::affine_decrypt(input, *a, *b),
            CipherKey::Vigenere(shifts) => Self::vigenere_decrypt(input, shifts),
            CipherKey::Substitution(mapping) => Self::substitution_decrypt(input, mapping),
        }
    }
}

/// Rewrite every ASCII letter through `f(position, index)`, keeping case.
/// `f` receives the letter's alphabet index and must return one in [0, 26).
fn map_letters_into(input: &[u8], out: &mut Vec<u8>, mut f: impl FnMut(usize, u8) -> u8) {
    out.clear();
    out.reserve(input.len());
    out.extend(input.iter().enumerate().map(|(i, &c)| {
        if c.is_ascii_lowercase() {
            b'a' + f(i, c - b'a')
        } else if c.is_ascii_uppercase() {
            b'A' + f(i, c - b'A')
        } else {
            c
        }
    }));
}

fn check_vigenere_key(key: &[u8]) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidKey("Vigenère key must be non-empty".into()));
    }
    if let Some(bad) = key.iter().find(|&&k| k as usize >= ALPHABET_SIZE) {
        return Err(Error::InvalidKey(format!("Vigenère shift {bad} out of range")));
    }
    Ok(())
}

fn check_permutation(mapping: &[u8; ALPHABET_SIZE]) -> Result<()> {
    if is_permutation(mapping) {
        Ok(())
    } else {
        Err(Error::InvalidKey("Substitution mapping must be a permutation of A-Z".into()))
    }
}

pub fn is_permutation(mapping: &[u8; ALPHABET_SIZE]) -> bool {
    let mut seen = [false; ALPHABET_SIZE];
    for &m in mapping {
        match seen.get_mut(m as usize) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

/// Swap direction of a mapping (decryption table ⇄ encryption table)
pub fn invert_mapping(mapping: &[u8; ALPHABET_SIZE]) -> [u8; ALPHABET_SIZE] {
    let mut inverse = [0u8; ALPHABET_SIZE];
    for (from, &to) in mapping.iter().enumerate() {
        inverse[to as usize % ALPHABET_SIZE] = from as u8;
    }
    inverse
}

pub fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// x with a·x ≡ 1 (mod m), or `None` when gcd(a, m) ≠ 1
pub fn inverse_modulo(a: u32, m: u32) -> Option<u32> {
    if m == 0 {
        return None;
    }
    let (mut r0, mut r1) = (m as i64, (a % m) as i64);
    let (mut t0, mut t1) = (0i64, 1i64);

    while r1 != 0 {
        let q = r0 / r1;
        (r0, r1) = (r1, r0 - q * r1);
        (t0, t1) = (t1, t0 - q * t1);
    }

    if r0 == 1 {
        Some(t0.rem_euclid(m as i64) as u32)
    } else {
        None
    }
}
