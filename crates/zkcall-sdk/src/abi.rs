// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Solidity ABI framing for `verifyProof`.
//!
//! All four parameters are fixed-size arrays of `uint256`, so the call is
//! a purely static head: the 4-byte selector followed by `8 + N` words in
//! declaration order (`a`, `b` row-major, `c`, `input`). No offsets, no
//! tails.

use sha3::{Digest, Keccak256};
use zkcall_types::Word;

use crate::calldata::CallData;

pub const SELECTOR_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    #[error("selector mismatch: expected 0x{expected}, found 0x{found}")]
    Selector { expected: String, found: String },

    #[error("expected {expected} bytes, found {found}")]
    Length { expected: usize, found: usize },

    #[error("not an ABI-encoded bool")]
    NotBool,
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Canonical signature of the generated verifier for `n` public inputs.
pub fn verify_proof_signature(n: usize) -> String {
    format!("verifyProof(uint256[2],uint256[2][2],uint256[2],uint256[{n}])")
}

pub fn selector(signature: &str) -> [u8; SELECTOR_LEN] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Byte length of a `verifyProof` call with `n` public inputs.
pub fn verify_call_len(n: usize) -> usize {
    SELECTOR_LEN + (8 + n) * Word::BYTES
}

pub fn encode_verify_call(calldata: &CallData) -> Vec<u8> {
    let n = calldata.inputs.len();
    let mut out = Vec::with_capacity(verify_call_len(n));
    out.extend_from_slice(&selector(&verify_proof_signature(n)));
    let words = calldata
        .a
        .iter()
        .chain(calldata.b.iter().flatten())
        .chain(calldata.c.iter())
        .chain(calldata.inputs.iter());
    for word in words {
        out.extend_from_slice(word.as_bytes());
    }
    out
}

/// Inverse of [`encode_verify_call`], for a verifier expecting `n` inputs.
pub fn decode_verify_call(data: &[u8], n: usize) -> Result<CallData, AbiError> {
    let expected_len = verify_call_len(n);
    if data.len() != expected_len {
        return Err(AbiError::Length { expected: expected_len, found: data.len() });
    }
    let expected = selector(&verify_proof_signature(n));
    if data[..SELECTOR_LEN] != expected {
        return Err(AbiError::Selector {
            expected: hex::encode(expected),
            found: hex::encode(&data[..SELECTOR_LEN]),
        });
    }

    let words: Vec<Word> = data[SELECTOR_LEN..]
        .chunks_exact(Word::BYTES)
        .filter_map(Word::from_slice)
        .collect();
    Ok(CallData {
        a: [words[0], words[1]],
        b: [[words[2], words[3]], [words[4], words[5]]],
        c: [words[6], words[7]],
        inputs: words[8..].to_vec(),
    })
}

pub fn encode_bool(value: bool) -> Vec<u8> {
    let mut out = vec![0u8; Word::BYTES];
    out[Word::BYTES - 1] = value as u8;
    out
}

pub fn decode_bool(data: &[u8]) -> Result<bool, AbiError> {
    if data.len() != Word::BYTES {
        return Err(AbiError::Length { expected: Word::BYTES, found: data.len() });
    }
    if data[..Word::BYTES - 1].iter().any(|b| *b != 0) {
        return Err(AbiError::NotBool);
    }
    match data[Word::BYTES - 1] {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(AbiError::NotBool),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calldata::build_calldata;
    use zkcall_types::{FieldElement, G1Point, G2Point, Proof};

    fn fe(v: u64) -> FieldElement {
        FieldElement::from(v)
    }

    fn sample(inputs: &[u64]) -> CallData {
        let proof = Proof {
            a: G1Point::new(fe(1), fe(2)),
            b: G2Point::new([fe(3), fe(4)], [fe(5), fe(6)]),
            c: G1Point::new(fe(7), fe(8)),
        };
        let signals = inputs.iter().map(|v| fe(*v)).collect();
        build_calldata(&proof, &signals).unwrap()
    }

    #[test]
    fn keccak_of_empty_input() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn selector_depends_on_input_count() {
        assert_ne!(
            selector(&verify_proof_signature(1)),
            selector(&verify_proof_signature(2))
        );
    }

    #[test]
    fn call_layout_is_static_head() {
        let cd = sample(&[12]);
        let data = encode_verify_call(&cd);
        assert_eq!(data.len(), 4 + 9 * 32);
        assert_eq!(data[..4], selector(&verify_proof_signature(1)));

        // a, then b row-major (already swapped), then c, then inputs
        let word = |i: usize| data[4 + i * 32 + 31];
        let last_bytes: Vec<u8> = (0..9).map(word).collect();
        assert_eq!(last_bytes, vec![1, 2, 4, 3, 6, 5, 7, 8, 12]);
    }

    #[test]
    fn decode_inverts_encode() {
        let cd = sample(&[12, 7]);
        let decoded = decode_verify_call(&encode_verify_call(&cd), 2).unwrap();
        assert_eq!(decoded, cd);
    }

    #[test]
    fn decode_rejects_wrong_arity() {
        let data = encode_verify_call(&sample(&[12]));
        assert_eq!(
            decode_verify_call(&data, 2),
            Err(AbiError::Length { expected: 4 + 10 * 32, found: 4 + 9 * 32 })
        );
    }

    #[test]
    fn decode_rejects_foreign_selector() {
        let mut data = encode_verify_call(&sample(&[12]));
        data[0] ^= 0xff;
        assert!(matches!(decode_verify_call(&data, 1), Err(AbiError::Selector { .. })));
    }

    #[test]
    fn bool_roundtrip_and_strictness() {
        assert_eq!(decode_bool(&encode_bool(true)), Ok(true));
        assert_eq!(decode_bool(&encode_bool(false)), Ok(false));

        let mut two = encode_bool(false);
        two[31] = 2;
        assert_eq!(decode_bool(&two), Err(AbiError::NotBool));

        let mut dirty = encode_bool(true);
        dirty[0] = 1;
        assert_eq!(decode_bool(&dirty), Err(AbiError::NotBool));

        assert!(matches!(decode_bool(&[1]), Err(AbiError::Length { .. })));
    }
}
