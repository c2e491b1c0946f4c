// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Proof → verifier calldata encoding.
//!
//! Turns a normalized [`Proof`] and its [`PublicSignals`] into the four
//! arguments of the on-chain pairing-check verifier:
//!
//! ```text
//! verifyProof(uint256[2] a, uint256[2][2] b, uint256[2] c, uint256[N] input)
//! ```
//!
//! # Word format
//!
//! Every field element becomes one 32-byte big-endian word, left-padded
//! with zeros. Values wider than 256 bits are rejected, never truncated.
//!
//! # G2 limb order
//!
//! Provers emit each G2 coordinate as `[c0, c1]`. The verifier (and the
//! EVM pairing precompile behind it) reads `[c1, c0]`. [`encode_g2`]
//! applies that swap exactly once; see [`G2_LIMB_ORDER`].
//!
//! # Example
//!
//! ```rust
//! use zkcall_sdk::calldata::{build_calldata, encode_field_element};
//! use zkcall_types::{FieldElement, G1Point, G2Point, Proof};
//!
//! let fe = |v: u64| FieldElement::from(v);
//! let proof = Proof {
//!     a: G1Point::new(fe(1), fe(2)),
//!     b: G2Point::new([fe(3), fe(4)], [fe(5), fe(6)]),
//!     c: G1Point::new(fe(7), fe(8)),
//! };
//! let cd = build_calldata(&proof, &vec![fe(12)]).unwrap();
//! assert_eq!(cd.b[0][0], encode_field_element(&fe(4)).unwrap());
//! assert_eq!(cd.inputs, vec![encode_field_element(&fe(12)).unwrap()]);
//! ```

use serde::{Deserialize, Serialize};
use zkcall_types::{
    EncodingError, FieldElement, G1Point, G2Point, Proof, PublicSignals, Word, FIELD_ELEMENT_BITS,
};

/// Position of each native limb in the verifier's G2 pair: the verifier
/// takes limb `c1` first, then `c0`.
///
/// Fixed by the verifier's code generator; not ours to change.
pub const G2_LIMB_ORDER: [usize; 2] = [1, 0];

/// Verifier-ready arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallData {
    pub a: [Word; 2],
    /// `[[x1, x0], [y1, y0]]`
    pub b: [[Word; 2]; 2],
    pub c: [Word; 2],
    pub inputs: Vec<Word>,
}

impl CallData {
    /// Number of 32-byte words the arguments occupy.
    pub fn word_count(&self) -> usize {
        2 + 4 + 2 + self.inputs.len()
    }

    /// `snarkjs generatecall`-style argument list:
    /// `["0x..","0x.."],[["0x..","0x.."],["0x..","0x.."]],["0x..","0x.."],["0x.."]`
    pub fn to_solidity_args(&self) -> String {
        fn list(words: &[Word]) -> String {
            let quoted: Vec<String> = words.iter().map(|w| format!("\"{w}\"")).collect();
            format!("[{}]", quoted.join(","))
        }
        format!(
            "{},[{},{}],{},{}",
            list(&self.a),
            list(&self.b[0]),
            list(&self.b[1]),
            list(&self.c),
            list(&self.inputs),
        )
    }
}

/// Encode one field element as a 32-byte big-endian word.
pub fn encode_field_element(value: &FieldElement) -> Result<Word, EncodingError> {
    let bits = value.bits();
    if bits > FIELD_ELEMENT_BITS {
        return Err(EncodingError::Overflow { bits });
    }
    let bytes = value.to_bytes_be();
    let mut out = [0u8; Word::BYTES];
    out[Word::BYTES - bytes.len()..].copy_from_slice(&bytes);
    Ok(Word::from_bytes(out))
}

pub fn encode_g1(point: &G1Point) -> Result<[Word; 2], EncodingError> {
    Ok([encode_field_element(&point.x)?, encode_field_element(&point.y)?])
}

/// Encode a G2 point and reorder its limbs for the verifier.
pub fn encode_g2(point: &G2Point) -> Result<[[Word; 2]; 2], EncodingError> {
    let native = [
        [encode_field_element(&point.x[0])?, encode_field_element(&point.x[1])?],
        [encode_field_element(&point.y[0])?, encode_field_element(&point.y[1])?],
    ];
    Ok(swap_g2_limbs(&native))
}

/// Apply [`G2_LIMB_ORDER`] to both coordinate pairs.
///
/// The swap is its own inverse: the verifier side uses it to get back to
/// native order.
pub fn swap_g2_limbs<T: Clone>(limbs: &[[T; 2]; 2]) -> [[T; 2]; 2] {
    let reorder = |pair: &[T; 2]| {
        [
            pair[G2_LIMB_ORDER[0]].clone(),
            pair[G2_LIMB_ORDER[1]].clone(),
        ]
    };
    [reorder(&limbs[0]), reorder(&limbs[1])]
}

/// Encode public signals, keeping the circuit's declaration order.
pub fn encode_inputs(signals: &[FieldElement]) -> Result<Vec<Word>, EncodingError> {
    signals.iter().map(encode_field_element).collect()
}

pub fn build_calldata(proof: &Proof, signals: &PublicSignals) -> Result<CallData, EncodingError> {
    Ok(CallData {
        a: encode_g1(&proof.a)?,
        b: encode_g2(&proof.b)?,
        c: encode_g1(&proof.c)?,
        inputs: encode_inputs(signals)?,
    })
}
