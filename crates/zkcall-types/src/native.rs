//! The snarkjs proof layout, as written to `proof.json` / `public.json`.
//!
//! Coordinates are decimal strings. G1 points carry a projective `z`
//! that is always `"1"` for affine output; G2 points carry `["1", "0"]`.

use serde::{Deserialize, Serialize};

use crate::field::{FieldElement, ParseFieldError};
use crate::point::{G1Point, G2Point, Proof, PublicSignals};

pub const GROTH16_PROTOCOL: &str = "groth16";
pub const BN128_CURVE: &str = "bn128";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NativeFormatError {
    #[error("{path}: {source}")]
    Field {
        path: String,
        #[source]
        source: ParseFieldError,
    },

    #[error("{path}: expected {expected} elements, found {found}")]
    Arity {
        path: String,
        expected: usize,
        found: usize,
    },

    #[error("{path}: point is not in affine form")]
    NotAffine { path: String },

    #[error("unsupported protocol {0:?}")]
    UnsupportedProtocol(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnarkjsProof {
    pub pi_a: Vec<String>,
    pub pi_b: Vec<Vec<String>>,
    pub pi_c: Vec<String>,
    #[serde(default = "default_protocol")]
    pub protocol: String,
    #[serde(default = "default_curve")]
    pub curve: String,
}

fn default_protocol() -> String {
    GROTH16_PROTOCOL.to_string()
}

fn default_curve() -> String {
    BN128_CURVE.to_string()
}

impl SnarkjsProof {
    pub fn from_proof(proof: &Proof) -> Self {
        let g1 = |p: &G1Point| vec![p.x.to_decimal(), p.y.to_decimal(), "1".to_string()];
        Self {
            pi_a: g1(&proof.a),
            pi_b: vec![
                vec![proof.b.x[0].to_decimal(), proof.b.x[1].to_decimal()],
                vec![proof.b.y[0].to_decimal(), proof.b.y[1].to_decimal()],
                vec!["1".to_string(), "0".to_string()],
            ],
            pi_c: g1(&proof.c),
            protocol: default_protocol(),
            curve: default_curve(),
        }
    }

    /// Parse every coordinate into a [`FieldElement`], keeping the native
    /// G2 limb order.
    pub fn normalize(&self) -> Result<Proof, NativeFormatError> {
        if self.protocol != GROTH16_PROTOCOL {
            return Err(NativeFormatError::UnsupportedProtocol(self.protocol.clone()));
        }
        Ok(Proof {
            a: parse_g1("pi_a", &self.pi_a)?,
            b: parse_g2("pi_b", &self.pi_b)?,
            c: parse_g1("pi_c", &self.pi_c)?,
        })
    }
}

pub fn normalize_public_signals(signals: &[String]) -> Result<PublicSignals, NativeFormatError> {
    signals
        .iter()
        .enumerate()
        .map(|(i, s)| parse_field(&format!("publicSignals[{i}]"), s))
        .collect()
}

fn parse_field(path: &str, s: &str) -> Result<FieldElement, NativeFormatError> {
    s.parse::<FieldElement>().map_err(|source| NativeFormatError::Field {
        path: path.to_string(),
        source,
    })
}

fn check_arity(path: &str, found: usize, allowed: &[usize]) -> Result<(), NativeFormatError> {
    if allowed.contains(&found) {
        Ok(())
    } else {
        Err(NativeFormatError::Arity {
            path: path.to_string(),
            expected: allowed[allowed.len() - 1],
            found,
        })
    }
}

fn parse_g1(path: &str, coords: &[String]) -> Result<G1Point, NativeFormatError> {
    check_arity(path, coords.len(), &[2, 3])?;
    if let Some(z) = coords.get(2) {
        if parse_field(&format!("{path}[2]"), z)? != FieldElement::from(1u64) {
            return Err(NativeFormatError::NotAffine { path: path.to_string() });
        }
    }
    Ok(G1Point {
        x: parse_field(&format!("{path}[0]"), &coords[0])?,
        y: parse_field(&format!("{path}[1]"), &coords[1])?,
    })
}

fn parse_pair(path: &str, pair: &[String]) -> Result<[FieldElement; 2], NativeFormatError> {
    check_arity(path, pair.len(), &[2])?;
    Ok([
        parse_field(&format!("{path}[0]"), &pair[0])?,
        parse_field(&format!("{path}[1]"), &pair[1])?,
    ])
}

fn parse_g2(path: &str, coords: &[Vec<String>]) -> Result<G2Point, NativeFormatError> {
    check_arity(path, coords.len(), &[2, 3])?;
    if let Some(z) = coords.get(2) {
        let z = parse_pair(&format!("{path}[2]"), z)?;
        if z != [FieldElement::from(1u64), FieldElement::zero()] {
            return Err(NativeFormatError::NotAffine { path: path.to_string() });
        }
    }
    Ok(G2Point {
        x: parse_pair(&format!("{path}[0]"), &coords[0])?,
        y: parse_pair(&format!("{path}[1]"), &coords[1])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> SnarkjsProof {
        serde_json::from_str(
            r#"{
                "pi_a": ["1", "2", "1"],
                "pi_b": [["3", "4"], ["5", "6"], ["1", "0"]],
                "pi_c": ["7", "8", "1"],
                "protocol": "groth16",
                "curve": "bn128"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn normalize_keeps_native_limb_order() {
        let proof = fixture().normalize().unwrap();
        assert_eq!(proof.a, G1Point::new(1u64.into(), 2u64.into()));
        assert_eq!(proof.b.x, [FieldElement::from(3u64), FieldElement::from(4u64)]);
        assert_eq!(proof.b.y, [FieldElement::from(5u64), FieldElement::from(6u64)]);
        assert_eq!(proof.c, G1Point::new(7u64.into(), 8u64.into()));
    }

    #[test]
    fn from_proof_matches_snarkjs_layout() {
        let proof = fixture().normalize().unwrap();
        assert_eq!(SnarkjsProof::from_proof(&proof), fixture());
    }

    #[test]
    fn missing_protocol_defaults_to_groth16() {
        let p: SnarkjsProof = serde_json::from_str(
            r#"{"pi_a": ["1", "2"], "pi_b": [["3", "4"], ["5", "6"]], "pi_c": ["7", "8"]}"#,
        )
        .unwrap();
        assert_eq!(p.protocol, "groth16");
        assert!(p.normalize().is_ok());
    }

    #[test]
    fn rejects_projective_points() {
        let mut p = fixture();
        p.pi_a[2] = "2".into();
        assert!(matches!(p.normalize(), Err(NativeFormatError::NotAffine { .. })));

        let mut p = fixture();
        p.pi_b[2] = vec!["0".into(), "1".into()];
        assert!(matches!(p.normalize(), Err(NativeFormatError::NotAffine { .. })));
    }

    #[test]
    fn rejects_wrong_arity() {
        let mut p = fixture();
        p.pi_c.truncate(1);
        assert_eq!(
            p.normalize(),
            Err(NativeFormatError::Arity { path: "pi_c".into(), expected: 3, found: 1 })
        );

        let mut p = fixture();
        p.pi_b[0].push("9".into());
        assert!(matches!(p.normalize(), Err(NativeFormatError::Arity { .. })));
    }

    #[test]
    fn rejects_other_protocols() {
        let mut p = fixture();
        p.protocol = "plonk".into();
        assert_eq!(
            p.normalize(),
            Err(NativeFormatError::UnsupportedProtocol("plonk".into()))
        );
    }

    #[test]
    fn error_names_the_bad_coordinate() {
        let mut p = fixture();
        p.pi_b[1][1] = "six".into();
        let err = p.normalize().unwrap_err();
        assert!(err.to_string().starts_with("pi_b[1][1]"), "{err}");
    }

    #[test]
    fn public_signals_keep_order() {
        let signals = vec!["12".to_string(), "7".to_string(), "0".to_string()];
        let parsed = normalize_public_signals(&signals).unwrap();
        assert_eq!(
            parsed,
            vec![FieldElement::from(12u64), FieldElement::from(7u64), FieldElement::zero()]
        );
        assert!(normalize_public_signals(&["x".to_string()]).is_err());
    }
}
