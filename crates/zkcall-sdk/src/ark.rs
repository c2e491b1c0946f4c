// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Arkworks (BN254) ↔ [`zkcall_types`] conversion.
//!
//! Going out, the point at infinity becomes `(0, 0)`, the same convention
//! the EVM precompiles use. Coming back, every coordinate is checked
//! against the base field and every point against the curve and its
//! prime-order subgroup; anything else yields `None`.

use ark_bn254::{Bn254, Fq, Fq2, Fr, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_ff::Zero;
use zkcall_types::{FieldElement, G1Point, G2Point, Proof, PublicSignals};

pub fn g1_from_ark(p: &G1Affine) -> G1Point {
    if p.infinity {
        return G1Point::default();
    }
    G1Point::new(
        FieldElement::from_prime_field(&p.x),
        FieldElement::from_prime_field(&p.y),
    )
}

/// Native `[c0, c1]` limb order.
pub fn g2_from_ark(p: &G2Affine) -> G2Point {
    if p.infinity {
        return G2Point::default();
    }
    G2Point::new(
        [FieldElement::from_prime_field(&p.x.c0), FieldElement::from_prime_field(&p.x.c1)],
        [FieldElement::from_prime_field(&p.y.c0), FieldElement::from_prime_field(&p.y.c1)],
    )
}

pub fn proof_from_ark(proof: &ark_groth16::Proof<Bn254>) -> Proof {
    Proof {
        a: g1_from_ark(&proof.a),
        b: g2_from_ark(&proof.b),
        c: g1_from_ark(&proof.c),
    }
}

pub fn signals_from_ark(inputs: &[Fr]) -> PublicSignals {
    inputs.iter().map(FieldElement::from_prime_field).collect()
}

pub fn g1_to_ark(p: &G1Point) -> Option<G1Affine> {
    let x: Fq = p.x.to_prime_field()?;
    let y: Fq = p.y.to_prime_field()?;
    if x.is_zero() && y.is_zero() {
        return Some(G1Affine::zero());
    }
    let point = G1Affine::new_unchecked(x, y);
    (point.is_on_curve() && point.is_in_correct_subgroup_assuming_on_curve()).then_some(point)
}

/// Expects native `[c0, c1]` limb order.
pub fn g2_to_ark(p: &G2Point) -> Option<G2Affine> {
    let x = Fq2::new(p.x[0].to_prime_field()?, p.x[1].to_prime_field()?);
    let y = Fq2::new(p.y[0].to_prime_field()?, p.y[1].to_prime_field()?);
    if x.is_zero() && y.is_zero() {
        return Some(G2Affine::zero());
    }
    let point = G2Affine::new_unchecked(x, y);
    (point.is_on_curve() && point.is_in_correct_subgroup_assuming_on_curve()).then_some(point)
}

pub fn proof_to_ark(proof: &Proof) -> Option<ark_groth16::Proof<Bn254>> {
    Some(ark_groth16::Proof {
        a: g1_to_ark(&proof.a)?,
        b: g2_to_ark(&proof.b)?,
        c: g1_to_ark(&proof.c)?,
    })
}

/// `None` if the value is not a canonical scalar.
pub fn signal_to_ark(signal: &FieldElement) -> Option<Fr> {
    signal.to_prime_field()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::CurveGroup;
    use ark_ff::{BigInteger, PrimeField};
    use ark_std::{rand::{rngs::StdRng, SeedableRng}, UniformRand};

    fn base_modulus() -> FieldElement {
        let bytes = <Fq as PrimeField>::MODULUS.to_bytes_le();
        FieldElement::from_bytes_be(&bytes.into_iter().rev().collect::<Vec<_>>())
    }

    #[test]
    fn generators_roundtrip() {
        let g1 = G1Affine::generator();
        assert_eq!(g1_to_ark(&g1_from_ark(&g1)), Some(g1));
        let g2 = G2Affine::generator();
        assert_eq!(g2_to_ark(&g2_from_ark(&g2)), Some(g2));
    }

    #[test]
    fn g1_generator_is_one_two() {
        let p = g1_from_ark(&G1Affine::generator());
        assert_eq!(p, G1Point::new(1u64.into(), 2u64.into()));
    }

    #[test]
    fn random_points_roundtrip() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..5 {
            let p = ark_bn254::G1Projective::rand(&mut rng).into_affine();
            assert_eq!(g1_to_ark(&g1_from_ark(&p)), Some(p));
            let q = ark_bn254::G2Projective::rand(&mut rng).into_affine();
            assert_eq!(g2_to_ark(&g2_from_ark(&q)), Some(q));
        }
    }

    #[test]
    fn infinity_is_zero_zero() {
        assert_eq!(g1_from_ark(&G1Affine::zero()), G1Point::default());
        assert_eq!(g1_to_ark(&G1Point::default()), Some(G1Affine::zero()));
        assert_eq!(g2_to_ark(&G2Point::default()), Some(G2Affine::zero()));
    }

    #[test]
    fn rejects_points_off_curve() {
        assert_eq!(g1_to_ark(&G1Point::new(1u64.into(), 1u64.into())), None);
        let mut g2 = g2_from_ark(&G2Affine::generator());
        g2.y.swap(0, 1);
        assert_eq!(g2_to_ark(&g2), None);
    }

    #[test]
    fn rejects_coordinates_outside_base_field() {
        let p = G1Point::new(base_modulus(), 2u64.into());
        assert_eq!(g1_to_ark(&p), None);
    }

    #[test]
    fn signals_roundtrip() {
        let inputs = vec![Fr::from(12u64), Fr::from(7u64)];
        let signals = signals_from_ark(&inputs);
        assert_eq!(signals, vec![FieldElement::from(12u64), FieldElement::from(7u64)]);
        let back: Vec<Fr> = signals.iter().filter_map(signal_to_ark).collect();
        assert_eq!(back, inputs);
    }
}
