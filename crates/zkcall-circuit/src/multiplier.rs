use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, PreparedVerifyingKey, ProvingKey, VerifyingKey};
use ark_r1cs_std::{alloc::AllocVar, eq::EqGadget, fields::fp::FpVar};
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystem, ConstraintSystemRef, SynthesisError};
use ark_snark::SNARK;
use ark_std::rand::{CryptoRng, RngCore};

/// "I know `a`, `b` such that `a * b == c`"
///
/// `c` is the only public signal. Leaving it `None` derives it from the
/// witness; setting it claims a specific product.
#[derive(Clone)]
pub struct MultiplierCircuit {
    pub a: Option<Fr>,
    pub b: Option<Fr>,
    pub c: Option<Fr>,
}

impl MultiplierCircuit {
    pub fn empty() -> Self {
        Self { a: None, b: None, c: None }
    }

    pub fn new(a: Fr, b: Fr) -> Self {
        Self { a: Some(a), b: Some(b), c: None }
    }

    fn product(&self) -> Result<Fr, SynthesisError> {
        if let Some(c) = self.c {
            return Ok(c);
        }
        let a = self.a.ok_or(SynthesisError::AssignmentMissing)?;
        let b = self.b.ok_or(SynthesisError::AssignmentMissing)?;
        Ok(a * b)
    }
}

impl ConstraintSynthesizer<Fr> for MultiplierCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        // Public input: c
        let c_pub = FpVar::new_input(cs.clone(), || self.product())?;

        // Witnesses: a, b
        let a_var = FpVar::new_witness(cs.clone(), || self.a.ok_or(SynthesisError::AssignmentMissing))?;
        let b_var = FpVar::new_witness(cs, || self.b.ok_or(SynthesisError::AssignmentMissing))?;

        let ab = &a_var * &b_var;
        ab.enforce_equal(&c_pub)?;

        Ok(())
    }
}

pub struct PublicInputs {
    pub c: Fr,
}

impl PublicInputs {
    pub fn to_vec(&self) -> Vec<Fr> {
        vec![self.c]
    }
}

pub fn setup<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<(ProvingKey<Bn254>, VerifyingKey<Bn254>), SynthesisError> {
    Groth16::<Bn254>::circuit_specific_setup(MultiplierCircuit::empty(), rng)
}

pub fn prove<R: RngCore + CryptoRng>(
    pk: &ProvingKey<Bn254>,
    a: Fr,
    b: Fr,
    rng: &mut R,
) -> Result<(ark_groth16::Proof<Bn254>, PublicInputs), SynthesisError> {
    let proof = Groth16::<Bn254>::prove(pk, MultiplierCircuit::new(a, b), rng)?;
    Ok((proof, PublicInputs { c: a * b }))
}

pub fn verify_offchain(
    vk: &VerifyingKey<Bn254>,
    proof: &ark_groth16::Proof<Bn254>,
    pi: &PublicInputs,
) -> bool {
    let pvk = PreparedVerifyingKey::from(vk.clone());
    Groth16::<Bn254>::verify_with_processed_vk(&pvk, &pi.to_vec(), proof).unwrap_or(false)
}

pub fn constraint_count() -> usize {
    let cs = ConstraintSystem::<Fr>::new_ref();
    cs.set_optimization_goal(ark_relations::r1cs::OptimizationGoal::Constraints);
    cs.set_mode(ark_relations::r1cs::SynthesisMode::Setup);
    MultiplierCircuit::empty()
        .generate_constraints(cs.clone())
        .map(|_| cs.num_constraints())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_valid_product() {
        let mut rng = test_rng();
        let (pk, vk) = setup(&mut rng).unwrap();
        let (proof, pi) = prove(&pk, Fr::from(3u64), Fr::from(4u64), &mut rng).unwrap();
        assert_eq!(pi.c, Fr::from(12u64));
        assert!(verify_offchain(&vk, &proof, &pi));
    }

    #[test]
    fn test_wrong_claimed_product() {
        let mut rng = test_rng();
        let (pk, vk) = setup(&mut rng).unwrap();
        let (proof, _) = prove(&pk, Fr::from(3u64), Fr::from(4u64), &mut rng).unwrap();
        let pi = PublicInputs { c: Fr::from(13u64) };
        assert!(!verify_offchain(&vk, &proof, &pi), "should fail: 3 * 4 != 13");
    }

    #[test]
    fn test_claim_is_unsatisfiable() {
        let circuit = MultiplierCircuit {
            a: Some(Fr::from(3u64)),
            b: Some(Fr::from(4u64)),
            c: Some(Fr::from(13u64)),
        };
        let cs = ConstraintSystem::<Fr>::new_ref();
        circuit.generate_constraints(cs.clone()).unwrap();
        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_multiplier_constraint_count() {
        let count = constraint_count();
        println!("Multiplier circuit constraints: {count}");
        assert!(count >= 1, "too few: {count}");
        assert!(count < 10, "too many: {count}");
    }
}
