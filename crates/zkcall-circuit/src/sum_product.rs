use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, PreparedVerifyingKey, ProvingKey, VerifyingKey};
use ark_r1cs_std::{alloc::AllocVar, eq::EqGadget, fields::fp::FpVar};
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystem, ConstraintSystemRef, SynthesisError};
use ark_snark::SNARK;
use ark_std::rand::{CryptoRng, RngCore};

/// "I know `a`, `b` such that `a * b == product` and `a + b == sum`"
///
/// Two public signals, declared in the order `[product, sum]`.
#[derive(Clone)]
pub struct SumProductCircuit {
    pub a: Option<Fr>,
    pub b: Option<Fr>,
    pub product: Option<Fr>,
    pub sum: Option<Fr>,
}

impl SumProductCircuit {
    pub fn empty() -> Self {
        Self { a: None, b: None, product: None, sum: None }
    }

    pub fn new(a: Fr, b: Fr) -> Self {
        Self { a: Some(a), b: Some(b), product: None, sum: None }
    }

    fn operands(&self) -> Result<(Fr, Fr), SynthesisError> {
        let a = self.a.ok_or(SynthesisError::AssignmentMissing)?;
        let b = self.b.ok_or(SynthesisError::AssignmentMissing)?;
        Ok((a, b))
    }
}

impl ConstraintSynthesizer<Fr> for SumProductCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        // === Public inputs, in declaration order ===
        let product_pub = FpVar::new_input(cs.clone(), || match self.product {
            Some(p) => Ok(p),
            None => self.operands().map(|(a, b)| a * b),
        })?;
        let sum_pub = FpVar::new_input(cs.clone(), || match self.sum {
            Some(s) => Ok(s),
            None => self.operands().map(|(a, b)| a + b),
        })?;

        // === Witnesses ===
        let a_var = FpVar::new_witness(cs.clone(), || self.a.ok_or(SynthesisError::AssignmentMissing))?;
        let b_var = FpVar::new_witness(cs, || self.b.ok_or(SynthesisError::AssignmentMissing))?;

        (&a_var * &b_var).enforce_equal(&product_pub)?;
        (&a_var + &b_var).enforce_equal(&sum_pub)?;

        Ok(())
    }
}

pub struct PublicInputs {
    pub product: Fr,
    pub sum: Fr,
}

impl PublicInputs {
    pub fn to_vec(&self) -> Vec<Fr> {
        vec![self.product, self.sum]
    }
}

pub fn setup<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<(ProvingKey<Bn254>, VerifyingKey<Bn254>), SynthesisError> {
    Groth16::<Bn254>::circuit_specific_setup(SumProductCircuit::empty(), rng)
}

pub fn prove<R: RngCore + CryptoRng>(
    pk: &ProvingKey<Bn254>,
    a: Fr,
    b: Fr,
    rng: &mut R,
) -> Result<(ark_groth16::Proof<Bn254>, PublicInputs), SynthesisError> {
    let proof = Groth16::<Bn254>::prove(pk, SumProductCircuit::new(a, b), rng)?;
    Ok((proof, PublicInputs { product: a * b, sum: a + b }))
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
    SumProductCircuit::empty()
        .generate_constraints(cs.clone())
        .map(|_| cs.num_constraints())
        .unwrap_or(0)
}
