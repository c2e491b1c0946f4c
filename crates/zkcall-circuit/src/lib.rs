pub mod multiplier;
pub mod sum_product;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, Proof, ProvingKey, VerifyingKey};
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystem, SynthesisError};
use ark_snark::SNARK;
use ark_std::rand::{rngs::StdRng, CryptoRng, RngCore, SeedableRng};

pub use multiplier::MultiplierCircuit;
pub use sum_product::SumProductCircuit;

/// Named signal assignments, as read from a circuit input file.
pub type Witness = BTreeMap<String, Fr>;

#[derive(Debug, thiserror::Error)]
pub enum CircuitError {
    #[error("unknown circuit {0:?} (known: multiplier, sum_product)")]
    UnknownCircuit(String),

    #[error("{circuit}: missing input signal {signal:?}")]
    MissingSignal { circuit: &'static str, signal: String },

    #[error("{circuit}: unexpected signal {signal:?}")]
    UnknownSignal { circuit: &'static str, signal: String },

    #[error("{circuit}: witness does not satisfy the constraints")]
    Unsatisfied { circuit: &'static str },

    #[error("synthesis failed: {0}")]
    Synthesis(SynthesisError),
}

impl From<SynthesisError> for CircuitError {
    fn from(e: SynthesisError) -> Self {
        CircuitError::Synthesis(e)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CircuitKind {
    Multiplier,
    SumProduct,
}

impl CircuitKind {
    pub const ALL: [CircuitKind; 2] = [CircuitKind::Multiplier, CircuitKind::SumProduct];

    pub fn name(&self) -> &'static str {
        match self {
            CircuitKind::Multiplier => "multiplier",
            CircuitKind::SumProduct => "sum_product",
        }
    }

    /// Private signals every witness must assign.
    pub fn private_signals(&self) -> &'static [&'static str] {
        &["a", "b"]
    }

    /// Public signals, in the circuit's declared order. A witness may
    /// assign them to claim a value; otherwise they are derived.
    pub fn public_signals(&self) -> &'static [&'static str] {
        match self {
            CircuitKind::Multiplier => &["c"],
            CircuitKind::SumProduct => &["product", "sum"],
        }
    }

    pub fn public_input_count(&self) -> usize {
        self.public_signals().len()
    }

    pub fn setup<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<(ProvingKey<Bn254>, VerifyingKey<Bn254>), CircuitError> {
        let keys = match self {
            CircuitKind::Multiplier => multiplier::setup(rng)?,
            CircuitKind::SumProduct => sum_product::setup(rng)?,
        };
        Ok(keys)
    }

    /// Same seed, same keys. Lets a prover and a verifier agree on a
    /// setup without shipping key files around.
    pub fn setup_deterministic(
        &self,
        seed: u64,
    ) -> Result<(ProvingKey<Bn254>, VerifyingKey<Bn254>), CircuitError> {
        self.setup(&mut StdRng::seed_from_u64(seed))
    }

    /// Check the witness, then prove. Returns the public inputs in
    /// declared order.
    pub fn prove<R: RngCore + CryptoRng>(
        &self,
        pk: &ProvingKey<Bn254>,
        witness: &Witness,
        rng: &mut R,
    ) -> Result<(Proof<Bn254>, Vec<Fr>), CircuitError> {
        match self {
            CircuitKind::Multiplier => {
                let circuit = self.multiplier(witness)?;
                self.ensure_satisfied(circuit.clone())?;
                let public = vec![circuit.a.unwrap_or_default() * circuit.b.unwrap_or_default()];
                let proof = Groth16::<Bn254>::prove(pk, circuit, rng)?;
                Ok((proof, public))
            }
            CircuitKind::SumProduct => {
                let circuit = self.sum_product(witness)?;
                self.ensure_satisfied(circuit.clone())?;
                let (a, b) = (circuit.a.unwrap_or_default(), circuit.b.unwrap_or_default());
                let proof = Groth16::<Bn254>::prove(pk, circuit, rng)?;
                Ok((proof, vec![a * b, a + b]))
            }
        }
    }

    pub fn is_satisfied(&self, witness: &Witness) -> Result<bool, CircuitError> {
        match self {
            CircuitKind::Multiplier => check(self.multiplier(witness)?),
            CircuitKind::SumProduct => check(self.sum_product(witness)?),
        }
    }

    pub fn constraint_count(&self) -> usize {
        match self {
            CircuitKind::Multiplier => multiplier::constraint_count(),
            CircuitKind::SumProduct => sum_product::constraint_count(),
        }
    }

    fn ensure_satisfied<C: ConstraintSynthesizer<Fr>>(&self, circuit: C) -> Result<(), CircuitError> {
        if check(circuit)? {
            Ok(())
        } else {
            Err(CircuitError::Unsatisfied { circuit: self.name() })
        }
    }

    fn validate(&self, witness: &Witness) -> Result<(), CircuitError> {
        for signal in self.private_signals() {
            if !witness.contains_key(*signal) {
                return Err(CircuitError::MissingSignal {
                    circuit: self.name(),
                    signal: signal.to_string(),
                });
            }
        }
        let known = |s: &str| {
            self.private_signals()
                .iter()
                .chain(self.public_signals())
                .any(|name| *name == s)
        };
        if let Some(extra) = witness.keys().find(|k| !known(k.as_str())) {
            return Err(CircuitError::UnknownSignal {
                circuit: self.name(),
                signal: extra.clone(),
            });
        }
        Ok(())
    }

    fn multiplier(&self, witness: &Witness) -> Result<MultiplierCircuit, CircuitError> {
        self.validate(witness)?;
        Ok(MultiplierCircuit {
            a: witness.get("a").copied(),
            b: witness.get("b").copied(),
            c: witness.get("c").copied(),
        })
    }

    fn sum_product(&self, witness: &Witness) -> Result<SumProductCircuit, CircuitError> {
        self.validate(witness)?;
        Ok(SumProductCircuit {
            a: witness.get("a").copied(),
            b: witness.get("b").copied(),
            product: witness.get("product").copied(),
            sum: witness.get("sum").copied(),
        })
    }
}

fn check<C: ConstraintSynthesizer<Fr>>(circuit: C) -> Result<bool, CircuitError> {
    let cs = ConstraintSystem::<Fr>::new_ref();
    circuit.generate_constraints(cs.clone())?;
    Ok(cs.is_satisfied()?)
}

impl FromStr for CircuitKind {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiplier" => Ok(CircuitKind::Multiplier),
            "sum_product" | "sum-product" => Ok(CircuitKind::SumProduct),
            other => Err(CircuitError::UnknownCircuit(other.to_string())),
        }
    }
}

impl fmt::Display for CircuitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
