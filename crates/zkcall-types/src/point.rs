use serde::{Deserialize, Serialize};

use crate::field::FieldElement;

/// Affine point on the base curve.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct G1Point {
    pub x: FieldElement,
    pub y: FieldElement,
}

/// Affine point on the quadratic-extension curve.
///
/// Each coordinate is `[c0, c1]`, the prover's native limb order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct G2Point {
    pub x: [FieldElement; 2],
    pub y: [FieldElement; 2],
}

impl G1Point {
    pub fn new(x: FieldElement, y: FieldElement) -> Self {
        Self { x, y }
    }
}

impl G2Point {
    pub fn new(x: [FieldElement; 2], y: [FieldElement; 2]) -> Self {
        Self { x, y }
    }

    /// Limbs as `[[x0, x1], [y0, y1]]`.
    pub fn limbs(&self) -> [[&FieldElement; 2]; 2] {
        [[&self.x[0], &self.x[1]], [&self.y[0], &self.y[1]]]
    }
}

/// Groth16 proof `(A, B, C)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub a: G1Point,
    pub b: G2Point,
    pub c: G1Point,
}

/// Public inputs in the circuit's declared order.
pub type PublicSignals = Vec<FieldElement>;
