pub mod field;
pub mod native;
pub mod point;
pub mod word;

pub use field::{EncodingError, FieldElement, ParseFieldError, FIELD_ELEMENT_BITS};
pub use native::{normalize_public_signals, NativeFormatError, SnarkjsProof};
pub use point::{G1Point, G2Point, Proof, PublicSignals};
pub use word::{ParseWordError, Word};
