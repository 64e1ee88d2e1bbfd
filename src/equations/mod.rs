//! Equations module - Line equation input and normalization

mod form;
mod normalizer;

pub use form::{EquationFields, EquationInput, FormKind};
pub use normalizer::{normalize, EquationError, Intersection, LineSpec};
