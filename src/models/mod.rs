pub mod enums;
pub mod input;

pub use enums::{DiagnosticTarget, FitPolicy, Page, UnknownVariant};
pub use input::{FeatureVector, InvalidInputError, Label};
