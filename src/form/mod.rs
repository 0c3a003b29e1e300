//! Logical core of the dynamic form: store, validator, submission handling

pub mod errors;
pub mod store;
pub mod submit;
pub mod validation;

pub use errors::FormError;
pub use store::{PairStore, StoreEvent};
pub use submit::{Persist, SimulatedStore, SubmissionHandler, SubmitState};
pub use validation::{ValidationReport, Validator};
