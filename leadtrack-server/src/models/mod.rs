//! Domain models and request validation

pub mod lead;
pub mod user;
pub mod validation;

pub use lead::{Lead, LeadFilter, NewLead};
pub use user::{NewUser, User};
pub use validation::ValidationError;
