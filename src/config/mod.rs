//! Configuration registry.
//!
//! Holds one [`StateConfiguration`] per state, the superstate tree linking
//! them, and the errors raised while building it.

mod configuration;
mod error;
pub(crate) mod registry;

pub use configuration::{Callback, StateConfiguration};
pub use error::ConfigurationError;
