//! Fluent configuration API.
//!
//! `configure_state` hands out a [`StateConfigurator`]; transitions are
//! described with [`Transition`] and enums are declared with
//! [`state_enum!`](crate::state_enum).

mod configurator;
pub mod macros;
mod transition;

pub use configurator::StateConfigurator;
pub use transition::Transition;

pub(crate) use transition::insert_by_priority;
