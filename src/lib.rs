//! Statekeeper: an embeddable state-transition engine
//!
//! Statekeeper drives the state of objects it does not own. A machine is
//! configured once with states, triggers and transitions, then fired against
//! any number of contexts. Each call reads the context's state through an
//! accessor, resolves the trigger along the state's superstate lineage,
//! writes the new state through a mutator and runs the lifecycle callbacks.
//!
//! # Core Concepts
//!
//! - **Transitions**: prioritized, optionally guarded edges selected per trigger
//! - **Hierarchy**: substates inherit unmatched triggers and skip redundant exit/entry
//! - **Auto-forward**: a state may move on immediately after being entered
//! - **Flavors**: the same configuration model backs [`StateMachine`] and [`AsyncStateMachine`]
//!
//! # Example
//!
//! ```rust
//! use statekeeper::builder::Transition;
//! use statekeeper::effects::{StateMachine, TriggerAction};
//! use statekeeper::state_enum;
//!
//! state_enum! {
//!     enum SaleState {
//!         Open,
//!         ChangeDue,
//!         Complete,
//!     }
//! }
//!
//! state_enum! {
//!     enum SaleTrigger {
//!         Pay,
//!         GiveChange,
//!     }
//! }
//!
//! struct Sale {
//!     state: SaleState,
//!     balance: i64,
//! }
//!
//! let mut machine: StateMachine<Sale, SaleState, SaleTrigger, i64> =
//!     StateMachine::new(|sale: &Sale| sale.state, |sale: &mut Sale, state| sale.state = state);
//!
//! machine
//!     .add_trigger_action(
//!         SaleTrigger::Pay,
//!         TriggerAction::with_request(|sale: &mut Sale, amount: &i64| {
//!             sale.balance -= amount;
//!             Ok(())
//!         }),
//!     )
//!     .unwrap();
//! machine
//!     .configure_state(SaleState::Open)
//!     .permit(
//!         SaleTrigger::Pay,
//!         Transition::to(SaleState::ChangeDue)
//!             .priority(1)
//!             .when(|sale: &Sale| sale.balance < 0),
//!     )
//!     .permit(
//!         SaleTrigger::Pay,
//!         Transition::to(SaleState::Complete)
//!             .priority(2)
//!             .when(|sale: &Sale| sale.balance == 0),
//!     );
//!
//! let mut sale = Sale { state: SaleState::Open, balance: 10 };
//! let result = machine.fire_trigger_with(&mut sale, SaleTrigger::Pay, &10).unwrap();
//!
//! assert!(result.was_transitioned);
//! assert_eq!(sale.state, SaleState::Complete);
//! assert_eq!(result.last_transition_name.as_deref(), Some("Open2Complete"));
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod effects;

// Re-export commonly used types
pub use builder::{StateConfigurator, Transition};
pub use config::ConfigurationError;
pub use core::{ExecutionParameters, State, StateTransitionResult, TransitionEvent, Trigger};
pub use effects::{AsyncStateMachine, MachineError, StateMachine};
