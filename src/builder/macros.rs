//! Macros for declaring states and triggers.

/// Declare a fieldless enum usable as a state or trigger.
///
/// Derives everything [`State`](crate::core::State) and
/// [`Trigger`](crate::core::Trigger) need, plus serde support, and adds a
/// `name()` accessor and a `Display` impl printing the variant name.
///
/// # Example
///
/// ```
/// use statekeeper::core::State;
/// use statekeeper::state_enum;
///
/// state_enum! {
///     pub enum SaleState {
///         Open,
///         ChangeDue,
///         Complete,
///     }
/// }
///
/// fn assert_state<S: State>(_: &S) {}
///
/// assert_state(&SaleState::Open);
/// assert_eq!(SaleState::ChangeDue.name(), "ChangeDue");
/// assert_eq!(SaleState::Complete.to_string(), "Complete");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// The variant name.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}
