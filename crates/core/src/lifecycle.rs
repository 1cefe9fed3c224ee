//! Shared building blocks for the status lifecycles.
//!
//! Every status that crosses the wire is declared with [`define_wire_enum!`],
//! which pins the exact, case-sensitive string for each variant and derives
//! parsing, display and serde support from that single table.

use std::fmt::Display;

use crate::error::CoreError;

/// Outcome of validating a requested status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The change is legal and must be written.
    Apply,
    /// The entity is already in the requested state; nothing to write.
    Unchanged,
}

macro_rules! define_wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire-exact string for this variant.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err($crate::error::CoreError::Validation(format!(
                        "Invalid {} '{other}'. Must be one of: {}",
                        $label,
                        [$($wire),+].join(", ")
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::error::CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

pub(crate) use define_wire_enum;

/// Decide a PENDING → terminal review (applications, modifications,
/// submissions).
///
/// `requested` must already be known to be a terminal value. A pending
/// entity transitions; an entity already in `requested` is left untouched;
/// an entity in the *other* terminal state is a conflict.
pub fn plan_terminal_decision<S>(
    entity: &str,
    current: S,
    pending: S,
    requested: S,
) -> Result<Transition, CoreError>
where
    S: Copy + Eq + Display,
{
    if current == pending {
        Ok(Transition::Apply)
    } else if current == requested {
        Ok(Transition::Unchanged)
    } else {
        Err(CoreError::Conflict(format!(
            "{entity} has already been {current} and cannot be changed to {requested}"
        )))
    }
}

/// Reject blank strings for a required text field.
pub fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
