//! Authorization gate.
//!
//! Every lifecycle operation names the role it requires and asks
//! [`authorize`] before reading or writing storage. The gate is pure and
//! fails closed: anything not explicitly allowed is denied.

use crate::error::CoreError;
use crate::identity::{same_email, Identity};

/// The role an operation demands from its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequiredRole {
    /// Any authenticated caller, admins included.
    AnyUser,
    AdminOnly,
    /// The owner identified by this email, or an admin.
    SelfOrAdmin(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No identity was presented.
    Unauthenticated,
    /// An identity was presented but lacks the required role.
    Forbidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    /// Convert a denial into the matching [`CoreError`].
    pub fn into_result(self) -> Result<(), CoreError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(DenyReason::Unauthenticated) => {
                Err(CoreError::Unauthorized("Authentication required".into()))
            }
            Decision::Deny(DenyReason::Forbidden) => Err(CoreError::Forbidden(
                "You do not have permission to perform this action".into(),
            )),
        }
    }
}

/// Decide whether `identity` satisfies `required`.
pub fn authorize(required: &RequiredRole, identity: &Identity) -> Decision {
    if !identity.is_authenticated() {
        return Decision::Deny(DenyReason::Unauthenticated);
    }
    if identity.is_admin() {
        return Decision::Allow;
    }
    match required {
        RequiredRole::AnyUser => Decision::Allow,
        RequiredRole::AdminOnly => Decision::Deny(DenyReason::Forbidden),
        RequiredRole::SelfOrAdmin(owner) => match identity.email() {
            Some(email) if same_email(email, owner) => Decision::Allow,
            _ => Decision::Deny(DenyReason::Forbidden),
        },
    }
}

/// Shorthand for `authorize(required, identity).into_result()`.
pub fn require(required: &RequiredRole, identity: &Identity) -> Result<(), CoreError> {
    authorize(required, identity).into_result()
}
