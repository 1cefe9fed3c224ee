//! Caller identity.
//!
//! The role is carried by the identity value itself. Nothing in the system
//! infers admin rights from what an email address looks like.

use serde::Serialize;

/// Role claim names embedded in signed tokens.
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// The resolved classification of whoever made a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    Anonymous,
    User {
        email: String,
    },
    /// Admin sessions from the code exchange carry no email; admin bearer
    /// tokens do.
    Admin {
        email: Option<String>,
    },
}

impl Identity {
    /// Build an identity from a verified token's role and subject.
    ///
    /// Unknown roles and unusable subjects resolve to [`Identity::Anonymous`].
    pub fn from_claims(role: &str, subject: &str) -> Self {
        match role {
            ROLE_ADMIN => Identity::Admin {
                email: normalize_email(subject),
            },
            ROLE_USER => match normalize_email(subject) {
                Some(email) => Identity::User { email },
                None => Identity::Anonymous,
            },
            _ => Identity::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Identity::Anonymous)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Identity::Admin { .. })
    }

    /// The caller's email, when one is known.
    pub fn email(&self) -> Option<&str> {
        match self {
            Identity::Anonymous => None,
            Identity::User { email } => Some(email),
            Identity::Admin { email } => email.as_deref(),
        }
    }

    /// Label recorded as the actor on rows an identity creates.
    pub fn actor(&self) -> &str {
        match self {
            Identity::Admin { email: None } => ROLE_ADMIN,
            other => other.email().unwrap_or("anonymous"),
        }
    }
}

/// Trim and lower-case an email, returning `None` unless it is plausibly
/// `local@domain.tld`.
pub fn normalize_email(raw: &str) -> Option<String> {
    let candidate = raw.trim().to_lowercase();
    looks_like_email(&candidate).then_some(candidate)
}

/// Cheap structural email check: one `@`, non-empty local part, a dotted
/// domain, and no whitespace.
pub fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Case-insensitive email comparison.
pub fn same_email(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_claim_needs_an_email_subject() {
        assert_eq!(
            Identity::from_claims("user", "Dev@Example.com"),
            Identity::User {
                email: "dev@example.com".into()
            }
        );
        assert_eq!(Identity::from_claims("user", "not-an-email"), Identity::Anonymous);
    }

    #[test]
    fn admin_claim_keeps_optional_email() {
        assert_eq!(
            Identity::from_claims("admin", "boss@example.com"),
            Identity::Admin {
                email: Some("boss@example.com".into())
            }
        );
        assert_eq!(
            Identity::from_claims("admin", "admin-session"),
            Identity::Admin { email: None }
        );
    }

    #[test]
    fn unknown_role_is_anonymous() {
        assert_eq!(
            Identity::from_claims("superuser", "x@example.com"),
            Identity::Anonymous
        );
    }

    #[test]
    fn email_shapes() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a@@b.co"));
        assert!(!looks_like_email("a b@c.co"));
        assert!(!looks_like_email("a@.co"));
    }

    #[test]
    fn actor_labels() {
        assert_eq!(Identity::Admin { email: None }.actor(), "admin");
        assert_eq!(
            Identity::User {
                email: "u@x.com".into()
            }
            .actor(),
            "u@x.com"
        );
    }

    #[test]
    fn email_comparison_ignores_case() {
        assert!(same_email("User@X.com", "user@x.com"));
        assert!(!same_email("user@x.com", "other@x.com"));
    }
}
