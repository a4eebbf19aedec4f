//! Contact snapshot rules for showing requests and inquiries.
//!
//! A submission is attributed either to a signed-in user or to the contact
//! details typed into the form, never to neither. When a user is known the
//! snapshot is left empty so stale contact data is never stored next to a
//! user reference.

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::{present, validate_email};

/// Name/email/phone captured from an anonymous submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSnapshot {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactSnapshot {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

/// Resolve the contact snapshot to persist for a submission.
///
/// - With a `user_id`, the snapshot is empty regardless of what was supplied.
/// - Without one, a name and at least one of email/phone are required, and a
///   supplied email must be well formed.
pub fn resolve_contact(
    user_id: Option<DbId>,
    name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<ContactSnapshot, CoreError> {
    if user_id.is_some() {
        return Ok(ContactSnapshot::default());
    }

    if !present(name) || !(present(email) || present(phone)) {
        return Err(CoreError::Validation(
            "Anonymous requests must include a name and an email or phone number".into(),
        ));
    }

    let clean = |v: Option<&str>| {
        v.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let snapshot = ContactSnapshot {
        name: clean(name),
        email: clean(email),
        phone: clean(phone),
    };

    if let Some(email) = &snapshot.email {
        validate_email(email)?;
    }

    Ok(snapshot)
}
