//! Access decisions for the two roles and the implicit agent relationship.
//!
//! A user is the agent of a listing when the staff record linked to their
//! account is the listing's `agent_id`. Agents get the same rights as admins
//! over that one listing and the showings/inquiries filed against it.

use crate::error::CoreError;
use crate::roles::ROLE_ADMIN;
use crate::types::DbId;

/// Borrowed view of the authenticated caller used for access checks.
#[derive(Debug, Clone, Copy)]
pub struct Actor<'a> {
    pub user_id: DbId,
    pub role: &'a str,
    pub staff_id: Option<&'a str>,
}

impl<'a> Actor<'a> {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Whether this caller is the recorded agent for a listing.
    pub fn is_agent_for(&self, agent_id: Option<&str>) -> bool {
        matches!((self.staff_id, agent_id), (Some(mine), Some(theirs)) if mine == theirs)
    }

    /// Admins and the listing's agent may manage the listing and its leads.
    pub fn ensure_can_manage_listing(&self, agent_id: Option<&str>) -> Result<(), CoreError> {
        if self.is_admin() || self.is_agent_for(agent_id) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "You are not the agent for this property".into(),
            ))
        }
    }

    /// Admins and any staff-linked user may publish new listings.
    pub fn ensure_can_create_listing(&self) -> Result<(), CoreError> {
        if self.is_admin() || self.staff_id.is_some() {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "Only admins and agents can create properties".into(),
            ))
        }
    }

    /// A user may act on their own account; admins on any account.
    pub fn ensure_self_or_admin(&self, target_user_id: DbId) -> Result<(), CoreError> {
        if self.is_admin() || self.user_id == target_user_id {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "You may only access your own account".into(),
            ))
        }
    }

    /// A user may act on records they submitted; admins on any record.
    pub fn ensure_owner_or_admin(&self, owner: Option<DbId>) -> Result<(), CoreError> {
        if self.is_admin() || owner == Some(self.user_id) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "You may only manage your own requests".into(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::roles::ROLE_USER;

    fn user(staff_id: Option<&str>) -> Actor<'_> {
        Actor {
            user_id: 10,
            role: ROLE_USER,
            staff_id,
        }
    }

    fn admin() -> Actor<'static> {
        Actor {
            user_id: 1,
            role: ROLE_ADMIN,
            staff_id: None,
        }
    }

    #[test]
    fn admin_manages_any_listing() {
        assert!(admin().ensure_can_manage_listing(Some("SG37")).is_ok());
        assert!(admin().ensure_can_manage_listing(None).is_ok());
    }

    #[test]
    fn agent_manages_only_own_listing() {
        let agent = user(Some("SG37"));
        assert!(agent.ensure_can_manage_listing(Some("SG37")).is_ok());
        assert_matches!(
            agent.ensure_can_manage_listing(Some("SA9")),
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(
            agent.ensure_can_manage_listing(None),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn plain_user_is_never_an_agent() {
        let plain = user(None);
        assert!(!plain.is_agent_for(None));
        assert_matches!(
            plain.ensure_can_manage_listing(None),
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(plain.ensure_can_create_listing(), Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn staff_linked_user_can_create_listing() {
        assert!(user(Some("SG5")).ensure_can_create_listing().is_ok());
    }

    #[test]
    fn self_or_admin() {
        let me = user(None);
        assert!(me.ensure_self_or_admin(10).is_ok());
        assert_matches!(me.ensure_self_or_admin(11), Err(CoreError::Forbidden(_)));
        assert!(admin().ensure_self_or_admin(11).is_ok());
    }

    #[test]
    fn owner_or_admin() {
        let me = user(None);
        assert!(me.ensure_owner_or_admin(Some(10)).is_ok());
        assert_matches!(me.ensure_owner_or_admin(None), Err(CoreError::Forbidden(_)));
        assert_matches!(me.ensure_owner_or_admin(Some(3)), Err(CoreError::Forbidden(_)));
        assert!(admin().ensure_owner_or_admin(None).is_ok());
    }
}
