//! Access-control collaborator
//!
//! Mutating calls must pass [`AccessControl::check`] before anything reaches
//! the store. Suspended users may still read history.

use crate::record::UserId;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashSet;

/// Reasons a user may not mutate boards
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// No valid session for this user
    #[error("user is not authenticated: {0}")]
    Unauthenticated(UserId),

    /// User is suspended
    #[error("user is suspended: {0}")]
    Suspended(UserId),

    /// Access backend failure
    #[error("access backend error: {0}")]
    Backend(String),
}

/// Decides whether a user may perform mutating operations
#[async_trait]
pub trait AccessControl: Send + Sync {
    /// `Ok(())` if `user` is authenticated and not suspended
    async fn check(&self, user: &UserId) -> Result<(), AccessError>;
}

/// Fixed user lists, for tests and local use
#[derive(Debug, Default)]
pub struct StaticAccessControl {
    authenticated: RwLock<HashSet<UserId>>,
    suspended: RwLock<HashSet<UserId>>,
}

impl StaticAccessControl {
    /// No users known
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every listed user is authenticated
    #[must_use]
    pub fn with_users<I, U>(users: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<String>,
    {
        let control = Self::new();
        for user in users {
            control.authenticate(UserId::new(user));
        }
        control
    }

    /// Mark a user as authenticated
    pub fn authenticate(&self, user: UserId) {
        self.authenticated.write().insert(user);
    }

    /// Suspend a user
    pub fn suspend(&self, user: UserId) {
        self.suspended.write().insert(user);
    }

    /// Lift a suspension
    pub fn reinstate(&self, user: &UserId) -> bool {
        self.suspended.write().remove(user)
    }
}

#[async_trait]
impl AccessControl for StaticAccessControl {
    async fn check(&self, user: &UserId) -> Result<(), AccessError> {
        if !self.authenticated.read().contains(user) {
            return Err(AccessError::Unauthenticated(user.clone()));
        }
        if self.suspended.read().contains(user) {
            return Err(AccessError::Suspended(user.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_user_passes() {
        let control = StaticAccessControl::with_users(["alice"]);
        assert!(control.check(&UserId::new("alice")).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_user_is_unauthenticated() {
        let control = StaticAccessControl::new();
        let err = control.check(&UserId::new("bob")).await.unwrap_err();
        assert_eq!(err, AccessError::Unauthenticated(UserId::new("bob")));
    }

    #[tokio::test]
    async fn suspension_can_be_lifted() {
        let control = StaticAccessControl::with_users(["carol"]);
        let carol = UserId::new("carol");
        control.suspend(carol.clone());
        assert_eq!(control.check(&carol).await, Err(AccessError::Suspended(carol.clone())));

        assert!(control.reinstate(&carol));
        assert!(control.check(&carol).await.is_ok());
    }
}
