//! Route guard.
//!
//! Decides whether a protected view may render for the current session. The
//! guard is a pure function of the session view and an optional role
//! allow-list; it never blocks and never mutates anything.

use crate::routes::Route;
use crate::state::SessionView;
use eventmarketplace_api::Role;
use std::fmt;

/// Set of marketplace roles.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleSet(u8);

impl RoleSet {
    /// No roles.
    pub const EMPTY: Self = Self(0);

    /// Every role.
    pub const ALL: Self = Self::of(&Role::ALL);

    /// Set containing exactly `roles`.
    #[must_use]
    pub const fn of(roles: &[Role]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < roles.len() {
            bits |= Self::bit(roles[i]);
            i += 1;
        }
        Self(bits)
    }

    /// Set containing only `role`.
    #[must_use]
    pub const fn only(role: Role) -> Self {
        Self(Self::bit(role))
    }

    /// Whether `role` is in the set.
    #[must_use]
    pub const fn contains(self, role: Role) -> bool {
        self.0 & Self::bit(role) != 0
    }

    /// Set with `role` added.
    #[must_use]
    pub const fn with(self, role: Role) -> Self {
        Self(self.0 | Self::bit(role))
    }

    /// Whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Roles in the set, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |role| self.contains(*role))
    }

    const fn bit(role: Role) -> u8 {
        1 << (role as u8)
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Where a refused navigation is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Redirect {
    /// Nobody is signed in.
    SignIn,
    /// Signed in, but with a role the view does not allow.
    Public,
}

impl Redirect {
    /// Route to navigate to.
    #[must_use]
    pub const fn route(self) -> Route {
        match self {
            Self::SignIn => Route::Login,
            Self::Public => Route::Home,
        }
    }

    /// Path to navigate to.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::SignIn => "/login",
            Self::Public => "/",
        }
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardDecision {
    /// Session still restoring: show nothing, redirect nowhere.
    Wait,
    /// Navigate elsewhere.
    Redirect(Redirect),
    /// Render the protected view.
    Render,
}

impl GuardDecision {
    /// Whether the view may render.
    #[must_use]
    pub const fn renders(self) -> bool {
        matches!(self, Self::Render)
    }
}

/// Evaluate the guard for `view`, optionally restricted to `allowed` roles.
///
/// Loading wins over everything; a missing user wins over a role mismatch.
#[must_use]
pub fn evaluate(view: &SessionView, allowed: Option<RoleSet>) -> GuardDecision {
    if view.loading {
        return GuardDecision::Wait;
    }

    let Some(user) = &view.user else {
        return GuardDecision::Redirect(Redirect::SignIn);
    };

    match allowed {
        Some(roles) if !roles.contains(user.role) => GuardDecision::Redirect(Redirect::Public),
        _ => GuardDecision::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventmarketplace_api::{BearerToken, User};

    fn view(role: Option<Role>, loading: bool) -> SessionView {
        SessionView {
            user: role.map(|role| User::new("u1", role)),
            token: role.map(|_| BearerToken::new("abc")),
            loading,
        }
    }

    #[test]
    fn test_role_set() {
        let set = RoleSet::of(&[Role::Organizer, Role::Supplier]);
        assert!(set.contains(Role::Organizer));
        assert!(!set.contains(Role::User));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Role::Organizer, Role::Supplier]);
        assert_eq!([Role::Supplier, Role::Organizer].into_iter().collect::<RoleSet>(), set);
        assert!(RoleSet::EMPTY.is_empty());
        assert_eq!(RoleSet::ALL.iter().count(), 3);
        assert_eq!(format!("{:?}", RoleSet::only(Role::User)), "{User}");
    }

    #[test]
    fn test_loading_waits() {
        assert_eq!(evaluate(&view(None, true), None), GuardDecision::Wait);
        assert_eq!(
            evaluate(&view(Some(Role::User), true), Some(RoleSet::only(Role::Organizer))),
            GuardDecision::Wait
        );
    }

    #[test]
    fn test_missing_user_goes_to_sign_in() {
        let decision = evaluate(&view(None, false), Some(RoleSet::only(Role::Organizer)));
        assert_eq!(decision, GuardDecision::Redirect(Redirect::SignIn));
        assert_eq!(Redirect::SignIn.path(), "/login");
    }

    #[test]
    fn test_wrong_role_goes_public() {
        let decision = evaluate(
            &view(Some(Role::Supplier), false),
            Some(RoleSet::only(Role::Organizer)),
        );
        assert_eq!(decision, GuardDecision::Redirect(Redirect::Public));
        assert_eq!(Redirect::Public.route(), Route::Home);
    }

    #[test]
    fn test_renders() {
        assert!(evaluate(&view(Some(Role::User), false), None).renders());
        assert!(
            evaluate(
                &view(Some(Role::Organizer), false),
                Some(RoleSet::only(Role::Organizer))
            )
            .renders()
        );
    }
}
