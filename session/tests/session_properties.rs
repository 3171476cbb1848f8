//! Property tests for the session reducer and the route guard

#![allow(clippy::unwrap_used, clippy::expect_used)]

use eventmarketplace_api::{BearerToken, Role, User};
use eventmarketplace_core::effect::Effect;
use eventmarketplace_core::reducer::Reducer;
use eventmarketplace_session::mocks::{MockIdentityProvider, MockVerifier};
use eventmarketplace_session::{
    GuardDecision, IdentityRecord, Redirect, RoleSet, SessionAction, SessionConfig,
    SessionEnvironment, SessionReducer, SessionState, SessionView, evaluate,
};
use eventmarketplace_testing::InMemoryStorage;
use proptest::prelude::*;
use std::sync::Arc;

const KEY: &str = "firebaseToken";

fn role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::User), Just(Role::Organizer), Just(Role::Supplier)]
}

fn role_set() -> impl Strategy<Value = RoleSet> {
    proptest::collection::vec(role(), 0..3).prop_map(|roles| roles.into_iter().collect())
}

fn token() -> impl Strategy<Value = BearerToken> {
    prop_oneof![Just("a"), Just("b"), Just("c")].prop_map(BearerToken::new)
}

fn uid() -> impl Strategy<Value = String> {
    prop_oneof![Just("u1"), Just("u2")].prop_map(str::to_string)
}

fn user() -> impl Strategy<Value = User> {
    (uid(), role()).prop_map(|(id, role)| User::new(id, role))
}

fn action() -> impl Strategy<Value = SessionAction> {
    prop_oneof![
        Just(SessionAction::Bootstrap),
        Just(SessionAction::Logout),
        Just(SessionAction::LoggedOut),
        Just(SessionAction::LogoutFailed {
            reason: "offline".to_string()
        }),
        prop::option::of(uid())
            .prop_map(|uid| SessionAction::IdentityChanged(uid.map(|uid| IdentityRecord::new(uid, None)))),
        (uid(), token()).prop_map(|(uid, token)| SessionAction::TokenIssued { uid, token }),
        uid().prop_map(|uid| SessionAction::TokenRequestFailed {
            uid,
            reason: "expired".to_string()
        }),
        (token(), user()).prop_map(|(token, user)| SessionAction::VerificationSucceeded { token, user }),
        token().prop_map(|token| SessionAction::VerificationFailed {
            token,
            reason: "Unauthorized".to_string()
        }),
        (token(), user()).prop_map(|(token, user)| SessionAction::Login { token, user }),
        user().prop_map(SessionAction::UpdateUser),
    ]
}

fn view() -> impl Strategy<Value = SessionView> {
    (prop::option::of(user()), any::<bool>()).prop_map(|(user, loading)| SessionView {
        token: user.as_ref().map(|_| BearerToken::new("t")),
        user,
        loading,
    })
}

proptest! {
    /// Durable storage equals the in-memory token after every transition,
    /// a user is never held without a token, and loading never comes back.
    #[test]
    fn session_invariants_hold(
        restored in prop::option::of(token()),
        actions in proptest::collection::vec(action(), 1..40),
    ) {
        let storage = match &restored {
            Some(token) => InMemoryStorage::with_entry(KEY, token.as_str()),
            None => InMemoryStorage::new(),
        };
        let env = SessionEnvironment::new(
            MockIdentityProvider::new(),
            MockVerifier::new(),
            Arc::new(storage.clone()),
            SessionConfig::default(),
        );
        let reducer = SessionReducer::<MockIdentityProvider, MockVerifier>::new();
        let mut state = SessionState::restoring(restored);
        let mut was_loading = state.loading;

        for action in actions {
            for effect in reducer.reduce(&mut state, action, &env) {
                if let Effect::Storage(op) = effect {
                    op.execute().unwrap();
                }
            }

            prop_assert_eq!(
                storage.peek(KEY),
                state.token.as_ref().map(|t| t.as_str().to_string())
            );
            prop_assert!(state.token.is_some() || state.user.is_none());
            prop_assert!(was_loading || !state.loading);
            was_loading = state.loading;
        }
    }

    /// A loading session never redirects.
    #[test]
    fn loading_never_redirects(view in view(), allowed in prop::option::of(role_set())) {
        let view = SessionView { loading: true, ..view };
        prop_assert_eq!(evaluate(&view, allowed), GuardDecision::Wait);
    }

    /// Without a user, every protected view sends to sign-in.
    #[test]
    fn missing_user_goes_to_sign_in(allowed in prop::option::of(role_set())) {
        let view = SessionView { user: None, token: None, loading: false };
        prop_assert_eq!(evaluate(&view, allowed), GuardDecision::Redirect(Redirect::SignIn));
    }

    /// A signed-in user renders exactly the views their role is allowed on.
    #[test]
    fn role_membership_decides(user in user(), allowed in role_set()) {
        let role = user.role;
        let view = SessionView {
            user: Some(user),
            token: Some(BearerToken::new("t")),
            loading: false,
        };

        let expected = if allowed.contains(role) {
            GuardDecision::Render
        } else {
            GuardDecision::Redirect(Redirect::Public)
        };
        prop_assert_eq!(evaluate(&view, Some(allowed)), expected);
        prop_assert_eq!(evaluate(&view, None), GuardDecision::Render);
    }
}

#[test]
fn supplier_is_sent_to_public_entry_from_organizer_views() {
    let view = SessionView {
        user: Some(User::new("u3", Role::Supplier)),
        token: Some(BearerToken::new("t")),
        loading: false,
    };

    assert_eq!(
        evaluate(&view, Some(RoleSet::only(Role::Organizer))),
        GuardDecision::Redirect(Redirect::Public)
    );
}
