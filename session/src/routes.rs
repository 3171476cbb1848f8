//! Application routes and their access policy.

use crate::guard::{self, GuardDecision, RoleSet};
use crate::state::SessionView;
use eventmarketplace_api::Role;
use std::fmt;

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, signed in or not.
    Public,
    /// Any signed-in user.
    SignedIn,
    /// Signed-in users with one of these roles.
    Roles(RoleSet),
}

const ORGANIZER: Access = Access::Roles(RoleSet::only(Role::Organizer));
const SUPPLIER: Access = Access::Roles(RoleSet::only(Role::Supplier));

/// A navigable view of the marketplace client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Home,
    /// `/login`
    Login,
    /// `/register`
    Register,
    /// `/forgot-password`
    ForgotPassword,
    /// `/events`
    Events,
    /// `/events/:eventId`
    EventDetails(String),
    /// `/suppliers`
    Suppliers,
    /// `/profile`
    Profile,
    /// `/bookings`
    MyBookings,
    /// `/booking/:eventId`
    BookingForm(String),
    /// `/booking-confirmation/:bookingId`
    BookingConfirmation(String),
    /// `/organizer/dashboard`
    OrganizerDashboard,
    /// `/organizer/events`
    OrganizerEvents,
    /// `/organizer/events/create`
    CreateEvent,
    /// `/organizer/events/edit/:eventId`
    EditEvent(String),
    /// `/organizer/bookings`
    OrganizerBookings,
    /// `/supplier/dashboard`
    SupplierDashboard,
    /// `/supplier/profile`
    SupplierProfile,
}

impl Route {
    /// Parse a path. Query strings, fragments and a trailing slash are
    /// ignored; unknown paths yield `None`.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Self::Home,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["forgot-password"] => Self::ForgotPassword,
            ["events"] => Self::Events,
            ["events", id] => Self::EventDetails((*id).to_string()),
            ["suppliers"] => Self::Suppliers,
            ["profile"] => Self::Profile,
            ["bookings"] => Self::MyBookings,
            ["booking", id] => Self::BookingForm((*id).to_string()),
            ["booking-confirmation", id] => Self::BookingConfirmation((*id).to_string()),
            ["organizer", "dashboard"] => Self::OrganizerDashboard,
            ["organizer", "events"] => Self::OrganizerEvents,
            ["organizer", "events", "create"] => Self::CreateEvent,
            ["organizer", "events", "edit", id] => Self::EditEvent((*id).to_string()),
            ["organizer", "bookings"] => Self::OrganizerBookings,
            ["supplier", "dashboard"] => Self::SupplierDashboard,
            ["supplier", "profile"] => Self::SupplierProfile,
            _ => return None,
        };
        Some(route)
    }

    /// Path of the route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::ForgotPassword => "/forgot-password".to_string(),
            Self::Events => "/events".to_string(),
            Self::EventDetails(id) => format!("/events/{id}"),
            Self::Suppliers => "/suppliers".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::MyBookings => "/bookings".to_string(),
            Self::BookingForm(event_id) => format!("/booking/{event_id}"),
            Self::BookingConfirmation(id) => format!("/booking-confirmation/{id}"),
            Self::OrganizerDashboard => "/organizer/dashboard".to_string(),
            Self::OrganizerEvents => "/organizer/events".to_string(),
            Self::CreateEvent => "/organizer/events/create".to_string(),
            Self::EditEvent(id) => format!("/organizer/events/edit/{id}"),
            Self::OrganizerBookings => "/organizer/bookings".to_string(),
            Self::SupplierDashboard => "/supplier/dashboard".to_string(),
            Self::SupplierProfile => "/supplier/profile".to_string(),
        }
    }

    /// Access policy of the route.
    #[must_use]
    pub const fn access(&self) -> Access {
        match self {
            Self::Home
            | Self::Login
            | Self::Register
            | Self::ForgotPassword
            | Self::Events
            | Self::EventDetails(_)
            | Self::Suppliers => Access::Public,
            Self::Profile
            | Self::MyBookings
            | Self::BookingForm(_)
            | Self::BookingConfirmation(_) => Access::SignedIn,
            Self::OrganizerDashboard
            | Self::OrganizerEvents
            | Self::CreateEvent
            | Self::EditEvent(_)
            | Self::OrganizerBookings => ORGANIZER,
            Self::SupplierDashboard | Self::SupplierProfile => SUPPLIER,
        }
    }

    /// Decide whether the route renders for `view`.
    ///
    /// Public routes always render; the rest go through the guard.
    #[must_use]
    pub fn decide(&self, view: &SessionView) -> GuardDecision {
        match self.access() {
            Access::Public => GuardDecision::Render,
            Access::SignedIn => guard::evaluate(view, None),
            Access::Roles(roles) => guard::evaluate(view, Some(roles)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Where a user lands after signing in.
#[must_use]
pub const fn landing_route(role: Role) -> Route {
    match role {
        Role::Organizer => Route::OrganizerDashboard,
        Role::Supplier => Route::SupplierDashboard,
        Role::User => Route::Events,
    }
}
