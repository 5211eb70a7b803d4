//! Authorization policy
//!
//! One declarative table keyed by (resource, operation) maps to a
//! rule evaluated over the caller and the optional target record id.
//! Every handler consults the table before delegating to CRUD.

use uuid::Uuid;

use crate::error::ApiError;
use crate::models::Role;

/// Identity decoded from a verified request token
#[derive(Debug, Clone)]
pub struct Caller {
    pub id: Uuid,
    pub role: Role,
}

/// Resources the policy table knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Movie,
    Session,
    SessionSeat,
    Ticket,
}

/// CRUD-level operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

const ADMIN_ONLY: &str = "You don't have Admin privileges";
const ADMIN_ONLY_ROUTE: &str = "You don't have Admin privileges to access this route";
const NOT_OWN_UPDATE: &str = "You cannot update another user's account";
const NOT_OWN_DELETE: &str = "You cannot delete another user's account";

/// A single policy rule
#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Any authenticated caller
    Anyone,
    /// Caller must be ADMIN
    AdminOnly(&'static str),
    /// Caller must be the target user, regardless of role
    SelfOnly(&'static str),
    /// Caller must be the target user or an ADMIN
    SelfOrAdmin(&'static str),
}

/// The policy table
fn policy(resource: Resource, operation: Operation) -> Rule {
    use Operation::*;
    use Resource::*;

    match (resource, operation) {
        (Movie | Session, List | Get) => Rule::Anyone,
        (Movie | Session, Create | Update | Delete) => Rule::AdminOnly(ADMIN_ONLY),

        // Direct seat administration bypasses availability checks, so
        // it is held to the same bar as session writes.
        (SessionSeat, _) => Rule::AdminOnly(ADMIN_ONLY),

        (User, List) => Rule::AdminOnly(ADMIN_ONLY_ROUTE),
        (User, Get) => Rule::SelfOrAdmin(ADMIN_ONLY),
        (User, Update) => Rule::SelfOnly(NOT_OWN_UPDATE),
        (User, Delete) => Rule::SelfOnly(NOT_OWN_DELETE),
        // Sign-up itself is public; an authenticated create is harmless.
        (User, Create) => Rule::Anyone,

        (Ticket, Create) => Rule::Anyone,
        (Ticket, _) => Rule::AdminOnly(ADMIN_ONLY),
    }
}

/// Evaluate the policy for a caller against an optional target record
pub fn authorize(
    resource: Resource,
    operation: Operation,
    caller: &Caller,
    target: Option<Uuid>,
) -> Result<(), ApiError> {
    let rule = policy(resource, operation);
    let is_admin = caller.role == Role::Admin;
    let is_self = target.is_some_and(|id| id == caller.id);

    let (allowed, message) = match rule {
        Rule::Anyone => (true, ""),
        Rule::AdminOnly(message) => (is_admin, message),
        Rule::SelfOnly(message) => (is_self, message),
        Rule::SelfOrAdmin(message) => (is_self || is_admin, message),
    };

    if allowed {
        Ok(())
    } else {
        Err(ApiError::Forbidden(message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Caller {
        Caller {
            id: Uuid::new_v4(),
            role: Role::Admin,
        }
    }

    fn user() -> Caller {
        Caller {
            id: Uuid::new_v4(),
            role: Role::User,
        }
    }

    fn forbidden_message(result: Result<(), ApiError>) -> String {
        match result {
            Err(ApiError::Forbidden(message)) => message,
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[test]
    fn test_movie_writes_require_admin() {
        for operation in [Operation::Create, Operation::Update, Operation::Delete] {
            assert!(authorize(Resource::Movie, operation, &admin(), None).is_ok());
            let message = forbidden_message(authorize(Resource::Movie, operation, &user(), None));
            assert_eq!(message, "You don't have Admin privileges");
        }
    }

    #[test]
    fn test_movie_reads_are_open() {
        assert!(authorize(Resource::Movie, Operation::List, &user(), None).is_ok());
        assert!(authorize(Resource::Session, Operation::Get, &user(), None).is_ok());
    }

    #[test]
    fn test_user_list_is_admin_only_with_route_message() {
        assert!(authorize(Resource::User, Operation::List, &admin(), None).is_ok());
        let message = forbidden_message(authorize(Resource::User, Operation::List, &user(), None));
        assert_eq!(message, "You don't have Admin privileges to access this route");
    }

    #[test]
    fn test_user_get_allows_self_or_admin() {
        let caller = user();
        assert!(authorize(Resource::User, Operation::Get, &caller, Some(caller.id)).is_ok());
        assert!(authorize(Resource::User, Operation::Get, &admin(), Some(Uuid::new_v4())).is_ok());

        let message = forbidden_message(authorize(
            Resource::User,
            Operation::Get,
            &caller,
            Some(Uuid::new_v4()),
        ));
        assert_eq!(message, "You don't have Admin privileges");
    }

    #[test]
    fn test_user_update_and_delete_are_self_only_even_for_admin() {
        let other = Some(Uuid::new_v4());

        let message =
            forbidden_message(authorize(Resource::User, Operation::Update, &admin(), other));
        assert_eq!(message, "You cannot update another user's account");

        let message =
            forbidden_message(authorize(Resource::User, Operation::Delete, &admin(), other));
        assert_eq!(message, "You cannot delete another user's account");

        let caller = user();
        assert!(authorize(Resource::User, Operation::Update, &caller, Some(caller.id)).is_ok());
        assert!(authorize(Resource::User, Operation::Delete, &caller, Some(caller.id)).is_ok());
    }

    #[test]
    fn test_seat_administration_requires_admin() {
        assert!(authorize(Resource::SessionSeat, Operation::Update, &admin(), None).is_ok());
        assert!(authorize(Resource::SessionSeat, Operation::Update, &user(), None).is_err());
    }

    #[test]
    fn test_ticket_purchase_is_open_to_any_caller() {
        assert!(authorize(Resource::Ticket, Operation::Create, &user(), None).is_ok());
    }
}
