/**
 * Access Control Policy
 *
 * Central authorization predicates consumed by every content handler,
 * instead of re-deriving role checks per endpoint:
 *
 * - owner-or-admin: content mutation is allowed for the creator or any admin
 * - role gate: admin-only operations fail with 403 for non-admins
 * - college scoping: student reads are forced to the student's own college
 * - self-protection: an admin cannot delete their own account
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::auth::AuthenticatedUser;

/// User role. Closed set; unknown database values are rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "student" => Some(Role::Student),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Content visibility. `Public` is stored but no handler branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    College,
    Public,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::College => "college",
            Visibility::Public => "public",
        }
    }
}

/// Post kind. Certification posts are paired with a certification row and
/// share its deletion lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Post,
    Certification,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Post => "post",
            PostType::Certification => "certification",
        }
    }

    pub fn parse(value: &str) -> Option<PostType> {
        match value {
            "post" => Some(PostType::Post),
            "certification" => Some(PostType::Certification),
            _ => None,
        }
    }
}

/// Allow mutation when the requester owns the content or is an admin.
pub fn require_owner_or_admin(user: &AuthenticatedUser, owner_id: Uuid) -> Result<(), ApiError> {
    if user.user_id == owner_id || user.role == Role::Admin {
        Ok(())
    } else {
        Err(ApiError::authorization("Not authorized"))
    }
}

/// Allow only admins.
pub fn require_admin(user: &AuthenticatedUser) -> Result<(), ApiError> {
    if user.role == Role::Admin {
        Ok(())
    } else {
        Err(ApiError::authorization("Admin access required"))
    }
}

/// Resolve the effective college filter for a material query.
///
/// Students always see their own college, regardless of any requested
/// filter. Admins may filter by any college or pass `None` to see all.
pub fn scope_college(
    user: &AuthenticatedUser,
    requested: Option<String>,
) -> Option<String> {
    match user.role {
        Role::Student => user.college_name.clone(),
        Role::Admin => requested,
    }
}

/// Reject an admin deleting their own user account.
pub fn forbid_self_delete(user: &AuthenticatedUser, target_id: Uuid) -> Result<(), ApiError> {
    if user.user_id == target_id {
        Err(ApiError::authorization("Cannot delete your own account"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn student(college: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::Student,
            college_name: Some(college.to_string()),
        }
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            name: "Root".to_string(),
            email: "admin@example.com".to_string(),
            role: Role::Admin,
            college_name: None,
        }
    }

    #[test]
    fn test_owner_may_mutate() {
        let user = student("Tech U");
        assert!(require_owner_or_admin(&user, user.user_id).is_ok());
    }

    #[test]
    fn test_non_owner_student_is_forbidden() {
        let user = student("Tech U");
        let result = require_owner_or_admin(&user, Uuid::new_v4());
        assert_matches!(result, Err(ApiError::Authorization { .. }));
    }

    #[test]
    fn test_admin_may_mutate_any_content() {
        let user = admin();
        assert!(require_owner_or_admin(&user, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_role_gate() {
        assert!(require_admin(&admin()).is_ok());
        assert_matches!(
            require_admin(&student("Tech U")),
            Err(ApiError::Authorization { .. })
        );
    }

    #[test]
    fn test_student_college_scope_ignores_requested_filter() {
        let user = student("Tech U");
        let scope = scope_college(&user, Some("Business College".to_string()));
        assert_eq!(scope.as_deref(), Some("Tech U"));
    }

    #[test]
    fn test_admin_college_scope_passes_filter_through() {
        let user = admin();
        assert_eq!(
            scope_college(&user, Some("Tech U".to_string())).as_deref(),
            Some("Tech U")
        );
        assert_eq!(scope_college(&user, None), None);
    }

    #[test]
    fn test_self_delete_is_forbidden() {
        let user = admin();
        assert_matches!(
            forbid_self_delete(&user, user.user_id),
            Err(ApiError::Authorization { .. })
        );
        assert!(forbid_self_delete(&user, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_role_parse_round_trip() {
        assert_eq!(Role::parse("student"), Some(Role::Student));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::Admin.as_str(), "admin");
    }
}
