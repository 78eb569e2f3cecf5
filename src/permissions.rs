//! Role based capability checks for dashboard users.
//!
//! Roles and companies come from the auth provider's custom claims and are
//! trusted as given. Every check fails closed: without a role, nothing is
//! permitted.
//!
//! ```
//! use mywater_fleet::permissions::{evaluate_permissions, UserRole};
//!
//! let admin = evaluate_permissions(Some(UserRole::Admin), Some("acme"));
//! assert!(admin.can_manage_users());
//! assert!(admin.can_access_company(Some("globex")));
//!
//! let anonymous = evaluate_permissions(None, Some("acme"));
//! assert!(!anonymous.can_access_company(Some("acme")));
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Superadmin,
    Admin,
    Technician,
    User,
}

/// A role claim that does not name a known role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown user role: {0:?}")]
pub struct UnknownRole(pub String);

impl UserRole {
    // ---
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Superadmin => "superadmin",
            UserRole::Admin => "admin",
            UserRole::Technician => "technician",
            UserRole::User => "user",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "superadmin" => Ok(UserRole::Superadmin),
            "admin" => Ok(UserRole::Admin),
            "technician" => Ok(UserRole::Technician),
            "user" => Ok(UserRole::User),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Profile fields guarded separately when users edit themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    Company,
    Role,
    Status,
}

/// Capabilities of one signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permissions {
    // ---
    role: Option<UserRole>,
    company: Option<String>,
}

/// Flattened capability flags, as returned to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    // ---
    pub can_access_all_companies: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_manage_users: bool,
    pub can_access_company: bool,
    pub can_edit_user: bool,
    pub can_change_role_or_status: bool,
}

/// Build the capability set for a user's role and company claims.
pub fn evaluate_permissions(role: Option<UserRole>, company: Option<&str>) -> Permissions {
    Permissions::new(role, company.map(str::to_string))
}

impl Permissions {
    // ---
    pub fn new(role: Option<UserRole>, company: Option<String>) -> Self {
        Self { role, company }
    }

    pub fn role(&self) -> Option<UserRole> {
        self.role
    }

    pub fn can_access_all_companies(&self) -> bool {
        matches!(self.role, Some(UserRole::Superadmin | UserRole::Admin))
    }

    /// Technicians, admins and superadmins can edit; plain users cannot.
    pub fn can_edit(&self) -> bool {
        matches!(
            self.role,
            Some(UserRole::Superadmin | UserRole::Admin | UserRole::Technician)
        )
    }

    pub fn can_delete(&self) -> bool {
        matches!(self.role, Some(UserRole::Superadmin))
    }

    pub fn can_manage_users(&self) -> bool {
        matches!(self.role, Some(UserRole::Superadmin | UserRole::Admin))
    }

    /// Whether this user may edit the profile of a user with `target_role`.
    ///
    /// Everyone with a role may edit their own profile. Admins may only edit
    /// technicians and plain users.
    pub fn can_edit_user(&self, target_role: Option<UserRole>, is_self: bool) -> bool {
        // ---
        match self.role {
            None => false,
            Some(_) if is_self => true,
            Some(UserRole::Superadmin) => true,
            Some(UserRole::Admin) => {
                matches!(target_role, Some(UserRole::Technician | UserRole::User))
            }
            Some(UserRole::Technician | UserRole::User) => false,
        }
    }

    /// Whether this user may change `field` on the target's profile.
    ///
    /// Only a superadmin may change their own role or status.
    pub fn can_edit_field(
        &self,
        target_role: Option<UserRole>,
        is_self: bool,
        field: ProfileField,
    ) -> bool {
        // ---
        if !self.can_edit_user(target_role, is_self) {
            return false;
        }
        match field {
            ProfileField::Role | ProfileField::Status => {
                !is_self || self.role == Some(UserRole::Superadmin)
            }
            _ => true,
        }
    }

    /// Whether data owned by `target_company` is visible to this user.
    ///
    /// A missing company on either side never matches.
    pub fn can_access_company(&self, target_company: Option<&str>) -> bool {
        // ---
        if self.role.is_none() {
            return false;
        }
        if self.can_access_all_companies() {
            return true;
        }
        match (self.company.as_deref(), target_company) {
            (Some(own), Some(target)) => own == target,
            _ => false,
        }
    }

    /// Snapshot every flag for one target company and target user.
    pub fn capabilities(
        &self,
        target_company: Option<&str>,
        target_role: Option<UserRole>,
        is_self: bool,
    ) -> Capabilities {
        // ---
        Capabilities {
            can_access_all_companies: self.can_access_all_companies(),
            can_edit: self.can_edit(),
            can_delete: self.can_delete(),
            can_manage_users: self.can_manage_users(),
            can_access_company: self.can_access_company(target_company),
            can_edit_user: self.can_edit_user(target_role, is_self),
            can_change_role_or_status: self.can_edit_field(
                target_role,
                is_self,
                ProfileField::Role,
            ),
        }
    }
}
