//! Staff roles carried in access tokens.

use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_KITCHEN: &str = "kitchen";

/// A staff role that can log in with a shared password.
///
/// `admin` moderates content and manages the roster; `kitchen` works the
/// order queue. Admins can do everything the kitchen can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Admin,
    Kitchen,
}

impl StaffRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Kitchen => ROLE_KITCHEN,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            ROLE_ADMIN => Some(Self::Admin),
            ROLE_KITCHEN => Some(Self::Kitchen),
            _ => None,
        }
    }

    /// Whether this role may work the kitchen queue.
    pub fn is_staff(self) -> bool {
        matches!(self, Self::Admin | Self::Kitchen)
    }
}
