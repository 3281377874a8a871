//! User entity representing a registered identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of roles an identity can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    ShopOwner,
    Customer,
    Admin,
    ShopManager,
}

/// Actions a role may be granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    CreateItem,
    EditItem,
    DeleteItem,
    ViewItem,
    ManageUsers,
    ViewAuditLogs,
    ModifySettings,
    ManageInventory,
    ProcessOrders,
    AccessReports,
}

impl Role {
    /// Permissions granted to this role
    pub fn permissions(&self) -> &'static [Permission] {
        use Permission::*;

        match self {
            Role::ShopOwner => &[CreateItem, EditItem, DeleteItem, ViewItem],
            Role::Customer => &[ViewItem],
            Role::ShopManager => &[ViewItem, ManageInventory, ProcessOrders],
            Role::Admin => &[
                CreateItem,
                EditItem,
                DeleteItem,
                ViewItem,
                ManageUsers,
                ViewAuditLogs,
                ModifySettings,
                ManageInventory,
                ProcessOrders,
                AccessReports,
            ],
        }
    }

    /// Checks if the role grants a permission
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::ShopOwner => "shop_owner",
            Role::Customer => "customer",
            Role::Admin => "admin",
            Role::ShopManager => "shop_manager",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Customer
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shop_owner" => Ok(Role::ShopOwner),
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            "shop_manager" => Ok(Role::ShopManager),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// User entity representing a registered identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login email, stored lowercased
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Role tag
    pub role: Role,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance
    pub fn new(email: &str, password_hash: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}

/// Canonical form used for storage and lookups
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
