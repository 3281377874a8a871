use chrono::{DateTime, Utc};
use rk_core::domain::entities::user::{Permission, Role, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,

    /// Complexity is checked by the password policy
    #[validate(length(min = 1, max = 128))]
    pub password: String,

    /// Defaults to `customer`
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// User id or email
    #[serde(alias = "email")]
    #[validate(length(min = 1, max = 255))]
    pub identifier: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, max = 128))]
    pub current_password: String,

    #[validate(length(min = 1, max = 128))]
    pub new_password: String,
}

/// Public view of an identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub permissions: Vec<Permission>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            permissions: user.role.permissions().to_vec(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_accepts_email_alias() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"email":"alice@example.com","password":"x"}"#).unwrap();
        assert_eq!(request.identifier, "alice@example.com");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_signup_request_validation() {
        let request: SignupRequest =
            serde_json::from_str(r#"{"email":"not-an-email","password":"P@ssw0rd1"}"#).unwrap();
        assert_eq!(request.role, Role::Customer);

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_user_response_lists_permissions() {
        let user = User::new("bob@example.com", "hash".to_string(), Role::ShopManager);
        let response = UserResponse::from(user);

        assert_eq!(response.permissions.len(), 3);
        assert!(response.permissions.contains(&Permission::ProcessOrders));
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
