use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Deleted,
    Inactive,
    Active,
}

impl UserStatus {
    pub fn as_i16(self) -> i16 {
        match self {
            UserStatus::Deleted => 0,
            UserStatus::Inactive => 9,
            UserStatus::Active => 10,
        }
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            0 => Some(UserStatus::Deleted),
            9 => Some(UserStatus::Inactive),
            10 => Some(UserStatus::Active),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub auth_key: String,
    pub password_hash: String,
    pub password_reset_token: String,
    pub verification_token: String,
    pub status: UserStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One-time code proving ownership of an email address before signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSecret {
    pub email: String,
    pub secret_code: String,
}
