use chrono::{DateTime, Utc};

/// Role name as persisted in the `roles` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleName {
    User,
    Admin,
}

impl RoleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "ROLE_USER",
            Self::Admin => "ROLE_ADMIN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ROLE_USER" => Some(Self::User),
            "ROLE_ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Seeded role row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: i64,
    pub name: RoleName,
}

/// User model
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub other_names: Option<String>,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<RoleName>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(RoleName::Admin)
    }
}

/// Account data for a user that has not been persisted yet.
/// `password_hash` must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub other_names: Option<String>,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_roundtrip_through_storage_form() {
        for role in [RoleName::User, RoleName::Admin] {
            assert_eq!(RoleName::parse(role.as_str()), Some(role));
        }
        assert_eq!(RoleName::parse("ROLE_ROOT"), None);
    }

    #[test]
    fn admin_flag_follows_roles() {
        let now = Utc::now();
        let mut user = User {
            id: 1,
            first_name: "Ada".into(),
            last_name: "Obi".into(),
            other_names: None,
            username: "ada".into(),
            email: "ada@example.com".into(),
            password_hash: "hash".into(),
            roles: vec![RoleName::User],
            created_at: now,
            updated_at: now,
        };
        assert!(!user.is_admin());

        user.roles.push(RoleName::Admin);
        assert!(user.is_admin());
        assert!(user.has_role(RoleName::User));
    }
}
