//! System role model

use serde::{Deserialize, Serialize};

use crate::constants::roles;

/// System-wide capability bucket of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemRole {
    Admin,
    Organizer,
    Jury,
    User,
}

impl SystemRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => roles::ADMIN,
            Self::Organizer => roles::ORGANIZER,
            Self::Jury => roles::JURY,
            Self::User => roles::USER,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            roles::ADMIN => Some(Self::Admin),
            roles::ORGANIZER => Some(Self::Organizer),
            roles::JURY => Some(Self::Jury),
            roles::USER => Some(Self::User),
            _ => None,
        }
    }

    /// Roles an account with this role may create directly
    pub fn creatable_roles(&self) -> &'static [SystemRole] {
        match self {
            Self::Admin => &[Self::User, Self::Organizer, Self::Jury],
            Self::Organizer => &[Self::Jury],
            Self::Jury | Self::User => &[],
        }
    }

    /// Check whether this role may create an account with `target`
    pub fn can_create(&self, target: SystemRole) -> bool {
        self.creatable_roles().contains(&target)
    }
}

impl std::fmt::Display for SystemRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for name in roles::ALL {
            let role = SystemRole::from_str(name).unwrap();
            assert_eq!(role.as_str(), *name);
        }
        assert_eq!(SystemRole::from_str("participant"), None);
    }

    #[test]
    fn test_creation_rights() {
        assert!(SystemRole::Admin.can_create(SystemRole::Organizer));
        assert!(SystemRole::Admin.can_create(SystemRole::Jury));
        assert!(!SystemRole::Admin.can_create(SystemRole::Admin));
        assert!(SystemRole::Organizer.can_create(SystemRole::Jury));
        assert!(!SystemRole::Organizer.can_create(SystemRole::User));
        assert!(!SystemRole::Jury.can_create(SystemRole::Jury));
    }
}
