//! Caller identity reference - canonical user id or account email

use atelier_domain::UserId;

/// How a caller identified themselves to the API.
///
/// Clients may send either the canonical user id or the account email in
/// the same field. The two are distinguished once, here, and only resolved
/// ids travel further into the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    ById(UserId),
    ByEmail(String),
}

impl UserRef {
    /// Classify a raw identity string. Anything containing `@` is an email;
    /// everything else is treated as an already-canonical id.
    pub fn parse(raw: &str) -> Self {
        if raw.contains('@') {
            Self::ByEmail(raw.to_string())
        } else {
            Self::ById(UserId::from(raw))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_strings_parse_as_emails() {
        assert_eq!(
            UserRef::parse("ada@example.com"),
            UserRef::ByEmail("ada@example.com".to_string())
        );
    }

    #[test]
    fn plain_ids_parse_as_ids() {
        assert_eq!(
            UserRef::parse("clx0239ab0000u7pl8h2k4d1n"),
            UserRef::ById(UserId::from("clx0239ab0000u7pl8h2k4d1n"))
        );
    }

    #[test]
    fn uuid_shaped_ids_stay_ids() {
        let raw = "7c9e6679-7425-40de-944b-e07fc1f90ae7";
        assert_eq!(UserRef::parse(raw), UserRef::ById(UserId::from(raw)));
    }
}
