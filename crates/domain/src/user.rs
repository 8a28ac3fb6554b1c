use derive_more::{AsRef, Display};

/// Remote account identity as reported by the sync server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserID,
    pub email: String,
}

/// Server-assigned opaque identifier.
#[derive(AsRef, Debug, Display, Default, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserID(String);

impl From<String> for UserID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
