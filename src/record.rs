use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder written over every name by anonymization.
pub const ANONYMIZED_NAME: &str = "Anonymiserad Användare";

/// Demo rows inserted into an empty store, as `(full_name, mail)`.
pub const SEED_PERSONS: [(&str, &str); 3] = [
    ("Karin Karlsson", "karin@example.com"),
    ("David Dahl", "david@example.com"),
    ("Erik Erikson", "Erik@example.com"),
];

/// A stored person row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub user_id: i64,
    pub full_name: String,
    pub mail: String,
}

impl fmt::Display for PersonRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Mail: {}",
            self.user_id, self.full_name, self.mail
        )
    }
}

/// A person not yet stored; the id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub full_name: String,
    pub mail: String,
}

impl NewPerson {
    pub fn new(full_name: impl Into<String>, mail: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            mail: mail.into(),
        }
    }

    /// Returns the first missing field, if any.
    pub(crate) fn missing_field(&self) -> Option<&'static str> {
        if self.full_name.trim().is_empty() {
            Some("full_name")
        } else if self.mail.trim().is_empty() {
            Some("mail")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_listing_format() {
        let record = PersonRecord {
            user_id: 7,
            full_name: "David Dahl".to_string(),
            mail: "david@example.com".to_string(),
        };
        assert_eq!(
            record.to_string(),
            "ID: 7, Name: David Dahl, Mail: david@example.com"
        );
    }

    #[test]
    fn blank_fields_are_reported() {
        assert_eq!(NewPerson::new(" ", "a@example.com").missing_field(), Some("full_name"));
        assert_eq!(NewPerson::new("Ann", "").missing_field(), Some("mail"));
        assert_eq!(NewPerson::new("Ann", "a@example.com").missing_field(), None);
    }
}
