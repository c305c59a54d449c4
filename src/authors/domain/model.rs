use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};

// Author of one or more books; books point back through their author id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub name: String,
    pub biography: Option<String>,
    pub nationality: Option<String>,
}

impl Author {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            biography: None,
            nationality: None,
        }
    }

    pub fn with_nationality(mut self, nationality: &str) -> Self {
        self.nationality = Some(nationality.to_string());
        self
    }

    pub fn with_biography(mut self, biography: &str) -> Self {
        self.biography = Some(biography.to_string());
        self
    }

    pub fn validate(&self) -> LibraryResult<()> {
        if self.name.trim().is_empty() {
            return Err(LibraryError::validation("name is required", Some("name".to_string())));
        }
        Ok(())
    }
}

impl Identifiable for Author {
    fn id(&self) -> String {
        self.id.to_string()
    }
}
