use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};

// Member is a registered borrower of the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
}

impl Member {
    pub fn new(name: &str, email: &str, phone: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            address: None,
        }
    }

    pub fn with_address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    pub fn validate(&self) -> LibraryResult<()> {
        if self.name.trim().is_empty() {
            return Err(LibraryError::validation("name is required", Some("name".to_string())));
        }
        if self.email.trim().is_empty() {
            return Err(LibraryError::validation("email is required", Some("email".to_string())));
        }
        Ok(())
    }
}

impl Identifiable for Member {
    fn id(&self) -> String {
        self.id.to_string()
    }
}
