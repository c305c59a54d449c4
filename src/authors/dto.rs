use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::authors::domain::model::Author;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::source::WireFormat;

// AuthorDto is the backend's json shape for an author; the populated `books`
// list it may carry is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "crate::utils::id::deserialize_opt")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
}

impl From<&Author> for AuthorDto {
    fn from(other: &Author) -> Self {
        Self {
            id: Some(other.id.to_string()),
            name: other.name.to_string(),
            biography: other.biography.clone(),
            nationality: other.nationality.clone(),
        }
    }
}

impl TryFrom<AuthorDto> for Author {
    type Error = LibraryError;

    fn try_from(other: AuthorDto) -> LibraryResult<Self> {
        let id = other.id.ok_or_else(|| LibraryError::serialization(
            format!("author {:?} arrived without an id", other.name).as_str()))?;
        Ok(Self {
            id,
            name: other.name,
            biography: other.biography,
            nationality: other.nationality,
        })
    }
}

impl WireFormat for Author {
    type Dto = AuthorDto;

    fn to_wire(&self, _today: NaiveDate) -> AuthorDto {
        AuthorDto::from(self)
    }

    fn from_wire(dto: AuthorDto) -> LibraryResult<Self> {
        Author::try_from(dto)
    }
}
