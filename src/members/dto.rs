use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::source::WireFormat;
use crate::members::domain::model::Member;

// MemberDto is the backend's json shape for a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "crate::utils::id::deserialize_opt")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl From<&Member> for MemberDto {
    fn from(other: &Member) -> Self {
        Self {
            id: Some(other.id.to_string()),
            name: other.name.to_string(),
            email: Some(other.email.to_string()),
            phone: Some(other.phone.to_string()),
            address: other.address.clone(),
        }
    }
}

impl TryFrom<MemberDto> for Member {
    type Error = LibraryError;

    fn try_from(other: MemberDto) -> LibraryResult<Self> {
        let id = other.id.ok_or_else(|| LibraryError::serialization(
            format!("member {:?} arrived without an id", other.name).as_str()))?;
        Ok(Self {
            id,
            name: other.name,
            email: other.email.unwrap_or_default(),
            phone: other.phone.unwrap_or_default(),
            address: other.address,
        })
    }
}

impl WireFormat for Member {
    type Dto = MemberDto;

    fn to_wire(&self, _today: NaiveDate) -> MemberDto {
        MemberDto::from(self)
    }

    fn from_wire(dto: MemberDto) -> LibraryResult<Self> {
        Member::try_from(dto)
    }
}
