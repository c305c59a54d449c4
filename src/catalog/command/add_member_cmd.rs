use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::desk::SharedDesk;
use crate::members::domain::model::Member;
use crate::members::dto::MemberDto;

pub struct AddMemberCommand {
    desk: SharedDesk,
}

impl AddMemberCommand {
    pub fn new(desk: SharedDesk) -> Self {
        Self {
            desk,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddMemberCommandRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl AddMemberCommandRequest {
    pub fn new(name: &str, email: &str, phone: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            address: None,
        }
    }

    pub fn build_member(&self) -> Member {
        let mut member = Member::new(self.name.as_str(), self.email.as_str(), self.phone.as_str());
        member.address = self.address.clone();
        member
    }
}

#[derive(Debug, Serialize)]
pub struct AddMemberCommandResponse {
    pub member: MemberDto,
}

impl AddMemberCommandResponse {
    pub fn new(member: MemberDto) -> Self {
        Self {
            member,
        }
    }
}

#[async_trait]
impl Command<AddMemberCommandRequest, AddMemberCommandResponse> for AddMemberCommand {
    async fn execute(&self, req: AddMemberCommandRequest) -> Result<AddMemberCommandResponse, CommandError> {
        self.desk.lock().await.add_member(req.build_member()).await
            .map_err(CommandError::from).map(|saved| AddMemberCommandResponse::new(MemberDto::from(&saved)))
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::add_member_cmd::{AddMemberCommand, AddMemberCommandRequest};
    use crate::core::command::{Command, CommandError};
    use crate::desk::factory::create_test_desk;

    #[tokio::test]
    async fn test_should_run_add_member() {
        let desk = create_test_desk().await;
        let res = AddMemberCommand::new(desk.clone())
            .execute(AddMemberCommandRequest::new("Jane Smith", "jane.smith@email.com", "+1-555-0106"))
            .await.expect("should add member");
        assert_eq!(Some("jane.smith@email.com".to_string()), res.member.email);
        assert_eq!(6, desk.lock().await.store().members().len());
    }

    #[tokio::test]
    async fn test_should_reject_member_without_email() {
        let desk = create_test_desk().await;
        let res = AddMemberCommand::new(desk).execute(AddMemberCommandRequest::new("Jane Smith", "", "")).await;
        assert!(matches!(res, Err(CommandError::Validation { .. })));
    }
}
