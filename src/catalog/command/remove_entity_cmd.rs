use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::core::library::{EntityKind, EntityRef, LibraryWarning};
use crate::desk::SharedDesk;

// RemoveEntityCommand deletes a book, author, member or borrow record; deletes
// are never blocked by active borrowings, which come back as warnings instead.
pub struct RemoveEntityCommand {
    desk: SharedDesk,
}

impl RemoveEntityCommand {
    pub fn new(desk: SharedDesk) -> Self {
        Self {
            desk,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RemoveEntityCommandRequest {
    pub target: EntityRef,
}

impl RemoveEntityCommandRequest {
    pub fn new(target: EntityRef) -> Self {
        Self {
            target,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RemoveEntityCommandResponse {
    pub target: EntityRef,
    pub warnings: Vec<String>,
}

impl RemoveEntityCommandResponse {
    pub fn new(target: EntityRef, warnings: Vec<LibraryWarning>) -> Self {
        Self {
            target,
            warnings: warnings.iter().map(|w| w.to_string()).collect(),
        }
    }
}

#[async_trait]
impl Command<RemoveEntityCommandRequest, RemoveEntityCommandResponse> for RemoveEntityCommand {
    async fn execute(&self, req: RemoveEntityCommandRequest) -> Result<RemoveEntityCommandResponse, CommandError> {
        let mut desk = self.desk.lock().await;
        let id = req.target.id.as_str();
        let warnings = match req.target.kind {
            EntityKind::Book => desk.delete_book(id).await.map(|r| r.warnings),
            EntityKind::Author => desk.delete_author(id).await.map(|r| r.warnings),
            EntityKind::Member => desk.delete_member(id).await.map(|r| r.warnings),
            EntityKind::BorrowRecord => desk.delete_record(id).await.map(|_| vec![]),
        }.map_err(CommandError::from)?;
        Ok(RemoveEntityCommandResponse::new(req.target.clone(), warnings))
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::remove_entity_cmd::{RemoveEntityCommand, RemoveEntityCommandRequest};
    use crate::catalog::projection::{borrow_views, UNKNOWN_BOOK};
    use crate::core::command::{Command, CommandError};
    use crate::core::library::EntityRef;
    use crate::desk::factory::create_test_desk;

    #[tokio::test]
    async fn test_should_remove_lent_book_with_warning() {
        let desk = create_test_desk().await;
        let record = desk.lock().await.store().active_records()[0].clone();
        let cmd = RemoveEntityCommand::new(desk.clone());
        let res = cmd.execute(RemoveEntityCommandRequest::new(EntityRef::book(record.book_id.as_str())))
            .await.expect("should remove book");
        assert_eq!(1, res.warnings.len());

        let desk = desk.lock().await;
        let views = borrow_views(desk.store(), desk.store().borrow_record(record.id.as_str()), desk.today());
        assert_eq!(UNKNOWN_BOOK, views[0].book_title.as_str());
    }

    #[tokio::test]
    async fn test_should_remove_author_without_warning() {
        let desk = create_test_desk().await;
        let author_id = {
            let desk = desk.lock().await;
            let rowling = desk.store().authors().iter().find(|a| a.name == "J.K. Rowling").expect("seeded author").clone();
            rowling.id
        };
        let res = RemoveEntityCommand::new(desk.clone())
            .execute(RemoveEntityCommandRequest::new(EntityRef::author(author_id.as_str())))
            .await.expect("should remove author");
        assert!(res.warnings.is_empty());
        assert_eq!(4, desk.lock().await.store().authors().len());
    }

    #[tokio::test]
    async fn test_should_not_remove_unknown_member() {
        let desk = create_test_desk().await;
        let res = RemoveEntityCommand::new(desk)
            .execute(RemoveEntityCommandRequest::new(EntityRef::member("missing"))).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
