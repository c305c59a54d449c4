use serde::{Deserialize, Serialize};
use crate::catalog::store::CatalogStore;
use crate::checkout::domain::model::BorrowRecord;
use crate::core::library::{EntityKind, EntityRef, LibraryResult, LibraryWarning};
use crate::desk::LendingDesk;

// PendingAction is the single action awaiting the user's confirmation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum PendingAction {
    #[default]
    None,
    Delete(EntityRef),
    Return {
        record_id: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    Nothing,
    Deleted {
        target: EntityRef,
        warnings: Vec<LibraryWarning>,
    },
    Returned(BorrowRecord),
}

impl PendingAction {
    pub fn request_delete(&mut self, target: EntityRef) {
        *self = PendingAction::Delete(target);
    }

    pub fn request_return(&mut self, record_id: &str) {
        *self = PendingAction::Return { record_id: record_id.to_string() };
    }

    pub fn is_pending(&self) -> bool {
        !matches!(self, PendingAction::None)
    }

    pub fn cancel(&mut self) {
        *self = PendingAction::None;
    }

    // the question shown in the confirmation dialog
    pub fn prompt(&self, store: &CatalogStore) -> Option<String> {
        match self {
            PendingAction::None => None,
            PendingAction::Return { record_id } => {
                let title = record_title(store, record_id).unwrap_or_else(|| "this book".to_string());
                Some(format!("Are you sure you want to mark \"{}\" as returned?", title))
            }
            PendingAction::Delete(target) => Some(match target.kind {
                EntityKind::Book => format!("Are you sure you want to delete \"{}\"? This action cannot be undone.",
                                            store.book(target.id.as_str()).map(|b| b.title.to_string())
                                                .unwrap_or_else(|| "this book".to_string())),
                EntityKind::Author => format!("Are you sure you want to delete \"{}\"? This will also affect related books.",
                                              store.author(target.id.as_str()).map(|a| a.name.to_string())
                                                  .unwrap_or_else(|| "this author".to_string())),
                EntityKind::Member => format!("Are you sure you want to delete \"{}\"? This will also affect their borrowed books.",
                                              store.member(target.id.as_str()).map(|m| m.name.to_string())
                                                  .unwrap_or_else(|| "this member".to_string())),
                EntityKind::BorrowRecord => format!(
                    "Are you sure you want to delete the borrowed book record for \"{}\"? This action cannot be undone.",
                    record_title(store, target.id.as_str()).unwrap_or_else(|| "this record".to_string())),
            }),
        }
    }

    /// Carries out the pending action against the desk.
    ///
    /// On success the action is cleared; on failure it stays pending so the
    /// caller can retry or cancel.
    pub async fn confirm(&mut self, desk: &mut LendingDesk) -> LibraryResult<Confirmation> {
        let confirmation = match self {
            PendingAction::None => Confirmation::Nothing,
            PendingAction::Return { record_id } => Confirmation::Returned(desk.return_book(record_id.as_str()).await?),
            PendingAction::Delete(target) => {
                let id = target.id.as_str();
                let warnings = match target.kind {
                    EntityKind::Book => desk.delete_book(id).await?.warnings,
                    EntityKind::Author => desk.delete_author(id).await?.warnings,
                    EntityKind::Member => desk.delete_member(id).await?.warnings,
                    EntityKind::BorrowRecord => {
                        desk.delete_record(id).await?;
                        vec![]
                    }
                };
                Confirmation::Deleted { target: target.clone(), warnings }
            }
        };
        self.cancel();
        Ok(confirmation)
    }
}

fn record_title(store: &CatalogStore, record_id: &str) -> Option<String> {
    store.borrow_record(record_id)
        .and_then(|r| store.book(r.book_id.as_str()))
        .map(|b| b.title.to_string())
}
