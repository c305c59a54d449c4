use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::projection::{borrow_views, BorrowView};
use crate::core::command::{Command, CommandError};
use crate::desk::search::SearchOutcome;
use crate::desk::SharedDesk;
use crate::search::Tab;

pub struct SearchRecordsCommand {
    desk: SharedDesk,
}

impl SearchRecordsCommand {
    pub fn new(desk: SharedDesk) -> Self {
        Self {
            desk,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecordsCommandRequest {
    #[serde(default)]
    query: String,
    #[serde(default)]
    tab: Tab,
}

impl SearchRecordsCommandRequest {
    pub fn new(query: &str, tab: Tab) -> Self {
        Self {
            query: query.to_string(),
            tab,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchRecordsCommandResponse {
    pub records: Vec<BorrowView>,
    // set when a newer search replaced this one; `records` is then empty
    pub superseded: bool,
}

impl SearchRecordsCommandResponse {
    pub fn new(records: Vec<BorrowView>) -> Self {
        Self {
            records,
            superseded: false,
        }
    }

    pub fn superseded() -> Self {
        Self {
            records: vec![],
            superseded: true,
        }
    }
}

#[async_trait]
impl Command<SearchRecordsCommandRequest, SearchRecordsCommandResponse> for SearchRecordsCommand {
    async fn execute(&self, req: SearchRecordsCommandRequest) -> Result<SearchRecordsCommandResponse, CommandError> {
        // the desk is not held while the backend answers, so a newer search can overtake this one
        let record_search = self.desk.lock().await.record_search();
        let outcome = record_search.search(req.query.as_str()).await.map_err(CommandError::from)?;
        let desk = self.desk.lock().await;
        let views = match outcome {
            SearchOutcome::Cleared => desk.borrow_views(),
            SearchOutcome::Results(records) => borrow_views(desk.store(), records.iter(), desk.today()),
            SearchOutcome::Superseded => return Ok(SearchRecordsCommandResponse::superseded()),
        };
        Ok(SearchRecordsCommandResponse::new(
            views.into_iter().filter(|v| req.tab.admits(&v.record)).collect()))
    }
}

#[cfg(test)]
mod tests {
    use crate::checkout::command::search_records_cmd::{SearchRecordsCommand, SearchRecordsCommandRequest};
    use crate::core::command::Command;
    use crate::desk::factory::create_test_desk;
    use crate::search::Tab;

    #[tokio::test]
    async fn test_should_search_records_by_member() {
        let desk = create_test_desk().await;
        let cmd = SearchRecordsCommand::new(desk);
        let res = cmd.execute(SearchRecordsCommandRequest::new("smith", Tab::All)).await.expect("should search");
        assert!(!res.superseded);
        assert_eq!(1, res.records.len());
        assert_eq!("Jack Smith", res.records[0].member_name.as_str());
        assert_eq!("The Great Gatsby", res.records[0].book_title.as_str());
    }

    #[tokio::test]
    async fn test_should_list_all_for_blank_query() {
        let desk = create_test_desk().await;
        let cmd = SearchRecordsCommand::new(desk);
        assert_eq!(5, cmd.execute(SearchRecordsCommandRequest::new("", Tab::All)).await.expect("should list").records.len());
        assert_eq!(4, cmd.execute(SearchRecordsCommandRequest::new(" ", Tab::Active)).await.expect("should list").records.len());
        let returned = cmd.execute(SearchRecordsCommandRequest::new("", Tab::Returned)).await.expect("should list");
        assert_eq!("Animal Farm", returned.records[0].book_title.as_str());
    }
}
