use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::authors::domain::model::Author;
use crate::catalog::projection::{BookView, BorrowView};
use crate::checkout::domain::model::BorrowRecord;
use crate::members::domain::model::Member;
use crate::utils::date::format_date;

/// Selects the items whose fields contain `query`, ignoring case.
///
/// A blank query keeps every item. Matches come back in their original order;
/// there is no ranking.
pub fn filter<'a, T, F>(items: &'a [T], query: &str, fields: F) -> Vec<&'a T>
where
    F: Fn(&T) -> Vec<String>,
{
    if query.trim().is_empty() {
        return items.iter().collect();
    }
    let needle = query.to_lowercase();
    items.iter()
        .filter(|item| fields(*item).iter().any(|f| f.to_lowercase().contains(needle.as_str())))
        .collect()
}

// Searchable names the denormalized fields a screen searches over
pub trait Searchable {
    fn search_fields(&self) -> Vec<String>;
}

impl Searchable for BorrowView {
    fn search_fields(&self) -> Vec<String> {
        vec![self.book_title.to_string(), self.member_name.to_string(), format_date(self.record.borrow_date)]
    }
}

impl Searchable for BookView {
    fn search_fields(&self) -> Vec<String> {
        vec![self.book.title.to_string(), self.book.category.to_string(), self.author_name.to_string()]
    }
}

impl Searchable for Author {
    fn search_fields(&self) -> Vec<String> {
        vec![self.name.to_string(), self.nationality.clone().unwrap_or_default()]
    }
}

impl Searchable for Member {
    fn search_fields(&self) -> Vec<String> {
        vec![self.name.to_string(), self.email.to_string(), self.phone.to_string()]
    }
}

pub fn search<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    filter(items, query, |item| item.search_fields())
}

// Tab scopes the borrowed-books screen after text filtering
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    All,
    Active,
    Returned,
}

impl Tab {
    pub fn admits(&self, record: &BorrowRecord) -> bool {
        match self {
            Tab::All => true,
            Tab::Active => record.is_active(),
            Tab::Returned => record.is_returned(),
        }
    }
}

impl From<String> for Tab {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "active" => Tab::Active,
            "returned" => Tab::Returned,
            _ => Tab::All,
        }
    }
}

impl Display for Tab {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Tab::All => write!(f, "all"),
            Tab::Active => write!(f, "active"),
            Tab::Returned => write!(f, "returned"),
        }
    }
}

pub fn scope<'a>(views: Vec<&'a BorrowView>, tab: Tab) -> Vec<&'a BorrowView> {
    views.into_iter().filter(|v| tab.admits(&v.record)).collect()
}
