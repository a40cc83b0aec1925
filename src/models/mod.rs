pub mod account;
pub mod category;
pub mod user;

pub use account::{Account, AccountCreate, AccountUpdate};
pub use category::{Category, CategoryCreate, CategoryType, CategoryUpdate};
pub use user::{AuthMessage, Credentials, Session, UserCreate};

use serde::{Deserialize, Serialize};

/// Offset/limit pagination sent as query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

impl Page {
    pub const DEFAULT_OFFSET: u32 = 0;
    pub const DEFAULT_LIMIT: u32 = 10;

    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// The page after this one, or None once the offset would overflow
    pub fn next(&self) -> Option<Self> {
        Some(Self {
            offset: self.offset.checked_add(self.limit)?,
            limit: self.limit,
        })
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Self::DEFAULT_OFFSET, Self::DEFAULT_LIMIT)
    }
}

/// Query for `GET /categories/`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryQuery {
    #[serde(flatten)]
    pub page: Page,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_type: Option<CategoryType>,
}

impl CategoryQuery {
    pub fn of_kind(category_type: CategoryType) -> Self {
        Self {
            page: Page::default(),
            category_type: Some(category_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults() {
        let page = Page::default();
        assert_eq!(page.offset, 0);
        assert_eq!(page.limit, 10);
        assert_eq!(page.next(), Some(Page::new(10, 10)));
    }

    #[test]
    fn test_next_page_stops_at_overflow() {
        assert_eq!(Page::new(u32::MAX - 5, 10).next(), None);
        assert_eq!(Page::new(u32::MAX - 10, 10).next(), Some(Page::new(u32::MAX, 10)));
    }
}
