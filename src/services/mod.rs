pub mod account_service;
pub mod auth_service;
pub mod category_service;
pub mod dashboard_service;
pub mod user_service;

pub use account_service::AccountService;
pub use auth_service::AuthService;
pub use category_service::CategoryService;
pub use dashboard_service::{DashboardService, DashboardSummary};
pub use user_service::UserService;

use std::future::Future;

use crate::error::OperationError;
use crate::models::Page;

/// Upper bound on requests made by one `list_all`
pub const MAX_LIST_PAGES: usize = 1000;

/// Fetch pages starting at `first` until one comes back short or empty.
/// A page identical to the previous one means the API ignored `offset`, so
/// paging stops there too.
pub(crate) async fn collect_pages<T, F, Fut>(first: Page, mut fetch: F) -> Result<Vec<T>, OperationError>
where
    T: Clone + PartialEq,
    F: FnMut(Page) -> Fut,
    Fut: Future<Output = Result<Vec<T>, OperationError>>,
{
    let mut page = first;
    let mut items = Vec::new();
    let mut previous: Option<Vec<T>> = None;

    for _ in 0..MAX_LIST_PAGES {
        let batch = fetch(page).await?;
        if batch.is_empty() {
            return Ok(items);
        }
        if previous.as_ref() == Some(&batch) {
            tracing::warn!("Page at offset {} repeats the previous one, stopping", page.offset);
            return Ok(items);
        }

        let short = batch.len() < page.limit as usize;
        items.extend(batch.iter().cloned());
        let next = match page.next() {
            Some(next) if !short => next,
            _ => return Ok(items),
        };
        page = next;
        previous = Some(batch);
    }

    tracing::warn!("Stopped paging after {} pages", MAX_LIST_PAGES);
    Ok(items)
}
