use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::OperationError;
use crate::models::{Account, CategoryType};

use super::{AccountService, CategoryService};

const PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_balance: Decimal,
    pub account_count: usize,
    pub expense_categories: usize,
    pub income_categories: usize,
    pub accounts: Vec<Account>,
}

#[derive(Clone)]
pub struct DashboardService {
    accounts: AccountService,
    categories: CategoryService,
}

impl DashboardService {
    pub fn new(accounts: AccountService, categories: CategoryService) -> Self {
        Self { accounts, categories }
    }

    /// Fetch accounts and categories side by side and aggregate them
    pub async fn summary(&self) -> Result<DashboardSummary, OperationError> {
        let (accounts, categories) = futures::future::try_join(
            self.accounts.list_all(PAGE_SIZE),
            self.categories.list_all(PAGE_SIZE),
        )
        .await?;

        let expense_categories = categories
            .iter()
            .filter(|c| c.category_type == CategoryType::Expenses)
            .count();

        Ok(DashboardSummary {
            total_balance: aggregate_balance(&accounts),
            account_count: accounts.len(),
            expense_categories,
            income_categories: categories.len() - expense_categories,
            accounts,
        })
    }
}

/// Exact decimal sum of account balances. Unparseable balances are skipped.
pub fn aggregate_balance(accounts: &[Account]) -> Decimal {
    accounts
        .iter()
        .filter_map(|account| match Decimal::from_str(account.balance.trim()) {
            Ok(balance) => Some(balance),
            Err(e) => {
                tracing::warn!("Skipping account {} with invalid balance '{}': {}", account.id, account.balance, e);
                None
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: i64, balance: &str) -> Account {
        Account {
            id,
            name: format!("Conta {}", id),
            balance: balance.to_string(),
            color: "#000".to_string(),
        }
    }

    #[test]
    fn test_aggregate_is_exact() {
        let accounts = vec![account(1, "10.00"), account(2, "-2.50")];
        assert_eq!(aggregate_balance(&accounts).to_string(), "7.50");

        let accounts = vec![account(1, "0.10"), account(2, "0.20")];
        assert_eq!(aggregate_balance(&accounts), Decimal::from_str("0.30").unwrap());
    }

    #[test]
    fn test_invalid_balance_skipped() {
        let accounts = vec![account(1, "5.00"), account(2, "abc")];
        assert_eq!(aggregate_balance(&accounts), Decimal::from_str("5.00").unwrap());
        assert_eq!(aggregate_balance(&[]), Decimal::ZERO);
    }
}
