use serde::{Deserialize, Serialize};

/// Monetary account as returned by the API.
/// `balance` stays a decimal string so no float rounding happens client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub balance: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreate {
    pub name: String,
    pub balance: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

pub const MISSING_ACCOUNT_FIELDS: &str = "Preencha todos os campos!";

impl AccountCreate {
    pub fn new(name: impl Into<String>, balance: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            balance: balance.into(),
            color: color.into(),
        }
    }

    /// Form check before anything is sent: every field must be filled in
    pub fn validate(&self) -> Result<(), &'static str> {
        if [&self.name, &self.balance, &self.color].iter().any(|f| f.trim().is_empty()) {
            return Err(MISSING_ACCOUNT_FIELDS);
        }
        Ok(())
    }
}

impl AccountUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.balance.is_none() && self.color.is_none()
    }

    /// Fields that are present must not be blank
    pub fn validate(&self) -> Result<(), &'static str> {
        let blank = [&self.name, &self.balance, &self.color]
            .iter()
            .filter_map(|f| f.as_ref())
            .any(|f| f.trim().is_empty());
        if blank || self.is_empty() {
            return Err(MISSING_ACCOUNT_FIELDS);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_omits_absent_fields() {
        let update = AccountUpdate {
            balance: Some("12.50".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"balance": "12.50"}));
    }

    #[test]
    fn test_balance_kept_as_string() {
        let account: Account =
            serde_json::from_value(json!({"id": 1, "name": "Wallet", "balance": "10.10", "color": "#fff"})).unwrap();
        assert_eq!(account.balance, "10.10");
    }

    #[test]
    fn test_create_requires_all_fields() {
        assert!(AccountCreate::new("Wallet", "10.00", "#fff").validate().is_ok());
        assert_eq!(AccountCreate::new("Wallet", " ", "#fff").validate(), Err(MISSING_ACCOUNT_FIELDS));
        assert!(AccountUpdate::default().validate().is_err());
    }
}
