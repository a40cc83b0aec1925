use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryType {
    #[serde(rename = "EXPENSES", alias = "EXPENSE")]
    Expenses,
    #[serde(rename = "INCOME")]
    Income,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Expenses => "EXPENSES",
            CategoryType::Income => "INCOME",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EXPENSES" | "EXPENSE" => Ok(CategoryType::Expenses),
            "INCOME" => Ok(CategoryType::Income),
            other => Err(format!("Unknown category type '{}' (expected EXPENSES or INCOME)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub category_type: CategoryType,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    pub category_type: CategoryType,
    pub color: String,
}

/// Partial update. The category kind is fixed at creation, so it has no field here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

pub const MISSING_CATEGORY_NAME: &str = "Preencha o nome da categoria!";

impl CategoryCreate {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err(MISSING_CATEGORY_NAME);
        }
        Ok(())
    }
}

impl CategoryUpdate {
    pub fn validate(&self) -> Result<(), &'static str> {
        match &self.name {
            Some(name) if name.trim().is_empty() => Err(MISSING_CATEGORY_NAME),
            None if self.color.is_none() => Err(MISSING_CATEGORY_NAME),
            _ => Ok(()),
        }
    }
}
