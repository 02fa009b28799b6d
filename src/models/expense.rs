use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A grocery-budget expense entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub amount: f64,
    pub category: String,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fields accepted when recording an expense.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub amount: f64,
    pub category: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewExpense {
    pub fn validate(&self) -> Result<(), String> {
        if self.amount <= 0.0 {
            return Err("Amount must be positive".to_string());
        }
        if self.category.trim().is_empty() {
            return Err("Category is required".to_string());
        }
        Ok(())
    }
}
