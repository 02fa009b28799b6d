use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An entry on the shopping list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    pub purchased: bool,
    /// Assigned by the store at creation.
    pub added_date: DateTime<Utc>,
}

impl ShoppingItem {
    /// Merges a partial update onto this item.
    pub fn apply(&mut self, patch: ShoppingItemPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(purchased) = patch.purchased {
            self.purchased = purchased;
        }
    }
}

/// Fields accepted when creating a shopping item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShoppingItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    #[serde(default)]
    pub purchased: bool,
}

impl NewShoppingItem {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if self.quantity <= 0.0 {
            return Err("Quantity must be positive".to_string());
        }
        Ok(())
    }
}

/// Partial update for a shopping item; typically used to toggle
/// `purchased` from the list view.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItemPatch {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub purchased: Option<bool>,
}

impl ShoppingItemPatch {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err("Name cannot be empty".to_string());
            }
        }
        if let Some(quantity) = self.quantity {
            if quantity <= 0.0 {
                return Err("Quantity must be positive".to_string());
            }
        }
        Ok(())
    }
}
