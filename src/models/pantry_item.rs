use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An item currently in the pantry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Assigned by the store at creation, never accepted from the client.
    pub added_date: DateTime<Utc>,
}

impl PantryItem {
    /// Merges a partial update onto this item. Fields absent from the
    /// patch are left unchanged.
    pub fn apply(&mut self, patch: PantryItemPatch) {
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
        if let Some(expiry_date) = patch.expiry_date {
            self.expiry_date = Some(expiry_date);
        }
        if let Some(barcode) = patch.barcode {
            self.barcode = Some(barcode);
        }
        if let Some(price) = patch.price {
            self.price = Some(price);
        }
    }
}

/// Fields accepted when creating a pantry item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPantryItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl NewPantryItem {
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

/// Partial update for a pantry item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryItemPatch {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub barcode: Option<String>,
    pub price: Option<f64>,
}

impl PantryItemPatch {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> PantryItem {
        PantryItem {
            id: Uuid::new_v4(),
            name: "Oats".to_string(),
            quantity: 750.0,
            unit: "g".to_string(),
            category: "Grains".to_string(),
            expiry_date: None,
            barcode: None,
            price: Some(2.49),
            added_date: Utc::now(),
        }
    }

    #[test]
    fn test_apply_patch_preserves_unset_fields() {
        let mut item = sample_item();

        item.apply(PantryItemPatch {
            quantity: Some(5.0),
            ..Default::default()
        });

        assert_eq!(item.quantity, 5.0);
        assert_eq!(item.name, "Oats");
        assert_eq!(item.price, Some(2.49));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&sample_item()).unwrap();

        assert!(json.contains("addedDate"));
        assert!(!json.contains("added_date"));
        // Absent optional fields are dropped entirely
        assert!(!json.contains("expiryDate"));
    }

    #[test]
    fn test_new_item_validation() {
        let item = NewPantryItem {
            name: "Rice".to_string(),
            quantity: 1.0,
            unit: "kg".to_string(),
            category: "Grains".to_string(),
            expiry_date: None,
            barcode: None,
            price: None,
        };
        assert!(item.validate().is_ok());

        let mut bad = item.clone();
        bad.quantity = 0.0;
        assert!(bad.validate().is_err());

        let mut bad = item;
        bad.name = "  ".to_string();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_patch_validation() {
        assert!(PantryItemPatch::default().validate().is_ok());
        assert!(PantryItemPatch {
            quantity: Some(-2.0),
            ..Default::default()
        }
        .validate()
        .is_err());
    }
}
