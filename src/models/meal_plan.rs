use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The slot a planned meal occupies in the day.
///
/// Unknown values are rejected at deserialization time, which surfaces
/// as a validation error to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        };
        f.write_str(name)
    }
}

/// A planned meal on the calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub meal_type: MealType,
    pub recipe_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
}

/// Fields accepted when creating a meal plan.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMealPlan {
    pub date: DateTime<Utc>,
    pub meal_type: MealType,
    pub recipe_name: String,
    #[serde(default)]
    pub recipe_id: Option<String>,
}

impl NewMealPlan {
    pub fn validate(&self) -> Result<(), String> {
        if self.recipe_name.trim().is_empty() {
            return Err("Recipe name is required".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&MealType::Dinner).unwrap(),
            "\"dinner\""
        );

        let parsed: MealType = serde_json::from_str("\"snack\"").unwrap();
        assert_eq!(parsed, MealType::Snack);
    }

    #[test]
    fn test_unknown_meal_type_rejected() {
        let result: Result<MealType, _> = serde_json::from_str("\"brunch\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_meal_plan_deserializes_camel_case() {
        let plan: NewMealPlan = serde_json::from_str(
            r#"{"date":"2026-03-01T18:00:00Z","mealType":"dinner","recipeName":"Chili"}"#,
        )
        .unwrap();

        assert_eq!(plan.meal_type, MealType::Dinner);
        assert_eq!(plan.recipe_name, "Chili");
        assert!(plan.recipe_id.is_none());
    }

    #[test]
    fn test_recipe_name_required() {
        let plan = NewMealPlan {
            date: Utc::now(),
            meal_type: MealType::Lunch,
            recipe_name: String::new(),
            recipe_id: None,
        };
        assert!(plan.validate().is_err());
    }
}
