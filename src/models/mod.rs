//! Entity types stored by the server and the request payloads that
//! create or modify them.
//!
//! Wire JSON uses camelCase field names to match the web client.

mod expense;
mod meal_plan;
mod pantry_item;
mod shopping_item;
mod user;

pub use expense::{Expense, NewExpense};
pub use meal_plan::{MealPlan, MealType, NewMealPlan};
pub use pantry_item::{NewPantryItem, PantryItem, PantryItemPatch};
pub use shopping_item::{NewShoppingItem, ShoppingItem, ShoppingItemPatch};
pub use user::{User, UserProfile};
