//! In-memory store for all entity collections.
//!
//! The [`Store`] owns five collections (users, pantry items, shopping
//! items, meal plans, expenses) for the lifetime of the process. Each
//! collection sits behind its own `RwLock`; operations hold a lock only
//! for the map access itself, so everything completes synchronously and
//! quickly. Nothing is persisted — the store is seeded (optionally) at
//! startup and discarded at shutdown.
//!
//! Ids are v4 UUIDs assigned at creation and never reused. Creation
//! timestamps (`added_date`) are assigned here, never accepted from the
//! caller. Field validation happens in the route layer before data
//! reaches the store.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password, PasswordError};
use crate::models::{
    Expense, MealPlan, NewExpense, NewMealPlan, NewPantryItem, NewShoppingItem, PantryItem,
    PantryItemPatch, ShoppingItem, ShoppingItemPatch, User,
};
use serde::Serialize;

/// Errors from mutating operations on the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username already exists")]
    DuplicateUsername,
    #[error(transparent)]
    Hash(#[from] PasswordError),
}

/// Dashboard statistics, computed fresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_items: usize,
    pub expiring_soon: usize,
    pub planned_meals: usize,
    pub monthly_spending: f64,
}

/// Process-wide in-memory storage.
#[derive(Debug, Default)]
pub struct Store {
    users: RwLock<HashMap<Uuid, User>>,
    pantry: RwLock<HashMap<Uuid, PantryItem>>,
    shopping: RwLock<HashMap<Uuid, ShoppingItem>>,
    meals: RwLock<HashMap<Uuid, MealPlan>>,
    expenses: RwLock<HashMap<Uuid, Expense>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Creates a user, hashing the password before storage.
    ///
    /// Fails with [`StoreError::DuplicateUsername`] if the username is
    /// already taken (case-sensitive exact match). The hash is computed
    /// before the write lock is taken so the slow argon2 work never
    /// blocks other collections' callers; the duplicate check and the
    /// insert happen under one lock, so two concurrent registrations of
    /// the same name cannot both succeed.
    pub fn create_user(&self, username: &str, password: &str) -> Result<User, StoreError> {
        let password_hash = hash_password(password)?;

        let mut users = self.users.write().unwrap();
        if users.values().any(|u| u.username == username) {
            return Err(StoreError::DuplicateUsername);
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash,
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    pub fn get_user(&self, id: Uuid) -> Option<User> {
        self.users.read().unwrap().get(&id).cloned()
    }

    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .read()
            .unwrap()
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    /// Looks up by username and verifies the password.
    ///
    /// "No such user" and "wrong password" are deliberately
    /// indistinguishable: both return `None`, so a caller cannot probe
    /// which usernames exist.
    pub fn validate_credentials(&self, username: &str, password: &str) -> Option<User> {
        let user = self.get_user_by_username(username)?;

        if verify_password(password, &user.password_hash) {
            Some(user)
        } else {
            None
        }
    }

    // ------------------------------------------------------------------
    // Pantry items
    // ------------------------------------------------------------------

    pub fn create_pantry_item(&self, new: NewPantryItem) -> PantryItem {
        let item = PantryItem {
            id: Uuid::new_v4(),
            name: new.name,
            quantity: new.quantity,
            unit: new.unit,
            category: new.category,
            expiry_date: new.expiry_date,
            barcode: new.barcode,
            price: new.price,
            added_date: Utc::now(),
        };

        self.pantry.write().unwrap().insert(item.id, item.clone());
        item
    }

    /// Point lookup. The HTTP surface has no single-item GET, but the
    /// lookup is part of the store contract.
    #[allow(dead_code)]
    pub fn get_pantry_item(&self, id: Uuid) -> Option<PantryItem> {
        self.pantry.read().unwrap().get(&id).cloned()
    }

    pub fn all_pantry_items(&self) -> Vec<PantryItem> {
        self.pantry.read().unwrap().values().cloned().collect()
    }

    /// Merges the patch onto the stored item. Returns `None` for an
    /// unknown id; never creates a record.
    pub fn update_pantry_item(&self, id: Uuid, patch: PantryItemPatch) -> Option<PantryItem> {
        let mut pantry = self.pantry.write().unwrap();
        let item = pantry.get_mut(&id)?;
        item.apply(patch);
        Some(item.clone())
    }

    /// Removes the item, reporting whether anything was removed.
    pub fn delete_pantry_item(&self, id: Uuid) -> bool {
        self.pantry.write().unwrap().remove(&id).is_some()
    }

    // ------------------------------------------------------------------
    // Shopping items
    // ------------------------------------------------------------------

    pub fn create_shopping_item(&self, new: NewShoppingItem) -> ShoppingItem {
        let item = ShoppingItem {
            id: Uuid::new_v4(),
            name: new.name,
            quantity: new.quantity,
            unit: new.unit,
            category: new.category,
            purchased: new.purchased,
            added_date: Utc::now(),
        };

        self.shopping.write().unwrap().insert(item.id, item.clone());
        item
    }

    pub fn all_shopping_items(&self) -> Vec<ShoppingItem> {
        self.shopping.read().unwrap().values().cloned().collect()
    }

    pub fn update_shopping_item(&self, id: Uuid, patch: ShoppingItemPatch) -> Option<ShoppingItem> {
        let mut shopping = self.shopping.write().unwrap();
        let item = shopping.get_mut(&id)?;
        item.apply(patch);
        Some(item.clone())
    }

    pub fn delete_shopping_item(&self, id: Uuid) -> bool {
        self.shopping.write().unwrap().remove(&id).is_some()
    }

    // ------------------------------------------------------------------
    // Meal plans
    // ------------------------------------------------------------------

    pub fn create_meal_plan(&self, new: NewMealPlan) -> MealPlan {
        let meal = MealPlan {
            id: Uuid::new_v4(),
            date: new.date,
            meal_type: new.meal_type,
            recipe_name: new.recipe_name,
            recipe_id: new.recipe_id,
        };

        self.meals.write().unwrap().insert(meal.id, meal.clone());
        meal
    }

    pub fn all_meal_plans(&self) -> Vec<MealPlan> {
        self.meals.read().unwrap().values().cloned().collect()
    }

    pub fn delete_meal_plan(&self, id: Uuid) -> bool {
        self.meals.write().unwrap().remove(&id).is_some()
    }

    // ------------------------------------------------------------------
    // Expenses
    // ------------------------------------------------------------------

    pub fn create_expense(&self, new: NewExpense) -> Expense {
        let expense = Expense {
            id: Uuid::new_v4(),
            amount: new.amount,
            category: new.category,
            date: new.date,
            description: new.description,
        };

        self.expenses.write().unwrap().insert(expense.id, expense.clone());
        expense
    }

    pub fn all_expenses(&self) -> Vec<Expense> {
        self.expenses.read().unwrap().values().cloned().collect()
    }

    // ------------------------------------------------------------------
    // Derived queries
    // ------------------------------------------------------------------

    /// Pantry items whose expiry falls within the next `days` days.
    ///
    /// The window is inclusive at both ends: an item expiring exactly
    /// now, or exactly at `now + days`, is included. Items without an
    /// expiry date and items already past expiry are excluded. No
    /// ordering is guaranteed.
    pub fn expiring_within(&self, days: i64) -> Vec<PantryItem> {
        self.expiring_within_at(days, Utc::now())
    }

    pub fn expiring_within_at(&self, days: i64, now: DateTime<Utc>) -> Vec<PantryItem> {
        let cutoff = now + Duration::days(days);

        self.pantry
            .read()
            .unwrap()
            .values()
            .filter(|item| match item.expiry_date {
                Some(expiry) => expiry >= now && expiry <= cutoff,
                None => false,
            })
            .cloned()
            .collect()
    }

    /// Dashboard roll-up. Read-only snapshot, recomputed on every call.
    ///
    /// Monthly spending sums expenses dated from the first instant of
    /// the current calendar month through now.
    pub fn stats(&self) -> Stats {
        self.stats_at(Utc::now())
    }

    pub fn stats_at(&self, now: DateTime<Utc>) -> Stats {
        let month_start = month_start(now);

        let monthly_spending = self
            .expenses
            .read()
            .unwrap()
            .values()
            .filter(|e| e.date >= month_start && e.date <= now)
            .map(|e| e.amount)
            .sum();

        Stats {
            total_items: self.pantry.read().unwrap().len(),
            expiring_soon: self.expiring_within_at(7, now).len(),
            planned_meals: self.meals.read().unwrap().len(),
            monthly_spending,
        }
    }

    // ------------------------------------------------------------------
    // Seeding
    // ------------------------------------------------------------------

    /// Populates demo records: one account (`demo` / `demo123`) plus
    /// sample pantry, shopping, meal and expense data for a fresh
    /// install to explore.
    pub fn seed_demo(&self) -> Result<(), StoreError> {
        self.create_user("demo", "demo123")?;

        let now = Utc::now();

        let pantry = [
            ("Greek Yogurt", 500.0, "g", "Dairy", 1, 4.99),
            ("Fresh Salmon", 300.0, "g", "Protein", 2, 12.99),
            ("Avocados", 3.0, "pcs", "Produce", 3, 5.99),
            ("Whole Wheat Bread", 1.0, "loaf", "Bakery", 5, 3.49),
            ("Chicken", 800.0, "g", "Protein", 4, 9.99),
        ];
        for (name, quantity, unit, category, days, price) in pantry {
            self.create_pantry_item(NewPantryItem {
                name: name.to_string(),
                quantity,
                unit: unit.to_string(),
                category: category.to_string(),
                expiry_date: Some(now + Duration::days(days)),
                barcode: None,
                price: Some(price),
            });
        }

        let shopping = [
            ("Milk", 2.0, "L", "Dairy", false),
            ("Eggs", 12.0, "pcs", "Dairy", false),
            ("Tomatoes", 6.0, "pcs", "Produce", true),
        ];
        for (name, quantity, unit, category, purchased) in shopping {
            self.create_shopping_item(NewShoppingItem {
                name: name.to_string(),
                quantity,
                unit: unit.to_string(),
                category: category.to_string(),
                purchased,
            });
        }

        self.create_meal_plan(NewMealPlan {
            date: now,
            meal_type: crate::models::MealType::Dinner,
            recipe_name: "Salmon with Avocado".to_string(),
            recipe_id: None,
        });
        self.create_meal_plan(NewMealPlan {
            date: now + Duration::days(1),
            meal_type: crate::models::MealType::Breakfast,
            recipe_name: "Greek Yogurt Parfait".to_string(),
            recipe_id: None,
        });

        self.create_expense(NewExpense {
            amount: 45.67,
            category: "Groceries".to_string(),
            date: now,
            description: Some("Weekly shopping".to_string()),
        });
        self.create_expense(NewExpense {
            amount: 23.45,
            category: "Groceries".to_string(),
            date: now - Duration::days(3),
            description: Some("Fresh produce".to_string()),
        });

        Ok(())
    }
}

/// First instant of the calendar month containing `now`.
fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .expect("first of month is a valid UTC timestamp")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealType;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    fn new_pantry_item(name: &str) -> NewPantryItem {
        NewPantryItem {
            name: name.to_string(),
            quantity: 1.0,
            unit: "pcs".to_string(),
            category: "Misc".to_string(),
            expiry_date: None,
            barcode: None,
            price: None,
        }
    }

    fn item_expiring(name: &str, expiry: DateTime<Utc>) -> NewPantryItem {
        NewPantryItem {
            expiry_date: Some(expiry),
            ..new_pantry_item(name)
        }
    }

    fn expense(amount: f64, date: DateTime<Utc>) -> NewExpense {
        NewExpense {
            amount,
            category: "Groceries".to_string(),
            date,
            description: None,
        }
    }

    #[test]
    fn test_create_assigns_id_and_added_date() {
        let store = Store::new();

        let before = Utc::now();
        let item = store.create_pantry_item(new_pantry_item("Rice"));
        let after = Utc::now();

        assert!(item.added_date >= before && item.added_date <= after);
        assert_eq!(store.get_pantry_item(item.id).unwrap().name, "Rice");
    }

    #[test]
    fn test_get_unknown_id_is_none() {
        let store = Store::new();
        assert!(store.get_pantry_item(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_update_merges_partial_fields() {
        let store = Store::new();
        let item = store.create_pantry_item(new_pantry_item("Pasta"));

        let updated = store
            .update_pantry_item(
                item.id,
                PantryItemPatch {
                    quantity: Some(5.0),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.quantity, 5.0);
        assert_eq!(updated.name, "Pasta");
        assert_eq!(updated.unit, "pcs");
    }

    #[test]
    fn test_update_unknown_id_does_not_create() {
        let store = Store::new();

        let result = store.update_pantry_item(Uuid::new_v4(), PantryItemPatch::default());

        assert!(result.is_none());
        assert!(store.all_pantry_items().is_empty());
    }

    #[test]
    fn test_delete_reports_whether_removed() {
        let store = Store::new();
        let item = store.create_pantry_item(new_pantry_item("Beans"));

        assert!(store.delete_pantry_item(item.id));
        assert!(!store.delete_pantry_item(item.id));
        assert!(store.get_pantry_item(item.id).is_none());
    }

    #[test]
    fn test_shopping_item_round_trip() {
        let store = Store::new();
        let item = store.create_shopping_item(NewShoppingItem {
            name: "Milk".to_string(),
            quantity: 2.0,
            unit: "L".to_string(),
            category: "Dairy".to_string(),
            purchased: false,
        });

        let updated = store
            .update_shopping_item(
                item.id,
                ShoppingItemPatch {
                    purchased: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(updated.purchased);
        assert_eq!(updated.name, "Milk");
        assert!(store.delete_shopping_item(item.id));
    }

    #[test]
    fn test_meal_plan_create_and_delete() {
        let store = Store::new();
        let meal = store.create_meal_plan(NewMealPlan {
            date: Utc::now(),
            meal_type: MealType::Lunch,
            recipe_name: "Soup".to_string(),
            recipe_id: None,
        });

        assert_eq!(store.all_meal_plans().len(), 1);
        assert!(store.delete_meal_plan(meal.id));
        assert!(store.all_meal_plans().is_empty());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let store = Store::new();

        store.create_user("alice", "password-one").unwrap();
        let second = store.create_user("alice", "password-two");

        assert!(matches!(second, Err(StoreError::DuplicateUsername)));
        let alices: Vec<_> = store
            .get_user_by_username("alice")
            .into_iter()
            .collect();
        assert_eq!(alices.len(), 1);
    }

    #[test]
    fn test_username_match_is_case_sensitive() {
        let store = Store::new();

        store.create_user("alice", "password-one").unwrap();

        assert!(store.get_user_by_username("Alice").is_none());
        assert!(store.create_user("Alice", "password-two").is_ok());
    }

    #[test]
    fn test_validate_credentials_failures_indistinguishable() {
        let store = Store::new();
        store.create_user("alice", "right-password").unwrap();

        let no_user = store.validate_credentials("nouser", "anything");
        let wrong_pass = store.validate_credentials("alice", "wrongpass");

        assert!(no_user.is_none());
        assert!(wrong_pass.is_none());
    }

    #[test]
    fn test_validate_credentials_success() {
        let store = Store::new();
        let created = store.create_user("alice", "right-password").unwrap();

        let validated = store.validate_credentials("alice", "right-password").unwrap();

        assert_eq!(validated.id, created.id);
    }

    #[test]
    fn test_user_password_is_stored_hashed() {
        let store = Store::new();
        let user = store.create_user("alice", "plaintext-pw").unwrap();

        assert_ne!(user.password_hash, "plaintext-pw");
        assert!(!user.password_hash.contains("plaintext-pw"));
    }

    #[test]
    fn test_expiry_window_boundaries() {
        let store = Store::new();
        let now = Utc::now();

        let on_boundary = store.create_pantry_item(item_expiring(
            "on boundary",
            now + Duration::days(7),
        ));
        let past_boundary = store.create_pantry_item(item_expiring(
            "past boundary",
            now + Duration::days(7) + Duration::seconds(1),
        ));
        let already_expired =
            store.create_pantry_item(item_expiring("expired", now - Duration::seconds(1)));
        let no_expiry = store.create_pantry_item(new_pantry_item("no expiry"));

        let ids: HashSet<Uuid> = store
            .expiring_within_at(7, now)
            .into_iter()
            .map(|i| i.id)
            .collect();

        assert!(ids.contains(&on_boundary.id));
        assert!(!ids.contains(&past_boundary.id));
        assert!(!ids.contains(&already_expired.id));
        assert!(!ids.contains(&no_expiry.id));
    }

    #[test]
    fn test_stats_monthly_spending() {
        let store = Store::new();
        // Mid-month reference clock so day arithmetic stays inside the month
        let now = Utc.with_ymd_and_hms(2026, 8, 15, 12, 0, 0).unwrap();

        store.create_expense(expense(20.00, now - Duration::days(1)));
        store.create_expense(expense(25.67, now - Duration::days(3)));
        store.create_expense(expense(23.45, now - Duration::days(10)));
        // Last month, must not count
        store.create_expense(expense(99.99, now - Duration::days(20)));

        let stats = store.stats_at(now);

        assert!((stats.monthly_spending - 69.12).abs() < 1e-9);
    }

    #[test]
    fn test_stats_counts() {
        let store = Store::new();
        let now = Utc::now();

        store.create_pantry_item(item_expiring("soon", now + Duration::days(2)));
        store.create_pantry_item(new_pantry_item("keeps"));
        store.create_meal_plan(NewMealPlan {
            date: now,
            meal_type: MealType::Dinner,
            recipe_name: "Stew".to_string(),
            recipe_id: None,
        });

        let stats = store.stats_at(now);

        assert_eq!(stats.total_items, 2);
        assert_eq!(stats.expiring_soon, 1);
        assert_eq!(stats.planned_meals, 1);
        assert_eq!(stats.monthly_spending, 0.0);
    }

    #[test]
    fn test_concurrent_creates_yield_distinct_ids() {
        let store = Arc::new(Store::new());
        let threads = 8;
        let per_thread = 1250;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let mut ids = Vec::with_capacity(per_thread);
                    for i in 0..per_thread {
                        let item =
                            store.create_pantry_item(new_pantry_item(&format!("item-{t}-{i}")));
                        ids.push(item.id);
                    }
                    ids
                })
            })
            .collect();

        let mut all_ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(all_ids.insert(id), "duplicate id handed out");
            }
        }

        assert_eq!(all_ids.len(), threads * per_thread);
        assert_eq!(store.all_pantry_items().len(), threads * per_thread);
    }

    #[test]
    fn test_seed_demo_populates_collections() {
        let store = Store::new();
        store.seed_demo().unwrap();

        assert!(store.validate_credentials("demo", "demo123").is_some());
        assert_eq!(store.all_pantry_items().len(), 5);
        assert_eq!(store.all_shopping_items().len(), 3);
        assert_eq!(store.all_meal_plans().len(), 2);
        assert_eq!(store.all_expenses().len(), 2);
    }

    #[test]
    fn test_month_start() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 23, 59, 59).unwrap();
        assert_eq!(
            month_start(now),
            Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap()
        );
    }
}
