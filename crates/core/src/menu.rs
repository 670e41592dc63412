//! The free-meal menu and selection rules.
//!
//! Each attendee picks at most one item per category (one food, one drink).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum number of items in one meal.
pub const MAX_SELECTIONS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuCategory {
    Food,
    Drink,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub category: MenuCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub items: Vec<MenuItem>,
}

impl Menu {
    /// Parse and check a menu override file.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let menu: Menu = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("Invalid menu JSON: {e}")))?;
        menu.check()?;
        Ok(menu)
    }

    /// Menus must be non-empty with unique, non-blank ids.
    pub fn check(&self) -> Result<(), CoreError> {
        if self.items.is_empty() {
            return Err(CoreError::Validation("Menu has no items".into()));
        }
        let mut seen = HashSet::new();
        for item in &self.items {
            if item.id.trim().is_empty() {
                return Err(CoreError::Validation("Menu item id must not be blank".into()));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate menu item id '{}'",
                    item.id
                )));
            }
        }
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// The menu served when no override file is configured.
pub fn default_menu() -> Menu {
    let item = |id: &str, name: &str, category, description: &str| MenuItem {
        id: id.into(),
        name: name.into(),
        category,
        description: Some(description.into()),
        available: true,
    };

    Menu {
        items: vec![
            item(
                "chicken-kottu",
                "Chicken Kottu",
                MenuCategory::Food,
                "Chopped godhamba roti with chicken curry",
            ),
            item(
                "veg-kottu",
                "Vegetable Kottu",
                MenuCategory::Food,
                "Chopped godhamba roti with seasonal vegetables",
            ),
            item(
                "egg-hoppers",
                "Egg Hoppers",
                MenuCategory::Food,
                "Two egg hoppers with lunu miris",
            ),
            item(
                "iced-coffee",
                "Iced Coffee",
                MenuCategory::Drink,
                "Cold brew over ice",
            ),
            item(
                "ceylon-tea",
                "Ceylon Milk Tea",
                MenuCategory::Drink,
                "Strong BOP tea with milk",
            ),
            item(
                "king-coconut",
                "King Coconut",
                MenuCategory::Drink,
                "Fresh thambili",
            ),
        ],
    }
}

/// Check a list of selected item ids against the menu.
///
/// Rules: 1..=[`MAX_SELECTIONS`] items, every id known and available, no
/// repeats, at most one item per category.
pub fn validate_selections(menu: &Menu, ids: &[String]) -> Result<(), CoreError> {
    if ids.is_empty() {
        return Err(CoreError::Validation("Select at least one menu item".into()));
    }
    if ids.len() > MAX_SELECTIONS {
        return Err(CoreError::Validation(format!(
            "Select at most {MAX_SELECTIONS} menu items (got {})",
            ids.len()
        )));
    }

    let mut categories = HashSet::new();
    let mut seen = HashSet::new();
    for id in ids {
        let item = menu
            .find(id)
            .ok_or_else(|| CoreError::Validation(format!("Unknown menu item '{id}'")))?;

        if !item.available {
            return Err(CoreError::Validation(format!(
                "'{}' is no longer available",
                item.name
            )));
        }
        if !seen.insert(id.as_str()) {
            return Err(CoreError::Validation(format!("'{}' selected twice", item.name)));
        }
        if !categories.insert(item.category) {
            return Err(CoreError::Validation(format!(
                "Only one {} item per meal",
                match item.category {
                    MenuCategory::Food => "food",
                    MenuCategory::Drink => "drink",
                }
            )));
        }
    }

    Ok(())
}
