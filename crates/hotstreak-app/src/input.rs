// Input validation: resolving player names and category selections.

use hotstreak_core::record::ParseCategoryError;
use hotstreak_core::{Category, GameRecord, PlayerId};
use std::collections::HashMap;
use thiserror::Error;

/// Sentinel accepted in place of a category list to select all eight.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unable to find player `{0}`")]
    UnknownPlayer(String),

    #[error(transparent)]
    UnknownCategory(#[from] ParseCategoryError),

    #[error("no category given")]
    NoCategory,
}

// ---------------------------------------------------------------------------
// Player directory
// ---------------------------------------------------------------------------

/// Display name to identifier lookup built from the game table.
#[derive(Debug, Clone, Default)]
pub struct PlayerDirectory {
    by_name: HashMap<String, PlayerId>,
}

impl PlayerDirectory {
    /// Build the lookup from every row of the table. When a name appears with
    /// more than one identifier, the last row wins.
    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut by_name = HashMap::new();
        for record in records {
            if record.player_name.is_empty() {
                continue;
            }
            by_name.insert(record.player_name.clone(), record.player_id);
        }
        Self { by_name }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Exact, case-sensitive match on the display name.
    pub fn resolve(&self, name: &str) -> Result<PlayerId, InputError> {
        let name = name.trim();
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| InputError::UnknownPlayer(name.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Category selection
// ---------------------------------------------------------------------------

/// Parse a category selection: `all`, a single category name, or a
/// comma-separated list. Duplicates are dropped, first occurrence kept.
pub fn parse_categories(input: &str) -> Result<Vec<Category>, InputError> {
    let input = input.trim();
    if input.eq_ignore_ascii_case(ALL_CATEGORIES) {
        return Ok(Category::ALL.to_vec());
    }

    let mut categories = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let category: Category = part.parse()?;
        if !categories.contains(&category) {
            categories.push(category);
        }
    }

    if categories.is_empty() {
        return Err(InputError::NoCategory);
    }
    Ok(categories)
}

/// Category names as offered in prompts, e.g. `points, rebounds, ...`.
pub fn category_menu() -> String {
    Category::ALL
        .iter()
        .map(|c| c.column_name())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
