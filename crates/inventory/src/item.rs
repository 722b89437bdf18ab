use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use meshinv_core::{text, DomainError, DomainResult, Entity};

/// Longest code the inventory accepts before it is even sent for validation.
pub const MAX_CODE_LEN: usize = 10;

pub const MAX_NAME_LEN: usize = 100;

/// Inventory item identifier (store-assigned, monotonically increasing).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::str::FromStr for ItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(ItemId)
            .map_err(|_| DomainError::validation("invalid item id"))
    }
}

/// Entity: InventoryItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub code: String,
    pub name: String,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn create(id: ItemId, new: NewItem, now: DateTime<Utc>) -> Self {
        Self {
            id,
            code: new.code,
            name: new.name,
            quantity: new.quantity,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: &ItemChanges, now: DateTime<Utc>) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(quantity) = changes.quantity {
            self.quantity = quantity;
        }
        self.updated_at = now;
    }

    /// Case-insensitive substring match on code or name.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.code.to_lowercase().contains(&needle) || self.name.to_lowercase().contains(&needle)
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Checked input for item creation.
///
/// The code is trimmed and uppercased here; whether the code is acceptable
/// to the legacy rules is a separate decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    code: String,
    name: String,
    quantity: i64,
}

impl NewItem {
    pub fn new(code: &str, name: &str, quantity: Option<i64>) -> DomainResult<Self> {
        let code = text::trim(code).to_uppercase();
        let name = text::trim(name).to_string();

        if code.is_empty() || name.is_empty() {
            return Err(DomainError::validation("Code and name cannot be empty"));
        }
        let quantity = check_quantity(quantity)?;
        if code.chars().count() > MAX_CODE_LEN {
            return Err(DomainError::validation(format!(
                "Item code cannot exceed {MAX_CODE_LEN} characters"
            )));
        }
        check_name_len(&name)?;

        Ok(Self {
            code,
            name,
            quantity,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

/// Checked partial update. Code is immutable once created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemChanges {
    name: Option<String>,
    quantity: Option<i64>,
}

impl ItemChanges {
    /// `quantity` is `Some(None)` when the field was present but not an
    /// integer.
    pub fn new(name: Option<&str>, quantity: Option<Option<i64>>) -> DomainResult<Self> {
        if name.is_none() && quantity.is_none() {
            return Err(DomainError::validation("No data provided"));
        }

        let name = match name {
            Some(raw) => {
                let name = text::trim(raw).to_string();
                if name.is_empty() {
                    return Err(DomainError::validation("Item name cannot be empty"));
                }
                check_name_len(&name)?;
                Some(name)
            }
            None => None,
        };

        let quantity = quantity.map(check_quantity).transpose()?;

        Ok(Self { name, quantity })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn quantity(&self) -> Option<i64> {
        self.quantity
    }
}

fn check_quantity(quantity: Option<i64>) -> DomainResult<i64> {
    match quantity {
        Some(q) if q >= 0 => Ok(q),
        _ => Err(DomainError::validation(
            "Quantity must be a non-negative integer",
        )),
    }
}

fn check_name_len(name: &str) -> DomainResult<()> {
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(format!(
            "Item name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}
