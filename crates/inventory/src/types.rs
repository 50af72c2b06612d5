use chrono::{DateTime, NaiveDate, Utc};
use pantry_recognition::RecognizedIngredient;
use serde::{Deserialize, Serialize};

/// A persisted inventory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
    pub date_added: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl InventoryItem {
    /// Days from `today` until expiry; negative once expired.
    pub fn days_until_expiration(&self, today: NaiveDate) -> Option<i64> {
        self.expiration_date
            .map(|date| date.signed_duration_since(today).num_days())
    }
}

/// An item before the repository assigns its id and insertion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub category: String,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewInventoryItem {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        unit: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
            category: category.into(),
            expiration_date: None,
            notes: None,
        }
    }

    /// Confirm a scanned ingredient with user-supplied quantity and category.
    pub fn from_recognized(
        ingredient: &RecognizedIngredient,
        amount: f64,
        unit: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self::new(ingredient.name.clone(), amount, unit, category)
    }

    pub fn expires_on(mut self, date: NaiveDate) -> Self {
        self.expiration_date = Some(date);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl InventoryUpdate {
    pub fn amount(amount: f64) -> Self {
        Self {
            amount: Some(amount),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn apply(self, item: &mut InventoryItem) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(amount) = self.amount {
            item.amount = amount;
        }
        if let Some(unit) = self.unit {
            item.unit = unit;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(date) = self.expiration_date {
            item.expiration_date = Some(date);
        }
        if let Some(notes) = self.notes {
            item.notes = Some(notes);
        }
    }
}
