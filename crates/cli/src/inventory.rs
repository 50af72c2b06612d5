use crate::print_json;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Subcommand;
use pantry_inventory::{InventoryItem, InventoryRepository, InventoryUpdate, NewInventoryItem};
use pantry_kv_store::SecureStore;
use pantry_recognition::RecognitionResult;
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;

#[derive(Subcommand)]
pub(crate) enum InventoryCommand {
    /// Print every stored item
    List,

    /// Add one item
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        unit: String,
        #[arg(long)]
        category: String,
        /// Expiration date (YYYY-MM-DD)
        #[arg(long)]
        expires: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Change fields of an existing item
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        expires: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove one item
    Delete { id: String },

    /// Remove every item
    Clear,

    /// Add every ingredient from a `recognize` result
    Import {
        /// JSON file produced by `pantry recognize`
        result: PathBuf,
        #[arg(long, default_value_t = 1.0)]
        amount: f64,
        #[arg(long, default_value = "pcs")]
        unit: String,
        #[arg(long, default_value = "Produce")]
        category: String,
    },

    /// Items expiring within the next N days
    Expiring {
        #[arg(long, default_value_t = 3)]
        days: u32,
        /// Reference date (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpiringItem<'a> {
    #[serde(flatten)]
    item: &'a InventoryItem,
    days_left: Option<i64>,
}

pub(crate) async fn run<S: SecureStore>(
    repo: &InventoryRepository<S>,
    command: InventoryCommand,
) -> Result<()> {
    match command {
        InventoryCommand::List => print_json(&repo.load_all().await),
        InventoryCommand::Add {
            name,
            amount,
            unit,
            category,
            expires,
            notes,
        } => {
            let mut item = NewInventoryItem::new(name, amount, unit, category);
            item.expiration_date = expires;
            item.notes = notes;
            print_json(&repo.add_item(item).await?)
        }
        InventoryCommand::Update {
            id,
            name,
            amount,
            unit,
            category,
            expires,
            notes,
        } => {
            let update = InventoryUpdate {
                name,
                amount,
                unit,
                category,
                expiration_date: expires,
                notes,
            };
            if update.is_empty() {
                bail!("Nothing to update: pass at least one field");
            }
            print_json(&repo.update_item(&id, update).await?)
        }
        InventoryCommand::Delete { id } => {
            let deleted = repo.delete_item(&id).await?;
            print_json(&json!({ "id": id, "deleted": deleted }))
        }
        InventoryCommand::Clear => {
            repo.clear().await?;
            print_json(&json!({ "cleared": true }))
        }
        InventoryCommand::Import {
            result,
            amount,
            unit,
            category,
        } => {
            let raw = tokio::fs::read_to_string(&result)
                .await
                .with_context(|| format!("Cannot read {}", result.display()))?;
            let recognized: RecognitionResult = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid recognition result {}", result.display()))?;
            let items = recognized
                .ingredients
                .iter()
                .map(|ingredient| {
                    NewInventoryItem::from_recognized(
                        ingredient,
                        amount,
                        unit.as_str(),
                        category.as_str(),
                    )
                })
                .collect();
            print_json(&repo.add_items(items).await?)
        }
        InventoryCommand::Expiring { days, today } => {
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            let items = repo.expiring_within(today, days).await;
            let report: Vec<ExpiringItem<'_>> = items
                .iter()
                .map(|item| ExpiringItem {
                    item,
                    days_left: item.days_until_expiration(today),
                })
                .collect();
            print_json(&report)
        }
    }
}
