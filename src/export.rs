use crate::analysis::fields::StatField;
use crate::data::dataset::CardSource;
use crate::data::models::{CardRecord, DraftPick, ALL_DECKS};
use crate::error::{AppError, AppResult};
use chrono::Local;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Statistic columns written after the card details, in column order.
pub const EXPORT_FIELDS: [StatField; 8] = [
    StatField::Gihwr,
    StatField::Ohwr,
    StatField::Gpwr,
    StatField::Gdwr,
    StatField::Gnswr,
    StatField::Iwd,
    StatField::Ata,
    StatField::Alsa,
];

const CARD_COLUMNS: [&str; 7] = ["Pack", "Pick", "Picked", "Name", "Colors", "CMC", "Type"];

#[derive(Debug, Serialize)]
struct ExportCard {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Picked")]
    picked: bool,
    #[serde(rename = "Colors")]
    colors: String,
    #[serde(rename = "CMC")]
    cmc: Option<f64>,
    #[serde(rename = "Type")]
    card_type: String,
    #[serde(rename = "Rarity")]
    rarity: String,
    #[serde(flatten)]
    stats: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Serialize)]
struct ExportPack {
    #[serde(rename = "Pack")]
    pack: usize,
    #[serde(rename = "Pick")]
    pick: usize,
    #[serde(rename = "Cards")]
    cards: Vec<ExportCard>,
}

/// Whether `card_id` was the card taken at this pick.
fn was_picked(picked: &[Vec<String>], pack: usize, pick: usize, card_id: &str) -> bool {
    let (Some(pack_idx), Some(pick_idx)) = (pack.checked_sub(1), pick.checked_sub(1)) else {
        return false;
    };
    picked
        .get(pack_idx)
        .and_then(|picks| picks.get(pick_idx))
        .is_some_and(|id| id == card_id)
}

fn format_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn export_card(id: String, card: CardRecord, picked: bool) -> ExportCard {
    let stats = EXPORT_FIELDS
        .iter()
        .map(|field| (field.to_string(), card.stat(ALL_DECKS, field.key())))
        .collect();
    ExportCard {
        id,
        name: card.name,
        picked,
        colors: card.colors.concat(),
        cmc: card.cmc,
        card_type: card.types.join(" "),
        rarity: card.rarity.unwrap_or_default(),
        stats,
    }
}

fn collect_packs(
    history: &[DraftPick],
    source: &dyn CardSource,
    picked: &[Vec<String>],
) -> Vec<ExportPack> {
    history
        .iter()
        .map(|entry| {
            let found = source.cards_by_id(&entry.cards);
            if found.len() < entry.cards.len() {
                warn!(
                    "P{}P{}: {} of {} cards missing from dataset",
                    entry.pack,
                    entry.pick,
                    entry.cards.len() - found.len(),
                    entry.cards.len()
                );
            }
            let cards = found
                .into_iter()
                .map(|(id, card)| {
                    let is_picked = was_picked(picked, entry.pack, entry.pick, &id);
                    export_card(id, card, is_picked)
                })
                .collect();
            ExportPack {
                pack: entry.pack,
                pick: entry.pick,
                cards,
            }
        })
        .collect()
}

/// One CSV row per card seen, with raw "All Decks" statistics.
pub fn export_draft_to_csv(
    history: &[DraftPick],
    source: &dyn CardSource,
    picked: &[Vec<String>],
) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<String> = CARD_COLUMNS.iter().map(|c| c.to_string()).collect();
    header.push("Rarity".to_string());
    header.extend(EXPORT_FIELDS.iter().map(|f| f.to_string()));
    writer.write_record(&header)?;

    let packs = collect_packs(history, source, picked);
    for pack in &packs {
        for card in &pack.cards {
            let mut record = vec![
                pack.pack.to_string(),
                pack.pick.to_string(),
                if card.picked { "1" } else { "0" }.to_string(),
                card.name.clone(),
                card.colors.clone(),
                format_number(card.cmc),
                card.card_type.clone(),
                card.rarity.clone(),
            ];
            record.extend(
                EXPORT_FIELDS
                    .iter()
                    .map(|f| format_number(card.stats.get(&f.to_string()).copied().flatten())),
            );
            writer.write_record(&record)?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Dataset(format!("export is not UTF-8: {}", e)))
}

/// The draft as a JSON array of packs, each card flagged with `Picked`.
pub fn export_draft_to_json(
    history: &[DraftPick],
    source: &dyn CardSource,
    picked: &[Vec<String>],
) -> AppResult<String> {
    let packs = collect_packs(history, source, picked);
    Ok(serde_json::to_string_pretty(&packs)?)
}

/// Timestamped file name for an export, e.g. `DraftLog_20240503_120000.csv`.
pub fn default_export_name(extension: &str) -> String {
    format!("DraftLog_{}.{}", Local::now().format("%Y%m%d_%H%M%S"), extension)
}

pub fn write_export(path: &Path, content: &str) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    info!("Wrote export to {}", path.display());
    Ok(())
}
