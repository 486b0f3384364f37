use super::mana::ManaSymbolCache;
use crate::analysis::card_result::{ResultRow, ResultValue};
use crate::analysis::fields::Field;
use crate::analysis::grades::grade_rank;
use crate::config::ResultFormat;
use colored::*;
use tabled::{builder::Builder, settings::Style};

/// Colour a grade cell by its primary grade; other cells pass through.
fn highlight(value: &ResultValue) -> String {
    let text = value.to_string();
    let primary = text
        .split_whitespace()
        .find(|token| !token.ends_with(':'))
        .unwrap_or_default();
    match grade_rank(primary) {
        Some(rank) if rank >= 11 => text.green().to_string(),
        Some(rank) if rank >= 6 => text.yellow().to_string(),
        Some(_) => text.red().to_string(),
        None => text,
    }
}

pub fn display_results(
    rows: &[ResultRow],
    fields: &[Field],
    format: ResultFormat,
    title: &str,
    mana: &mut ManaSymbolCache,
) {
    println!("\n{}", format!("🃏 {} ({})", title, format).bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if rows.is_empty() {
        println!("{}", "No cards to display".yellow());
        return;
    }

    let mut builder = Builder::default();
    let mut header = vec!["#".to_string(), "Card".to_string(), "Colors".to_string()];
    header.extend(fields.iter().map(|field| field.to_string()));
    builder.push_record(header);

    for (idx, row) in rows.iter().enumerate() {
        let mut record = vec![
            format!("{}", idx + 1),
            row.name.clone(),
            mana.for_card(&row.colors, row.mana_cost.as_deref()).to_string(),
        ];
        record.extend(row.results.iter().map(highlight));
        builder.push_record(record);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{}", table);

    if rows.iter().any(|row| row.results.iter().any(ResultValue::is_empty)) {
        println!(
            "{}",
            "• Blank cells: no data, or too few games for a reliable sample".dimmed()
        );
    }
    println!();
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
