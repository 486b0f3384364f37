use clap::{Args, Parser, Subcommand};
use draft_lens::analysis::fields::parse_field_list;
use draft_lens::analysis::{sort_rows, CardResult, Field, SetMetrics};
use draft_lens::config::{Config, ResultFormat};
use draft_lens::data::dataset::Dataset;
use draft_lens::data::models::{DraftLog, ALL_DECKS};
use draft_lens::data::tier_list::load_tier_table;
use draft_lens::display::mana::ManaSymbolCache;
use draft_lens::display::output::{display_error, display_info, display_results, display_success};
use draft_lens::error::AppError;
use draft_lens::export::{default_export_name, export_draft_to_csv, export_draft_to_json, write_export};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "Draft Lens")]
#[command(about = "Rate draft picks from downloaded card statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Show info-level logs
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show formatted ratings for cards in a set file
    Rate(RateArgs),
    /// Export a recorded draft as CSV or JSON
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct RateArgs {
    /// Downloaded set file (JSON)
    #[arg(short, long)]
    dataset: String,

    /// Tier list files, available as TIER0, TIER1, ... in load order
    #[arg(short, long)]
    tier: Vec<String>,

    /// Colour filter, e.g. WU (repeatable; default: All Decks)
    #[arg(short, long)]
    filter: Vec<String>,

    /// Comma separated fields, e.g. gihwr,ohwr,alsa,tier0
    #[arg(long, default_value = "gihwr,alsa,iwd")]
    fields: String,

    /// Result format (overrides DRAFT_RESULT_FORMAT)
    #[arg(long, value_enum)]
    format: Option<ResultFormat>,

    /// Minimum games for a colour-pair breakdown (overrides DRAFT_MIN_GAME_COUNT)
    #[arg(long)]
    min_games: Option<u32>,

    /// Field to sort by, best first
    #[arg(short, long)]
    sort: Option<String>,

    /// Number of rows to display
    #[arg(short = 'n', long, default_value = "25")]
    limit: usize,

    /// Card names to show (default: whole set)
    cards: Vec<String>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Downloaded set file (JSON)
    #[arg(short, long)]
    dataset: String,

    /// Draft file written by the log scanner
    #[arg(long)]
    draft: String,

    /// Write JSON instead of CSV
    #[arg(long)]
    json: bool,

    /// Output path (default: timestamped file in the data directory)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "draft_lens=info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn run(command: Command) -> Result<(), AppError> {
    let config = Config::from_env()?;
    match command {
        Command::Rate(args) => rate(args, config),
        Command::Export(args) => export(args, config),
    }
}

fn rate(args: RateArgs, mut config: Config) -> Result<(), AppError> {
    if let Some(format) = args.format {
        config.settings.result_format = format;
    }
    if let Some(min_games) = args.min_games {
        config.settings.min_game_count = min_games;
    }

    let fields = parse_field_list(&args.fields)?;
    if fields.is_empty() {
        return Err(AppError::Config("at least one field is required".to_string()));
    }

    let dataset = Dataset::load(&config.resolve(&args.dataset))?;
    let tier_paths: Vec<PathBuf> = args.tier.iter().map(|t| config.resolve(t)).collect();
    let tier_table = load_tier_table(&tier_paths)?;

    let all_cards = dataset.all_cards();
    let metrics = SetMetrics::from_cards(&all_cards);
    let cards = if args.cards.is_empty() {
        all_cards
    } else {
        dataset.cards_by_name(&args.cards)
    };

    let filters = if args.filter.is_empty() {
        vec![ALL_DECKS.to_string()]
    } else {
        args.filter.iter().map(|f| f.to_ascii_uppercase()).collect()
    };

    let tiers = (!tier_table.is_empty()).then_some(&tier_table);
    let formatter = CardResult::new(&metrics, tiers, &config.settings);
    let mut rows = formatter.return_results(&cards, &filters, &fields);

    let sort_field = match &args.sort {
        Some(raw) => raw.parse::<Field>()?,
        None => fields[0].clone(),
    };
    match fields.iter().position(|f| *f == sort_field) {
        Some(column) => sort_rows(&mut rows, column),
        None => {
            return Err(AppError::InvalidField(format!(
                "sort field {} is not one of the displayed fields",
                sort_field
            )))
        }
    }
    rows.truncate(args.limit);

    let title = format!("Card ratings [{}]", filters.join(", "));
    let mut mana = ManaSymbolCache::new();
    display_results(&rows, &fields, config.settings.result_format, &title, &mut mana);

    Ok(())
}

fn export(args: ExportArgs, config: Config) -> Result<(), AppError> {
    let dataset = Dataset::load(&config.resolve(&args.dataset))?;
    let draft_path = config.resolve(&args.draft);
    let draft: DraftLog = serde_json::from_str(&fs::read_to_string(&draft_path)?)?;
    display_info(&format!(
        "Exporting {} packs from {}",
        draft.history.len(),
        draft_path.display()
    ));

    let (content, extension) = if args.json {
        (export_draft_to_json(&draft.history, &dataset, &draft.picks)?, "json")
    } else {
        (export_draft_to_csv(&draft.history, &dataset, &draft.picks)?, "csv")
    };

    let output = args
        .output
        .unwrap_or_else(|| config.data_dir.join(default_export_name(extension)));
    write_export(&output, &content)?;
    display_success(&format!("Draft exported to {}", output.display()));

    Ok(())
}
