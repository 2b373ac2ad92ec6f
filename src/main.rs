// journal-pdf: Generate printable daily journals (A5 pages on A4 sheets)

use clap::{ArgAction, Parser};
use journal_pdf::config::{load_cover_image, parse_date};
use journal_pdf::logging::init_logging;
use journal_pdf::render::{generate_pdf, layout_json};
use journal_pdf::{AppError, Catalog, CategoryList, JournalConfig, JournalMode, Locale};
use log::info;

// ============================================================================
// Data Structures
// ============================================================================

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Generate printable daily journals (A5 pages on A4 sheets)")]
struct Args {
    /// First journal day (YYYY-MM-DD format, defaults to today)
    #[arg(short, long)]
    start: Option<String>,

    /// Last journal day (YYYY-MM-DD); without it the journal has no days
    #[arg(short, long, conflicts_with_all = ["days", "pages"])]
    end: Option<String>,

    /// Number of undated days (1-402); invalid values fall back to 22
    #[arg(short, long, conflicts_with = "pages", allow_hyphen_values = true)]
    days: Option<String>,

    /// Number of A4 pages after the title sheet (0-100); invalid values fall back to 5
    #[arg(short, long, allow_hyphen_values = true)]
    pages: Option<String>,

    /// Locale for dates and labels (de-DE, en-US, en-GB, fr-FR, es-ES, it-IT)
    #[arg(short, long, default_value = "de-DE")]
    locale: String,

    /// Category label, repeat for each row (max 10)
    #[arg(short, long = "category")]
    category: Vec<String>,

    /// Category file (JSON array of labels)
    #[arg(long)]
    categories: Option<String>,

    /// Translation overrides (JSON object keyed by language)
    #[arg(long)]
    translations: Option<String>,

    /// Journal name printed on the front cover
    #[arg(short, long)]
    name: Option<String>,

    /// Cover image (file path or URL) shown on the front cover
    #[arg(long)]
    cover_image: Option<String>,

    /// Draw dashed cut lines between the A5 pages
    #[arg(long)]
    cut_guides: bool,

    /// Print the sheet layout as JSON instead of writing a PDF
    #[arg(long)]
    layout: bool,

    /// Output filename (defaults to journal-{start}-{days}d.pdf)
    #[arg(short, long)]
    output: Option<String>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let args = Args::parse();
    let _logger = init_logging(args.verbose)?;

    let locale: Locale = args.locale.parse()?;

    // Parse dates
    let start = parse_date(args.start.as_deref())?;
    let end = args
        .end
        .as_deref()
        .map(|s| parse_date(Some(s)))
        .transpose()?;

    let mode = JournalMode::resolve(start, end, args.days.as_deref(), args.pages.as_deref())?;

    // Translations, then categories (their defaults depend on the catalog)
    let mut catalog = Catalog::builtin()?;
    if let Some(path) = args.translations.as_deref() {
        catalog = catalog.merged_with(Catalog::load(path)?);
    }
    let categories =
        CategoryList::resolve(args.categories.as_deref(), args.category, &catalog, locale)?;

    let cover_image = if args.layout {
        None
    } else {
        load_cover_image(args.cover_image.as_deref())?
    };

    let config = JournalConfig {
        mode,
        locale,
        categories,
        catalog,
        journal_name: args.name,
        cover_image,
        cut_guides: args.cut_guides,
    };

    let sheets = config.layout();
    info!(
        "event=layout mode={:?} days={} sheets={}",
        config.mode,
        config.day_count(),
        sheets.len()
    );

    if args.layout {
        println!("{}", layout_json(&sheets)?);
        return Ok(());
    }

    let output_file = args.output.unwrap_or_else(|| default_output_name(&config));

    generate_pdf(&config, &sheets, &output_file)?;

    println!("✓ Generated: {}", output_file);
    println!("  Locale: {}", config.locale);
    println!(
        "  Days: {} ({} pages after the title sheet)",
        config.day_count(),
        config.page_count()
    );
    if let Some((first, last)) = config.date_span() {
        println!(
            "  Dates: {} – {}",
            config.locale.format_day(first),
            config.locale.format_day(last)
        );
    }
    println!(
        "  Categories: {} (total /{})",
        config.categories.len(),
        config.categories.total_points()
    );

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn default_output_name(config: &JournalConfig) -> String {
    match config.mode.start_date() {
        Some(start) => format!(
            "journal-{}-{}d.pdf",
            start.format("%Y-%m-%d"),
            config.day_count()
        ),
        None => format!("journal-{}d.pdf", config.day_count()),
    }
}
