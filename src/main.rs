use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use wa_authorboards::{
    annual_review, author_table, leaderboard, BuildConfig, KnowledgeBase, NameStyler, TableOrder,
    VERSION,
};

const USAGE: &str = "\
usage: wa-authorboards <command> [--config <file.json>] [options]

commands:
  summary                     counts of resolutions, authors and players
  leaderboard [--no-puppets]  leaderboard rows as JSON
  table <order>               author table as JSON (author, total, active,
                              active-non-repeals, active-repeals, repealed)
  annual <year>               resolutions implemented in <year> as JSON";

struct Args {
    command: String,
    config: Option<PathBuf>,
    no_puppets: bool,
    positional: Vec<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = env::args().skip(1);
    let mut parsed = Args {
        command: args.next().unwrap_or_else(|| "summary".to_string()),
        config: None,
        no_puppets: false,
        positional: Vec::new(),
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a file path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--no-puppets" => parsed.no_puppets = true,
            _ => parsed.positional.push(arg),
        }
    }
    Ok(parsed)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => BuildConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => BuildConfig::default(),
    };

    match args.command.as_str() {
        "summary" => run_summary(&config),
        "leaderboard" => run_leaderboard(&config, !args.no_puppets),
        "table" => run_table(&config, args.positional.first().map(String::as_str)),
        "annual" => run_annual(&config, args.positional.first().map(String::as_str)),
        "help" | "--help" | "-h" => {
            println!("{}", USAGE);
            Ok(())
        }
        other => {
            eprintln!("{}", USAGE);
            bail!("unknown command: {}", other)
        }
    }
}

fn load(config: &BuildConfig) -> Result<KnowledgeBase> {
    KnowledgeBase::load(config).with_context(|| {
        format!(
            "Failed to build knowledge base from {} and {}",
            config.resolutions_path.display(),
            config.aliases_path.display()
        )
    })
}

fn styler(config: &BuildConfig) -> Result<NameStyler> {
    match &config.names_path {
        Some(path) => NameStyler::from_file(path).context("Failed to load capitalisation exceptions"),
        None => Ok(NameStyler::new()),
    }
}

fn run_summary(config: &BuildConfig) -> Result<()> {
    let kb = load(config)?;

    let repeals = kb.resolutions().iter().filter(|r| r.is_repeal()).count();
    let repealed = kb.resolutions().iter().filter(|r| r.is_repealed()).count();

    println!("wa-authorboards v{}", VERSION);
    println!("📜 Resolutions: {}", kb.resolutions().len());
    println!("   ✓ Repeals:   {}", repeals);
    println!("   ✓ Repealed:  {}", repealed);
    println!("✍️  Authors:     {}", kb.authors().len());
    println!("🎭 Players:     {}", kb.players().len());

    Ok(())
}

fn run_leaderboard(config: &BuildConfig, keep_puppets: bool) -> Result<()> {
    let kb = load(config)?;
    let styler = styler(config)?;

    let mut rows = leaderboard(&kb, keep_puppets);
    for row in &mut rows {
        row.name = styler.canonicalize_for_display(&row.name);
    }

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn run_table(config: &BuildConfig, order: Option<&str>) -> Result<()> {
    let order = match order.unwrap_or("total") {
        "author" => TableOrder::Author,
        "total" => TableOrder::Total,
        "active" => TableOrder::ActiveTotal,
        "active-non-repeals" => TableOrder::ActiveNonRepealsTotal,
        "active-repeals" => TableOrder::ActiveRepealsTotal,
        "repealed" => TableOrder::RepealedTotal,
        other => bail!("unknown table order: {}", other),
    };

    let kb = load(config)?;
    let styler = styler(config)?;

    let mut rows = author_table(&kb, order);
    for row in &mut rows {
        row.name = styler.canonicalize_for_display(&row.name);
    }

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn run_annual(config: &BuildConfig, year: Option<&str>) -> Result<()> {
    let year: i32 = year
        .context("annual needs a year")?
        .parse()
        .context("year must be a number")?;

    let kb = load(config)?;
    let rows = annual_review(&kb, year);

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
