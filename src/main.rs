use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::info;

use rusty_avocado::data::loader;
use rusty_avocado::view;
use rusty_avocado::{Category, Config, FilterOptions, SearchResult, Session};

#[derive(Parser)]
#[command(name = "rusty-avocado")]
#[command(about = "Browse the avocado registered-chemicals list")]
struct Cli {
    /// Load this file instead of the bundled dataset (.json, .csv, .parquet, .xlsx/.xls/.ods).
    #[arg(long, global = true)]
    file: Option<PathBuf>,
    /// Directory holding the bundled dataset.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Bundled JSON file name (relative to the data directory).
    #[arg(long, global = true)]
    json: Option<PathBuf>,
    /// Bundled CSV file name (relative to the data directory).
    #[arg(long, global = true)]
    csv: Option<PathBuf>,
    /// More log output (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the category names.
    Categories,
    /// List the canonical fields.
    Fields,
    /// Show the products of one category.
    Category {
        /// insecticides, fungicides, adjuvants, herbicides, postharvest or mrls
        name: Category,
        #[arg(long)]
        registered_only: bool,
        /// Show the full record at this position of the result.
        #[arg(long)]
        detail: Option<usize>,
    },
    /// Keyword search across the text fields.
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long)]
        registered_only: bool,
        /// Show the full record at this position of the result.
        #[arg(long)]
        detail: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let config = Config::from_env().with_overrides(cli.data_dir, cli.json, cli.csv);
    match cli.command {
        Command::Categories => view::write_categories(&mut out)?,
        Command::Fields => view::write_fields(&mut out)?,
        Command::Category {
            name,
            registered_only,
            detail,
        } => {
            let mut session = open_session(&config, cli.file.as_deref())?;
            let result = session.select_category(name, &FilterOptions { registered_only });
            show(&mut out, &session, &result, detail)?;
        }
        Command::Search {
            query,
            registered_only,
            detail,
        } => {
            let mut session = open_session(&config, cli.file.as_deref())?;
            let result = session.search(&query, &FilterOptions { registered_only });
            show(&mut out, &session, &result, detail)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Bundled data first; a user file, when given, replaces it.
fn open_session(config: &Config, file: Option<&Path>) -> Result<Session> {
    let mut session = Session::new(loader::load_bundled(&config.json_path(), &config.csv_path()));
    if let Some(path) = file {
        let dataset = loader::load_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
        info!("replacing bundled data with {}", dataset.source);
        session.replace_dataset(dataset);
    }
    Ok(session)
}

fn show<W: Write>(out: &mut W, session: &Session, result: &SearchResult, detail: Option<usize>) -> Result<()> {
    let Some(pos) = detail else {
        view::write_result(out, session, result)?;
        return Ok(());
    };
    let Some(record) = session.detail(pos) else {
        let found = match result {
            SearchResult::Rows { indices, .. } => indices.len(),
            _ => 0,
        };
        bail!("no row {pos} in this result ({found} rows)");
    };
    view::write_detail(out, record)?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}
