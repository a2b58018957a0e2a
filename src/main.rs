use clap::{ArgAction, Parser};
use eyre::{Result, WrapErr};
use numbers_calc::config::Config;
use numbers_calc::logging::init_logging;
use numbers_calc::render::render_rows;
use numbers_calc::session::{run_repl, Notepad};
use numbers_calc::evaluate_all_lines;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Evaluate a notepad-calculator document line by line.
#[derive(Debug, Parser)]
#[command(name = "numbers", version, about)]
struct Cli {
    /// Document to evaluate; reads stdin when omitted or `-`.
    file: Option<PathBuf>,

    /// Print rows as a JSON array.
    #[arg(long)]
    json: bool,

    /// Edit the document with line commands, re-evaluating after each one.
    #[arg(short, long)]
    interactive: bool,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fractional digits shown for results.
    #[arg(long)]
    precision: Option<usize>,

    /// Raise log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(precision) = cli.precision {
        config.precision = precision;
    }
    if cli.log_file.is_some() {
        config.log_file = cli.log_file.clone();
    }
    config.json |= cli.json;
    config.validate()?;

    init_logging(cli.verbose, config.log_file.as_deref())?;
    tracing::debug!(?config, "configuration loaded");

    if cli.interactive {
        run_interactive_mode(&cli, &config)
    } else {
        run_once(&cli, &config)
    }
}

fn read_document(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .wrap_err_with(|| format!("could not read {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .wrap_err("could not read stdin")?;
            Ok(text)
        }
    }
}

fn run_once(cli: &Cli, config: &Config) -> Result<()> {
    let contents = read_document(cli.file.as_ref())?;
    let lines: Vec<&str> = contents.lines().collect();

    let rows = evaluate_all_lines(&lines);
    tracing::info!(
        lines = rows.len(),
        invalid = rows.iter().filter(|r| r.is_invalid).count(),
        "document evaluated"
    );

    let mut stdout = io::stdout().lock();
    if config.json {
        serde_json::to_writer_pretty(&mut stdout, &rows)?;
        writeln!(stdout)?;
    } else {
        write!(stdout, "{}", render_rows(&rows, config.precision))?;
    }
    Ok(())
}

fn run_interactive_mode(cli: &Cli, config: &Config) -> Result<()> {
    // Stdin carries the commands here, so only a real file seeds the buffer.
    let mut notepad = match &cli.file {
        Some(path) if path.as_os_str() != "-" => Notepad::from_text(&read_document(Some(path))?),
        _ => Notepad::new(),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_repl(&mut notepad, stdin.lock(), &mut stdout, config.precision)?;
    Ok(())
}
