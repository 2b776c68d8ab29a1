use anyhow::Context;
use clap::Parser as _;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tfsec::{
    OutputFormat, Parser, Registry, Scanner, VERSION,
    cli::Cli,
    config::load_config,
    format_results,
};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };
    cli.init_logging();

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Run the scan described by `cli` and return the exit code.
fn run(cli: &Cli) -> anyhow::Result<i32> {
    if cli.version {
        println!("{}", VERSION);
        return Ok(0);
    }

    let registry = Registry::with_builtin_checks().context("failed to build check registry")?;

    if cli.list_checks {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for check in registry.checks() {
            writeln!(
                out,
                "{}\t{}\t{}",
                check.code(),
                check.default_severity(),
                check.description()
            )?;
        }
        return Ok(0);
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    let directory = scan_directory(cli.directory.as_deref())?;
    log::info!("scanning {}", directory.display());

    let mut config = load_config(cli.config_file.as_deref(), &directory)?;
    for code in &cli.exclude {
        let code = code.trim();
        if !code.is_empty() {
            config = config.exclude(code);
        }
    }
    if cli.recursive {
        config = config.recursive(true);
    }

    let blocks = Parser::from_config(&config)?.parse_directory(&directory)?;
    let results = Scanner::new(&registry).with_config(config).scan(&blocks);

    let format = OutputFormat::from(cli.format);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    format_results(&results, &blocks, format, !cli.no_color, &mut out)
        .context("failed to write results")?;
    out.flush()?;

    let code = match format {
        OutputFormat::Json => 0,
        OutputFormat::Text if results.is_empty() => 0,
        OutputFormat::Text => 1,
    };
    Ok(code)
}

/// The absolute directory to scan, defaulting to the working directory.
fn scan_directory(directory: Option<&Path>) -> anyhow::Result<PathBuf> {
    match directory {
        Some(dir) => std::path::absolute(dir)
            .with_context(|| format!("failed to resolve {}", dir.display())),
        None => std::env::current_dir().context("failed to read the current directory"),
    }
}
