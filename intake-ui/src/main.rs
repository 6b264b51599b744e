use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use intake_core::NoticeSink;
use tracing::{debug, info};

use intake_ui::commands::HELP;
use intake_ui::notices::ConsoleNotices;
use intake_ui::transport::ConsoleTransport;
use intake_ui::{AppConfig, ConfigOverrides, Flow, IntakeApp, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Six-step quote request intake form.
///
/// Reads one command per line from a script file or from stdin and prints
/// the current page after every change. Type `help` for the command list.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run the commands in this file instead of reading stdin.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Preserve contact details on uncheck and do not gate step 3.
    #[arg(long)]
    lenient: bool,

    /// Also write logs to `<dir>/QuoteRequest.log`.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level or filter directive, e.g. `debug` or `info,intake_core=trace`.
    #[arg(long)]
    log_level: Option<String>,
}

// ─── command loop ────────────────────────────────────────────────────────────

fn run<N: NoticeSink, R: BufRead>(
    app: &mut IntakeApp<N, ConsoleTransport>,
    input: R,
    interactive: bool,
) -> Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", app.render())?;
    if interactive {
        write!(stdout, "> ")?;
        stdout.flush()?;
    }

    for (number, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("cannot read input line {}", number + 1))?;
        debug!(line = number + 1, input = %line, "command");

        match app.run_line(&line) {
            Flow::Stay => {}
            Flow::Redraw => write!(stdout, "\n{}", app.render())?,
            Flow::Help => writeln!(stdout, "{HELP}")?,
            Flow::Exit => break,
        }
        if interactive {
            write!(stdout, "> ")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        lenient: cli.lenient,
        log_dir: cli.log_dir,
        log_level: cli.log_level,
    };
    let config = AppConfig::resolve(cli.config.as_deref(), &overrides)?;
    logging::init_logging(&config.logging)?;
    info!(policy = ?config.policy, "starting {}", logging::app_name());

    let mut app = IntakeApp::new(
        config.policy,
        ConsoleNotices::new(io::stdout()),
        ConsoleTransport::new(),
    );

    match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open script '{}'", path.display()))?;
            run(&mut app, BufReader::new(file), false)?;
        }
        None => run(&mut app, io::stdin().lock(), true)?,
    }

    info!(
        submissions = app.submissions().len(),
        saves = app.transport().saves(),
        "session finished"
    );
    Ok(())
}
