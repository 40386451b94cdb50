// tinyfront: lex, parse and inspect tinyfront source files

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tinyfront::parser::{parse_source, Lexer};
use tinyfront::ui::App;

/// Parse a tinyfront source file and show its tokens or syntax tree
#[derive(Debug, ClapParser)]
#[command(name = "tinyfront", version, about)]
struct Cli {
    /// Source file to parse
    file: PathBuf,

    /// Print the token stream instead of the syntax tree
    #[arg(long, conflicts_with = "tui")]
    tokens: bool,

    /// Open the interactive viewer
    #[arg(long)]
    tui: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", cli.file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    info!(file = %cli.file.display(), bytes = source.len(), "read source");

    let result = if cli.tokens {
        print_tokens(&source)
    } else if cli.tui {
        run_viewer(source).map_err(|e| e.to_string())
    } else {
        print_tree(&source)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn print_tokens(source: &str) -> Result<(), String> {
    let tokens = Lexer::new(source).tokenize().map_err(|e| e.to_string())?;

    for token in &tokens {
        println!(
            "{:>4}:{:<4} {:<16} {}",
            token.location.line,
            token.location.column,
            format!("{:?}", token.kind),
            token.lexeme
        );
    }

    Ok(())
}

fn print_tree(source: &str) -> Result<(), String> {
    let program = parse_source(source).map_err(|e| e.to_string())?;

    for line in program.outline() {
        println!("{}", line);
    }
    info!(nodes = program.node_count(), "parsed successfully");

    Ok(())
}

fn run_viewer(source: String) -> io::Result<()> {
    let mut app = App::new(source);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
