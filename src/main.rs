use std::{fs::File, io::stdout, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use simplelog::{Config, LevelFilter, WriteLogger};

use pagerat::{
    App, Book, ReadingSession, commands,
    event_source::KeyboardEventSource,
    panic_handler,
    position_store::JsonPositionStore,
    run_app_with_event_source,
    settings::Settings,
};

#[derive(Parser)]
#[command(name = "pagerat")]
#[command(version, about = "Paged terminal reader for single-file HTML books", long_about = None)]
#[command(after_help = "EXAMPLES:
    pagerat                     Open the interactive reader
    pagerat read -n 3           Print the next three pages
    pagerat goto 12             Continue from chapter 12")]
struct Cli {
    /// HTML book to read
    #[arg(long, value_name = "FILE")]
    book: Option<PathBuf>,

    /// File the reading position is saved to
    #[arg(long, value_name = "FILE")]
    state: Option<PathBuf>,

    /// Settings file (YAML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write the log
    #[arg(long, value_name = "FILE", default_value = "pagerat.log")]
    log_file: PathBuf,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive reader (default)
    Ui,
    /// List chapters
    List,
    /// Print pages from the saved position and advance it
    Read {
        /// Number of pages
        #[arg(
            short = 'n',
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        pages: u32,
    },
    /// Show the saved position
    Status,
    /// Move the saved position to the start of a chapter
    Goto {
        /// Chapter number, starting at 1
        chapter: usize,
    },
    /// Move the saved position back to the first page
    Reset,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("error: {e:#}");
        return ExitCode::FAILURE;
    }
    info!("Starting pagerat");

    match run(cli) {
        Ok(()) => {
            info!("Shutting down pagerat");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(level, Config::default(), file)?;
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(book) = cli.book {
        settings.book_file = book;
    }
    if let Some(state) = cli.state {
        settings.state_file = state;
    }

    let mut store = JsonPositionStore::new(&settings.state_file);
    info!(
        "Book {}, reading position in {}",
        settings.book_file.display(),
        store.path().display()
    );
    let open_book = || Book::open(&settings.book_file, settings.default_layout());

    match cli.command.unwrap_or(Command::Ui) {
        Command::Ui => run_reader(open_book()?, store, &settings),
        Command::List => commands::list_chapters(&open_book()?, &mut stdout().lock()),
        Command::Read { pages } => {
            let mut session = ReadingSession::open(open_book()?, Box::new(store));
            commands::read_pages(&mut session, pages as usize, &mut stdout().lock())
        }
        Command::Status => commands::show_status(&open_book()?, &store, &mut stdout().lock()),
        Command::Goto { chapter } => {
            let mut session = ReadingSession::open(open_book()?, Box::new(store));
            commands::goto_chapter(&mut session, chapter, &mut stdout().lock())
        }
        Command::Reset => commands::reset_position(&mut store, &mut stdout().lock()),
    }
}

fn run_reader(book: Book, store: JsonPositionStore, settings: &Settings) -> Result<()> {
    let session = ReadingSession::open(book, Box::new(store));
    let mut app = App::new(session, settings.display_title(), settings.chrome());

    panic_handler::initialize_panic_handler();

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut event_source = KeyboardEventSource;
    let res = run_app_with_event_source(&mut terminal, &mut app, &mut event_source);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
