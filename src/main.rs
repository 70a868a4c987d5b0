//! Seat Layout CLI
//!
//! Usage:
//!   seat-layout [OPTIONS] [FILE]
//!
//! Options:
//!   -s, --stylesheet <FILE>  Stylesheet file for color palette (TOML format)
//!   -d, --debug              Outline table footprints and log the layout to stderr
//!   -l, --lint               Report crowded seats and overlapping tables
//!       --seats              Print seat coordinates instead of SVG
//!   -h, --help               Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use seat_layout::{
    render_with_lint, LintWarning, RenderConfig, RenderError, Stylesheet, VenueDocument,
};

#[derive(Parser)]
#[command(name = "seat-layout")]
#[command(about = "Seat geometry and SVG seating charts for tables")]
struct Cli {
    /// Venue file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Stylesheet file for color palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Debug mode: outline table footprints and log the layout to stderr
    #[arg(short, long)]
    debug: bool,

    /// Print lint findings to stderr
    #[arg(short, long)]
    lint: bool,

    /// Print seat coordinates instead of SVG
    #[arg(long)]
    seats: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(io::stderr)
            .with_target(false)
            .init();
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let stylesheet = match &cli.stylesheet {
        Some(path) => match Stylesheet::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Stylesheet::default(),
    };

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let config = RenderConfig::new()
        .with_stylesheet(stylesheet)
        .with_debug(cli.debug)
        .with_lint(cli.lint);

    if cli.seats {
        match VenueDocument::from_str(&source, &config.layout) {
            Ok(venue) => {
                for warning in venue_warnings(&venue, &config) {
                    eprintln!("warning: {}", warning);
                }
                print_seats(&venue);
            }
            Err(e) => {
                eprint!("{}", e.format(&source, &filename));
                std::process::exit(1);
            }
        }
        return;
    }

    match render_with_lint(&source, config) {
        Ok((svg, warnings)) => {
            for warning in &warnings {
                eprintln!("warning: {}", warning);
            }
            println!("{}", svg);
        }
        Err(RenderError::Document(e)) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Lint findings for `--seats`, which skips the render pipeline
fn venue_warnings(venue: &VenueDocument, config: &RenderConfig) -> Vec<LintWarning> {
    if config.lint {
        venue.lint(&config.layout)
    } else {
        Vec::new()
    }
}

fn print_seats(venue: &VenueDocument) {
    for (i, table) in venue.tables.iter().enumerate() {
        let name = table
            .layout
            .spec
            .label
            .clone()
            .unwrap_or_else(|| format!("table #{}", i + 1));
        println!("{} ({}, {} seats)", name, table.layout.spec.shape, table.seats.len());
        for seat in &table.seats {
            println!(
                "  {:>3}  {:>9.2} {:>9.2}",
                seat.index + 1,
                seat.position.x,
                seat.position.y
            );
        }
    }
}

fn print_intro() {
    println!(
        r#"Seat Layout - seat geometry and SVG seating charts

USAGE:
    seat-layout [OPTIONS] [FILE]
    cat venue.toml | seat-layout

OPTIONS:
    -s, --stylesheet   Custom color palette (TOML file)
    -d, --debug        Outline table footprints and log the layout
    -l, --lint         Report crowded seats and overlapping tables
    --seats            Print seat coordinates instead of SVG
    -h, --help         Print help

VENUE FILE:
    [venue]
    name = "Grand Hall"

    [[table]]
    label = "T1"
    shape = "round"        # round, square, rectangle, triangle, semi-circle
    seats = 8              # 1..=20
    width = 120
    height = 120           # defaults to width
    x = 150                # omitted: tables flow left to right
    y = 150
    rotation = 15          # degrees, clockwise
    scale = 1.2            # 0.5..=2.0
    category = "vip"       # seat colour from the stylesheet [categories]

QUICK START:
    printf '[[table]]\nshape = "round"\nseats = 6\nwidth = 100\n' | seat-layout > table.svg"#
    );
}
