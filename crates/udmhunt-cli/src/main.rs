use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde_json::Value;
use udmhunt_eval::{
    Engine, SourceConfig, load_events_directory, load_events_path, load_events_str,
    write_events_file,
};
use udmhunt_parser::{HuntQuery, hunt_from_flags, parse_hunt_file, parse_mandatory};

#[derive(Parser)]
#[command(name = "udmhunt")]
#[command(about = "Hunt through UDM security events with field conditions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a hunt over a collection of events
    ///
    /// Conditions come from a YAML hunt file (--query), from flags, or both;
    /// flags are appended to the file's lists. Events are read from a file or
    /// directory (--events), or as JSON / NDJSON from stdin.
    Hunt {
        /// Event file or directory of event files (if omitted, reads stdin)
        #[arg(short, long)]
        events: Option<PathBuf>,

        /// YAML hunt definition
        #[arg(short, long)]
        query: Option<PathBuf>,

        /// Mandatory condition `field=value` or `field<op>timestamp` (repeatable)
        #[arg(short, long)]
        mandatory: Vec<String>,

        /// Optional substring condition `field=keyword` (repeatable)
        #[arg(short, long)]
        contains: Vec<String>,

        /// Field to project from every match (repeatable)
        #[arg(short, long)]
        output: Vec<String>,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Merge every event file of a directory into a single JSON array
    Merge {
        /// Directory holding the event files
        #[arg(short, long, default_value = "json_data_Google")]
        directory: PathBuf,

        /// Merged output file
        #[arg(short, long, default_value = "merged_events.json")]
        output: PathBuf,
    },

    /// Parse a YAML hunt file and print the query as JSON
    Parse {
        /// Path to a hunt YAML file
        path: PathBuf,
    },

    /// Parse a single mandatory condition flag and print it as JSON
    Condition {
        /// The condition, e.g. `metadata.event_timestamp>=2024-01-01`
        flag: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Hunt {
            events,
            query,
            mandatory,
            contains,
            output,
            pretty,
        } => cmd_hunt(events, query, mandatory, contains, output, pretty),
        Commands::Merge { directory, output } => cmd_merge(directory, output),
        Commands::Parse { path } => cmd_parse(path),
        Commands::Condition { flag } => cmd_condition(flag),
    }
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

fn cmd_hunt(
    events_path: Option<PathBuf>,
    query_path: Option<PathBuf>,
    mandatory: Vec<String>,
    contains: Vec<String>,
    output: Vec<String>,
    pretty: bool,
) {
    let query = build_query(query_path.as_deref(), &mandatory, &contains, &output);
    let events = match events_path {
        Some(path) => load_events(&path),
        None => read_stdin_events(),
    };

    let engine = Engine::new(&query);
    eprintln!(
        "Hunting {} events with {} mandatory and {} optional conditions",
        events.len(),
        query.mandatory_count(),
        query.contains.len(),
    );

    let result = engine.run(&events);

    println!("=== HUNT RESULTS ===");
    for record in &result {
        print_json(record, pretty);
    }

    eprintln!(
        "Scanned {} events, {} matches.",
        result.scanned,
        result.len()
    );
}

fn cmd_merge(directory: PathBuf, output: PathBuf) {
    let collection = match load_events_directory(&directory, &SourceConfig::default()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading {}: {e}", directory.display());
            process::exit(1);
        }
    };

    for (path, count) in &collection.loaded {
        println!("Loaded {} ({count} events)", path.display());
    }
    print_warnings(&collection.errors);

    if let Err(e) = write_events_file(&output, &collection.events) {
        eprintln!("Error writing {}: {e}", output.display());
        process::exit(1);
    }

    println!("Merged {} events into {}", collection.len(), output.display());
}

fn cmd_parse(path: PathBuf) {
    match parse_hunt_file(&path) {
        Ok(query) => print_json(&query, true),
        Err(e) => {
            eprintln!("Error parsing {}: {e}", path.display());
            process::exit(1);
        }
    }
}

fn cmd_condition(flag: String) {
    match parse_mandatory(&flag) {
        Ok(condition) => print_json(&condition, true),
        Err(e) => {
            eprintln!("Condition parse error: {e}");
            process::exit(1);
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the hunt file (if any) and append the flag conditions to it.
fn build_query(
    query_path: Option<&Path>,
    mandatory: &[String],
    contains: &[String],
    output: &[String],
) -> HuntQuery {
    let mut query = match query_path {
        Some(path) => match parse_hunt_file(path) {
            Ok(q) => {
                eprintln!(
                    "Loaded hunt {} from {}",
                    q.title.as_deref().unwrap_or("(untitled)"),
                    path.display()
                );
                q
            }
            Err(e) => {
                eprintln!("Error loading hunt {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => HuntQuery::new(),
    };

    match hunt_from_flags(mandatory, contains, output) {
        Ok(flags) => query.merge(flags),
        Err(e) => {
            eprintln!("Invalid condition: {e}");
            process::exit(1);
        }
    }

    if query.output.is_empty() {
        log::warn!("no --output fields given; every record will be empty");
    }

    query
}

fn load_events(path: &Path) -> Vec<Value> {
    let collection = match load_events_path(path, &SourceConfig::default()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading events from {}: {e}", path.display());
            process::exit(1);
        }
    };

    if !collection.errors.is_empty() {
        eprintln!(
            "Warning: {} files failed to load from {}",
            collection.errors.len(),
            path.display()
        );
        print_warnings(&collection.errors);
    }

    collection.events
}

fn read_stdin_events() -> Vec<Value> {
    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        eprintln!("Error reading stdin: {e}");
        process::exit(1);
    }

    match load_events_str(&input) {
        Ok(events) => events,
        Err(e) => {
            eprintln!("Invalid JSON on stdin: {e}");
            process::exit(1);
        }
    }
}

fn print_warnings(errors: &[String]) {
    if !errors.is_empty() {
        eprintln!("Warnings:");
        for err in errors {
            eprintln!("  - {err}");
        }
    }
}

fn print_json(value: &impl serde::Serialize, pretty: bool) {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match json {
        Ok(j) => println!("{j}"),
        Err(e) => {
            eprintln!("JSON serialization error: {e}");
            process::exit(1);
        }
    }
}
