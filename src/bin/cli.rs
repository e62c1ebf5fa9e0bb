//! persistkv CLI
//!
//! Command-line interface for inspecting and editing a store file.

use clap::{Parser, Subcommand, ValueEnum};
use persistkv::{Config, Result, Store, SyncStrategy, Value};
use tracing_subscriber::{fmt, EnvFilter};

/// persistkv CLI
#[derive(Parser, Debug)]
#[command(name = "persistkv-cli")]
#[command(about = "CLI for persistkv store files")]
#[command(version)]
struct Args {
    /// Store file
    #[arg(short, long, default_value = "./persist.db")]
    file: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Put {
        /// The key to set
        key: String,

        /// The value to set
        value: String,

        /// How to interpret the value
        #[arg(short = 't', long = "type", value_enum, default_value = "str")]
        kind: Kind,
    },

    /// List all keys
    List,

    /// Print every key with its type and value
    Dump,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Kind {
    Str,
    Int,
    Bool,
    Float,
}

fn parse_value(raw: &str, kind: Kind) -> std::result::Result<Value, String> {
    match kind {
        Kind::Str => Ok(Value::Str(raw.to_string())),
        Kind::Int => raw
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| format!("invalid integer {:?}: {}", raw, e)),
        Kind::Bool => raw
            .parse::<bool>()
            .map(Value::Bool)
            .map_err(|e| format!("invalid boolean {:?}: {}", raw, e)),
        Kind::Float => raw
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| format!("invalid float {:?}: {}", raw, e)),
    }
}

fn run(store: &mut Store, command: Commands) -> Result<()> {
    match command {
        Commands::Get { key } => {
            println!("{}", store.get(&key)?);
        }
        Commands::Put { key, value, kind } => {
            let value = match parse_value(&value, kind) {
                Ok(v) => v,
                Err(msg) => {
                    eprintln!("error: {}", msg);
                    std::process::exit(2);
                }
            };
            store.put(&key, value)?;
        }
        Commands::List => {
            for key in store.keys() {
                println!("{}", key);
            }
        }
        Commands::Dump => {
            for (key, value) in store.iter() {
                println!("{}\t{}\t{}", key, value.kind(), value);
            }
        }
    }
    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,persistkv=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let config = Config::builder()
        .path(&args.file)
        .sync_strategy(SyncStrategy::OnClose)
        .build();
    let mut store = Store::with_config(config);

    if let Err(e) = store.open() {
        tracing::error!("Failed to open {}: {}", args.file, e);
        std::process::exit(1);
    }

    let outcome = run(&mut store, args.command);
    let closed = store.close();

    if let Err(e) = outcome.and(closed) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
