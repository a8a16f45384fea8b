use anyhow::{bail, Context, Result};
use autocast_core::{builtins, CastOptions, CastRegistry, Caster, DynValue, Hex, TypeKey};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "autocast")]
#[command(about = "Cast values between types along the shortest chain of registered conversions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Longest conversion path to consider
    #[arg(long, global = true)]
    max_hops: Option<usize>,

    /// Resolve every path from scratch instead of memoizing
    #[arg(long, global = true)]
    no_cache: bool,

    /// Output file (defaults to stdout if not specified)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty, global = true)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every type and conversion in the builtin graph
    Graph,

    /// Print the chain of types a cast from one kind to another goes through
    Path {
        /// Source kind
        #[arg(value_enum)]
        from: Kind,

        /// Target kind
        #[arg(value_enum)]
        to: Kind,
    },

    /// Cast a value from one kind to another
    Cast {
        /// Value to cast (read from --input if omitted)
        value: Option<String>,

        /// File holding the value to cast
        #[arg(short, long, conflicts_with = "value")]
        input: Option<PathBuf>,

        /// Kind the value is parsed as
        #[arg(long, value_enum, default_value_t = Kind::Text)]
        from: Kind,

        /// Kind to cast into
        #[arg(long, value_enum)]
        to: Kind,
    },
}

/// Value kinds backed by the builtin conversions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Kind {
    /// `String`
    Text,
    /// `i64`
    Int,
    /// `Vec<u8>` (the Latin-1 bytes of the argument)
    Bytes,
    /// `Vec<char>`
    Chars,
    /// `Hex` (an even number of hex digits)
    Hex,
}

impl Kind {
    fn type_key(self) -> TypeKey {
        match self {
            Kind::Text => TypeKey::of::<String>(),
            Kind::Int => TypeKey::of::<i64>(),
            Kind::Bytes => TypeKey::of::<Vec<u8>>(),
            Kind::Chars => TypeKey::of::<Vec<char>>(),
            Kind::Hex => TypeKey::of::<Hex>(),
        }
    }

    fn parse(self, raw: &str) -> Result<DynValue> {
        Ok(match self {
            Kind::Text => DynValue::new(raw.to_string()),
            Kind::Int => DynValue::new(
                raw.trim()
                    .parse::<i64>()
                    .with_context(|| format!("Invalid integer: {raw}"))?,
            ),
            Kind::Bytes => DynValue::new(
                builtins::latin1_encode(raw.to_string())
                    .with_context(|| format!("Invalid Latin-1 bytes: {raw}"))?,
            ),
            Kind::Chars => DynValue::new(raw.chars().collect::<Vec<char>>()),
            Kind::Hex => DynValue::new(
                Hex::parse(raw.trim()).with_context(|| format!("Invalid hex value: {raw}"))?,
            ),
        })
    }

    fn render(self, value: DynValue) -> Result<serde_json::Value> {
        Ok(match self {
            Kind::Text => serde_json::json!(value.downcast::<String>()?),
            Kind::Int => serde_json::json!(value.downcast::<i64>()?),
            Kind::Bytes => serde_json::json!(value.downcast::<Vec<u8>>()?),
            Kind::Chars => serde_json::json!(value.downcast::<Vec<char>>()?),
            Kind::Hex => serde_json::json!(value.downcast::<Hex>()?.as_str()),
        })
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    Pretty,
    Compact,
}

#[derive(Serialize)]
struct PathReport {
    from: TypeKey,
    to: TypeKey,
    path: Vec<TypeKey>,
    hops: usize,
}

#[derive(Serialize)]
struct CastReport {
    from: TypeKey,
    to: TypeKey,
    path: Vec<TypeKey>,
    value: serde_json::Value,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for JSON
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let options = CastOptions {
        max_hops: cli.max_hops,
        cache_paths: !cli.no_cache,
    };
    let caster = builtin_caster(options)?;
    let output = cli.output.as_ref();

    match cli.command {
        Commands::Graph => {
            write_json(&caster.graph().summary(), output, cli.format)?;
        }
        Commands::Path { from, to } => {
            let (from, to) = (from.type_key(), to.type_key());
            let path = caster
                .find_path(from, to)
                .map_err(|e| anyhow::Error::from(e).context("Path resolution failed"))?;
            let report = PathReport {
                from,
                to,
                hops: path.len(),
                path,
            };
            write_json(&report, output, cli.format)?;
        }
        Commands::Cast {
            value,
            input,
            from,
            to,
        } => {
            let raw = match (value, input) {
                (Some(value), _) => value,
                (None, Some(path)) => {
                    let text = fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
                    text.trim_end_matches(['\r', '\n']).to_string()
                }
                (None, None) => bail!("Provide a VALUE or --input FILE"),
            };

            let source = from.parse(&raw)?;
            let path = caster
                .find_path(from.type_key(), to.type_key())
                .map_err(|e| anyhow::Error::from(e).context("Cast failed"))?;
            let result = caster
                .cast_dyn(source, to.type_key())
                .map_err(|e| anyhow::Error::from(e).context("Cast failed"))?;

            let report = CastReport {
                from: from.type_key(),
                to: to.type_key(),
                path,
                value: to.render(result)?,
            };
            write_json(&report, output, cli.format)?;
        }
    }

    Ok(())
}

fn builtin_caster(options: CastOptions) -> Result<Caster> {
    let mut registry = CastRegistry::with_options(options);
    builtins::install(&mut registry).context("Failed to install builtin conversions")?;
    Ok(registry.seal())
}

fn write_json<T: Serialize>(val: &T, path: Option<&PathBuf>, format: OutputFormat) -> Result<()> {
    let mut writer: Box<dyn Write> = if let Some(p) = path {
        let file = File::create(p)
            .with_context(|| format!("Failed to create output file: {}", p.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    match format {
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut writer, val).context("Failed to write JSON")?;
        }
        OutputFormat::Compact => {
            serde_json::to_writer(&mut writer, val).context("Failed to write JSON")?;
        }
    }

    // Ensure trailing newline
    writeln!(writer).context("Failed to write trailing newline")?;
    writer.flush().context("Failed to flush output")?;

    Ok(())
}
