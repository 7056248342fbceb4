//! tbl-sync - CLI tool to convert LinuxCNC tool tables to and from Smooth presets.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use tbl_sync::generator::generate_tool_table_file;
use tbl_sync::mapping::preset_json_to_entries;
use tbl_sync::{
    generate_tool_table, import_tool_table_file, parse_tool_table, parse_tool_table_file,
    write_tool_table_file, PresetDocument, SmoothConfig,
};

/// Convert LinuxCNC tool tables to and from Smooth tool presets.
#[derive(Parser, Debug)]
#[command(name = "tbl-sync")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a tool table into preset JSON ({"items": [...]})
    Import {
        /// Tool table path (defaults to [EMCIO] TOOL_TABLE from --ini)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Machine identifier (defaults to [SMOOTH] MACHINE_ID from --ini)
        #[arg(short, long)]
        machine: Option<String>,

        /// LinuxCNC INI file
        #[arg(long)]
        ini: Option<PathBuf>,

        /// Output JSON path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert preset JSON into a tool table
    Export {
        /// Preset JSON path, or "-" for stdin
        #[arg(short, long)]
        input: String,

        /// Output tool table path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse a tool table and report errors
    Check {
        /// Tool table path
        #[arg(short, long)]
        input: PathBuf,

        /// Print the parsed entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a tool table in canonical form
    Fmt {
        /// Tool table path
        #[arg(short, long)]
        input: PathBuf,

        /// Output path (rewrites the input if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail instead of writing if the table is not canonical
        #[arg(long)]
        check: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for data
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Import {
            input,
            machine,
            ini,
            output,
        } => run_import(input, machine, ini, output),
        Command::Export { input, output } => run_export(&input, output.as_deref()),
        Command::Check { input, json } => run_check(&input, json),
        Command::Fmt {
            input,
            output,
            check,
        } => run_fmt(&input, output.as_deref(), check),
    }
}

fn run_import(
    input: Option<PathBuf>,
    machine: Option<String>,
    ini: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = ini
        .as_deref()
        .map(|path| {
            SmoothConfig::from_ini_file(path)
                .with_context(|| format!("Failed to read {}", path.display()))
        })
        .transpose()?;

    if let Some(config) = &config {
        if config.is_empty() {
            warn!("[SMOOTH] section is empty");
        }
        debug!(
            keys = config.len(),
            url = config.url().unwrap_or("<unset>"),
            token = config.token().is_some(),
            "Smooth settings"
        );
    }

    let machine_id = machine
        .or_else(|| config.as_ref()?.machine_id().map(str::to_string))
        .context("No machine id: pass --machine or set MACHINE_ID in [SMOOTH]")?;

    let input = input
        .or_else(|| config.as_ref()?.tool_table().map(Path::to_path_buf))
        .context("No tool table: pass --input or set TOOL_TABLE in [EMCIO]")?;

    info!("Processing: {}", input.display());

    let presets = import_tool_table_file(&input, &machine_id)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    info!("Parsed {} tool(s) for machine {}", presets.len(), machine_id);

    let json = serde_json::to_string_pretty(&PresetDocument::bulk(presets))?;

    match output {
        Some(path) => {
            std::fs::write(&path, format!("{}\n", json))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Generated: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn run_export(input: &str, output: Option<&Path>) -> Result<()> {
    let json = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read presets from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?
    };

    let entries = preset_json_to_entries(&json).context("Failed to export presets")?;

    info!("Exporting {} preset(s)", entries.len());

    match output {
        Some(path) => {
            write_tool_table_file(path, &entries)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Generated: {}", path.display());
        }
        None => print!("{}", generate_tool_table(&entries)),
    }

    Ok(())
}

fn run_check(input: &Path, json: bool) -> Result<()> {
    let entries = parse_tool_table_file(input)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    }

    info!("{}: {} tool(s), OK", input.display(), entries.len());

    Ok(())
}

fn run_fmt(input: &Path, output: Option<&Path>, check: bool) -> Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let entries = parse_tool_table(&content)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    if check {
        if content != generate_tool_table_file(&entries) {
            anyhow::bail!("{} is not in canonical form", input.display());
        }
        info!("{} is canonical", input.display());
        return Ok(());
    }

    let target = output.unwrap_or(input);
    write_tool_table_file(target, &entries)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    info!("Formatted: {} ({} tool(s))", target.display(), entries.len());

    Ok(())
}
