use anyhow::{bail, Result};
use clap::{ArgAction, Parser};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use dns_import::args::{FormatArg, InputFormat, RenderFormat};
use dns_import::config::{load_config_file, ImportConfig};
use dns_import::output::json::generate_json;
use dns_import::output::table::write_table;
use dns_import::ImportPipeline;

#[derive(Parser)]
#[command(name = "dns-import", version)]
#[command(about = "Parse pasted DNS records (JSON, CSV or BIND zone text) into an import payload")]
struct Cli {
    /// Input file (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Input format
    #[arg(short, long, value_enum, default_value = "auto")]
    format: FormatArg,

    /// How to render the parsed records
    #[arg(short, long, value_enum, default_value = "json")]
    render: RenderFormat,

    /// Config file (TOML or YAML)
    #[arg(short, long, value_name = "FILE", env = "DNS_IMPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Config file format (default: from file extension)
    #[arg(long, value_enum, value_name = "FORMAT")]
    config_format: Option<InputFormat>,

    /// Reject input larger than this many bytes
    #[arg(long, value_name = "BYTES")]
    max_bytes: Option<usize>,

    /// Reject input with more than this many lines
    #[arg(long, value_name = "LINES")]
    max_lines: Option<usize>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "DNS_IMPORT_LOG", default_value = "warn")]
    log_level: String,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_filter(&self) -> &str {
        match self.verbose {
            0 => self.log_level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    }

    fn import_config(&self) -> Result<ImportConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_file(path, self.config_format)?,
            None => ImportConfig::default(),
        };
        if let Some(max_bytes) = self.max_bytes {
            if max_bytes == 0 {
                bail!("--max-bytes must be at least 1");
            }
            config.limits.max_bytes = max_bytes;
        }
        if let Some(max_lines) = self.max_lines {
            if max_lines == 0 {
                bail!("--max-lines must be at least 1");
            }
            config.limits.max_lines = max_lines;
        }
        if let Some(format) = self.format.forced() {
            config.format = Some(format);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_new(cli.log_filter())
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.import_config()?;

    let content = match &cli.input {
        Some(file) => fs::read_to_string(file)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let import = ImportPipeline::from_config(&config).run(&content);
    let parsed = match import.result {
        Ok(parsed) => parsed,
        Err(e) => bail!("{}: {}", e.kind, e.message),
    };

    if let Some(format) = import.format {
        eprintln!(
            "detected {format}: {} records, {} skipped",
            parsed.records.len(),
            parsed.skipped
        );
    }

    let output = match cli.render {
        RenderFormat::Json => generate_json(&parsed.records)?,
        RenderFormat::Table => {
            let mut table = String::new();
            write_table(&mut table, &parsed.records)?;
            table
        }
    };

    match cli.output {
        Some(path) => fs::write(path, output)?,
        None => print!("{output}"),
    }
    Ok(())
}
