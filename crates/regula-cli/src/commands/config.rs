//! Config command implementation.
//!
//! Manages persisted CLI defaults. Values are stored as strings in a JSON
//! file and validated on `set`; [`Settings::load`] turns them into typed
//! defaults for the other commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;

use regula_math::{Rounding, SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_PRECISION};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_header, print_info, print_success, print_warning, KeyValue};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "REGULA_CONFIG";

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    #[arg(allow_negative_numbers = true)]
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Default output format
    DefaultFormat,
    /// Default precision threshold
    Precision,
    /// Default rounding digits
    Rounding,
    /// Default iteration cap
    MaxIterations,
    /// Delay between revealed rows
    RevealDelayMs,
    /// Whether to use colors
    UseColors,
}

impl ConfigKey {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default_format" | "format" => Some(Self::DefaultFormat),
            "precision" => Some(Self::Precision),
            "rounding" | "round" | "roundoff" => Some(Self::Rounding),
            "max_iterations" | "iterations" => Some(Self::MaxIterations),
            "reveal_delay_ms" | "reveal" => Some(Self::RevealDelayMs),
            "use_colors" | "colors" => Some(Self::UseColors),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::DefaultFormat => "default_format",
            Self::Precision => "precision",
            Self::Rounding => "rounding",
            Self::MaxIterations => "max_iterations",
            Self::RevealDelayMs => "reveal_delay_ms",
            Self::UseColors => "use_colors",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::Precision => "Stop once the successive error falls below this (> 0)",
            Self::Rounding => "Decimal digits for every recorded value (0-6, none)",
            Self::MaxIterations => "Hard cap on trace rows (>= 1)",
            Self::RevealDelayMs => "Delay between rows when revealing a table (0 = off)",
            Self::UseColors => "Enable colored output (true, false)",
        }
    }

    fn default_value(self) -> String {
        match self {
            Self::DefaultFormat => "table".to_string(),
            Self::Precision => DEFAULT_PRECISION.to_string(),
            Self::Rounding => Rounding::default().to_string(),
            Self::MaxIterations => DEFAULT_MAX_ITERATIONS.to_string(),
            Self::RevealDelayMs => "0".to_string(),
            Self::UseColors => "true".to_string(),
        }
    }

    fn all() -> &'static [Self] {
        &[
            Self::DefaultFormat,
            Self::Precision,
            Self::Rounding,
            Self::MaxIterations,
            Self::RevealDelayMs,
            Self::UseColors,
        ]
    }
}

/// Simple config storage.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl Config {
    fn load() -> Result<Self> {
        let path = config_path()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|e| {
                CliError::Config(format!("{}: {}", path.display(), e)).into()
            })
        } else {
            Ok(Self::default())
        }
    }

    fn save(&self) -> Result<()> {
        let path = config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    fn get(&self, key: ConfigKey) -> Option<&String> {
        self.values.get(key.as_str())
    }

    fn value(&self, key: ConfigKey) -> String {
        self.get(key).cloned().unwrap_or_else(|| key.default_value())
    }

    fn set(&mut self, key: ConfigKey, value: String) {
        self.values.insert(key.as_str().to_string(), value);
    }

    fn remove(&mut self, key: ConfigKey) {
        self.values.remove(key.as_str());
    }

    fn clear(&mut self) {
        self.values.clear();
    }
}

/// Typed defaults read from the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Output format used when `--format` is absent.
    pub format: OutputFormat,
    /// Solver defaults used when the matching flags are absent.
    pub solver: SolverConfig,
    /// Delay between revealed rows, in milliseconds.
    pub reveal_delay_ms: u64,
    /// Whether colored output is enabled.
    pub use_colors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            solver: SolverConfig::default(),
            reveal_delay_ms: 0,
            use_colors: true,
        }
    }
}

impl Settings {
    /// Loads settings, falling back to defaults for missing or invalid values.
    pub fn load() -> Result<Self> {
        Ok(Self::from_config(&Config::load()?))
    }

    fn from_config(config: &Config) -> Self {
        let mut settings = Self::default();
        for &key in ConfigKey::all() {
            let Some(raw) = config.get(key) else {
                continue;
            };
            if let Err(e) = settings.apply(key, raw) {
                tracing::warn!("ignoring {} = {:?}: {}", key.as_str(), raw, e);
            }
        }
        settings
    }

    /// Parses `value` for `key` and stores it.
    fn apply(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::DefaultFormat => {
                self.format = match value.to_lowercase().as_str() {
                    "table" => OutputFormat::Table,
                    "json" => OutputFormat::Json,
                    "csv" => OutputFormat::Csv,
                    "minimal" => OutputFormat::Minimal,
                    _ => {
                        return Err(anyhow::anyhow!(
                            "Invalid format: {}. Use table, json, csv, or minimal.",
                            value
                        ))
                    }
                };
            }
            ConfigKey::Precision => {
                let precision: f64 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid precision: {}. Must be a number.", value))?;
                self.solver.with_precision(precision).validate()?;
                self.solver.precision = precision;
            }
            ConfigKey::Rounding => {
                self.solver.rounding = value.parse::<Rounding>()?;
            }
            ConfigKey::MaxIterations => {
                let cap: u32 = value.parse().map_err(|_| {
                    anyhow::anyhow!("Invalid iteration cap: {}. Must be a whole number.", value)
                })?;
                self.solver.with_max_iterations(cap).validate()?;
                self.solver.max_iterations = cap;
            }
            ConfigKey::RevealDelayMs => {
                self.reveal_delay_ms = value.parse().map_err(|_| {
                    anyhow::anyhow!("Invalid delay: {}. Must be milliseconds (>= 0).", value)
                })?;
            }
            ConfigKey::UseColors => {
                self.use_colors = match value.to_lowercase().as_str() {
                    "true" | "1" | "yes" => true,
                    "false" | "0" | "no" => false,
                    _ => {
                        return Err(anyhow::anyhow!(
                            "Invalid boolean: {}. Use true or false.",
                            value
                        ))
                    }
                };
            }
        }
        Ok(())
    }
}

/// Get the config file path.
fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(home.join("regula").join("config.json"))
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(format),
        ConfigCommand::Get(get_args) => execute_get(&get_args, format),
        ConfigCommand::Set(set_args) => execute_set(set_args),
        ConfigCommand::List => execute_list(format),
        ConfigCommand::Reset(reset_args) => execute_reset(reset_args),
        ConfigCommand::Path => execute_path(),
    }
}

fn parse_key(key: &str) -> Result<ConfigKey> {
    ConfigKey::parse(key).ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))
}

/// Show current configuration.
fn execute_show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    let results: Vec<KeyValue> = ConfigKey::all()
        .iter()
        .map(|&key| KeyValue::new(key.as_str(), config.value(key)))
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Current Configuration");
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: BTreeMap<&str, String> = ConfigKey::all()
                .iter()
                .map(|&key| (key.as_str(), config.value(key)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Minimal => {
            for &key in ConfigKey::all() {
                println!("{}={}", key.as_str(), config.value(key));
            }
        }
    }

    Ok(())
}

/// Get a configuration value.
fn execute_get(args: &GetArgs, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let key = parse_key(&args.key)?;
    let value = config.value(key);

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            println!("{}: {}", key.as_str(), value);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            println!("{}", value);
        }
    }

    Ok(())
}

/// Set a configuration value.
fn execute_set(args: SetArgs) -> Result<()> {
    let key = parse_key(&args.key)?;

    // Validate value
    Settings::default().apply(key, &args.value)?;

    let mut config = Config::load()?;
    config.set(key, args.value.clone());
    config.save()?;

    print_success(&format!("Set {} = {}", key.as_str(), args.value));
    Ok(())
}

/// List available configuration keys.
fn execute_list(format: OutputFormat) -> Result<()> {
    let results: Vec<KeyValue> = ConfigKey::all()
        .iter()
        .map(|&key| {
            KeyValue::new(
                key.as_str(),
                format!("{} (default: {})", key.description(), key.default_value()),
            )
        })
        .collect();

    match format {
        OutputFormat::Table => {
            print_header("Available Configuration Keys");
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = ConfigKey::all()
                .iter()
                .map(|&key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": key.default_value()
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["key", "description", "default"])?;
            for &key in ConfigKey::all() {
                let default = key.default_value();
                wtr.write_record([key.as_str(), key.description(), default.as_str()])?;
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}", key.as_str());
            }
        }
    }

    Ok(())
}

/// Reset configuration.
fn execute_reset(args: ResetArgs) -> Result<()> {
    let mut config = Config::load()?;

    if args.all {
        config.clear();
        config.save()?;
        print_success("Reset all configuration to defaults");
    } else if let Some(key_str) = args.key {
        let key = parse_key(&key_str)?;
        config.remove(key);
        config.save()?;
        print_success(&format!(
            "Reset {} to default ({})",
            key.as_str(),
            key.default_value()
        ));
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path() -> Result<()> {
    let path = config_path()?;
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}
