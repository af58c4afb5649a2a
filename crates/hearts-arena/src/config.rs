use hearts_players::StrategyKind;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const SEAT_COUNT: usize = 4;
const NAME_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Arena configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ArenaConfig {
    pub run_id: String,
    pub deals: DealConfig,
    pub seats: Vec<SeatConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ArenaConfig {
    /// Load and validate configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: ArenaConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_name("run_id", &self.run_id)?;
        self.deals.validate()?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        validate_seats(&self.seats)?;
        Ok(())
    }

    /// Resolve `{run_id}` placeholders into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        let jsonl = resolve_template(&self.run_id, &self.outputs.jsonl);
        let telemetry = match &self.outputs.telemetry {
            Some(template) => resolve_template(&self.run_id, template),
            None => jsonl
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
                .join("telemetry.jsonl"),
        };
        ResolvedOutputs { jsonl, telemetry }
    }
}

/// Deal generation block.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DealConfig {
    pub seed: Option<u64>,
    pub hands: usize,
    #[serde(default = "default_rotate_passing")]
    pub rotate_passing: bool,
}

impl DealConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.hands == 0 {
            return Err(ValidationError::InvalidField {
                field: "deals.hands".to_string(),
                message: "number of hands must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn default_rotate_passing() -> bool {
    true
}

/// One chair at the table, filled North, East, South, West in listing order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SeatConfig {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub narrate: bool,
}

impl SeatConfig {
    pub fn strategy_kind(&self) -> Result<StrategyKind, hearts_players::UnknownStrategy> {
        self.kind.parse()
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    /// Structured log destination; defaults to `telemetry.jsonl` beside the rows.
    #[serde(default)]
    pub telemetry: Option<String>,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        let telemetry = self.telemetry.as_ref().map(|value| ("outputs.telemetry", value));
        for (label, value) in std::iter::once(("outputs.jsonl", &self.jsonl)).chain(telemetry) {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.file_name().is_none() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path does not name a file".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging defaults to human-readable output on stderr.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_name(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: field.to_string(),
            message: format!("{field} must not be empty"),
        });
    }

    if !value.chars().all(|c| NAME_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: field.to_string(),
            message: format!("{field} may only contain alphanumeric characters, '.', '_' or '-'"),
        });
    }

    Ok(())
}

fn validate_seats(seats: &[SeatConfig]) -> Result<(), ValidationError> {
    if seats.len() != SEAT_COUNT {
        return Err(ValidationError::InvalidField {
            field: "seats".to_string(),
            message: format!("exactly {SEAT_COUNT} seats are required, found {}", seats.len()),
        });
    }

    let mut seen = HashSet::new();
    for (idx, seat) in seats.iter().enumerate() {
        validate_name(&format!("seats[{idx}].name"), &seat.name)?;

        if !seen.insert(seat.name.as_str()) {
            return Err(ValidationError::InvalidField {
                field: "seats".to_string(),
                message: format!("seat name '{}' defined more than once", seat.name),
            });
        }

        if let Err(err) = seat.strategy_kind() {
            return Err(ValidationError::InvalidField {
                field: format!("seats[{idx}].kind"),
                message: err.to_string(),
            });
        }
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub telemetry: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with the offending field.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
