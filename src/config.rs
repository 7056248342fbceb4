//! Configuration constants and settings for the converter.

use crate::error::{Result, SyncError};
use crate::parser::IniDocument;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Character that starts a comment in tool table lines.
pub const COMMENT_PREFIX: char = ';';

/// Fractional digits written for real-valued fields.
pub const DECIMAL_PLACES: usize = 6;

/// Conversion factor: inch to mm.
pub const CONV_MM_INCH: f64 = 25.4;

/// Value of `metadata.source` for presets created from a tool table.
pub const PRESET_SOURCE: &str = "linuxcnc";

/// INI section holding the Smooth connection settings.
pub const SMOOTH_SECTION: &str = "SMOOTH";

/// INI section/key locating the tool table file.
pub const EMCIO_SECTION: &str = "EMCIO";
pub const TOOL_TABLE_KEY: &str = "TOOL_TABLE";

/// Unit of measurement for preset values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    #[default]
    Millimeters,
    Inches,
}

impl Unit {
    /// Parse a unit label. Anything that is not an inch label is millimetres.
    pub fn from_label(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "in" | "inch" | "inches" => Unit::Inches,
            _ => Unit::Millimeters,
        }
    }

    /// Get the conversion factor to convert from this unit to millimeters.
    pub fn to_mm_factor(&self) -> f64 {
        match self {
            Unit::Millimeters => 1.0,
            Unit::Inches => CONV_MM_INCH,
        }
    }

    /// Convert a value in this unit to millimeters.
    pub fn to_mm(&self, value: f64) -> f64 {
        value * self.to_mm_factor()
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Millimeters => write!(f, "mm"),
            Unit::Inches => write!(f, "in"),
        }
    }
}

impl From<String> for Unit {
    fn from(s: String) -> Self {
        Unit::from_label(&s)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.to_string()
    }
}

/// Smooth connection settings read from a LinuxCNC INI file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmoothConfig {
    /// All `[SMOOTH]` entries, keys lowercased.
    values: IndexMap<String, String>,
    /// `[EMCIO] TOOL_TABLE`, resolved against the INI directory.
    tool_table: Option<PathBuf>,
}

impl SmoothConfig {
    /// Read the `[SMOOTH]` section of an INI file.
    pub fn from_ini_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SyncError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_ini_str(&content, base_dir)
    }

    /// Read the `[SMOOTH]` section from INI text. Relative tool table paths
    /// are resolved against `base_dir`.
    pub fn from_ini_str(content: &str, base_dir: &Path) -> Result<Self> {
        let ini = IniDocument::parse(content);

        let values = ini
            .section(SMOOTH_SECTION)
            .ok_or_else(|| SyncError::MissingSection {
                section: SMOOTH_SECTION.to_string(),
            })?
            .clone();

        let tool_table = ini
            .get(EMCIO_SECTION, TOOL_TABLE_KEY)
            .filter(|v| !v.is_empty())
            .map(|v| base_dir.join(v));

        tracing::debug!(keys = values.len(), "Loaded [{}] settings", SMOOTH_SECTION);

        Ok(Self { values, tool_table })
    }

    /// Look up a `[SMOOTH]` key (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Smooth API base URL.
    pub fn url(&self) -> Option<&str> {
        self.get("URL")
    }

    /// API token.
    pub fn token(&self) -> Option<&str> {
        self.get("TOKEN")
    }

    /// Machine identifier used for imported presets.
    pub fn machine_id(&self) -> Option<&str> {
        self.get("MACHINE_ID")
    }

    /// Path of the controller's tool table, if the INI names one.
    pub fn tool_table(&self) -> Option<&Path> {
        self.tool_table.as_deref()
    }

    /// Number of `[SMOOTH]` entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
