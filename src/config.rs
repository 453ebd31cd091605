//! Formatting options and their persistence
//!
//! Defaults live in `~/.config/pretty-csv/config.yaml`; command-line flags
//! are applied on top (see `cli`).

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::csv::{ParseOptions, Separator, DEFAULT_MAX_COLUMNS};
use crate::render::{BorderStyle, LineStyle, TableLayout};

/// Options controlling one import and rendering pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Field separator, `auto` to detect from the first unquoted candidate
    pub separator: Separator,
    /// Treat every byte as one character
    pub force_single_byte: bool,
    /// Draw borders with `+ - |` even when box-drawing glyphs are available
    pub force_ascii_borders: bool,
    pub border_style: BorderStyle,
    /// Use the double-line glyph set for the header rule
    pub double_header: bool,
    /// Optional line printed above the table
    pub title: Option<String>,
    /// Upper limit on fields per row
    pub max_columns: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            separator: Separator::Auto,
            force_single_byte: false,
            force_ascii_borders: false,
            border_style: BorderStyle::default(),
            double_header: false,
            title: None,
            max_columns: DEFAULT_MAX_COLUMNS,
        }
    }
}

impl FormatOptions {
    /// Load options from the user config file, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(options) => {
                tracing::info!("Loaded config from {}", path.display());
                options
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Save options to the user config file
    pub fn save(&self) -> anyhow::Result<()> {
        let path = crate::config_paths::config_file().context("No config directory available")?;
        self.save_to(&path)
    }

    /// Save to `path`, creating its parent directory if needed.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            separator: self.separator,
            single_byte: self.force_single_byte,
            max_columns: self.max_columns,
        }
    }

    pub fn line_style(&self) -> LineStyle {
        if self.force_ascii_borders || self.force_single_byte {
            LineStyle::Ascii
        } else {
            LineStyle::Unicode
        }
    }

    pub fn layout(&self) -> TableLayout {
        TableLayout::new(self.border_style, self.line_style(), self.double_header)
    }
}
