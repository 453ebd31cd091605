//! Command-line argument parsing
//!
//! Flags override the values loaded from the config file.

use clap::Parser;
use std::path::PathBuf;

use crate::config::FormatOptions;
use crate::csv::Separator;
use crate::render::BorderStyle;

/// Format CSV data as a bordered text table
#[derive(Parser, Debug, Default)]
#[command(
    name = "pretty-csv",
    version,
    about = "Format CSV data as a bordered text table"
)]
pub struct CliArgs {
    /// File to read, standard input when omitted
    #[arg(value_name = "FILE")]
    pub path: Option<PathBuf>,

    /// Field separator: auto, tab, or one character
    #[arg(short = 's', long, value_name = "SEP")]
    pub separator: Option<Separator>,

    /// Treat input as a single-byte encoding
    #[arg(long = "force8bit", alias = "single-byte")]
    pub single_byte: bool,

    /// Draw borders with ASCII characters
    #[arg(long)]
    pub ascii: bool,

    /// Border style: none, single-rule or double-rule
    #[arg(short = 'b', long, value_name = "STYLE")]
    pub border: Option<BorderStyle>,

    /// Use double lines for the header rule
    #[arg(long)]
    pub double_header: bool,

    /// Line printed above the table
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// Print table metadata as JSON to stderr
    #[arg(long)]
    pub metadata: bool,
}

impl CliArgs {
    /// Overlay the given flags on `options`
    pub fn apply_to(&self, options: &mut FormatOptions) {
        if let Some(separator) = self.separator {
            options.separator = separator;
        } else if let Some(ext) = self.path.as_ref().and_then(|p| p.extension()) {
            let guessed = Separator::from_extension(&ext.to_string_lossy());
            if guessed != Separator::Auto {
                options.separator = guessed;
            }
        }

        if let Some(border) = self.border {
            options.border_style = border;
        }
        if let Some(title) = &self.title {
            options.title = Some(title.clone());
        }

        options.force_single_byte |= self.single_byte;
        options.force_ascii_borders |= self.ascii;
        options.double_header |= self.double_header;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_args_keep_options() {
        let args = CliArgs::default();
        let mut options = FormatOptions::default();
        args.apply_to(&mut options);
        assert_eq!(options, FormatOptions::default());
    }

    #[test]
    fn test_extension_picks_separator() {
        let args = CliArgs {
            path: Some(PathBuf::from("data.tsv")),
            ..Default::default()
        };
        let mut options = FormatOptions::default();
        args.apply_to(&mut options);
        assert_eq!(options.separator, Separator::Byte(b'\t'));
    }

    #[test]
    fn test_unknown_extension_keeps_configured_separator() {
        let args = CliArgs {
            path: Some(PathBuf::from("data.txt")),
            ..Default::default()
        };
        let mut options = FormatOptions {
            separator: Separator::Byte(b';'),
            ..Default::default()
        };
        args.apply_to(&mut options);
        assert_eq!(options.separator, Separator::Byte(b';'));
    }

    #[test]
    fn test_explicit_separator_wins_over_extension() {
        let args = CliArgs {
            path: Some(PathBuf::from("data.tsv")),
            separator: Some(Separator::Byte(b'|')),
            ..Default::default()
        };
        let mut options = FormatOptions::default();
        args.apply_to(&mut options);
        assert_eq!(options.separator, Separator::Byte(b'|'));
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "pretty-csv",
            "-s",
            "tab",
            "--border",
            "double-rule",
            "--force8bit",
            "--title",
            "report",
            "in.csv",
        ])
        .unwrap();

        assert_eq!(args.separator, Some(Separator::Byte(b'\t')));
        assert_eq!(args.border, Some(BorderStyle::DoubleRule));
        assert!(args.single_byte);
        assert_eq!(args.title.as_deref(), Some("report"));
        assert_eq!(args.path, Some(PathBuf::from("in.csv")));
    }

    #[test]
    fn test_flags_set_options() {
        let args = CliArgs {
            ascii: true,
            double_header: true,
            border: Some(BorderStyle::None),
            ..Default::default()
        };
        let mut options = FormatOptions::default();
        args.apply_to(&mut options);
        assert!(options.force_ascii_borders);
        assert!(options.double_header);
        assert_eq!(options.border_style, BorderStyle::None);
    }
}
