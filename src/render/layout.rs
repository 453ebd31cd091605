//! Table layout configuration and line-drawing glyphs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How much box decoration surrounds the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    /// Fields separated by one space, only the header rule is drawn
    None,
    /// Vertical rules between fields and a header rule, no outer frame
    #[default]
    SingleRule,
    /// Full frame with corners at top and bottom
    DoubleRule,
}

impl BorderStyle {
    pub fn is_framed(self) -> bool {
        self == BorderStyle::DoubleRule
    }
}

impl FromStr for BorderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" | "0" => Ok(BorderStyle::None),
            "single-rule" | "single" | "1" => Ok(BorderStyle::SingleRule),
            "double-rule" | "double" | "2" => Ok(BorderStyle::DoubleRule),
            _ => Err(format!(
                "invalid border style '{}': expected none, single-rule or double-rule",
                s
            )),
        }
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BorderStyle::None => "none",
            BorderStyle::SingleRule => "single-rule",
            BorderStyle::DoubleRule => "double-rule",
        };
        f.write_str(name)
    }
}

/// Glyph set used for rules and separators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// `+`, `-`, `|`
    Ascii,
    /// Box-drawing characters
    #[default]
    Unicode,
}

/// Where a horizontal rule is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulePosition {
    Top,
    Header,
    Bottom,
}

/// Glyphs of one horizontal rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleGlyphs {
    pub left: &'static str,
    pub middle: &'static str,
    pub right: &'static str,
    pub horizontal: &'static str,
}

/// Read-only snapshot of decoration settings for one rendering pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableLayout {
    pub border: BorderStyle,
    pub line_style: LineStyle,
    pub double_header: bool,
}

impl TableLayout {
    pub fn new(border: BorderStyle, line_style: LineStyle, double_header: bool) -> Self {
        Self {
            border,
            line_style,
            double_header,
        }
    }

    /// Whether a rule is drawn at `position` at all
    pub fn draws_rule(&self, position: RulePosition) -> bool {
        position == RulePosition::Header || self.border.is_framed()
    }

    pub fn rule_glyphs(&self, position: RulePosition) -> RuleGlyphs {
        let glyphs = |left, middle, right, horizontal| RuleGlyphs {
            left,
            middle,
            right,
            horizontal,
        };

        match (self.line_style, position) {
            (LineStyle::Ascii, RulePosition::Header) if self.double_header => {
                glyphs(":", ":", ":", "=")
            }
            (LineStyle::Ascii, _) => glyphs("+", "+", "+", "-"),
            (LineStyle::Unicode, RulePosition::Header) if self.double_header => {
                glyphs("╞", "╪", "╡", "═")
            }
            (LineStyle::Unicode, RulePosition::Header) => glyphs("├", "┼", "┤", "─"),
            (LineStyle::Unicode, RulePosition::Top) => glyphs("┌", "┬", "┐", "─"),
            (LineStyle::Unicode, RulePosition::Bottom) => glyphs("└", "┴", "┘", "─"),
        }
    }

    /// Vertical rule between fields and at the frame edges
    pub fn vertical(&self) -> &'static str {
        match self.line_style {
            LineStyle::Ascii => "|",
            LineStyle::Unicode => "│",
        }
    }

    /// Marker ending a cell whose text continues on the next physical line
    pub fn continuation(&self) -> &'static str {
        match self.line_style {
            LineStyle::Ascii => "+",
            LineStyle::Unicode => "↵",
        }
    }
}
