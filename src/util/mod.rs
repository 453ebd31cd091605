//! Utility modules

pub mod text;

pub use text::{display_width, measure_field, utf8_char_len, FieldMeasure};
