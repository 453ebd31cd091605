//! Benchmarks for CSV import and table rendering
//!
//! Run with: cargo bench format

use pretty_csv::csv::{parse_csv, ParseOptions, TableProfile};
use pretty_csv::{format_rows, read_and_format, BorderStyle, FormatOptions};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn sample_csv(rows: usize) -> String {
    let mut out = String::from("id;name;price;note\n");
    for i in 0..rows {
        let note = if i % 10 == 0 {
            "\"two\nlines\""
        } else {
            "plain"
        };
        out.push_str(&format!("{};item {};{}.{:02};{}\n", i, i * 7, i * 3, i % 100, note));
    }
    out
}

// ============================================================================
// Import
// ============================================================================

#[divan::bench(args = [100, 1_000, 10_000])]
fn parse(bencher: divan::Bencher, rows: usize) {
    let input = sample_csv(rows);
    let options = ParseOptions::default();

    bencher.bench(|| parse_csv(divan::black_box(input.as_bytes()), &options));
}

// ============================================================================
// Rendering
// ============================================================================

#[divan::bench(args = [BorderStyle::None, BorderStyle::SingleRule, BorderStyle::DoubleRule])]
fn render(bencher: divan::Bencher, border: BorderStyle) {
    let input = sample_csv(1_000);
    let parsed = match parse_csv(input.as_bytes(), &ParseOptions::default()) {
        Ok(parsed) => parsed,
        Err(e) => panic!("sample input must parse: {}", e),
    };
    let profile = TableProfile::build(&parsed.rows, &parsed.stats);
    let options = FormatOptions {
        border_style: border,
        ..Default::default()
    };

    bencher.bench(|| format_rows(&parsed.rows, &profile, &options));
}

#[divan::bench(args = [1_000, 10_000])]
fn end_to_end(bencher: divan::Bencher, rows: usize) {
    let input = sample_csv(rows);
    let options = FormatOptions::default();

    bencher.bench(|| read_and_format(divan::black_box(input.as_bytes()), &options));
}
