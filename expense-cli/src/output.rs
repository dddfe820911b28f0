//! Output formatting utilities

use chrono::NaiveDate;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, CellAlignment, ContentArrangement, Table};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Right-align the given column (amounts)
pub fn align_right(table: &mut Table, column: usize) {
    if let Some(col) = table.column_mut(column) {
        col.set_cell_alignment(CellAlignment::Right);
    }
}

/// Format a whole-unit amount as currency, e.g. `$46,000` or `-$50`
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Daily limit, or `N/A` when the account has none
pub fn format_limit(limit: Option<i64>) -> String {
    limit.map(format_amount).unwrap_or_else(|| "N/A".to_string())
}

/// Medium date style, e.g. `Apr 16, 2022`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
