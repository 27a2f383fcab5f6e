//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::PasswordEntry;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a menu: a bold title followed by numbered options.
pub fn menu(title: &str, options: &[&str]) {
    println!();
    println!("{}", style(format!("=== {title} ===")).bold());
    for (i, option) in options.iter().enumerate() {
        println!("{}. {option}", i + 1);
    }
}

/// Print decrypted passwords as a table (Website, Password).
pub fn print_passwords_table(entries: &[PasswordEntry]) {
    if entries.is_empty() {
        info("No data found.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Website", "Password"]);

    for entry in entries {
        table.add_row(vec![entry.website.as_str(), entry.password.as_str()]);
    }

    println!("{table}");
}
