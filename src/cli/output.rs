//! Colored terminal output helpers.
//!
//! Status output goes through these functions so we get consistent
//! styling across every command.  Entry values are printed plain by the
//! commands themselves so they stay scriptable.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::mapping::{value_kind, VaultMapping};

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

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a dim status line on stderr, keeping stdout free for a child
/// process.
pub fn status(msg: &str) {
    eprintln!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of entry names and value kinds (no values).
pub fn print_entries_table(entries: &VaultMapping) {
    if entries.is_empty() {
        info("No variables in this vault yet.");
        tip("Run `mums <VAULT> store <NAME> <VALUE>` to add the first one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Kind"]);

    for (name, value) in entries {
        table.add_row(vec![name.clone(), value_kind(value).to_string()]);
    }

    println!("{table}");
}
