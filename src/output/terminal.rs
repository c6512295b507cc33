// Colored terminal output for the `check` command.
//
// main.rs delegates here so the CLI and the web page describe a verdict
// with the same wording.

use colored::Colorize;

use super::threat_label;
use crate::safebrowsing::traits::CheckResult;

/// Longest URL shown in full before it gets truncated.
const URL_DISPLAY_CHARS: usize = 100;

/// Display the verdict for a single URL.
pub fn display_verdict(url: &str, result: &CheckResult) {
    let shown = super::truncate_chars(url, URL_DISPLAY_CHARS);
    println!("\n{}", format!("=== {shown} ===").bold());

    if result.safe() {
        println!("  {} No known threats found", "SAFE".green().bold());
        return;
    }

    println!(
        "  {} {} threat type(s) reported",
        "UNSAFE".red().bold(),
        result.threats().len()
    );
    for threat in result.threats() {
        println!("    {} {}", "!".bright_red(), threat_label(threat));
    }
}
