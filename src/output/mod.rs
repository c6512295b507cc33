// Output formatting: terminal display of verdicts, plus the wording and
// exit codes the CLI and the web page share.

use crate::safebrowsing::traits::{CheckError, CheckResult};

pub mod terminal;

/// Exit code of `securelink check` for a safe URL.
pub const EXIT_SAFE: i32 = 0;
/// Exit code when the URL was invalid or the check could not complete.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code when the URL matched at least one threat list.
pub const EXIT_UNSAFE: i32 = 2;

/// Map the outcome of a CLI check to the process exit code.
pub fn exit_code(outcome: &Result<CheckResult, CheckError>) -> i32 {
    match outcome {
        Ok(result) if result.safe() => EXIT_SAFE,
        Ok(_) => EXIT_UNSAFE,
        Err(_) => EXIT_FAILURE,
    }
}

/// Human-readable label for a Safe Browsing threat type.
pub fn threat_label(threat_type: &str) -> &str {
    match threat_type {
        "MALWARE" => "Malware",
        "SOCIAL_ENGINEERING" => "Social engineering (phishing)",
        "UNWANTED_SOFTWARE" => "Unwanted software",
        "POTENTIALLY_HARMFUL_APPLICATION" => "Potentially harmful application",
        other => other,
    }
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
