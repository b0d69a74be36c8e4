//! Terminal output.
//!
//! The version string is the only thing written to stdout so build scripts
//! can capture it; everything else goes to stderr.

use console::style;

use crate::warning::VersionWarning;

/// Print the version string on stdout, undecorated.
pub fn display_version(version: &str) {
    println!("{}", version);
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Display a version warning to the user.
pub fn display_warning(warning: &VersionWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

pub fn display_warnings(warnings: &[VersionWarning]) {
    for warning in warnings {
        display_warning(warning);
    }
}
