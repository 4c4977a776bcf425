//! Report formatting and JSON output.
//!
//! Formatting is stateless: color is an explicit flag on [`format_report`],
//! not process-wide state, so callers (and tests) decide per invocation.

use std::fmt::Write as _;
use std::io;
use std::path::Path;

use colored::Colorize;

use crate::error_handling::ScanError;
use crate::models::ScanResult;

/// Renders the human-readable scan report.
///
/// # Arguments
///
/// * `result` - The completed scan
/// * `color` - Whether to apply ANSI colors (the CLI passes `!--no-color`)
pub fn format_report(result: &ScanResult, color: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", heading("═══ DNS RECON REPORT ═══", color));
    let _ = writeln!(out, "Target domain: {}", emphasis(&result.domain, color));
    let _ = writeln!(
        out,
        "Scan date: {}",
        result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(
        out,
        "Subdomains found: {}",
        emphasis(&result.subdomains.len().to_string(), color)
    );

    let _ = writeln!(out, "\n{}", heading("DNS RECORDS", color));
    let mut any_records = false;
    for (kind, values) in result.dns_records.entries() {
        if values.is_empty() {
            continue;
        }
        any_records = true;
        let _ = writeln!(out, "{} records:", kind.as_str());
        for value in values {
            let _ = writeln!(out, "  • {value}");
        }
    }
    if !any_records {
        let _ = writeln!(out, "  (none)");
    }

    let _ = writeln!(out, "\n{}", heading("ZONE TRANSFER", color));
    if result.zone_transfer.is_empty() {
        let _ = writeln!(out, "  Not permitted by any nameserver");
    } else {
        let _ = writeln!(
            out,
            "{}",
            alert(
                &format!(
                    "  ⚠ Zone transfer allowed ({} names exposed):",
                    result.zone_transfer.len()
                ),
                color
            )
        );
        for name in &result.zone_transfer {
            let _ = writeln!(out, "  • {name}");
        }
    }

    if !result.subdomains.is_empty() {
        let _ = writeln!(out, "\n{}", heading("SUBDOMAINS FOUND", color));
        for sub in &result.subdomains {
            let _ = writeln!(
                out,
                "  • {} -> {}",
                found(&sub.subdomain, color),
                sub.ips.join(", ")
            );
        }
    }

    let stats = &result.statistics;
    let _ = writeln!(out, "\n{}", heading("STATISTICS", color));
    let _ = writeln!(out, "Total queries: {}", stats.total_queries);
    let _ = writeln!(out, "Successful: {}", stats.successful);
    let _ = writeln!(out, "Failed: {}", stats.failed);
    let _ = writeln!(
        out,
        "Scan duration: {:.2} seconds",
        stats.duration_seconds()
    );

    out
}

/// Writes the scan result to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`ScanError::OutputWriteFailed`] if serialization or the file
/// write fails. The computed result is untouched either way.
pub fn write_json(path: &Path, result: &ScanResult) -> Result<(), ScanError> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, json)?;
    Ok(())
}

fn heading(text: &str, color: bool) -> String {
    if color {
        text.cyan().bold().to_string()
    } else {
        text.to_string()
    }
}

fn emphasis(text: &str, color: bool) -> String {
    if color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

fn found(text: &str, color: bool) -> String {
    if color {
        text.green().to_string()
    } else {
        text.to_string()
    }
}

fn alert(text: &str, color: bool) -> String {
    if color {
        text.yellow().to_string()
    } else {
        text.to_string()
    }
}
