//! Output formatting utilities for the CLI

use tabled::{settings::Style, Table, Tabled};

use wda_agent::CacheDecision;
use wda_core::{AgentEndpoint, BuildMetadata, StatusReport};

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "FIELD")]
    field: &'static str,
    #[tabled(rename = "VALUE")]
    value: String,
}

fn row(field: &'static str, value: Option<&str>) -> FieldRow {
    FieldRow {
        field,
        value: value.unwrap_or("-").to_string(),
    }
}

/// Format the build metadata reported by the agent at `endpoint`
pub fn format_build(endpoint: &AgentEndpoint, build: &BuildMetadata) -> String {
    let rows = vec![
        row("url", Some(endpoint.url().as_str())),
        row("time", build.time.as_deref()),
        row(
            "productBundleIdentifier",
            build.product_bundle_identifier.as_deref(),
        ),
        row("upgradedAt", build.upgraded_at.as_deref()),
    ];
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format the inputs and outcome of a cache validity check
pub fn format_decision(
    endpoint: &AgentEndpoint,
    status: Option<&StatusReport>,
    local_revision: Option<&str>,
    expected_bundle_id: &str,
    decision: &CacheDecision,
) -> String {
    let build = status.map(|s| &s.build);
    let rows = vec![
        row("url", Some(endpoint.url().as_str())),
        row("running", Some(if status.is_some() { "yes" } else { "no" })),
        row(
            "remote bundle id",
            build.and_then(|b| b.product_bundle_identifier.as_deref()),
        ),
        row("expected bundle id", Some(expected_bundle_id)),
        row("remote revision", build.and_then(|b| b.upgraded_at.as_deref())),
        row("local revision", local_revision),
        row("reuse", Some(if decision.reuse { "yes" } else { "no" })),
        row(
            "uninstall",
            Some(if decision.requires_uninstall() { "yes" } else { "no" }),
        ),
    ];

    format!(
        "{}\n{}",
        Table::new(rows).with(Style::rounded()),
        decision.reason
    )
}

/// Print a success message in green with a checkmark prefix
pub fn print_success(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stdout = std::io::stdout();
    let _ = crossterm::execute!(
        stdout,
        SetForegroundColor(Color::Green),
        Print("✓ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print an error message in red to stderr
pub fn print_error(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(
        stderr,
        SetForegroundColor(Color::Red),
        Print("✗ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print a warning message in yellow to stderr
pub fn print_warning(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(
        stderr,
        SetForegroundColor(Color::Yellow),
        Print("⚠ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print an informational message in cyan
pub fn print_info(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stdout = std::io::stdout();
    let _ = crossterm::execute!(
        stdout,
        SetForegroundColor(Color::Cyan),
        Print("ℹ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}
