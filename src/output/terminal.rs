// Colored terminal output for analyses and the stored-check listing.
//
// main.rs display code delegates here so formatting stays in one place.

use colored::Colorize;

use crate::db::models::{CheckRecord, RiskLevel, ScoreResult};
use crate::scoring::link::{LinkAnalysis, LinkRisk};
use crate::scoring::message::AWARENESS_TIPS;

/// Display a message analysis with reasons and the awareness tips.
pub fn display_message_analysis(message: &str, result: &ScoreResult) {
    println!("\n{}", "=== Message Analysis ===".bold());
    println!("  Message: {}", super::truncate_chars(message, 120).dimmed());
    println!(
        "  Risk level: {}",
        colorize_risk(result.risk_level.as_str())
    );
    println!("  Score: {}", result.score);

    if result.reasons.is_empty() {
        println!("\n  No warning signs found.");
    } else {
        println!("\n  Reasons:");
        for reason in &result.reasons {
            println!("    - {reason}");
        }
    }

    println!("\n  {}", "Stay safe:".bold());
    for tip in AWARENESS_TIPS {
        println!("    * {}", tip.dimmed());
    }
    println!();
}

/// Display a link verdict.
pub fn display_link_analysis(url: &str, analysis: &LinkAnalysis) {
    println!("\n{}", "=== Link Analysis ===".bold());
    println!("  URL: {}", url.dimmed());
    let verdict = match analysis.risk_level {
        LinkRisk::Scam => analysis.risk_level.as_str().red().bold(),
        LinkRisk::Suspicious => analysis.risk_level.as_str().yellow(),
        LinkRisk::Safe => analysis.risk_level.as_str().green(),
    };
    println!("  Verdict: {verdict}");
    println!("  Scam score: {}/100", analysis.scam_score);

    if !analysis.detected_threats.is_empty() {
        println!("\n  Threats:");
        for threat in &analysis.detected_threats {
            println!("    - {threat}");
        }
    }
    if !analysis.detected_keywords.is_empty() {
        println!(
            "\n  Keywords: {}",
            analysis.detected_keywords.join(", ").dimmed()
        );
    }

    println!("\n  Advice:");
    for advice in &analysis.safety_advice {
        println!("    * {advice}");
    }
    println!();
}

/// Display stored checks as a table, most recent first.
pub fn display_check_list(checks: &[CheckRecord], total: i64) {
    if checks.is_empty() {
        println!("No stored checks match. Run `scamguard serve` and send some messages first.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Stored Checks ({} of {}) ===", checks.len(), total).bold()
    );
    println!();

    println!(
        "  {:>6}  {:<12} {:>5}  {:<19}  {}",
        "ID".dimmed(),
        "Risk".dimmed(),
        "Score".dimmed(),
        "Created".dimmed(),
        "Message".dimmed(),
    );
    println!("  {}", "-".repeat(90).dimmed());

    for check in checks {
        let preview = super::truncate_chars(&super::single_line(&check.message), 40);
        // Pad before coloring: ANSI codes would throw off the column width.
        let risk = format!("{:<12}", check.risk_level);
        println!(
            "  {:>6}  {} {:>5}  {:<19}  {}",
            check.id,
            colorize_risk(&risk),
            check.score,
            check.created_at,
            preview,
        );
    }
    println!();
}

/// Display per-level counts, e.g. from `Database::risk_level_counts`.
pub fn display_risk_counts(counts: &[(String, i64)]) {
    for level in RiskLevel::all() {
        let count = counts
            .iter()
            .find(|(name, _)| name == level.as_str())
            .map(|(_, n)| *n)
            .unwrap_or(0);
        println!("  {:<12} {}", colorize_risk(level.as_str()), count);
    }
}

/// Colorize a risk level string. Surrounding padding is preserved.
fn colorize_risk(level: &str) -> colored::ColoredString {
    match RiskLevel::parse(level) {
        Some(RiskLevel::HighRisk) => level.red().bold(),
        Some(RiskLevel::MediumRisk) => level.yellow(),
        Some(RiskLevel::Safe) => level.green(),
        None => level.dimmed(),
    }
}
