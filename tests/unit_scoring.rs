// Unit tests for the message scorer and its risk levels.
//
// Checks the additive score formula against an independent count of the
// heuristics, the step thresholds, and the worked examples from the API docs.

use scamguard::db::models::RiskLevel;
use scamguard::scoring::analyze_message;
use scamguard::scoring::message::{
    keyword_reason, AWARENESS_TIPS, LINK_REASON, SCAM_KEYWORDS, SHORT_MESSAGE_REASON,
};

/// Score computed straight from the definition, for comparison.
fn expected_score(text: &str) -> u32 {
    let lower = text.to_lowercase();
    let keywords = SCAM_KEYWORDS.iter().filter(|k| lower.contains(*k)).count() as u32;
    let has_link = ["http://", "https://"].iter().any(|scheme| {
        text.match_indices(scheme).any(|(i, _)| {
            text[i + scheme.len()..]
                .chars()
                .next()
                .is_some_and(|c| !c.is_whitespace())
        })
    });
    let short = text.chars().count() < 15;
    2 * keywords + if has_link { 3 } else { 0 } + u32::from(short)
}

// ============================================================
// RiskLevel::from_score — boundary conditions
// ============================================================

#[test]
fn level_zero_is_safe() {
    assert_eq!(RiskLevel::from_score(0), RiskLevel::Safe);
}

#[test]
fn level_two_is_safe() {
    assert_eq!(RiskLevel::from_score(2), RiskLevel::Safe);
}

#[test]
fn level_three_is_medium() {
    assert_eq!(RiskLevel::from_score(3), RiskLevel::MediumRisk);
}

#[test]
fn level_five_is_medium() {
    assert_eq!(RiskLevel::from_score(5), RiskLevel::MediumRisk);
}

#[test]
fn level_six_is_high() {
    assert_eq!(RiskLevel::from_score(6), RiskLevel::HighRisk);
}

#[test]
fn level_very_large_is_high() {
    assert_eq!(RiskLevel::from_score(u32::MAX), RiskLevel::HighRisk);
}

#[test]
fn level_display_strings() {
    assert_eq!(RiskLevel::Safe.to_string(), "Safe");
    assert_eq!(RiskLevel::MediumRisk.to_string(), "Medium Risk");
    assert_eq!(RiskLevel::HighRisk.to_string(), "High Risk");
}

#[test]
fn level_serializes_in_display_form() {
    let json = serde_json::to_string(&RiskLevel::MediumRisk).unwrap();
    assert_eq!(json, "\"Medium Risk\"");
}

#[test]
fn level_parse_accepts_loose_spellings() {
    assert_eq!(RiskLevel::parse("Medium Risk"), Some(RiskLevel::MediumRisk));
    assert_eq!(RiskLevel::parse("HIGH_RISK"), Some(RiskLevel::HighRisk));
    assert_eq!(RiskLevel::parse("safe"), Some(RiskLevel::Safe));
    assert_eq!(RiskLevel::parse("severe"), None);
}

// ============================================================
// analyze_message — formula and examples
// ============================================================

#[test]
fn score_matches_formula_for_varied_inputs() {
    let inputs = [
        "",
        "hi",
        "exactly 15 char",
        "fourteen chars",
        "URGENT!!! Your bank blocked. Verify account: https://x.example",
        "Limited time offer expires tonight, payment required",
        "free free free FREE",
        "Check https:// this out",
        "please read this: http://\u{a0}later",
        "ideographic https://\u{3000}gap here",
        "line one\nhttp://two\tthree",
        "Gewinnen Sie jetzt! Klicken Sie hier: https://beispiel.de/gratis",
        "短信：点击 http://例子.测试 领取",
        "Click now to WIN a lottery for free, urgent",
    ];
    for input in inputs {
        let result = analyze_message(input);
        assert_eq!(result.score, expected_score(input), "input: {input:?}");
        assert_eq!(result.risk_level, RiskLevel::from_score(result.score));
    }
}

#[test]
fn empty_message_scores_one_and_is_safe() {
    let result = analyze_message("");
    assert_eq!(result.score, 1);
    assert_eq!(result.risk_level, RiskLevel::Safe);
    assert_eq!(result.reasons, vec![SHORT_MESSAGE_REASON]);
}

#[test]
fn free_lottery_link_example() {
    let result = analyze_message("Free lottery! Click http://bit.ly/x");
    assert_eq!(result.score, 7);
    assert_eq!(result.risk_level, RiskLevel::HighRisk);
    assert_eq!(
        result.reasons,
        vec![
            keyword_reason("lottery"),
            keyword_reason("free"),
            LINK_REASON.to_string()
        ]
    );
}

#[test]
fn reasons_follow_keyword_list_order_not_text_order() {
    // "bank blocked" appears first in the text but last in the keyword list.
    let result = analyze_message("bank blocked, this is urgent");
    assert_eq!(
        result.reasons,
        vec![keyword_reason("urgent"), keyword_reason("bank blocked")]
    );
}

#[test]
fn analysis_is_idempotent() {
    let text = "Limited time: click now http://prize.example";
    assert_eq!(analyze_message(text), analyze_message(text));
}

#[test]
fn case_does_not_change_keyword_reasons() {
    let upper = analyze_message("URGENT");
    let lower = analyze_message("urgent");
    assert_eq!(upper.reasons, lower.reasons);
    assert_eq!(upper.score, 3); // keyword 2 + short 1
}

#[test]
fn fifteen_characters_is_not_short() {
    let text = "a".repeat(15);
    assert_eq!(analyze_message(&text).score, 0);
    let text = "a".repeat(14);
    assert_eq!(analyze_message(&text).score, 1);
}

#[test]
fn every_keyword_scores_two() {
    for keyword in SCAM_KEYWORDS {
        let text = format!("padding text to avoid short: {keyword}");
        let result = analyze_message(&text);
        assert!(
            result.reasons.contains(&keyword_reason(keyword)),
            "{keyword} not detected"
        );
    }
}

#[test]
fn very_long_message_is_handled() {
    let text = "lorem ipsum ".repeat(50_000);
    let result = analyze_message(&text);
    assert_eq!(result.score, 0);
    assert_eq!(result.risk_level, RiskLevel::Safe);
}

#[test]
fn awareness_tips_are_fixed() {
    assert_eq!(
        AWARENESS_TIPS,
        [
            "Never click unknown links",
            "Do not share OTP or bank details",
            "Verify sender identity",
            "Avoid urgent payment requests",
        ]
    );
}
