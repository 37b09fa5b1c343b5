// Message scorer — keyword, link and length heuristics.
//
// Each heuristic contributes independently to the score:
//   +2 per scam keyword found (each keyword counted once)
//   +3 if the message contains any http(s) link (one reason, however many links)
//   +1 if the message is shorter than 15 characters
//
// The risk level is a step function of the total (see RiskLevel::from_score).

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::db::models::{RiskLevel, ScoreResult};

/// Scam keywords, matched as case-insensitive substrings in this order.
pub const SCAM_KEYWORDS: [&str; 10] = [
    "urgent",
    "win",
    "lottery",
    "free",
    "click now",
    "verify account",
    "limited time",
    "payment required",
    "offer expires",
    "bank blocked",
];

pub const KEYWORD_POINTS: u32 = 2;
pub const LINK_POINTS: u32 = 3;
pub const SHORT_MESSAGE_POINTS: u32 = 1;

/// Messages with fewer characters than this are flagged as very short.
pub const SHORT_MESSAGE_CHARS: usize = 15;

pub const LINK_REASON: &str = "Message contains suspicious links";
pub const SHORT_MESSAGE_REASON: &str = "Very short message";

/// Static advice returned alongside every message analysis.
pub const AWARENESS_TIPS: [&str; 4] = [
    "Never click unknown links",
    "Do not share OTP or bank details",
    "Verify sender identity",
    "Avoid urgent payment requests",
];

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("URL pattern is a valid regex"));

/// Score a message. Total over every input, including the empty string.
pub fn analyze_message(text: &str) -> ScoreResult {
    let mut score = 0;
    let mut reasons = Vec::new();

    let text_lower = text.to_lowercase();
    for keyword in matched_keywords(&text_lower) {
        score += KEYWORD_POINTS;
        reasons.push(keyword_reason(keyword));
    }

    // Links are matched against the original text, not the lower-cased copy.
    if contains_link(text) {
        score += LINK_POINTS;
        reasons.push(LINK_REASON.to_string());
    }

    if text.chars().count() < SHORT_MESSAGE_CHARS {
        score += SHORT_MESSAGE_POINTS;
        reasons.push(SHORT_MESSAGE_REASON.to_string());
    }

    ScoreResult {
        risk_level: RiskLevel::from_score(score),
        score,
        reasons,
    }
}

/// Keywords present in already lower-cased text, in list order.
pub fn matched_keywords(text_lower: &str) -> impl Iterator<Item = &'static str> + '_ {
    SCAM_KEYWORDS
        .iter()
        .copied()
        .filter(move |keyword| text_lower.contains(keyword))
}

/// True if the text contains at least one `http://` or `https://` link.
///
/// regex-lite's `\S` only excludes ASCII whitespace, so each match must also
/// start with a character that isn't Unicode whitespace after the scheme.
pub fn contains_link(text: &str) -> bool {
    URL_PATTERN.find_iter(text).any(|m| {
        let rest = m.as_str().split_once("://").map_or("", |(_, rest)| rest);
        rest.chars().next().is_some_and(|c| !c.is_whitespace())
    })
}

pub fn keyword_reason(keyword: &str) -> String {
    format!("Suspicious keyword detected: '{keyword}'")
}
