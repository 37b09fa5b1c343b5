// Link analyzer — heuristic risk assessment for a single URL.
//
// Every signal adds points; the total is clamped to 0-100 and mapped to a
// verdict: 51+ Scam, 26-50 Suspicious, below that Safe. An input that can't
// be parsed as a URL with a host is reported as Suspicious at a fixed 40.

use serde::Serialize;
use url::Url;

/// Verdict for an analyzed link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkRisk {
    Safe,
    Suspicious,
    Scam,
}

impl LinkRisk {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 51 => LinkRisk::Scam,
            s if s >= 26 => LinkRisk::Suspicious,
            _ => LinkRisk::Safe,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkRisk::Safe => "SAFE",
            LinkRisk::Suspicious => "SUSPICIOUS",
            LinkRisk::Scam => "SCAM",
        }
    }
}

impl std::fmt::Display for LinkRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkAnalysis {
    pub risk_level: LinkRisk,
    pub scam_score: u32,
    pub detected_keywords: Vec<String>,
    pub detected_threats: Vec<String>,
    pub safety_advice: Vec<String>,
}

/// Keyword category weight: how much one keyword hit in the URL is worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeywordWeight {
    /// Credential and identity harvesting (kyc, otp, login, verification)
    Critical,
    /// Money movement and account changes (payment, update, security)
    High,
    Standard,
}

impl KeywordWeight {
    fn points(self) -> u32 {
        match self {
            KeywordWeight::Critical => 25,
            KeywordWeight::High => 20,
            KeywordWeight::Standard => 15,
        }
    }
}

const SCAM_KEYWORDS: &[(KeywordWeight, &[&str])] = &[
    (
        KeywordWeight::Critical,
        &["verify", "verify-now", "verifyaccount", "verify_account", "verification", "reverify"],
    ),
    (
        KeywordWeight::High,
        &["update", "update-now", "updateaccount", "update_account"],
    ),
    (
        KeywordWeight::High,
        &["secure", "security", "security-check", "securelogin"],
    ),
    (
        KeywordWeight::Standard,
        &["confirm", "confirmation", "confirmemail", "confirm_email"],
    ),
    (
        KeywordWeight::Critical,
        &["login", "signin", "sign-in", "sign_in", "auth", "authenticate"],
    ),
    (
        KeywordWeight::Standard,
        &["reset", "reset-password", "password-reset", "resetpassword", "change-password"],
    ),
    (
        KeywordWeight::Standard,
        &["unlock", "account-unlock", "accountunlock", "suspended", "blocked", "hold"],
    ),
    (
        KeywordWeight::Critical,
        &["kyc", "kyc-update", "kycupdate", "aadhar", "aadhaar", "pan", "pan-verify"],
    ),
    (
        KeywordWeight::Critical,
        &["otp", "otp-verify", "validate", "validation"],
    ),
    (
        KeywordWeight::High,
        &["billing", "payment", "pay", "upi", "bank", "wallet", "transaction"],
    ),
    (
        KeywordWeight::Standard,
        &["refund", "cashback", "reward", "bonus", "prize", "lottery", "winner"],
    ),
    (
        KeywordWeight::Standard,
        &["claim", "claim-now", "free", "offer", "limited", "urgent", "hurry", "immediate"],
    ),
    (
        KeywordWeight::Standard,
        &["alert", "warning", "risk", "fraud", "suspicious", "unusual"],
    ),
];

const BRAND_KEYWORDS: &[&str] = &[
    // banking
    "sbi", "hdfc", "icici", "axis", "boi", "yes", "kotak", "idbi",
    // payments
    "paypal", "paytm", "phonepe", "gpay", "google-pay", "amazon-pay",
    // e-commerce
    "amazon", "flipkart", "meesho", "snapdeal", "myntra",
    // social
    "facebook", "instagram", "whatsapp", "telegram", "twitter",
    // telecom
    "jio", "airtel", "vi", "bsnl", "mtnl",
    // government
    "gov", "india", "income-tax", "uidai", "ntas", "portal",
];

const URL_SHORTENERS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "goo.gl",
    "t.co",
    "cutt.ly",
    "rebrand.ly",
    "shorturl.at",
    "is.gd",
    "tiny.cc",
    "lnk.to",
    "vil.ltd",
    "short.link",
    "clck.ru",
    "ow.ly",
];

const DANGEROUS_EXTENSIONS: &[&str] = &[
    ".apk", ".exe", ".zip", ".rar", ".iso", ".js", ".html", ".bat", ".cmd",
];

const SUSPICIOUS_DOMAIN_SUFFIXES: &[&str] = &[
    "-login",
    "-secure",
    "-verification",
    "-support",
    "-helpdesk",
    "-update",
    "-service",
    "-alert",
    "-check",
    "-notice",
];

/// Hosts with more dot-separated labels than this are flagged.
const MAX_HOST_LABELS: usize = 4;

const MAX_SCORE: u32 = 100;
const INVALID_URL_SCORE: u32 = 40;

/// Analyze a link typed or pasted by a user. Inputs without a scheme are
/// treated as https.
pub fn analyze_link(input: &str) -> LinkAnalysis {
    let mut normalized = input.trim().to_lowercase();
    if !normalized.starts_with("http://") && !normalized.starts_with("https://") {
        normalized = format!("https://{normalized}");
    }

    let url = match Url::parse(&normalized) {
        Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) => url,
        _ => return invalid_link(),
    };

    let mut signals = Signals::default();
    let full_url = url.as_str();
    let domain = url.host_str().unwrap_or_default();
    let path = format!("{}{}", url.path(), url.query().map(|q| format!("?{q}")).unwrap_or_default());

    if URL_SHORTENERS.iter().any(|s| domain.contains(s)) {
        signals.add(30, "URL Shortener", "URL shorteners hide the real destination");
    }

    if DANGEROUS_EXTENSIONS.iter().any(|ext| full_url.contains(ext)) {
        signals.add(25, "Dangerous File", "URL contains executable or archive file");
    }

    if is_ipv4_like(domain) {
        signals.add(30, "IP Address", "URL uses IP address instead of domain name");
    }

    if SUSPICIOUS_DOMAIN_SUFFIXES.iter().any(|s| domain.contains(s)) {
        signals.add(
            15,
            "Suspicious Domain Pattern",
            "Domain name contains suspicious patterns",
        );
    }

    let label_count = domain.split('.').count();
    if label_count > MAX_HOST_LABELS {
        signals.add(
            15,
            "Excessive Subdomains",
            &format!("Too many subdomains ({label_count})"),
        );
    }

    if full_url.contains('@') {
        signals.add(
            25,
            "Email Spoofing",
            "URL contains @ symbol (email spoofing technique)",
        );
    }

    if url.scheme() == "http" {
        signals.add(15, "No HTTPS", "Site does not use HTTPS encryption");
    }

    for (weight, keywords) in SCAM_KEYWORDS {
        for keyword in *keywords {
            if path.contains(keyword) || domain.contains(keyword) {
                signals.score += weight.points();
                signals.keyword(keyword);
            }
        }
    }

    for brand in BRAND_KEYWORDS {
        if domain.contains(brand)
            && !domain.ends_with(&format!("{brand}.com"))
            && !domain.ends_with(&format!("{brand}.in"))
        {
            signals.score += 25;
            signals.keyword(&format!("{brand} impersonation"));
            signals
                .threats
                .push(format!("Domain appears to impersonate {brand}"));
        }
    }

    let scam_score = signals.score.min(MAX_SCORE);
    let risk_level = LinkRisk::from_score(scam_score);

    LinkAnalysis {
        risk_level,
        scam_score,
        detected_keywords: signals.keywords,
        detected_threats: signals.threats,
        safety_advice: safety_advice(risk_level),
    }
}

#[derive(Default)]
struct Signals {
    score: u32,
    keywords: Vec<String>,
    threats: Vec<String>,
}

impl Signals {
    fn add(&mut self, points: u32, keyword: &str, threat: &str) {
        self.score += points;
        self.keywords.push(keyword.to_string());
        self.threats.push(threat.to_string());
    }

    /// Record a keyword once, however many times it is hit.
    fn keyword(&mut self, keyword: &str) {
        if !self.keywords.iter().any(|k| k == keyword) {
            self.keywords.push(keyword.to_string());
        }
    }
}

/// Four dot-separated runs of 1-3 digits anywhere in the host.
fn is_ipv4_like(host: &str) -> bool {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    let parts: Vec<&str> = host.split('.').collect();
    parts.windows(4).any(|w| {
        w.iter().enumerate().all(|(i, part)| {
            // Outer runs only need a digit at the touching end.
            let digits = match i {
                0 => part.chars().rev().take_while(|c| c.is_ascii_digit()).count(),
                3 => part.chars().take_while(|c| c.is_ascii_digit()).count(),
                _ if part.chars().all(|c| c.is_ascii_digit()) => part.len(),
                _ => 0,
            };
            digits >= 1 && (i == 0 || i == 3 || digits <= 3)
        })
    })
}

fn safety_advice(risk: LinkRisk) -> Vec<String> {
    let mut advice: Vec<&str> = match risk {
        LinkRisk::Scam => vec![
            "DO NOT click this link - it appears to be a scam",
            "Do not enter any personal or financial information",
        ],
        LinkRisk::Suspicious => vec![
            "Be cautious with this link",
            "Hover to see the actual URL before clicking",
        ],
        LinkRisk::Safe => vec![
            "This link appears safe",
            "Always verify the domain and HTTPS before entering sensitive info",
        ],
    };
    advice.push("If unsure, contact the organization directly using a known phone number");
    advice.push("Report suspicious links to cyber.nic.in");
    advice.into_iter().map(String::from).collect()
}

fn invalid_link() -> LinkAnalysis {
    LinkAnalysis {
        risk_level: LinkRisk::Suspicious,
        scam_score: INVALID_URL_SCORE,
        detected_keywords: vec!["Invalid URL".to_string()],
        detected_threats: vec!["URL format appears invalid or malformed".to_string()],
        safety_advice: vec![
            "This URL cannot be parsed properly".to_string(),
            "Do not click on malformed URLs".to_string(),
            "Copy the full URL and check carefully before visiting".to_string(),
        ],
    }
}
