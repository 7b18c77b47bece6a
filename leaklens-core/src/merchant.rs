//! Merchant / counterparty extraction from noisy statement narrations.
//!
//! Two independently grown strategies are kept as named presets. They
//! disagree on some inputs ("UPI/DEVRAJ VERMA/..." comes back "DEVRAJ VERMA"
//! from one and "Devraj Verma" from the other) and neither has been declared
//! authoritative, so both stay selectable and separately tested.

use regex::Regex;
use std::sync::OnceLock;

/// Channel prefixes carrying no counterparty information.
const NOISY_PREFIXES: &[&str] = &[
    "upi/",
    "upi-",
    "imps/",
    "neft/",
    "rtgs/",
    "by transfer",
    "to transfer",
    "trf to",
    "transfer to",
];

/// Boilerplate suffixes appended by payment apps.
const TRAILING_MARKERS: &[&str] = &[
    "sent using paytm",
    "sent using payt",
    "sent using gpay",
    "sent from paytm",
    "upi payment",
];

/// Brand names matched ahead of any structural parsing by `BrandFirst`.
/// "VI " keeps its trailing space so it does not fire inside other words.
const KNOWN_BRANDS: &[&str] = &[
    "SWIGGY",
    "ZOMATO",
    "BLINKIT",
    "INSTAMART",
    "UBER",
    "OLA",
    "RAPIDO",
    "AMAZON",
    "FLIPKART",
    "MYNTRA",
    "AJIO",
    "NYKAA",
    "MEESHO",
    "DOMINOS",
    "DOMINO'S",
    "PIZZA HUT",
    "NETFLIX",
    "SPOTIFY",
    "PRIME VIDEO",
    "HOTSTAR",
    "AIRTEL",
    "JIO",
    "VI ",
];

/// Merchant extraction strategy preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MerchantStyle {
    /// Strip channel noise from the narration and keep what remains.
    /// Default; this is what the live pipeline runs during synthesis.
    #[default]
    NarrationScrub,
    /// Prefer a known-brand table, then UPI/"TO" patterns, then the first
    /// alphabetic tokens, all title-cased.
    BrandFirst,
}

impl MerchantStyle {
    pub fn extract(&self, description: &str) -> String {
        match self {
            MerchantStyle::NarrationScrub => narration_scrub(description),
            MerchantStyle::BrandFirst => brand_first(description),
        }
    }
}

/// Ordered scrub pipeline; each pass may shorten the text, the first match
/// within a pass short-circuits that pass.
fn narration_scrub(description: &str) -> String {
    let mut desc = description.trim().to_string();
    if desc.is_empty() {
        return String::new();
    }

    // 1) leading channel prefix ("upi/", "trf to", ...)
    let lower = desc.to_ascii_lowercase();
    for prefix in NOISY_PREFIXES {
        if lower.starts_with(prefix) {
            desc = desc[prefix.len()..].trim().to_string();
            break;
        }
    }

    // 2) "NAME/reference/extra" keeps only NAME
    if desc.contains('/') {
        let first = desc.split('/').next().unwrap_or("").trim();
        if !first.is_empty() {
            desc = first.to_string();
        }
    }

    // 3) truncate at payment-app boilerplate
    let lower = desc.to_ascii_lowercase();
    for marker in TRAILING_MARKERS {
        if let Some(idx) = lower.find(marker) {
            desc.truncate(idx);
            desc = desc.trim().to_string();
            break;
        }
    }

    // 4) "MERCHANT-refcode" keeps only the left side
    if let Some((left, _)) = desc.split_once('-') {
        let left = left.trim();
        if !left.is_empty() {
            desc = left.to_string();
        }
    }

    // 5) collapse whitespace, cap length
    let collapsed: Vec<&str> = desc.split_whitespace().collect();
    collapsed.join(" ").chars().take(60).collect()
}

fn upi_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"UPI/([^/]+)/").unwrap())
}

fn to_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"TO\s+([A-Z ]{3,30})").unwrap())
}

fn brand_first(description: &str) -> String {
    let desc = description.trim().to_uppercase();
    if desc.is_empty() {
        return "Unknown".to_string();
    }

    for brand in KNOWN_BRANDS {
        if desc.contains(brand) {
            return title_case(brand.trim());
        }
    }

    // UPI/NAME/... with ids, handles, and separators scrubbed out
    if let Some(caps) = upi_name_re().captures(&desc) {
        let name: String = caps[1]
            .chars()
            .map(|c| {
                if c.is_ascii_digit() || c == '@' || c == '-' || c == '_' {
                    ' '
                } else {
                    c
                }
            })
            .collect();
        let name = title_case(&name);
        if !name.is_empty() {
            return name;
        }
    }

    // "TO NAME" (NEFT/IMPS narrations)
    if let Some(caps) = to_name_re().captures(&desc) {
        return title_case(caps[1].trim());
    }

    // Fallback: first one or two purely alphabetic tokens
    let words: Vec<&str> = desc
        .split_whitespace()
        .filter(|w| !w.is_empty() && w.chars().all(char::is_alphabetic))
        .collect();
    match words.len() {
        0 => "Unknown".to_string(),
        1 => title_case(words[0]),
        _ => title_case(&words[..2].join(" ")),
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
