// WHY: Centralized keyword tables and the locale-provider seam
// The engine owns only the fixed character-class indicators; localized lists
// arrive through KeywordProvider so hosts can swap locales without rebuilding

/// Outcome classes that carry a canned, locale-specific reason string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input was empty or whitespace-only
    EmptyMessage,
    /// No keyword and no extractable candidate
    NoOtpKeyword,
    /// A keyword was present but no candidate could be extracted
    KeywordButNoCode,
}

/// Locale-aware supplier of keyword lists and canned reason strings.
///
/// Contract: every list is ordered, distinct, and already lowercased; lists
/// are immutable after construction and reused across `detect` calls.
pub trait KeywordProvider: Send + Sync {
    fn otp_keywords(&self) -> &[String];
    fn safety_keywords(&self) -> &[String];
    fn money_indicators(&self) -> &[String];
    fn error_message(&self, kind: ErrorKind) -> &str;
}

/// Fixed CJK substrings that mark verification-code messages regardless of
/// the injected locale lists.
pub(crate) const CJK_OTP_INDICATORS: &[&str] = &[
    "验证码", "驗證碼", "認証コード", "認証", "인증번호", "인증",
];

/// Fixed parcel-pickup indicators. Parcel classification is a sibling of the
/// OTP decision and does not depend on the injected provider.
pub(crate) const PARCEL_INDICATORS: &[&str] = &[
    "parcel", "pickup code", "pick-up code", "collection code",
    "取件码", "取件碼", "快递", "包裹", "택배",
];

const DEFAULT_OTP_KEYWORDS: &[&str] = &[
    "otp", "one-time password", "one time password",
    "verification code", "verification", "verify",
    "passcode", "password", "login code", "security code", "access code",
    "code", "2fa", "pin",
    "验证码", "驗證碼", "認証コード", "인증번호",
];

const DEFAULT_SAFETY_KEYWORDS: &[&str] = &[
    "do not share", "don't share", "never share",
    "do not disclose", "keep it confidential",
];

const DEFAULT_MONEY_INDICATORS: &[&str] = &[
    "rs", "inr", "usd", "$", "₹", "€", "£",
    "debited", "credited", "amount", "balance",
    "payment", "refund", "transaction", "a/c",
];

/// Production keyword provider with built-in English plus common CJK terms.
/// Hosts with localized resource bundles supply their own implementation.
pub struct StaticKeywordProvider {
    otp: Vec<String>,
    safety: Vec<String>,
    money: Vec<String>,
}

impl StaticKeywordProvider {
    pub fn new() -> Self {
        Self {
            otp: to_owned_list(DEFAULT_OTP_KEYWORDS),
            safety: to_owned_list(DEFAULT_SAFETY_KEYWORDS),
            money: to_owned_list(DEFAULT_MONEY_INDICATORS),
        }
    }
}

impl Default for StaticKeywordProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordProvider for StaticKeywordProvider {
    fn otp_keywords(&self) -> &[String] {
        &self.otp
    }

    fn safety_keywords(&self) -> &[String] {
        &self.safety
    }

    fn money_indicators(&self) -> &[String] {
        &self.money
    }

    fn error_message(&self, kind: ErrorKind) -> &str {
        match kind {
            ErrorKind::EmptyMessage => "Empty message",
            ErrorKind::NoOtpKeyword => "No OTP or parcel keyword found",
            ErrorKind::KeywordButNoCode => "Keyword present but no code found",
        }
    }
}

fn to_owned_list(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| (*word).to_string()).collect()
}
