// WHY: Main detector interface; keyword automata are compiled once at
// construction so every detect call is a pure scan with no setup cost

use anyhow::Result;
use regex_automata::{meta::Regex, Input};
use serde::Serialize;
use tracing::{debug, info};

pub mod calibration;
pub mod extraction;
pub mod keywords;
pub mod normalization;
pub mod scoring;

pub use extraction::Candidate;
pub use keywords::{ErrorKind, KeywordProvider, StaticKeywordProvider};
pub use normalization::{normalize_message, normalize_message_into};

use calibration::MessageFlags;
use scoring::ScoreContext;

/// Fixed confidence reported when keywords or candidates are missing.
const NO_CANDIDATE_CONFIDENCE: f64 = 0.1;

/// Outcome of scanning one message. Immutable value, produced fresh per call.
///
/// Invariant: `code.is_some()` exactly when `is_otp || is_parcel`, and
/// `confidence` is always within [0,1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionResult {
    pub is_otp: bool,
    pub code: Option<String>,
    pub confidence: f64,
    pub reason: String,
    pub is_parcel: bool,
}

/// OTP detection engine: candidate extraction, heuristic scoring, and
/// confidence calibration over a single message body.
///
/// Holds no per-call state; a single instance is safe for unrestricted
/// concurrent use.
pub struct OtpDetector {
    provider: Box<dyn KeywordProvider>,
    otp_patterns: Option<Regex>,
    safety_patterns: Option<Regex>,
    money_patterns: Option<Regex>,
    cjk_patterns: Option<Regex>,
    parcel_patterns: Option<Regex>,
}

impl OtpDetector {
    /// Create a detector around an injected keyword provider, compiling one
    /// multi-pattern automaton per keyword list.
    pub fn new<P: KeywordProvider + 'static>(provider: P) -> Result<Self> {
        let otp_patterns = compile_keyword_set(provider.otp_keywords())?;
        let safety_patterns = compile_keyword_set(provider.safety_keywords())?;
        let money_patterns = compile_keyword_set(provider.money_indicators())?;
        let cjk_patterns = compile_keyword_set(keywords::CJK_OTP_INDICATORS)?;
        let parcel_patterns = compile_keyword_set(keywords::PARCEL_INDICATORS)?;

        info!(
            "Compiled keyword automata: {} OTP, {} safety, {} money keywords",
            provider.otp_keywords().len(),
            provider.safety_keywords().len(),
            provider.money_indicators().len()
        );

        Ok(Self {
            provider: Box::new(provider),
            otp_patterns,
            safety_patterns,
            money_patterns,
            cjk_patterns,
            parcel_patterns,
        })
    }

    /// Create a detector with the built-in keyword lists.
    pub fn with_default_keywords() -> Result<Self> {
        Self::new(StaticKeywordProvider::new())
    }

    /// Scan one message body. Never fails: every input, including empty,
    /// whitespace-only, or binary-garbage strings, maps to a result.
    pub fn detect(&self, message: &str) -> DetectionResult {
        if message.trim().is_empty() {
            return DetectionResult {
                is_otp: false,
                code: None,
                confidence: 0.0,
                reason: self.provider.error_message(ErrorKind::EmptyMessage).to_string(),
                is_parcel: false,
            };
        }

        let normalized = normalize_message(message);
        let chars: Vec<char> = normalized.chars().collect();
        let lowered_chars = normalization::lowercase_aligned(&chars);
        let lowered: String = lowered_chars.iter().collect();
        let char_starts = char_start_offsets(&lowered);

        let otp_occurrences =
            scan_occurrences(self.otp_patterns.as_ref(), &lowered, &char_starts);
        let money_occurrences =
            scan_occurrences(self.money_patterns.as_ref(), &lowered, &char_starts);
        let flags = MessageFlags {
            has_otp_keyword: !otp_occurrences.is_empty(),
            has_safety_keyword: is_match(self.safety_patterns.as_ref(), &lowered),
            has_cjk_otp_indicator: is_match(self.cjk_patterns.as_ref(), &lowered),
            is_parcel: is_match(self.parcel_patterns.as_ref(), &lowered),
        };

        let mut candidates = extraction::extract_candidates(&chars);
        if candidates.is_empty() {
            return self.no_candidate_result(&flags);
        }

        let ctx = ScoreContext {
            chars: &chars,
            lowered: &lowered_chars,
            otp_occurrences: &otp_occurrences,
            money_occurrences: &money_occurrences,
            has_safety_keyword: flags.has_safety_keyword,
        };
        for candidate in &mut candidates {
            candidate.score = scoring::score_candidate(candidate, &ctx);
        }

        // Strictly-greater comparison keeps the earliest candidate on ties,
        // in pass order then left-to-right
        let mut winner = &candidates[0];
        for candidate in &candidates[1..] {
            if candidate.score > winner.score {
                winner = candidate;
            }
        }
        debug!(
            "Winner '{}' scored {:.1} among {} candidates",
            winner.code,
            winner.score,
            candidates.len()
        );

        let (confidence, is_otp) = calibration::calibrate(winner.score, &flags);
        let is_parcel = flags.is_parcel;
        let code = if is_otp || is_parcel {
            Some(winner.code.clone())
        } else {
            None
        };
        let reason = format!(
            "Top candidate '{}' scored {:.1} (otp_kw={}, safety_kw={}, cjk={}, parcel={})",
            winner.code,
            winner.score,
            flags.has_otp_keyword,
            flags.has_safety_keyword,
            flags.has_cjk_otp_indicator,
            flags.is_parcel
        );

        DetectionResult {
            is_otp,
            code,
            confidence,
            reason,
            is_parcel,
        }
    }

    /// Failure path when extraction produced nothing. Reason priority:
    /// OTP keyword present, then parcel indicator present, then neither.
    /// `is_parcel` stays false here since no code can back it.
    fn no_candidate_result(&self, flags: &MessageFlags) -> DetectionResult {
        let keyword_present =
            flags.has_otp_keyword || flags.has_cjk_otp_indicator || flags.is_parcel;
        let kind = if keyword_present {
            ErrorKind::KeywordButNoCode
        } else {
            ErrorKind::NoOtpKeyword
        };
        DetectionResult {
            is_otp: false,
            code: None,
            confidence: NO_CANDIDATE_CONFIDENCE,
            reason: self.provider.error_message(kind).to_string(),
            is_parcel: false,
        }
    }
}

/// Compile a keyword list into one multi-pattern automaton. Keywords are
/// matched as literals; empty lists yield `None` and never match.
fn compile_keyword_set<S: AsRef<str>>(words: &[S]) -> Result<Option<Regex>> {
    let patterns: Vec<String> = words
        .iter()
        .map(|word| word.as_ref())
        .filter(|word| !word.is_empty())
        .map(escape_literal)
        .collect();
    if patterns.is_empty() {
        return Ok(None);
    }
    Ok(Some(Regex::new_many(&patterns)?))
}

/// Escape regex metacharacters so a keyword is matched verbatim.
fn escape_literal(word: &str) -> String {
    let mut escaped = String::with_capacity(word.len() + 4);
    for ch in word.chars() {
        if matches!(
            ch,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
                | '#' | '&' | '-' | '~'
        ) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn is_match(patterns: Option<&Regex>, text: &str) -> bool {
    patterns.map_or(false, |re| re.is_match(Input::new(text)))
}

/// Find every keyword occurrence and report inclusive character spans.
fn scan_occurrences(
    patterns: Option<&Regex>,
    lowered: &str,
    char_starts: &[usize],
) -> Vec<(usize, usize)> {
    let re = match patterns {
        Some(re) => re,
        None => return Vec::new(),
    };
    re.find_iter(Input::new(lowered))
        .map(|m| {
            let start = char_starts.partition_point(|&byte| byte < m.start());
            let end = char_starts
                .partition_point(|&byte| byte < m.end())
                .saturating_sub(1);
            (start, end)
        })
        .collect()
}

/// Byte offset of each char start, for byte-to-char span conversion.
fn char_start_offsets(text: &str) -> Vec<usize> {
    text.char_indices().map(|(offset, _)| offset).collect()
}
