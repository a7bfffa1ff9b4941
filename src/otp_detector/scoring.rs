// WHY: all ten signals are additive with no early exit, so each one can be
// audited in isolation and the winner is a plain arg-max over the sum

use super::extraction::Candidate;

/// Keywords that mark a line as code-bearing, independent of the injected
/// provider lists.
const LINE_KEYWORDS: &[&str] = &["otp", "code", "password", "passcode"];

/// Assignment markers that may directly precede a code on its line.
const ASSIGNMENT_MARKERS: &[&str] = &[":", "=", "is"];

const PREFERRED_LEN_SCORE: f64 = 3.0;
const GOOD_LEN_SCORE: f64 = 2.0;
const ACCEPTABLE_LEN_SCORE: f64 = 1.0;
const BAD_LEN_SCORE: f64 = -1.0;
const NUMERIC_BONUS: f64 = 0.5;
const LONG_NUMERIC_PENALTY: f64 = -1.5;
const EXACT_LINE_BONUS: f64 = 2.5;
const LINE_KEYWORD_BONUS: f64 = 2.0;
const ASSIGNMENT_BONUS: f64 = 1.5;
const SAFETY_BONUS: f64 = 1.0;
const MONEY_PENALTY: f64 = -2.0;
const PHONE_SHAPE_PENALTY: f64 = -2.5;

const LONG_NUMERIC_LEN: usize = 9;
const MONEY_WINDOW: usize = 25;
const PHONE_PREFIX_WINDOW: usize = 5;

/// Message-level inputs shared by every candidate during one `detect` call.
/// Occurrence spans are inclusive character offsets into the lowered message.
pub(crate) struct ScoreContext<'a> {
    pub chars: &'a [char],
    pub lowered: &'a [char],
    pub otp_occurrences: &'a [(usize, usize)],
    pub money_occurrences: &'a [(usize, usize)],
    pub has_safety_keyword: bool,
}

/// The substring considered "local context" for a candidate.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LineContext {
    pub line: String,
    pub from: usize,
    pub to: usize,
}

/// Expand from the candidate span to the nearest newline or string edge.
/// Normalization has already collapsed newlines into spaces, so in practice
/// the context spans the whole message; preserved as observed behavior.
pub(crate) fn line_context(chars: &[char], start: usize, end: usize) -> LineContext {
    let mut from = start;
    while from > 0 && chars[from - 1] != '\n' {
        from -= 1;
    }
    let mut to = end;
    while to + 1 < chars.len() && chars[to + 1] != '\n' {
        to += 1;
    }
    LineContext {
        line: chars[from..=to].iter().collect(),
        from,
        to,
    }
}

/// Sum the ten heuristic signals for one candidate.
pub(crate) fn score_candidate(candidate: &Candidate, ctx: &ScoreContext<'_>) -> f64 {
    let len = candidate.code.chars().count();
    let mut score = length_shape_score(len);

    if candidate.is_numeric {
        score += NUMERIC_BONUS;
        if len >= LONG_NUMERIC_LEN {
            score += LONG_NUMERIC_PENALTY;
        }
    }

    let context = line_context(ctx.chars, candidate.start, candidate.end);
    let lowered_line: String = ctx.lowered[context.from..=context.to].iter().collect();

    if context.line.trim() == candidate.code {
        score += EXACT_LINE_BONUS;
    }
    if LINE_KEYWORDS.iter().any(|kw| lowered_line.contains(kw)) {
        score += LINE_KEYWORD_BONUS;
    }
    if has_assignment_pattern(&lowered_line, &candidate.code.to_lowercase()) {
        score += ASSIGNMENT_BONUS;
    }

    score += keyword_proximity_score(candidate, ctx.otp_occurrences);

    if ctx.has_safety_keyword {
        score += SAFETY_BONUS;
    }
    if has_money_context(candidate.start, ctx.money_occurrences) {
        score += MONEY_PENALTY;
    }
    if has_phone_shape(candidate, ctx.lowered, len) {
        score += PHONE_SHAPE_PENALTY;
    }

    score
}

fn length_shape_score(len: usize) -> f64 {
    match len {
        6 => PREFERRED_LEN_SCORE,
        4..=8 => GOOD_LEN_SCORE,
        3..=10 => ACCEPTABLE_LEN_SCORE,
        _ => BAD_LEN_SCORE,
    }
}

/// True when an assignment marker is followed by optional whitespace and the
/// exact candidate code. Both sides are compared lowercased.
fn has_assignment_pattern(lowered_line: &str, lowered_code: &str) -> bool {
    for marker in ASSIGNMENT_MARKERS {
        let mut search_from = 0;
        while let Some(found) = lowered_line[search_from..].find(marker) {
            let after = search_from + found + marker.len();
            if lowered_line[after..].trim_start().starts_with(lowered_code) {
                return true;
            }
            search_from = after;
        }
    }
    false
}

/// Tiered bonus from the minimum midpoint distance to any OTP-keyword
/// occurrence. No keyword anywhere contributes nothing.
fn keyword_proximity_score(candidate: &Candidate, occurrences: &[(usize, usize)]) -> f64 {
    let candidate_mid = (candidate.start + candidate.end) / 2;
    let closest = occurrences
        .iter()
        .map(|&(start, end)| candidate_mid.abs_diff((start + end) / 2))
        .min();
    match closest {
        Some(distance) if distance <= 20 => 2.0,
        Some(distance) if distance <= 40 => 1.0,
        Some(distance) if distance <= 80 => 0.5,
        _ => 0.0,
    }
}

/// True when a money-indicator occurrence lies fully inside the ±25-char
/// window around the candidate's start offset.
fn has_money_context(candidate_start: usize, occurrences: &[(usize, usize)]) -> bool {
    let window_start = candidate_start.saturating_sub(MONEY_WINDOW);
    let window_end = candidate_start + MONEY_WINDOW;
    occurrences
        .iter()
        .any(|&(start, end)| start >= window_start && end <= window_end)
}

/// Phone numbers share the shape of long codes; penalize a leading `+`, a
/// tel/call cue in the five preceding chars, or a numeric run of 9+ digits.
fn has_phone_shape(candidate: &Candidate, lowered: &[char], len: usize) -> bool {
    let from = candidate.start.saturating_sub(PHONE_PREFIX_WINDOW);
    let prefix: String = lowered[from..candidate.start].iter().collect();
    prefix.contains('+')
        || prefix.contains("tel")
        || prefix.contains("call")
        || (candidate.is_numeric && len >= LONG_NUMERIC_LEN)
}
