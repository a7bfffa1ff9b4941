// WHY: three explicit extraction passes instead of one regex blob
// Each pass owns its boundary and dedup rules so they stay individually testable

use tracing::debug;

/// A substring of the normalized message considered as a possible code.
/// `start` and `end` are inclusive character offsets of the original matched
/// text (separators included for pass-2 groups) into the normalized message.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub code: String,
    pub start: usize,
    pub end: usize,
    pub is_numeric: bool,
    pub score: f64,
}

const PLAIN_RUN_MIN: usize = 3;
const PLAIN_RUN_MAX: usize = 10;
const GROUP_CHUNK_MIN: usize = 2;
const GROUP_CHUNK_MAX: usize = 4;
const GROUP_CODE_MIN: usize = 4;
const GROUP_CODE_MAX: usize = 8;
const TOKEN_MIN: usize = 4;
const TOKEN_MAX: usize = 10;
const TOKEN_MIN_DIGITS: usize = 2;

/// Run all three passes over the normalized message, concatenating results in
/// pass order. An empty result is valid and signals "no candidate found".
pub(crate) fn extract_candidates(chars: &[char]) -> Vec<Candidate> {
    let mut candidates = collect_plain_numeric_runs(chars);
    let separated = collect_separated_groups(chars, &candidates);
    candidates.extend(separated);
    candidates.extend(collect_alphanumeric_tokens(chars));
    debug!("Extracted {} candidates", candidates.len());
    candidates
}

/// Pass 1: maximal digit runs of length 3-10. The boundary is digit vs
/// non-digit, not whitespace, so digits adjacent to CJK ideographs qualify.
/// Runs outside the length range yield nothing; they are never truncated.
fn collect_plain_numeric_runs(chars: &[char]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        let len = i - start;
        if (PLAIN_RUN_MIN..=PLAIN_RUN_MAX).contains(&len) {
            candidates.push(Candidate {
                code: chars[start..i].iter().collect(),
                start,
                end: i - 1,
                is_numeric: true,
                score: 0.0,
            });
        }
    }
    candidates
}

/// Pass 2: two or more digit chunks (each 2-4 digits) joined by a single
/// space or dash per junction, e.g. "123 456" or "12-34-56". Separators are
/// stripped to form the code; the recorded span covers the matched text.
/// Kept only when the stripped length is 4-8 and pass 1 did not already
/// produce the identical code string.
fn collect_separated_groups(chars: &[char], plain: &[Candidate]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        let first_end = digit_run_end(chars, i);
        if !(GROUP_CHUNK_MIN..=GROUP_CHUNK_MAX).contains(&(first_end - i)) {
            i = first_end;
            continue;
        }

        let mut code: String = chars[start..first_end].iter().collect();
        let mut chunks = 1;
        let mut last_end = first_end;
        let mut j = first_end;
        while j < chars.len() && (chars[j] == ' ' || chars[j] == '-') {
            let chunk_start = j + 1;
            if chunk_start >= chars.len() || !chars[chunk_start].is_ascii_digit() {
                break;
            }
            let chunk_end = digit_run_end(chars, chunk_start);
            if !(GROUP_CHUNK_MIN..=GROUP_CHUNK_MAX).contains(&(chunk_end - chunk_start)) {
                break;
            }
            code.extend(chars[chunk_start..chunk_end].iter());
            chunks += 1;
            last_end = chunk_end;
            j = chunk_end;
        }

        if chunks >= 2
            && (GROUP_CODE_MIN..=GROUP_CODE_MAX).contains(&code.len())
            && !plain.iter().any(|candidate| candidate.code == code)
        {
            candidates.push(Candidate {
                code,
                start,
                end: last_end - 1,
                is_numeric: true,
                score: 0.0,
            });
        }
        // Resume after the last consumed chunk; matches never overlap
        i = last_end;
    }
    candidates
}

/// Pass 3: maximal alphanumeric tokens of length 4-10 holding at least two
/// digits and at least one non-digit. Purely numeric tokens belong to pass 1.
fn collect_alphanumeric_tokens(chars: &[char]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_alphanumeric() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_ascii_alphanumeric() {
            i += 1;
        }
        let len = i - start;
        if !(TOKEN_MIN..=TOKEN_MAX).contains(&len) {
            continue;
        }
        let digits = chars[start..i].iter().filter(|ch| ch.is_ascii_digit()).count();
        if digits >= TOKEN_MIN_DIGITS && digits < len {
            candidates.push(Candidate {
                code: chars[start..i].iter().collect(),
                start,
                end: i - 1,
                is_numeric: false,
                score: 0.0,
            });
        }
    }
    candidates
}

fn digit_run_end(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    end
}
