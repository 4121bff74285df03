//! Approximate string matching against a small fixed dictionary
//!
//! Used only to repair misspelled weekday labels. Scores are on a 0-100
//! scale where 100 is an exact match after normalization.

/// Best dictionary entry for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub choice: &'a str,
    pub score: u8,
}

/// Picks the closest canonical string for a candidate
pub trait ApproximateMatcher {
    /// Similarity of two strings, 0-100
    fn score(&self, a: &str, b: &str) -> u8;

    /// Highest-scoring choice; ties keep the earliest choice
    fn best_match<'a>(&self, query: &str, choices: &[&'a str]) -> Option<Match<'a>> {
        choices
            .iter()
            .map(|choice| Match {
                choice,
                score: self.score(query, choice),
            })
            .fold(None, |best: Option<Match<'a>>, candidate| match best {
                Some(best) if best.score >= candidate.score => Some(best),
                _ => Some(candidate),
            })
    }
}

/// Weighted indel-distance ratio over case-folded alphanumeric characters
///
/// `ratio = 100 * (1 - indel(a, b) / (len(a) + len(b)))`, where the indel
/// distance counts insertions and deletions only. When one string is at
/// least 1.5 times longer than the other, the best ratio of the shorter one
/// against any equally long window of the longer one also counts, scaled by
/// 0.9 (0.6 beyond an 8:1 length ratio). The score is the larger of the two,
/// so `Понеділок (1 тиждень)` still resolves to `Понеділок`.
///
/// Token-sort and token-set components are not computed: folding drops
/// whitespace, so they cannot beat the plain ratio.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatioMatcher;

impl RatioMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl ApproximateMatcher for RatioMatcher {
    fn score(&self, a: &str, b: &str) -> u8 {
        weighted_ratio(&fold(a), &fold(b))
    }
}

/// Lowercase and keep only alphanumeric characters
fn fold(text: &str) -> Vec<char> {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn weighted_ratio(a: &[char], b: &[char]) -> u8 {
    let plain = ratio(a, b);
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let score = if shorter.is_empty() {
        plain
    } else {
        let length_ratio = longer.len() as f64 / shorter.len() as f64;
        let scale = match length_ratio {
            r if r < 1.5 => None,
            r if r <= 8.0 => Some(0.9),
            _ => Some(0.6),
        };
        scale.map_or(plain, |scale| plain.max(partial_ratio(shorter, longer) * scale))
    };

    score.round().clamp(0.0, 100.0) as u8
}

fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    let distance = indel_distance(a, b);
    100.0 * (1.0 - distance as f64 / total as f64)
}

/// Best ratio of `shorter` against each window of `longer` of the same length
fn partial_ratio(shorter: &[char], longer: &[char]) -> f64 {
    longer
        .windows(shorter.len())
        .map(|window| ratio(shorter, window))
        .fold(0.0, f64::max)
}

/// Insertions plus deletions needed to turn `a` into `b`
fn indel_distance(a: &[char], b: &[char]) -> usize {
    a.len() + b.len() - 2 * longest_common_subsequence(a, b)
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let n = b.len();
    if a.is_empty() || n == 0 {
        return 0;
    }

    let mut prev = vec![0usize; n + 1];
    let mut curr = vec![0usize; n + 1];

    for &a_ch in a {
        for (j, &b_ch) in b.iter().enumerate() {
            curr[j + 1] = if a_ch == b_ch {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
