//! Approximate matching of a search string against canonical tag names
//!
//! The similarity score is the matching-blocks ratio `2 * M / T` where `T` is
//! the total number of characters of both strings and `M` the number of
//! characters in matching blocks. Blocks are found by taking the longest
//! contiguous common run, then recursing on the text left and right of it, so
//! `"Radehad"` and `"Redhead"` only share 3 characters (ratio 0.43) although
//! they have a 5 character common subsequence.
//!
//! Scores are computed case-sensitively, over Unicode scalar values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default maximum number of close matches returned
pub const DEFAULT_MAX_MATCHES: usize = 3;

/// Default minimum ratio for a candidate to be considered close
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Strings at least this long ignore their most frequent characters when
/// looking for matching blocks
const AUTOJUNK_MIN_LEN: usize = 200;

/// Limits applied when collecting close matches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Maximum number of candidates returned
    pub max_matches: usize,
    /// Candidates scoring below this ratio are discarded (0.0 ..= 1.0)
    pub cutoff: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            max_matches: DEFAULT_MAX_MATCHES,
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

impl MatchOptions {
    pub fn new(max_matches: usize, cutoff: f64) -> Self {
        Self {
            max_matches,
            cutoff: cutoff.clamp(0.0, 1.0),
        }
    }
}

/// Block matcher with a fixed second sequence
///
/// The index of `b` is built once and reused for every compared `a`.
struct SequenceMatcher {
    b: Vec<char>,
    /// Positions of each character in `b`, popular characters excluded
    b2j: HashMap<char, Vec<usize>>,
    /// Occurrences of each character in `b`
    b_counts: HashMap<char, usize>,
}

impl SequenceMatcher {
    fn new(b: &str) -> Self {
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }
        let b_counts: HashMap<char, usize> = b2j.iter().map(|(c, js)| (*c, js.len())).collect();

        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, js| js.len() <= limit);
        }

        Self { b, b2j, b_counts }
    }

    /// Upper bound of [`SequenceMatcher::ratio`] from the lengths alone
    fn real_quick_ratio(&self, a: &[char]) -> f64 {
        score(a.len().min(self.b.len()), a.len() + self.b.len())
    }

    /// Upper bound of [`SequenceMatcher::ratio`] from the character counts
    fn quick_ratio(&self, a: &[char]) -> f64 {
        let mut available: HashMap<char, usize> = HashMap::new();
        let mut matches = 0;
        for c in a {
            let left = available
                .entry(*c)
                .or_insert_with(|| self.b_counts.get(c).copied().unwrap_or(0));
            if *left > 0 {
                *left -= 1;
                matches += 1;
            }
        }
        score(matches, a.len() + self.b.len())
    }

    fn ratio(&self, a: &[char]) -> f64 {
        score(self.matching_characters(a), a.len() + self.b.len())
    }

    /// Total size of the matching blocks between `a` and `b`
    fn matching_characters(&self, a: &[char]) -> usize {
        let mut pending = vec![(0, a.len(), 0, self.b.len())];
        let mut total = 0;

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.find_longest_match(a, alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                pending.push((i + k, ahi, j + k, bhi));
            }
        }

        total
    }

    /// Longest common run of `a[alo..ahi]` and `b[blo..bhi]`
    ///
    /// Returns `(i, j, size)`. Among runs of the same size, the one starting
    /// earliest in `a` wins, then the one starting earliest in `b`.
    fn find_longest_match(
        &self,
        a: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        // j2len[j]: length of the run ending at a[i - 1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(c) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j.checked_sub(1).and_then(|p| j2len.get(&p)).copied().unwrap_or(0) + 1;
                    next.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next;
        }

        // Popular characters are not indexed: grow the run over them
        while best_i > alo && best_j > blo && a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }
}

fn score(matches: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    2.0 * matches as f64 / total as f64
}

/// Similarity ratio of `a` against `b`, in `0.0 ..= 1.0`
///
/// Two empty strings are identical (1.0). The measure is not symmetric in
/// general: when several runs have the same length, the leftmost in `a` is
/// taken first.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    SequenceMatcher::new(b).ratio(&a)
}

/// Returns the candidates closest to `word`, best first
///
/// Only candidates whose ratio against `word` reaches `options.cutoff` are
/// kept, at most `options.max_matches` of them. Equal scores are ordered by
/// candidate in descending order so the result never depends on the
/// iteration order.
pub fn close_matches<'a, I>(word: &str, candidates: I, options: &MatchOptions) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    if options.max_matches == 0 {
        return Vec::new();
    }

    let matcher = SequenceMatcher::new(word);
    let mut scored: Vec<(f64, &'a str)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let chars: Vec<char> = candidate.chars().collect();
            if matcher.real_quick_ratio(&chars) < options.cutoff
                || matcher.quick_ratio(&chars) < options.cutoff
            {
                return None;
            }
            let score = matcher.ratio(&chars);
            (score >= options.cutoff).then_some((score, candidate))
        })
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| b.1.cmp(a.1)));
    scored.truncate(options.max_matches);
    scored.into_iter().map(|(_, candidate)| candidate).collect()
}

/// Title-cases a string the way tag names are displayed
///
/// A letter is upper-cased when it follows a character that is not a cased
/// letter, and lower-cased otherwise: `"big dick"` becomes `"Big Dick"`,
/// `"o'neil"` becomes `"O'Neil"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previous_cased = false;

    for c in s.chars() {
        let cased = c.is_uppercase() || c.is_lowercase();
        if cased {
            if previous_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
        } else {
            out.push(c);
        }
        previous_cased = cased;
    }

    out
}
