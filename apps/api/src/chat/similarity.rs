//! String similarity used to resolve role names inside free-text questions.
//!
//! Ratcliff/Obershelp "gestalt" matching over characters: find the longest
//! common block, recurse on both sides of it, and score `2 * matched / total`.
//! No junk heuristics, so long messages are compared on every character.

/// Minimum similarity for a role name to count as the target of a career question.
pub const ROLE_MATCH_THRESHOLD: f64 = 0.35;

/// Similarity ratio in `[0.0, 1.0]` between two strings.
///
/// `ratio(x, x) == 1.0` and `ratio(a, b) == ratio(b, a)`. Block matching can
/// break ties differently depending on argument order, so both orders are
/// scored and the better one wins.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matched_chars(&a, &b).max(matched_chars(&b, &a));
    2.0 * matched as f64 / total as f64
}

/// Total size of the matching blocks between `a` and `b`.
fn matched_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            queue.push((i + size, ahi, j + size, bhi));
        }
    }
    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, size)`.
/// Ties go to the block starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // run[j - blo + 1] = length of the common run ending at (i, j)
    let mut prev = vec![0usize; bhi - blo + 1];
    let mut row = vec![0usize; bhi - blo + 1];
    for i in alo..ahi {
        for j in blo..bhi {
            let k = j - blo + 1;
            row[k] = if a[i] == b[j] { prev[k - 1] + 1 } else { 0 };
            if row[k] > best_size {
                best_size = row[k];
                best_i = i + 1 - best_size;
                best_j = j + 1 - best_size;
            }
        }
        std::mem::swap(&mut prev, &mut row);
    }
    (best_i, best_j, best_size)
}
