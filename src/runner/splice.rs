// Copyright (c) 2025 Patternbench Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Text edits driven by match positions.
//!
//! Positions are character offsets, strictly increasing, as produced by the
//! matchers. Edits are computed against the original text in a single pass,
//! so earlier edits never shift later offsets.

/// Removes every character covered by some match `[p, p + m)`.
///
/// Overlapping matches remove the union of their spans. For disjoint
/// matches the original text comes back by inserting the pattern at
/// `p_k - k·m` in the result; overlapping matches share characters, so the
/// deletion cannot be undone exactly.
pub fn delete_matches(text: &[char], positions: &[usize], m: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut next = positions.iter().peekable();
    let mut covered_until = 0;

    for (i, &ch) in text.iter().enumerate() {
        while let Some(&&start) = next.peek() {
            if start > i {
                break;
            }
            covered_until = covered_until.max(start + m);
            next.next();
        }
        if i >= covered_until {
            out.push(ch);
        }
    }
    out
}

/// Inserts `insert` at each of `offsets`, which must be non-decreasing and
/// at most `text.len()`. A repeated offset inserts once per occurrence.
pub fn insert_at(text: &[char], offsets: &[usize], insert: &str) -> String {
    let mut out = String::with_capacity(text.len() + offsets.len() * insert.len());
    let mut next = offsets.iter().peekable();

    for i in 0..=text.len() {
        while next.next_if(|&&offset| offset == i).is_some() {
            out.push_str(insert);
        }
        if let Some(&ch) = text.get(i) {
            out.push(ch);
        }
    }
    out
}

/// Inserts `insert` right after every match, at `p + m`.
pub fn insert_after_matches(text: &[char], positions: &[usize], m: usize, insert: &str) -> String {
    let offsets: Vec<usize> = positions.iter().map(|&p| p + m).collect();
    insert_at(text, &offsets, insert)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test_case("one two one", &[0, 8], 3, " two " ; "disjoint matches")]
    #[test_case("aaaa", &[0, 1, 2], 2, "" ; "overlapping union")]
    #[test_case("xabcabx", &[1], 3, "xabx" ; "single match")]
    #[test_case("nothing", &[], 3, "nothing" ; "no matches")]
    #[test_case("ñandú ñandú", &[0, 6], 5, " " ; "multibyte characters")]
    fn test_delete_matches(text: &str, positions: &[usize], m: usize, expected: &str) {
        assert_eq!(delete_matches(&chars(text), positions, m), expected);
    }

    #[test_case("cat hat", &[0, 4], 3, "!", "cat! hat!" ; "after each match")]
    #[test_case("aaa", &[0, 1], 2, "-", "aa-a-" ; "overlapping matches")]
    #[test_case("abc", &[], 1, "-", "abc" ; "no matches")]
    fn test_insert_after_matches(text: &str, positions: &[usize], m: usize, insert: &str, expected: &str) {
        assert_eq!(insert_after_matches(&chars(text), positions, m, insert), expected);
    }

    #[test]
    fn test_insert_at_boundaries() {
        assert_eq!(insert_at(&chars("ab"), &[0, 2], "|"), "|ab|");
        assert_eq!(insert_at(&[], &[0], "x"), "x");
    }

    #[test]
    fn test_insert_at_repeated_offset() {
        // Adjacent matches of "ab" in "xababy" both map back to offset 1 of "xy"
        assert_eq!(insert_at(&chars("xy"), &[1, 1], "ab"), "xababy");
        assert_eq!(insert_at(&chars("q"), &[1, 1, 1], "-"), "q---");
    }
}
