//! Earliest-match merging across several pattern scanners.
//!
//! Each scanner finds its own next match from a byte offset. [`segment`]
//! walks a text left to right, at every step taking the match that starts
//! first; on equal starts the scanner listed first wins. Scanning resumes at
//! the end of the taken match, so matches never overlap.

use std::ops::Range;

use regex::Regex;

/// Something that can find its next match in a text.
pub trait Scanner {
    /// Byte range of the first match starting at or after `start`.
    ///
    /// `start` is always a char boundary. Context before `start` may be
    /// consulted (for word boundaries) but never matched. Returned ranges
    /// must be non-empty.
    fn find_at(&self, text: &str, start: usize) -> Option<Range<usize>>;
}

/// A [`Scanner`] backed by a compiled regular expression.
#[derive(Debug, Clone)]
pub struct RegexScanner {
    regex: Regex,
}

impl RegexScanner {
    pub fn new(regex: Regex) -> Self {
        Self { regex }
    }
}

impl Scanner for RegexScanner {
    fn find_at(&self, text: &str, start: usize) -> Option<Range<usize>> {
        self.regex
            .find_at(text, start)
            .map(|m| m.range())
            .filter(|r| !r.is_empty())
    }
}

/// A piece of a scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'t> {
    /// Text between matches, kept verbatim.
    Plain(&'t str),
    /// A match and the index of the scanner that produced it.
    Matched { scanner: usize, text: &'t str },
}

/// Earliest match at or after `start` across `scanners`.
///
/// Returns the winning scanner's index and its match range.
pub fn earliest_match<S: Scanner + ?Sized>(
    scanners: &[Box<S>],
    text: &str,
    start: usize,
) -> Option<(usize, Range<usize>)> {
    let mut best: Option<(usize, Range<usize>)> = None;
    for (idx, scanner) in scanners.iter().enumerate() {
        if let Some(range) = scanner.find_at(text, start) {
            let earlier = best
                .as_ref()
                .map_or(true, |(_, current)| range.start < current.start);
            if earlier {
                best = Some((idx, range));
            }
        }
    }
    best
}

/// Split `text` into plain and matched segments.
///
/// Returns `None` when no scanner matches anywhere, so callers can leave the
/// text untouched.
pub fn segment<'t, S: Scanner + ?Sized>(
    text: &'t str,
    scanners: &[Box<S>],
) -> Option<Vec<Segment<'t>>> {
    let mut segments = Vec::new();
    let mut idx = 0;
    let mut matched = false;

    while idx < text.len() {
        let Some((scanner, range)) = earliest_match(scanners, text, idx) else {
            break;
        };
        if range.start > idx {
            segments.push(Segment::Plain(&text[idx..range.start]));
        }
        segments.push(Segment::Matched {
            scanner,
            text: &text[range.clone()],
        });
        idx = range.end;
        matched = true;
    }

    if !matched {
        return None;
    }
    if idx < text.len() {
        segments.push(Segment::Plain(&text[idx..]));
    }
    Some(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regex_scanners(patterns: &[&str]) -> Vec<Box<RegexScanner>> {
        patterns
            .iter()
            .map(|p| Box::new(RegexScanner::new(Regex::new(p).unwrap())))
            .collect()
    }

    #[test]
    fn test_earliest_match_prefers_lowest_start() {
        let scanners = regex_scanners(&["world", "hello"]);
        let (idx, range) = earliest_match(&scanners, "hello world", 0).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(range, 0..5);
    }

    #[test]
    fn test_earliest_match_tie_goes_to_first_scanner() {
        let scanners = regex_scanners(&["data", "database"]);
        let (idx, range) = earliest_match(&scanners, "database", 0).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(range, 0..4);
    }

    #[test]
    fn test_earliest_match_none() {
        let scanners = regex_scanners(&["xyz"]);
        assert!(earliest_match(&scanners, "abc", 0).is_none());
    }

    #[test]
    fn test_segment_preserves_text() {
        let scanners = regex_scanners(&["b+", "d"]);
        let segments = segment("abbcde", &scanners).unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Plain("a"),
                Segment::Matched { scanner: 0, text: "bb" },
                Segment::Plain("c"),
                Segment::Matched { scanner: 1, text: "d" },
                Segment::Plain("e"),
            ]
        );
    }

    #[test]
    fn test_segment_no_match_is_none() {
        let scanners = regex_scanners(&["q"]);
        assert!(segment("abc", &scanners).is_none());
        assert!(segment("", &scanners).is_none());
    }

    #[test]
    fn test_segment_resumes_after_match() {
        // "aaa" with "aa": one match, then the leftover "a" is plain.
        let scanners = regex_scanners(&["aa"]);
        let segments = segment("aaa", &scanners).unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Matched { scanner: 0, text: "aa" },
                Segment::Plain("a"),
            ]
        );
    }

    #[test]
    fn test_regex_scanner_skips_empty_matches() {
        let scanner = RegexScanner::new(Regex::new("x*").unwrap());
        assert!(scanner.find_at("abc", 0).is_none());
    }
}
