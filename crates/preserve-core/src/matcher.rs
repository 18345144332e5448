use std::ops::Range;

use regex::Regex;

/// Finds the substrings a [`Vault`](crate::Vault) should protect.
///
/// Implementations scan the whole text, not just the first hit. Returned
/// spans are byte ranges in ascending order, non-overlapping, and fall on
/// `char` boundaries.
pub trait Matcher {
    fn find_spans(&self, text: &str) -> Vec<Range<usize>>;
}

impl Matcher for Regex {
    fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        self.find_iter(text).map(|m| m.range()).collect()
    }
}

impl<M: Matcher + ?Sized> Matcher for &M {
    fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        (**self).find_spans(text)
    }
}

impl<M: Matcher + ?Sized> Matcher for Box<M> {
    fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        (**self).find_spans(text)
    }
}
