/*
 *
 *  This source file is part of the QuickLauncher open source project
 *
 *  Copyright (c) 2024 QuickLauncher project contributors
 *  Licensed under MIT License
 *
 */

use std::{cmp::Reverse, sync::OnceLock};

use nucleo::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo::{Config, Matcher, Utf32Str};
use parking_lot::Mutex;

use super::SearchItem;

fn matcher() -> &'static Mutex<Matcher> {
    static MATCHER: OnceLock<Mutex<Matcher>> = OnceLock::new();
    MATCHER.get_or_init(|| Mutex::new(Matcher::new(Config::DEFAULT)))
}

/// Ranks `items` against `pattern`, best first. Items that don't match are dropped;
/// an empty pattern keeps everything in its original order.
pub fn fuzzy_match<T: Score>(pattern: &str, items: Vec<T>) -> Vec<T> {
    if pattern.trim().is_empty() {
        return items;
    }
    let mut matcher = matcher().lock();
    let pattern = Atom::new(
        pattern,
        CaseMatching::Smart,
        Normalization::Smart,
        AtomKind::Fuzzy,
        false,
    );
    let mut buf = Vec::new();
    let mut items: Vec<(T, u32)> = items
        .into_iter()
        .filter_map(|item| {
            let score = item.score(&pattern, &mut buf, &mut matcher)?;
            Some((item, score))
        })
        .collect();
    // Stable, so equal scores keep their input order.
    items.sort_by_key(|(_, score)| Reverse(*score));
    items.into_iter().map(|item| item.0).collect()
}

pub trait Score {
    fn score(&self, pattern: &Atom, buf: &mut Vec<char>, matcher: &mut Matcher) -> Option<u32>;
}

impl Score for SearchItem {
    fn score(&self, pattern: &Atom, buf: &mut Vec<char>, matcher: &mut Matcher) -> Option<u32> {
        let highest = self
            .keywords
            .iter()
            .filter_map(|needle| pattern.score(Utf32Str::new(needle, buf), matcher))
            .max()?;
        Some(u32::from(highest) * u32::from(self.weight.unwrap_or(1)))
    }
}
