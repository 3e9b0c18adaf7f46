use regex::Regex;
use std::sync::Arc;

use crate::enums::Category;
use crate::types::Endpoint;

/// Predicate over a single token.
#[derive(Debug, Clone)]
pub enum Test {
    Any,
    Equals(Box<str>),
    /// Holds the lowercased literal.
    EqualsIgnoreCase(Box<str>),
    Regex(Arc<Regex>),
}

impl Test {
    pub fn accepts(&self, token: &str) -> bool {
        match self {
            Test::Any => true,
            Test::Equals(text) => token == &**text,
            Test::EqualsIgnoreCase(text) => token.to_lowercase() == **text,
            Test::Regex(regex) => regex.is_match(token),
        }
    }
}

/// Compiled combinator graph. Alternatives in a [`Matcher::Choice`] are
/// already ordered by specificity, so the first success wins.
#[derive(Debug)]
pub enum Matcher<H, M = ()> {
    /// Succeeds without consuming when the stream is exhausted.
    Satisfy(Category),
    Token {
        slot: Category,
        test: Test,
        capture: Option<Arc<str>>,
    },
    /// Consumes the next token when it passes; succeeds unchanged when the
    /// stream is already exhausted.
    Absorb { slot: Category, test: Test },
    /// Consumes a remaining key/value pair accepted by both tests, trying
    /// each candidate in request order until `next` matches.
    Pair {
        slot: Category,
        key: Test,
        value: Test,
        capture: Option<Arc<str>>,
        next: Box<Matcher<H, M>>,
    },
    Sequence(Box<Matcher<H, M>>, Box<Matcher<H, M>>),
    Choice(Vec<Matcher<H, M>>),
    /// Consumes as many accepted segments as possible, then gives back one
    /// at a time until `next` matches.
    SegmentsRun {
        test: Test,
        capture: Option<Arc<str>>,
        next: Box<Matcher<H, M>>,
    },
    Terminal(Arc<Endpoint<H, M>>),
}

impl<H, M> Matcher<H, M> {
    pub fn then(self, next: Matcher<H, M>) -> Self {
        Matcher::Sequence(Box::new(self), Box::new(next))
    }

    /// Collapses a single alternative into itself.
    pub fn choice(mut alternatives: Vec<Matcher<H, M>>) -> Self {
        if alternatives.len() == 1 {
            if let Some(only) = alternatives.pop() {
                return only;
            }
        }
        Matcher::Choice(alternatives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignore_case_compares_lowercased() {
        let test = Test::EqualsIgnoreCase("users".into());
        assert!(test.accepts("USERS"));
        assert!(test.accepts("Users"));
        assert!(!test.accepts("user"));
    }

    #[test]
    fn single_choice_collapses() {
        let only: Matcher<(), ()> = Matcher::choice(vec![Matcher::Satisfy(Category::Segment)]);
        assert!(matches!(only, Matcher::Satisfy(Category::Segment)));

        let empty: Matcher<(), ()> = Matcher::choice(Vec::new());
        assert!(matches!(empty, Matcher::Choice(ref alts) if alts.is_empty()));
    }
}
