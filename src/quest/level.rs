//! The level catalogue.

use std::fmt;

use axum::http::Method;
use axum::routing::MethodFilter;

/// One password-gated step of the quest, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Plain,
    Reverse,
    Base64,
    Header,
    Delete,
    UserAgent,
    AcceptLanguage,
    Redirect,
    Robots,
    GuessNumber,
    Mask,
    Finish,
}

impl Level {
    /// All levels in play order.
    pub const ALL: [Level; 12] = [
        Level::Plain,
        Level::Reverse,
        Level::Base64,
        Level::Header,
        Level::Delete,
        Level::UserAgent,
        Level::AcceptLanguage,
        Level::Redirect,
        Level::Robots,
        Level::GuessNumber,
        Level::Mask,
        Level::Finish,
    ];

    /// 1-based level number, as it appears in the URL.
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn from_number(number: u8) -> Option<Level> {
        Self::ALL.get((number as usize).checked_sub(1)?).copied()
    }

    /// Short name used in logs and metric labels.
    pub fn name(self) -> &'static str {
        match self {
            Level::Plain => "plain",
            Level::Reverse => "reverse",
            Level::Base64 => "base64",
            Level::Header => "header",
            Level::Delete => "delete",
            Level::UserAgent => "user_agent",
            Level::AcceptLanguage => "accept_language",
            Level::Redirect => "redirect",
            Level::Robots => "robots",
            Level::GuessNumber => "guess_number",
            Level::Mask => "mask",
            Level::Finish => "finish",
        }
    }

    /// The only method the level answers to (GET also covers HEAD).
    pub fn method(self) -> Method {
        match self {
            Level::Delete => Method::DELETE,
            Level::Robots | Level::GuessNumber | Level::Mask => Method::POST,
            _ => Method::GET,
        }
    }

    pub(crate) fn method_filter(self) -> MethodFilter {
        match self {
            Level::Delete => MethodFilter::DELETE,
            Level::Robots | Level::GuessNumber | Level::Mask => MethodFilter::POST,
            _ => MethodFilter::GET,
        }
    }

    pub fn path(self) -> String {
        format!("/level/{}", self.number())
    }

    /// The level unlocked by this level's reward.
    pub fn next(self) -> Option<Level> {
        Self::ALL.get(self.index() + 1).copied()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbering_round_trips() {
        for (i, level) in Level::ALL.iter().enumerate() {
            assert_eq!(level.number() as usize, i + 1);
            assert_eq!(Level::from_number(level.number()), Some(*level));
        }
        assert_eq!(Level::from_number(0), None);
        assert_eq!(Level::from_number(13), None);
    }

    #[test]
    fn test_chain_is_linear() {
        assert_eq!(Level::Plain.next(), Some(Level::Reverse));
        assert_eq!(Level::Mask.next(), Some(Level::Finish));
        assert_eq!(Level::Finish.next(), None);
    }

    #[test]
    fn test_methods_and_paths() {
        assert_eq!(Level::Delete.method(), Method::DELETE);
        assert_eq!(Level::GuessNumber.method(), Method::POST);
        assert_eq!(Level::Redirect.method(), Method::GET);
        assert_eq!(Level::Redirect.path(), "/level/8");
        assert_eq!(Level::Finish.to_string(), "12 (finish)");
    }
}
