//! Chain-of-secrets walk for the redirect level.
//!
//! The walk keeps no server-side state: each response reveals only the token
//! that follows the one presented, so the chain can only be walked in order.

/// Where a presented secret leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStep<'a> {
    /// Redirect the caller with this token.
    Redirect(&'a str),
    /// The last token was presented; hand out the reward.
    Complete,
    /// The token is not part of the chain.
    Unknown,
}

/// A fixed, ordered list of redirect tokens.
#[derive(Debug, Clone)]
pub struct RedirectChain {
    tokens: Vec<String>,
}

impl RedirectChain {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Advance the walk from the presented secret.
    ///
    /// An absent or empty secret starts the walk at the first token.
    pub fn step(&self, secret: Option<&str>) -> ChainStep<'_> {
        let secret = match secret {
            Some(s) if !s.is_empty() => s,
            _ => {
                return match self.tokens.first() {
                    Some(first) => ChainStep::Redirect(first),
                    None => ChainStep::Complete,
                }
            }
        };

        match self.tokens.iter().position(|t| t == secret) {
            None => ChainStep::Unknown,
            Some(i) => match self.tokens.get(i + 1) {
                Some(next) => ChainStep::Redirect(next),
                None => ChainStep::Complete,
            },
        }
    }
}
