use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(Uuid);

impl ArticleId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ArticleId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A user's reputation balance. Only ordering is exposed to the rating logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Karma(i64);

impl Karma {
    pub fn new(amount: i64) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Karma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Up,
    Down,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown vote '{0}', expected 'up' or 'down'")]
pub struct ParseVoteError(pub String);

impl FromStr for Vote {
    type Err = ParseVoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Vote::Up),
            "down" => Ok(Vote::Down),
            _ => Err(ParseVoteError(s.to_string())),
        }
    }
}

// Accepts the same symbols as `FromStr`.
impl<'de> Deserialize<'de> for Vote {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let symbol = String::deserialize(deserializer)?;
        symbol.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vote::Up => f.write_str("up"),
            Vote::Down => f.write_str("down"),
        }
    }
}

/// Point-in-time view of a user's standing with respect to one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingUser {
    pub user_id: UserId,
    pub karma: Karma,
    pub prior_vote: Option<Vote>,
}

impl VotingUser {
    pub fn new(user_id: UserId, karma: Karma, prior_vote: Option<Vote>) -> Self {
        Self {
            user_id,
            karma,
            prior_vote,
        }
    }

    pub fn has_cast(&self, vote: Vote) -> bool {
        self.prior_vote == Some(vote)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleVote {
    pub article_id: ArticleId,
    pub user_id: UserId,
    pub vote: Vote,
}

impl ArticleVote {
    pub fn new(article_id: ArticleId, user_id: UserId, vote: Vote) -> Self {
        Self {
            article_id,
            user_id,
            vote,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastArticleVoteCommand {
    pub user_id: UserId,
    pub article_id: ArticleId,
    pub vote: Vote,
}

impl CastArticleVoteCommand {
    pub fn new(user_id: UserId, article_id: ArticleId, vote: Vote) -> Self {
        Self {
            user_id,
            article_id,
            vote,
        }
    }
}

impl From<&CastArticleVoteCommand> for ArticleVote {
    fn from(command: &CastArticleVoteCommand) -> Self {
        ArticleVote::new(command.article_id, command.user_id, command.vote)
    }
}

/// Outcome of evaluating a [`CastArticleVoteCommand`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CastArticleVoteResult {
    VoteSuccessfullyCast {
        user_id: UserId,
        article_id: ArticleId,
        vote: Vote,
    },
    VoteAlreadyCast {
        user_id: UserId,
        article_id: ArticleId,
    },
    InsufficientKarma {
        user_id: UserId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    VoteSuccessfullyCast,
    VoteAlreadyCast,
    InsufficientKarma,
}

impl CastArticleVoteResult {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            CastArticleVoteResult::VoteSuccessfullyCast { .. } => OutcomeKind::VoteSuccessfullyCast,
            CastArticleVoteResult::VoteAlreadyCast { .. } => OutcomeKind::VoteAlreadyCast,
            CastArticleVoteResult::InsufficientKarma { .. } => OutcomeKind::InsufficientKarma,
        }
    }

    pub fn user_id(&self) -> UserId {
        match self {
            CastArticleVoteResult::VoteSuccessfullyCast { user_id, .. }
            | CastArticleVoteResult::VoteAlreadyCast { user_id, .. }
            | CastArticleVoteResult::InsufficientKarma { user_id } => *user_id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CastArticleVoteResult::VoteSuccessfullyCast { .. })
    }
}

impl From<ArticleVote> for CastArticleVoteResult {
    fn from(article_vote: ArticleVote) -> Self {
        CastArticleVoteResult::VoteSuccessfullyCast {
            user_id: article_vote.user_id,
            article_id: article_vote.article_id,
            vote: article_vote.vote,
        }
    }
}
