pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::InMemoryVoteStore;
pub use config::{toml_config::TomlConfig, RatingConfig, VoteChangePolicy};
pub use crate::core::{events::OutcomeDispatcher, post_rating::PostRatingService};
pub use domain::model::{
    ArticleId, ArticleVote, CastArticleVoteCommand, CastArticleVoteResult, Karma, OutcomeKind,
    UserId, Vote, VotingUser,
};
pub use domain::ports::CastArticleVoteUseCase;
pub use utils::error::{RatingError, Result, StorageError};
