pub mod events;
pub mod post_rating;

pub use crate::domain::model::{
    ArticleId, ArticleVote, CastArticleVoteCommand, CastArticleVoteResult, Karma, OutcomeKind,
    UserId, Vote, VotingUser,
};
pub use crate::domain::ports::{
    CastArticleVoteUseCase, FindArticleVotePort, FindVotingUserPort, SaveArticleVotePort,
};
pub use crate::utils::error::Result;
