use crate::domain::model::{
    ArticleId, ArticleVote, CastArticleVoteCommand, CastArticleVoteResult, UserId, VotingUser,
};
use crate::utils::error::{Result, StorageError};
use async_trait::async_trait;

#[async_trait]
pub trait FindVotingUserPort: Send + Sync {
    /// Current karma of `user_id` and the vote they already cast on `article_id`, if any.
    async fn find_voting_user(
        &self,
        user_id: UserId,
        article_id: ArticleId,
    ) -> std::result::Result<VotingUser, StorageError>;
}

#[async_trait]
pub trait FindArticleVotePort: Send + Sync {
    async fn find_article_vote(
        &self,
        article_id: ArticleId,
        user_id: UserId,
    ) -> std::result::Result<Option<ArticleVote>, StorageError>;
}

#[async_trait]
pub trait SaveArticleVotePort: Send + Sync {
    /// Persists a new vote. Fails with [`StorageError::Conflict`] if the
    /// (article, user) pair already has one.
    async fn save_article_vote(
        &self,
        article_vote: ArticleVote,
    ) -> std::result::Result<ArticleVote, StorageError>;

    /// Overwrites the direction of an existing vote.
    async fn replace_article_vote(
        &self,
        article_vote: ArticleVote,
    ) -> std::result::Result<ArticleVote, StorageError>;
}

#[async_trait]
pub trait CastArticleVoteUseCase: Send + Sync {
    async fn cast_article_vote(
        &self,
        command: CastArticleVoteCommand,
    ) -> Result<CastArticleVoteResult>;
}
