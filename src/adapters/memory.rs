use crate::config::toml_config::TomlConfig;
use crate::core::{
    ArticleId, ArticleVote, FindArticleVotePort, FindVotingUserPort, Karma, SaveArticleVotePort,
    UserId, Vote, VotingUser,
};
use crate::utils::error::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Vote store kept in process memory. Enforces one vote per (article, user).
#[derive(Debug, Default)]
pub struct InMemoryVoteStore {
    users: RwLock<HashMap<UserId, Karma>>,
    votes: RwLock<HashMap<(ArticleId, UserId), Vote>>,
}

impl InMemoryVoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users<I>(users: I) -> Self
    where
        I: IntoIterator<Item = (UserId, Karma)>,
    {
        Self {
            users: RwLock::new(users.into_iter().collect()),
            votes: RwLock::new(HashMap::new()),
        }
    }

    /// Store holding the `[[users]]` and `[[votes]]` seeds of a config file.
    pub async fn from_config(config: &TomlConfig) -> Result<Self, StorageError> {
        let store = Self::with_users(config.users.iter().map(|u| (u.id, u.karma)));
        for vote in &config.votes {
            store.save_article_vote(vote.clone()).await?;
        }
        tracing::info!(
            "🗂  Seeded {} users and {} votes",
            config.users.len(),
            config.votes.len()
        );
        Ok(store)
    }

    pub async fn insert_user(&self, user_id: UserId, karma: Karma) {
        self.users.write().await.insert(user_id, karma);
    }

    pub async fn vote_count(&self) -> usize {
        self.votes.read().await.len()
    }
}

#[async_trait]
impl FindVotingUserPort for InMemoryVoteStore {
    async fn find_voting_user(
        &self,
        user_id: UserId,
        article_id: ArticleId,
    ) -> Result<VotingUser, StorageError> {
        // Lock order is users, then votes. Both guards are held while the snapshot is built.
        let users = self.users.read().await;
        let votes = self.votes.read().await;

        let karma = users
            .get(&user_id)
            .copied()
            .ok_or(StorageError::UserNotFound(user_id))?;
        let prior_vote = votes.get(&(article_id, user_id)).copied();

        Ok(VotingUser::new(user_id, karma, prior_vote))
    }
}

#[async_trait]
impl FindArticleVotePort for InMemoryVoteStore {
    async fn find_article_vote(
        &self,
        article_id: ArticleId,
        user_id: UserId,
    ) -> Result<Option<ArticleVote>, StorageError> {
        let votes = self.votes.read().await;
        Ok(votes
            .get(&(article_id, user_id))
            .map(|vote| ArticleVote::new(article_id, user_id, *vote)))
    }
}

#[async_trait]
impl SaveArticleVotePort for InMemoryVoteStore {
    async fn save_article_vote(&self, article_vote: ArticleVote) -> Result<ArticleVote, StorageError> {
        let mut votes = self.votes.write().await;
        let key = (article_vote.article_id, article_vote.user_id);

        if votes.contains_key(&key) {
            tracing::debug!(
                "Duplicate vote for article {} by user {}",
                article_vote.article_id,
                article_vote.user_id
            );
            return Err(StorageError::Conflict {
                article_id: article_vote.article_id,
                user_id: article_vote.user_id,
            });
        }

        votes.insert(key, article_vote.vote);
        Ok(ArticleVote::new(key.0, key.1, article_vote.vote))
    }

    async fn replace_article_vote(
        &self,
        article_vote: ArticleVote,
    ) -> Result<ArticleVote, StorageError> {
        let mut votes = self.votes.write().await;
        match votes.get_mut(&(article_vote.article_id, article_vote.user_id)) {
            Some(stored) => {
                *stored = article_vote.vote;
                Ok(article_vote)
            }
            None => Err(StorageError::VoteNotFound {
                article_id: article_vote.article_id,
                user_id: article_vote.user_id,
            }),
        }
    }
}
