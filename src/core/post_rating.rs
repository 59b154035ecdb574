use crate::config::{RatingConfig, VoteChangePolicy};
use crate::core::events::OutcomeDispatcher;
use crate::core::{
    ArticleId, ArticleVote, CastArticleVoteCommand, CastArticleVoteResult,
    CastArticleVoteUseCase, FindArticleVotePort, FindVotingUserPort, Result, SaveArticleVotePort,
    UserId,
};
use async_trait::async_trait;
use std::sync::Arc;

pub struct PostRatingService {
    find_article_vote_port: Arc<dyn FindArticleVotePort>,
    find_voting_user_port: Arc<dyn FindVotingUserPort>,
    save_article_vote_port: Arc<dyn SaveArticleVotePort>,
    config: RatingConfig,
    dispatcher: Arc<OutcomeDispatcher>,
}

impl PostRatingService {
    pub fn new(
        find_article_vote_port: Arc<dyn FindArticleVotePort>,
        find_voting_user_port: Arc<dyn FindVotingUserPort>,
        save_article_vote_port: Arc<dyn SaveArticleVotePort>,
        config: RatingConfig,
    ) -> Self {
        Self {
            find_article_vote_port,
            find_voting_user_port,
            save_article_vote_port,
            config,
            dispatcher: Arc::new(OutcomeDispatcher::new()),
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: Arc<OutcomeDispatcher>) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Read path for a single persisted vote. `None` when the pair has not voted.
    pub async fn find_article_vote(
        &self,
        article_id: ArticleId,
        user_id: UserId,
    ) -> Result<Option<ArticleVote>> {
        Ok(self
            .find_article_vote_port
            .find_article_vote(article_id, user_id)
            .await?)
    }

    async fn decide(&self, command: &CastArticleVoteCommand) -> Result<CastArticleVoteResult> {
        let voting_user = self
            .find_voting_user_port
            .find_voting_user(command.user_id, command.article_id)
            .await?;

        // Karma gate comes first, even for users who already voted.
        if voting_user.karma < self.config.min_karma {
            tracing::info!(
                "🚫 User {} has karma {} below threshold {}",
                command.user_id,
                voting_user.karma,
                self.config.min_karma
            );
            return Ok(CastArticleVoteResult::InsufficientKarma {
                user_id: command.user_id,
            });
        }

        if voting_user.has_cast(command.vote) {
            tracing::info!(
                "User {} already voted {} on article {}",
                command.user_id,
                command.vote,
                command.article_id
            );
            return Ok(CastArticleVoteResult::VoteAlreadyCast {
                user_id: command.user_id,
                article_id: command.article_id,
            });
        }

        let article_vote = ArticleVote::from(command);

        let saved = match (voting_user.prior_vote, self.config.vote_change_policy) {
            (None, _) => {
                self.save_article_vote_port
                    .save_article_vote(article_vote)
                    .await?
            }
            (Some(prior), VoteChangePolicy::Reject) => {
                tracing::info!(
                    "User {} tried to change vote {} -> {} on article {}, rejected",
                    command.user_id,
                    prior,
                    command.vote,
                    command.article_id
                );
                return Ok(CastArticleVoteResult::VoteAlreadyCast {
                    user_id: command.user_id,
                    article_id: command.article_id,
                });
            }
            (Some(prior), VoteChangePolicy::Replace) => {
                tracing::debug!(
                    "Replacing vote {} -> {} for user {} on article {}",
                    prior,
                    command.vote,
                    command.user_id,
                    command.article_id
                );
                self.save_article_vote_port
                    .replace_article_vote(article_vote)
                    .await?
            }
        };

        tracing::info!(
            "✅ User {} voted {} on article {}",
            saved.user_id,
            saved.vote,
            saved.article_id
        );
        Ok(saved.into())
    }
}

#[async_trait]
impl CastArticleVoteUseCase for PostRatingService {
    async fn cast_article_vote(
        &self,
        command: CastArticleVoteCommand,
    ) -> Result<CastArticleVoteResult> {
        tracing::debug!("Cast vote command: {:?}", command);

        let outcome = match self.decide(&command).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(
                    "❌ Casting vote for user {} on article {} failed: {}",
                    command.user_id,
                    command.article_id,
                    e
                );
                return Err(e);
            }
        };

        self.dispatcher.dispatch(&outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Karma, OutcomeKind, Vote, VotingUser};
    use crate::utils::error::StorageError;
    use tokio::sync::Mutex;

    struct FindVotingUserPortStub {
        returned_voting_user: VotingUser,
    }

    #[async_trait]
    impl FindVotingUserPort for FindVotingUserPortStub {
        async fn find_voting_user(
            &self,
            _user_id: UserId,
            _article_id: ArticleId,
        ) -> std::result::Result<VotingUser, StorageError> {
            Ok(self.returned_voting_user.clone())
        }
    }

    struct FindArticleVotePortStub {
        returned_article_vote: Option<ArticleVote>,
    }

    #[async_trait]
    impl FindArticleVotePort for FindArticleVotePortStub {
        async fn find_article_vote(
            &self,
            _article_id: ArticleId,
            _user_id: UserId,
        ) -> std::result::Result<Option<ArticleVote>, StorageError> {
            Ok(self.returned_article_vote.clone())
        }
    }

    #[derive(Default)]
    struct SaveArticleVotePortMock {
        saved: Mutex<Vec<ArticleVote>>,
        replaced: Mutex<Vec<ArticleVote>>,
        fail_with: Option<StorageError>,
    }

    impl SaveArticleVotePortMock {
        fn failing(error: StorageError) -> Self {
            Self {
                fail_with: Some(error),
                ..Default::default()
            }
        }

        async fn saved(&self) -> Vec<ArticleVote> {
            self.saved.lock().await.clone()
        }

        async fn replaced(&self) -> Vec<ArticleVote> {
            self.replaced.lock().await.clone()
        }
    }

    #[async_trait]
    impl SaveArticleVotePort for SaveArticleVotePortMock {
        async fn save_article_vote(
            &self,
            article_vote: ArticleVote,
        ) -> std::result::Result<ArticleVote, StorageError> {
            self.saved.lock().await.push(article_vote.clone());
            match &self.fail_with {
                Some(error) => Err(error.clone()),
                None => Ok(article_vote),
            }
        }

        async fn replace_article_vote(
            &self,
            article_vote: ArticleVote,
        ) -> std::result::Result<ArticleVote, StorageError> {
            self.replaced.lock().await.push(article_vote.clone());
            Ok(article_vote)
        }
    }

    const MIN_KARMA: i64 = 5;

    fn build_voting_user(user_id: UserId, karma: i64, prior_vote: Option<Vote>) -> VotingUser {
        VotingUser::new(user_id, Karma::new(karma), prior_vote)
    }

    fn build_post_rating_service(
        voting_user: VotingUser,
        save_port: Arc<SaveArticleVotePortMock>,
        policy: VoteChangePolicy,
    ) -> PostRatingService {
        PostRatingService::new(
            Arc::new(FindArticleVotePortStub {
                returned_article_vote: None,
            }),
            Arc::new(FindVotingUserPortStub {
                returned_voting_user: voting_user,
            }),
            save_port,
            RatingConfig::new(Karma::new(MIN_KARMA)).with_vote_change_policy(policy),
        )
    }

    #[tokio::test]
    async fn test_casting_valid_vote_returns_result() {
        let user_id = UserId::random();
        let article_id = ArticleId::random();
        let save_port = Arc::new(SaveArticleVotePortMock::default());
        let service = build_post_rating_service(
            build_voting_user(user_id, 10, None),
            Arc::clone(&save_port),
            VoteChangePolicy::Reject,
        );

        let result = service
            .cast_article_vote(CastArticleVoteCommand::new(user_id, article_id, Vote::Up))
            .await
            .unwrap();

        assert_eq!(
            result,
            CastArticleVoteResult::VoteSuccessfullyCast {
                user_id,
                article_id,
                vote: Vote::Up,
            }
        );
        assert_eq!(
            save_port.saved().await,
            vec![ArticleVote::new(article_id, user_id, Vote::Up)]
        );
    }

    #[tokio::test]
    async fn test_casting_same_vote_two_times_returns_vote_already_cast() {
        let user_id = UserId::random();
        let article_id = ArticleId::random();
        let save_port = Arc::new(SaveArticleVotePortMock::default());
        let service = build_post_rating_service(
            build_voting_user(user_id, 10, Some(Vote::Up)),
            Arc::clone(&save_port),
            VoteChangePolicy::Reject,
        );

        let result = service
            .cast_article_vote(CastArticleVoteCommand::new(user_id, article_id, Vote::Up))
            .await
            .unwrap();

        assert_eq!(
            result,
            CastArticleVoteResult::VoteAlreadyCast {
                user_id,
                article_id
            }
        );
        assert!(save_port.saved().await.is_empty());
    }

    #[tokio::test]
    async fn test_casting_vote_returns_insufficient_karma() {
        let user_id = UserId::random();
        let save_port = Arc::new(SaveArticleVotePortMock::default());
        let service = build_post_rating_service(
            build_voting_user(user_id, 2, None),
            Arc::clone(&save_port),
            VoteChangePolicy::Reject,
        );

        let result = service
            .cast_article_vote(CastArticleVoteCommand::new(
                user_id,
                ArticleId::random(),
                Vote::Up,
            ))
            .await
            .unwrap();

        assert_eq!(result, CastArticleVoteResult::InsufficientKarma { user_id });
        assert!(save_port.saved().await.is_empty());
    }

    #[tokio::test]
    async fn test_insufficient_karma_reported_before_prior_vote() {
        let user_id = UserId::random();
        let save_port = Arc::new(SaveArticleVotePortMock::default());
        let service = build_post_rating_service(
            build_voting_user(user_id, 2, Some(Vote::Up)),
            Arc::clone(&save_port),
            VoteChangePolicy::Reject,
        );

        let result = service
            .cast_article_vote(CastArticleVoteCommand::new(
                user_id,
                ArticleId::random(),
                Vote::Up,
            ))
            .await
            .unwrap();

        assert_eq!(result, CastArticleVoteResult::InsufficientKarma { user_id });
        assert!(save_port.saved().await.is_empty());
    }

    #[tokio::test]
    async fn test_karma_equal_to_threshold_may_vote() {
        let user_id = UserId::random();
        let save_port = Arc::new(SaveArticleVotePortMock::default());
        let service = build_post_rating_service(
            build_voting_user(user_id, MIN_KARMA, None),
            Arc::clone(&save_port),
            VoteChangePolicy::Reject,
        );

        let result = service
            .cast_article_vote(CastArticleVoteCommand::new(
                user_id,
                ArticleId::random(),
                Vote::Down,
            ))
            .await
            .unwrap();

        assert!(result.is_success());
        assert_eq!(save_port.saved().await.len(), 1);
    }

    #[tokio::test]
    async fn test_voting_user_saved() {
        let user_id: UserId = "896ca302-0000-0000-0000-000000000000".parse().unwrap();
        let article_id: ArticleId = "dd329c97-0000-0000-0000-000000000000".parse().unwrap();
        let save_port = Arc::new(SaveArticleVotePortMock::default());
        let service = build_post_rating_service(
            build_voting_user(user_id, 21, None),
            Arc::clone(&save_port),
            VoteChangePolicy::Reject,
        );

        service
            .cast_article_vote(CastArticleVoteCommand::new(user_id, article_id, Vote::Down))
            .await
            .unwrap();

        assert_eq!(
            save_port.saved().await,
            vec![ArticleVote::new(article_id, user_id, Vote::Down)]
        );
    }

    #[tokio::test]
    async fn test_changed_vote_rejected_by_default_policy() {
        let user_id = UserId::random();
        let article_id = ArticleId::random();
        let save_port = Arc::new(SaveArticleVotePortMock::default());
        let service = build_post_rating_service(
            build_voting_user(user_id, 10, Some(Vote::Down)),
            Arc::clone(&save_port),
            VoteChangePolicy::Reject,
        );

        let result = service
            .cast_article_vote(CastArticleVoteCommand::new(user_id, article_id, Vote::Up))
            .await
            .unwrap();

        assert_eq!(
            result,
            CastArticleVoteResult::VoteAlreadyCast {
                user_id,
                article_id
            }
        );
        assert!(save_port.saved().await.is_empty());
        assert!(save_port.replaced().await.is_empty());
    }

    #[tokio::test]
    async fn test_changed_vote_replaced_under_replace_policy() {
        let user_id = UserId::random();
        let article_id = ArticleId::random();
        let save_port = Arc::new(SaveArticleVotePortMock::default());
        let service = build_post_rating_service(
            build_voting_user(user_id, 10, Some(Vote::Down)),
            Arc::clone(&save_port),
            VoteChangePolicy::Replace,
        );

        let result = service
            .cast_article_vote(CastArticleVoteCommand::new(user_id, article_id, Vote::Up))
            .await
            .unwrap();

        assert_eq!(
            result,
            CastArticleVoteResult::VoteSuccessfullyCast {
                user_id,
                article_id,
                vote: Vote::Up,
            }
        );
        assert!(save_port.saved().await.is_empty());
        assert_eq!(
            save_port.replaced().await,
            vec![ArticleVote::new(article_id, user_id, Vote::Up)]
        );
    }

    #[tokio::test]
    async fn test_storage_conflict_propagates() {
        let user_id = UserId::random();
        let article_id = ArticleId::random();
        let save_port = Arc::new(SaveArticleVotePortMock::failing(StorageError::Conflict {
            article_id,
            user_id,
        }));
        let service = build_post_rating_service(
            build_voting_user(user_id, 10, None),
            Arc::clone(&save_port),
            VoteChangePolicy::Reject,
        );

        let err = service
            .cast_article_vote(CastArticleVoteCommand::new(user_id, article_id, Vote::Up))
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(save_port.saved().await.len(), 1);
    }

    #[tokio::test]
    async fn test_outcome_dispatched_to_registered_handler() {
        let user_id = UserId::random();
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        let dispatcher = OutcomeDispatcher::new()
            .with_handler(OutcomeKind::InsufficientKarma, move |outcome| {
                log.lock().unwrap().push(outcome.user_id());
            });

        let service = build_post_rating_service(
            build_voting_user(user_id, 0, None),
            Arc::new(SaveArticleVotePortMock::default()),
            VoteChangePolicy::Reject,
        )
        .with_dispatcher(Arc::new(dispatcher));

        service
            .cast_article_vote(CastArticleVoteCommand::new(
                user_id,
                ArticleId::random(),
                Vote::Up,
            ))
            .await
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![user_id]);
    }

    #[tokio::test]
    async fn test_find_article_vote_returns_none() {
        let service = build_post_rating_service(
            build_voting_user(UserId::random(), 10, None),
            Arc::new(SaveArticleVotePortMock::default()),
            VoteChangePolicy::Reject,
        );

        let found = service
            .find_article_vote(ArticleId::random(), UserId::random())
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
