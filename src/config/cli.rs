use crate::config::VoteChangePolicy;
use crate::domain::model::{
    ArticleId, CastArticleVoteCommand, CastArticleVoteResult, UserId, Vote,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "post-rating")]
#[command(about = "Cast an article vote against a seeded in-memory vote store")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub user: UserId,

    #[arg(long)]
    pub article: ArticleId,

    /// up or down
    #[arg(long)]
    pub vote: Vote,

    /// Override rating.min_karma from the config file
    #[arg(long, allow_hyphen_values = true)]
    pub min_karma: Option<i64>,

    /// reject or replace
    #[arg(long)]
    pub vote_change_policy: Option<VoteChangePolicy>,

    /// Karma of --user when it is not seeded in the config file
    #[arg(long, allow_hyphen_values = true)]
    pub karma: Option<i64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliArgs {
    pub fn command(&self) -> CastArticleVoteCommand {
        CastArticleVoteCommand::new(self.user, self.article, self.vote)
    }
}

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_REJECTED: i32 = 2;

/// Process exit code for a decided vote.
pub fn outcome_exit_code(outcome: &CastArticleVoteResult) -> i32 {
    match outcome {
        CastArticleVoteResult::VoteSuccessfullyCast { .. } => EXIT_SUCCESS,
        CastArticleVoteResult::VoteAlreadyCast { .. }
        | CastArticleVoteResult::InsufficientKarma { .. } => EXIT_REJECTED,
    }
}
