use crate::config::{RatingConfig, VoteChangePolicy};
use crate::domain::model::{ArticleVote, Karma, UserId};
use crate::utils::error::{RatingError, Result};
use crate::utils::validation::{
    validate_reference, validate_required_field, validate_unique, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub rating: RatingSection,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub users: Vec<UserSeed>,
    #[serde(default)]
    pub votes: Vec<ArticleVote>,
}

/// `[rating]` as written in the file. `min_karma` may instead come from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSection {
    pub min_karma: Option<Karma>,
    #[serde(default)]
    pub vote_change_policy: VoteChangePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSeed {
    pub id: UserId,
    pub karma: Karma,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RatingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RatingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MIN_KARMA})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RatingError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let seeded_users =
            validate_unique("users.id", self.users.iter().map(|u| u.id), "Duplicate user id")?;

        for vote in &self.votes {
            validate_reference("votes.user_id", &vote.user_id, &seeded_users)?;
        }

        validate_unique(
            "votes",
            self.votes
                .iter()
                .map(|v| format!("{}/{}", v.article_id, v.user_id)),
            "A user can only have one vote per article",
        )?;

        Ok(())
    }

    /// Final rating settings. Command-line values win over the file.
    pub fn resolve_rating(
        &self,
        min_karma_override: Option<i64>,
        policy_override: Option<VoteChangePolicy>,
    ) -> Result<RatingConfig> {
        let min_karma = min_karma_override
            .map(Karma::new)
            .or(self.rating.min_karma);
        let min_karma = validate_required_field("rating.min_karma", &min_karma)?;

        Ok(RatingConfig::new(*min_karma).with_vote_change_policy(
            policy_override.unwrap_or(self.rating.vote_change_policy),
        ))
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
