use anyhow::Context;
use clap::Parser;
use post_rating::config::cli::{outcome_exit_code, EXIT_ERROR, EXIT_SUCCESS};
use post_rating::utils::{logger, validation::Validate};
use post_rating::{
    CastArticleVoteUseCase, CliArgs, InMemoryVoteStore, Karma, OutcomeDispatcher, OutcomeKind,
    PostRatingService, TomlConfig,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 載入 TOML 配置
    let file_config = match &args.config {
        Some(path) => TomlConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => TomlConfig::default(),
    };

    if args.json_logs || file_config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose || file_config.verbose());
    }

    tracing::info!("Starting post-rating CLI");

    // 驗證配置
    let rating_config = match file_config
        .validate()
        .and_then(|_| file_config.resolve_rating(args.min_karma, args.vote_change_policy))
    {
        Ok(rating_config) => rating_config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(EXIT_ERROR);
        }
    };
    tracing::debug!("Rating config: {:?}", rating_config);

    let store = Arc::new(
        InMemoryVoteStore::from_config(&file_config)
            .await
            .context("Failed to seed vote store")?,
    );
    if let Some(karma) = args.karma {
        store.insert_user(args.user, Karma::new(karma)).await;
    }

    let dispatcher = OutcomeDispatcher::new()
        .with_handler(OutcomeKind::VoteSuccessfullyCast, |outcome| {
            tracing::info!("📨 Vote recorded: {:?}", outcome);
        })
        .with_handler(OutcomeKind::VoteAlreadyCast, |outcome| {
            tracing::info!("Duplicate vote ignored for user {}", outcome.user_id());
        })
        .with_handler(OutcomeKind::InsufficientKarma, |outcome| {
            tracing::info!("Vote refused for user {}", outcome.user_id());
        });

    let service = PostRatingService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        rating_config,
    )
    .with_dispatcher(Arc::new(dispatcher));

    match service.cast_article_vote(args.command()).await {
        Ok(outcome) => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            let code = outcome_exit_code(&outcome);
            if code != EXIT_SUCCESS {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Casting vote failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(EXIT_ERROR);
        }
    }
}
