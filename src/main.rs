use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use fittrack::coach::{Coach, CoachRequest};
use fittrack::config::AppConfig;
use fittrack::domains::DomainStores;
use fittrack::events::EventBus;
use fittrack::food::StaticFoodCatalog;
use fittrack::goals::GoalType;
use fittrack::llm::create_provider;
use fittrack::onboarding::{AppState, OnboardingManager, SetupStep};
use fittrack::store::{BlobStore, Container, LibSqlStore};
use fittrack::tracking::Tracker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    eprintln!("fittrack v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Database: {}", config.db_path.display());

    // ── Store ───────────────────────────────────────────────────────────
    let store: Arc<dyn BlobStore> = Arc::new(
        LibSqlStore::new_local(&config.db_path)
            .await
            .with_context(|| format!("opening database at {}", config.db_path.display()))?,
    );
    let app = Container::<AppState>::load(Arc::clone(&store)).await?;
    let domains = DomainStores::load(Arc::clone(&store)).await?;

    // ── Onboarding ──────────────────────────────────────────────────────
    let manager = OnboardingManager::new(
        Arc::clone(&app),
        domains.clone(),
        EventBus::new(),
        config.pairing_delay,
    );
    let screen = manager.start_if_needed().await?;
    eprintln!("   Screen: {}", screen);
    match manager.next_step().await {
        SetupStep::Pairing { goal_type } => eprintln!("   Next: pair devices for {}", goal_type),
        SetupStep::Wizard { goal_type, .. } => eprintln!("   Next: {} setup", goal_type),
        SetupStep::Done => eprintln!("   Setup: complete"),
    }
    let configured = domains.configured().await;
    eprintln!(
        "   Configured: {}",
        if configured.is_empty() {
            "none".to_string()
        } else {
            configured
                .iter()
                .map(|g| g.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }
    );

    // ── Today ───────────────────────────────────────────────────────────
    let tracker = Tracker::new(
        Arc::clone(&app),
        domains.clone(),
        Arc::new(StaticFoodCatalog::default()),
    );
    let today = tracker.today(Utc::now().date_naive()).await;
    for goal in manager.active_goals().await {
        eprintln!(
            "   Goal: {} ({:.0} / {:.0})",
            goal.title, goal.current_value, goal.target_value
        );
    }

    // ── Coach ───────────────────────────────────────────────────────────
    let llm = match &config.llm {
        Some(llm_config) => Some(create_provider(llm_config)?),
        None => {
            eprintln!("   Coach: offline (set ANTHROPIC_API_KEY to enable)");
            None
        }
    };
    let coach = Coach::new(llm);

    // `fittrack <goal_type> <message...>` asks the coach once.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Some((goal_arg, words)) = args.split_first() {
        let goal_type = GoalType::ALL
            .into_iter()
            .find(|g| g.to_string() == *goal_arg)
            .with_context(|| format!("unknown goal type {goal_arg:?}"))?;
        let mut request = CoachRequest::new(goal_type, words.join(" "), today)
            .with_profile(domains.profile(goal_type).await);
        if let Some(user) = manager.user_profile().await {
            request = request.with_user(user);
        }
        let response = coach.respond(&request).await;
        println!("{}", response.message);
        for action in &response.action_suggestions {
            println!("  - {}", action);
        }
        if let Some(tip) = &response.motivational_tip {
            println!("Tip: {}", tip);
        }
    }

    Ok(())
}
