//! Command-line demo of both todo front ends.
//!
//! Runs the imperative controller and the reactive store against file-backed
//! storage in `TODO_DATA_DIR` and prints what they render. Running it twice
//! shows the persisted lists being picked up again.

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use todo::announce::{FanOut, LiveRegion, TracingAnnouncer};
use todo::view::render_list;
use todo::{Config, Focus, Key, TodoController, TodoId, TodoStore};
use todo_core::environment::{Announcer, SystemClock};
use todo_core::storage::{FileStorage, KeyValueStorage};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_items(items: &[todo::ItemView]) {
    for item in items {
        let marker = if item.completed { "✓" } else { " " };
        let animating = if item.animating { " *" } else { "" };
        println!("  [{marker}] {} {}{animating}", item.text, item.emoji);
    }
}

fn run_controller(storage: Arc<dyn KeyValueStorage>, config: &Config) {
    println!("=== Todo Controller ===\n");

    let region = Arc::new(LiveRegion::new(Arc::new(SystemClock), config.announcement_ttl()));
    let announcer = FanOut::new()
        .with(Arc::new(TracingAnnouncer))
        .with(Arc::clone(&region) as Arc<dyn Announcer>);
    let mut controller = TodoController::load(storage, Arc::new(announcer), print_items, config);

    controller.set_draft("Buy milk");
    println!("\nAdd button enabled: {}", controller.can_submit());
    controller.submit();

    let last = controller.len().saturating_sub(1);
    let outcome = controller.handle_key(Focus::Item(last), &Key::from_name("Enter"));
    println!("\nEnter on item {last}: {outcome:?}");
    let outcome = controller.handle_key(Focus::Item(last), &Key::from_name("ArrowDown"));
    println!("ArrowDown on item {last}: {outcome:?}");

    println!("\nLive announcements:");
    for message in region.active() {
        println!("  {message}");
    }

    println!("\nMarkup:\n{}", render_list(&controller.item_views()));
}

async fn run_store(storage: Arc<dyn KeyValueStorage>, config: &Config) -> anyhow::Result<()> {
    println!("\n=== Todo Store ===\n");

    let store = TodoStore::open(storage, config).await;
    let _view = store
        .on_change(|items: &[todo::ItemView]| {
            println!("-- render --");
            print_items(items);
        })
        .await;

    store.set_loading(true).await?;
    store.add("Walk dog").await?;
    let mut animation = store.toggle(TodoId::new(3)).await?;
    store.set_loading(false).await?;

    let summary = store.summary().await;
    println!(
        "\nCompleted: {}, remaining: {}, all completed: {}",
        summary.completed_count, summary.remaining_count, summary.all_completed
    );

    animation
        .wait_with_timeout(config.animation_duration() + Duration::from_secs(1))
        .await
        .context("toggle animation did not finish")?;

    store
        .shutdown(Duration::from_secs(5))
        .await
        .context("store did not shut down cleanly")?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=debug,todo_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(data_dir = %config.data_dir.display(), "Starting todo demo");

    let storage: Arc<dyn KeyValueStorage> = Arc::new(
        FileStorage::open(config.data_dir.clone())
            .with_context(|| format!("cannot open storage in {}", config.data_dir.display()))?,
    );

    run_controller(Arc::clone(&storage), &config);
    run_store(storage, &config).await?;

    println!("\n=== Demo Complete ===");
    Ok(())
}
