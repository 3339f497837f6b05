//! TaskTally demo binary
//!
//! A scripted walkthrough of the component: builds the store, subscribes to
//! its snapshots, and drives the end-to-end flows by dispatching the actions
//! carried by the rendered controls, printing the re-rendered text
//! projection after every state change.

use std::sync::Arc;
use std::time::Duration;
use tasktally_app::view::render;
use tasktally_app::{AppAction, AppEnvironment, AppState, app_reducer};
use tasktally_core::environment::{RandomIdGenerator, SystemClock};
use tasktally_runtime::Store;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Renders the latest published snapshot
fn rerender(snapshots: &mut watch::Receiver<AppState>) -> String {
    let state = snapshots.borrow_and_update().clone();
    render(&state).to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasktally=debug,tasktally_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== TaskTally Demo ===\n");

    // Create environment and store
    let env = AppEnvironment::new(Arc::new(SystemClock), Arc::new(RandomIdGenerator));
    let store = Store::new(AppState::default(), app_reducer(), env);
    let mut snapshots = store.subscribe();
    info!("store created");

    // Initial render
    println!("{}\n", rerender(&mut snapshots));

    // Type into the field and submit
    println!(">>> Typing \"buy milk\"");
    store
        .send(AppAction::InputChanged("buy milk".to_string()))
        .await?;
    println!("{}\n", rerender(&mut snapshots));

    println!(">>> Clicking [Add Todo]");
    store.send(AppAction::FormSubmitted).await?;
    println!("{}\n", rerender(&mut snapshots));

    // Add a second item
    println!(">>> Typing \"write documentation\" and clicking [Add Todo]");
    store
        .send(AppAction::InputChanged("write documentation".to_string()))
        .await?;
    store.send(AppAction::FormSubmitted).await?;
    println!("{}\n", rerender(&mut snapshots));

    // Toggle the first item through its rendered control
    let document = render(&snapshots.borrow().clone());
    if let Some(row) = document.rows.first() {
        println!(
            ">>> Clicking [{}] on \"{}\"",
            row.toggle.label, row.label.content
        );
        store.send(row.toggle.action.clone()).await?;
    }
    println!("{}\n", rerender(&mut snapshots));

    let (completed, total) = store
        .state(|s| (s.todos.completed_count(), s.todos.len()))
        .await;
    println!("Completed: {completed}/{total}\n");

    // Remove the second item through its rendered control
    let document = render(&snapshots.borrow().clone());
    if let Some(row) = document.rows.get(1) {
        println!(
            ">>> Clicking [{}] on \"{}\"",
            row.remove.label, row.label.content
        );
        store.send(row.remove.action.clone()).await?;
    }
    println!("{}\n", rerender(&mut snapshots));

    // Drive the counter through its rendered controls
    let document = render(&snapshots.borrow().clone());
    println!(">>> Clicking [+] twice, then [-]");
    store.send(document.counter.increment.action.clone()).await?;
    store.send(document.counter.increment.action.clone()).await?;
    store.send(document.counter.decrement.action.clone()).await?;
    println!("{}\n", rerender(&mut snapshots));

    println!(">>> Clicking [Reset]");
    store.send(document.counter.reset.action.clone()).await?;
    println!("{}\n", rerender(&mut snapshots));

    // Component unmount
    store.shutdown(Duration::from_secs(1)).await?;
    info!("store shut down");

    println!("=== Demo Complete ===");
    Ok(())
}
