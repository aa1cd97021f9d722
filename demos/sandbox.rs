//! Sandbox Session
//!
//! This example drives a full session against the in-memory store.
//!
//! Key concepts:
//! - Stamping a catalog pattern through the controller
//! - Auto-stepping with a pause handle
//! - Replaying history backward without recomputation
//! - Exporting the checkpoint an external store would keep
//!
//! Run with: RUST_LOG=debug cargo run --example sandbox

use cellsim::checkpoint::Checkpoint;
use cellsim::config::SimulationConfig;
use cellsim::core::{catalog, Command, Outcome};
use cellsim::persistence::InMemoryStore;
use cellsim::Driver;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Sandbox Session Example ===\n");

    let config = SimulationConfig::default()
        .with_rows(12)
        .with_cols(12)
        .with_interval_ms(50);
    let store = InMemoryStore::new();
    let mut driver = Driver::new(&config, store.clone())?;

    let glider = catalog::find("Glider").ok_or("glider missing from catalog")?;
    driver
        .dispatch(Command::PutPattern {
            x: 1,
            y: 1,
            pattern: glider,
        })
        .await?;
    println!("Step {}:\n{}\n", driver.state().step(), driver.state().grid());

    // Let the loop run for a while, then pause it from another task.
    let handle = driver.handle();
    handle.start();
    let pauser = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(275)).await;
        handle.pause();
    });
    let ticks = driver.run().await?;
    pauser.await?;
    println!(
        "Ran {} ticks, now at step {}:\n{}\n",
        ticks,
        driver.state().step(),
        driver.state().grid()
    );

    // Walk back through history until the origin or the oldest kept step.
    while let Outcome::Replayed { .. } = driver.dispatch(Command::StepOut).await? {}
    println!(
        "Back at step {}:\n{}\n",
        driver.state().step(),
        driver.state().grid()
    );
    println!("History holds steps {:?}", driver.history().steps());

    if let Some(id) = driver.session() {
        println!("Stored as {} ({} record)", id, store.len());
    }
    println!("Checkpoint: {}", Checkpoint::capture(driver.state()).to_json()?);

    println!("\n=== Example Complete ===");
    Ok(())
}
