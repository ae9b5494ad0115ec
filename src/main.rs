//! Demo binary for pubsim
//!
//! Loads configuration, initialises logging and runs a short publish/pull
//! scenario, printing the resulting global stats as JSON.

use pubsim::Simulator;
use pubsim::config::load_config;
use serde_json::json;
use tracing::{error, info};

fn main() {
    let _ = dotenvy::dotenv();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    pubsim::utils::logging::init(&config.logging.level);

    let mut simulator = Simulator::from_settings(&config);
    if let Err(e) = run_demo(&mut simulator) {
        error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

fn run_demo(simulator: &mut Simulator) -> Result<(), Box<dyn std::error::Error>> {
    simulator.create_topic("orders", None, None);
    simulator.create_subscription("orders-sub", "orders", None, None)?;

    simulator.subscribe("orders-sub", |env| {
        info!(message_id = env.message_id(), "callback received {}", env.data());
        Ok(())
    })?;

    let message_id = simulator.publish_message("orders", json!({"id": 1}), None)?;
    info!("Published {}", message_id);

    for env in simulator.pull_messages("orders-sub", 10, true)? {
        let order: serde_json::Value = env.decode()?;
        info!("Pulled {} -> {}", env.message_id(), order);
    }

    let stats = simulator.get_global_stats();
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
