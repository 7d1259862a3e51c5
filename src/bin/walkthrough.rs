//! ESP API walkthrough
//! Calls every service once, in order, and prints what the provider returns.

use integrations_esp::observability::LoggingConfig;
use integrations_esp::walkthrough::{Walkthrough, WalkthroughSettings};

#[tokio::main]
async fn main() {
    if let Err(e) = LoggingConfig::from_env().init() {
        eprintln!("Failed to initialise logging: {}", e);
    }

    println!("{}", "=".repeat(60));
    println!("ESP API Walkthrough (Rust)");
    println!("{}", "=".repeat(60));

    let settings = WalkthroughSettings::from_env();
    println!("\nTarget:");
    println!("  Base URL: {}", settings.base_url);
    println!("  Sender: {}", settings.sender);
    println!("  Recipient: {}", settings.recipient);
    println!("  Domain: {}", settings.domain);

    if let Some(warning) = settings.placeholder_warning() {
        println!("\nWARNING: {}", warning);
    }

    let mut walkthrough = match Walkthrough::new(settings) {
        Ok(walkthrough) => walkthrough,
        Err(e) => {
            eprintln!("\nFailed to create ESP clients: {}", e);
            std::process::exit(1);
        }
    };

    let report = walkthrough.run().await;
    report.print_summary();
}
