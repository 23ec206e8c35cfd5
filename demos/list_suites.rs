//! Lists the suites of the configured project.
//!
//! Reads `testrail.toml` from the working directory (environment variables
//! such as `TR_TESTRAIL__PASSWORD` override it), then prints the session
//! summary and the suites.
//!
//! ```sh
//! cargo run --example list_suites
//! ```

use testrail_api::{logging, TestRailClient, TestRailConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = TestRailConfig::load()?;
    logging::init(config.logging())?;

    let client = TestRailClient::connect(&config).await?;
    print!("{}", client.summary());

    let suites = client.get_suites().await?;
    println!("{}", serde_json::to_string_pretty(&suites)?);

    Ok(())
}
