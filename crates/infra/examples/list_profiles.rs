//! Example: Listing the profiles of a service instance
//!
//! Loads configuration the same way an application would and prints one page
//! of profiles with the transaction id the service echoed back.
//!
//! # Setup
//!
//! 1. Describe the service, either with environment variables: ```bash export
//!    COMPLIANCE_URL=https://compliance.example.com/api export
//!    COMPLIANCE_APIKEY=... export COMPLIANCE_INSTANCE_ID=... ```
//!    or with a `compliance.env` / `compliance.toml` in the working directory.
//!
//! 2. Run this example: ```bash cargo run -p compliance-infra --example
//!    list_profiles ```

use compliance_core::options::ListProfilesOptions;
use compliance_infra::{build_service, config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = config::load()?;
    let Some(instance_id) = config.instance_id.clone() else {
        println!("ℹ️  COMPLIANCE_INSTANCE_ID is not set; nothing to list");
        return Ok(());
    };

    let service = build_service(&config)?;
    let options = ListProfilesOptions::new(&instance_id).with_limit(25);
    let response = service.list_profiles(&options).await?;

    println!("Profiles in instance {instance_id}");
    println!("  transaction: {}", response.header("x-correlation-id").unwrap_or("-"));

    let page = response.result.unwrap_or_default();
    for profile in &page.profiles {
        println!(
            "  {:<40} {:<8} {}",
            profile.profile_name,
            profile.profile_version.as_deref().unwrap_or("-"),
            profile.id.as_deref().unwrap_or("-")
        );
    }

    if let Some(start) = page.page.next_start() {
        println!("  more results: pass start={start}");
    }

    Ok(())
}
