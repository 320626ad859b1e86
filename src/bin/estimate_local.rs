//! Prints the local footprint estimate for a questionnaire JSON file.
//!
//! Usage: `estimate_local <questionnaire.json>` (use `-` to read stdin).

use anyhow::Context;
use carbon_footprint_api::models::LifestyleInput;
use carbon_footprint_api::orchestrator::compute_locally;
use std::io::Read;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: estimate_local <questionnaire.json | ->")?;

    let raw = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read questionnaire from stdin")?;
        buf
    } else {
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?
    };

    let input: LifestyleInput =
        serde_json::from_str(&raw).context("Questionnaire is not valid")?;
    tracing::debug!("Estimating locally for {:?}", input.transport_mode);

    let result = compute_locally(&input);
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
