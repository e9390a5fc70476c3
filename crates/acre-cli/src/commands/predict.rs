//! Prediction command implementation

use acre_core::db::Database;
use acre_core::export::export_predictions_json;
use acre_core::models::{ConfidenceBand, Prediction};
use acre_core::predict::{predict_module, PredictionConfig};
use anyhow::Result;

use super::truncate;

fn band_icon(band: ConfidenceBand) -> &'static str {
    match band {
        ConfidenceBand::High => "🟢",
        ConfidenceBand::Medium => "🟡",
        ConfidenceBand::Low => "🟠",
    }
}

/// Run the engine over a module's events and return the predictions
pub fn run_predictions(
    db: &Database,
    module: &str,
    config: &PredictionConfig,
) -> Result<Vec<Prediction>> {
    Ok(predict_module(db, module, config)?)
}

pub fn cmd_predict(
    db: &Database,
    module: &str,
    config: &PredictionConfig,
    json: bool,
) -> Result<()> {
    let predictions = run_predictions(db, module, config)?;

    if json {
        export_predictions_json(&predictions, std::io::stdout().lock())?;
        println!();
        return Ok(());
    }

    if predictions.is_empty() {
        println!("Not enough data yet for {}.", module);
        println!(
            "   Log at least {} past or present events of the same type to see patterns.",
            config.min_events
        );
        return Ok(());
    }

    println!();
    println!("🔮 Predictions for {}", module);
    println!("   ─────────────────────────────────────────────────────────────");

    for p in &predictions {
        println!(
            "   {} {:24} │ {} │ {:>3}% confidence",
            band_icon(p.band()),
            truncate(&p.title, 24),
            p.predicted_date,
            p.confidence
        );
        println!("      {}", p.description);
        println!("      Based on: {}", p.based_on.join(", "));
    }

    Ok(())
}
