use super::ui;
use crate::core::dataset::Dataset;
use crate::core::date::DateKey;
use crate::core::resolver::Resolved;
use anyhow::{Context, Result};
use comfy_table::Cell;
use std::path::Path;
use tracing::{info, warn};

/// Monthly price curve for one model, from its launch month through its
/// last known observation.
fn monthly_curve(dataset: &Dataset, model: &str) -> Option<Vec<(DateKey, Resolved)>> {
    let series = dataset.resolver.series(model)?;
    let first = *series.first_key()?;
    let last = *series.last_key()?;

    let (mut year, mut month) = (first.year(), first.month());
    let end = (last.year(), last.month());
    let mut curve = Vec::new();

    while (year, month) <= end {
        let date = DateKey::MonthBucket { year, month };
        // Every month inside the observed range resolves: the launch month
        // observation is always a `before` anchor.
        if let Ok(resolved) = dataset.resolver.resolve(model, &date) {
            curve.push((date, resolved));
        }
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    Some(curve)
}

fn to_csv(currency: &str, curve: &[(DateKey, Resolved)]) -> String {
    let mut csv = format!("date,price_{},method\n", currency.to_lowercase());
    for (date, resolved) in curve {
        csv.push_str(&format!(
            "{},{:.2},{}\n",
            date, resolved.price, resolved.method
        ));
    }
    csv
}

pub fn run(dataset: &Dataset, currency: &str, model: &str, csv_path: Option<&Path>) -> Result<()> {
    let Some(curve) = monthly_curve(dataset, model) else {
        warn!(%model, "No series for model");
        println!(
            "{}",
            ui::style_text(
                &format!("No estimate available: no price data exists for model '{model}'"),
                ui::StyleType::Error
            )
        );
        return Ok(());
    };

    if let Some(path) = csv_path {
        let csv = to_csv(currency, &curve);
        std::fs::write(path, csv)
            .with_context(|| format!("Failed to write CSV file to {}", path.display()))?;
        info!("Wrote price history to {}", path.display());
        println!("Wrote {} rows to {}", curve.len(), path.display());
        return Ok(());
    }

    let name = dataset
        .catalog
        .get(model)
        .map_or_else(|| model.to_string(), |spec| spec.name.to_string());

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell(&format!("Price ({currency})")),
        ui::header_cell("Method"),
        ui::header_cell("Change"),
    ]);

    let mut previous: Option<f64> = None;
    for (date, resolved) in &curve {
        let change_cell = match previous {
            Some(prev) if prev > 0.0 => ui::change_cell((resolved.price - prev) / prev * 100.0),
            _ => ui::na_cell(false),
        };
        table.add_row(vec![
            Cell::new(date.to_string()),
            Cell::new(format!("{:.2}", resolved.price)),
            Cell::new(resolved.method.to_string()),
            change_cell,
        ]);
        previous = Some(resolved.price);
    }

    println!(
        "Price history: {}\n\n{table}",
        ui::style_text(&name, ui::StyleType::Title)
    );
    Ok(())
}
