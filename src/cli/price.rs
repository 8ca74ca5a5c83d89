use super::ui;
use crate::core::dataset::Dataset;
use crate::core::date::DateKey;
use crate::core::resolver::Resolved;
use crate::core::series::Provenance;
use anyhow::Result;
use comfy_table::Cell;
use tracing::warn;

fn provenance_label(resolved: &Resolved) -> &'static str {
    match resolved.provenance {
        Some(Provenance::Guaranteed) => "guaranteed",
        Some(Provenance::Estimated) => "estimated",
        None => "derived",
    }
}

/// Resolves one model/date pair and prints the outcome. Unavailable is a
/// reported state, not a process failure.
pub fn run(dataset: &Dataset, currency: &str, model: &str, date: &str) -> Result<()> {
    let date: DateKey = date.parse()?;

    let resolved = match dataset.resolver.resolve(model, &date) {
        Ok(resolved) => resolved,
        Err(e) => {
            warn!(%model, %date, error = %e, "No price available");
            println!(
                "{}",
                ui::style_text(&format!("No estimate available: {e}"), ui::StyleType::Error)
            );
            return Ok(());
        }
    };

    let name = dataset
        .catalog
        .get(model)
        .map_or_else(|| model.to_string(), |spec| spec.name.to_string());

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Model"),
        ui::header_cell("Date"),
        ui::header_cell(&format!("Price ({currency})")),
        ui::header_cell("Method"),
        ui::header_cell("Source"),
    ]);
    table.add_row(vec![
        Cell::new(name),
        Cell::new(date.to_string()),
        Cell::new(format!("{:.2}", resolved.price)),
        Cell::new(resolved.method.to_string()),
        Cell::new(provenance_label(&resolved)),
    ]);

    println!("{table}");
    Ok(())
}
