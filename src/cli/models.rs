use super::ui;
use crate::core::dataset::Dataset;
use crate::core::date::DateKey;
use crate::core::estimator::EstimatorChain;
use anyhow::Result;
use comfy_table::Cell;

/// Lists the models on the market at a date, with a price estimate from the
/// standard estimator chain where one can be produced.
pub fn run(dataset: &Dataset, currency: &str, date: &str) -> Result<()> {
    let date: DateKey = date.parse()?;
    let available = dataset.catalog.available_on(&date);

    if available.is_empty() {
        println!(
            "{}",
            ui::style_text(
                &format!("No models were on the market on {date}"),
                ui::StyleType::Subtle
            )
        );
        return Ok(());
    }

    let chain = EstimatorChain::standard(dataset);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Model"),
        ui::header_cell("Hashrate (TH/s)"),
        ui::header_cell("Power (W)"),
        ui::header_cell("Launch"),
        ui::header_cell(&format!("Price ({currency})")),
        ui::header_cell("Method"),
    ]);

    for spec in &available {
        let estimate = chain.estimate(spec.key, &date);
        let price_cell =
            ui::format_optional_cell(estimate.as_ref().map(|e| e.price), |p| format!("{p:.2}"));
        let method_cell = match &estimate {
            Some(e) => Cell::new(&e.method),
            None => ui::na_cell(false),
        };
        table.add_row(vec![
            Cell::new(spec.name),
            Cell::new(format!("{:.1}", spec.hashrate)),
            Cell::new(spec.power.to_string()),
            Cell::new(spec.launch.to_string()),
            price_cell,
            method_cell,
        ]);
    }

    println!(
        "Models available on {}\n\n{table}",
        ui::style_text(&date.to_string(), ui::StyleType::Title)
    );
    Ok(())
}
