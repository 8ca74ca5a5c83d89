use super::ui;
use crate::core::config::AppConfig;
use crate::core::dataset::Dataset;
use crate::core::date::DateKey;
use crate::core::simulate::{self, Comparison, ComparisonParams};
use anyhow::{Context, Result};
use comfy_table::Cell;
use console::style;
use std::path::PathBuf;
use tracing::{debug, info};

pub struct CompareArgs {
    pub model: String,
    pub start: String,
    pub btc_start: f64,
    pub btc_end: f64,
    /// Hardware price; resolved from the historical series when omitted.
    pub price: Option<f64>,
    pub csv: Option<PathBuf>,
}

pub fn run(dataset: &Dataset, config: &AppConfig, args: &CompareArgs) -> Result<()> {
    let spec = dataset
        .catalog
        .get(&args.model)
        .with_context(|| format!("Unknown model '{}'", args.model))?;

    let start: DateKey = args.start.parse()?;
    let start_date = start
        .to_naive_date()
        .with_context(|| format!("Invalid start date '{start}'"))?;

    let miner_price = match args.price {
        Some(price) => price,
        None => {
            let resolved = dataset.resolver.resolve(&args.model, &start)?;
            debug!(
                model = %args.model, %start, price = resolved.price, method = %resolved.method,
                "Resolved hardware price for comparison"
            );
            resolved.price
        }
    };

    let defaults = &config.compare;
    let params = ComparisonParams {
        hashrate: spec.hashrate,
        power: spec.power,
        miner_price,
        btc_start_price: args.btc_start,
        btc_end_price: args.btc_end,
        electricity_rate: defaults.electricity_rate,
        pool_fee: defaults.pool_fee_pct / 100.0,
        difficulty_growth: defaults.difficulty_growth_pct / 100.0,
        start_date,
        days: defaults.days,
        residual_fraction: defaults.residual_pct / 100.0,
    };

    let comparison = simulate::compare(params);

    if let Some(path) = &args.csv {
        let csv = to_csv(spec.name, &config.currency, &comparison);
        std::fs::write(path, csv)
            .with_context(|| format!("Failed to write CSV file to {}", path.display()))?;
        info!("Wrote comparison to {}", path.display());
        println!("Wrote comparison to {}", path.display());
        return Ok(());
    }

    display(spec.name, &config.currency, &comparison);
    Ok(())
}

fn display(model_name: &str, currency: &str, c: &Comparison) {
    let physical = &c.physical;
    let hold = &c.hold;

    println!(
        "Strategy comparison: {} over {} days\n",
        ui::style_text(model_name, ui::StyleType::Title),
        c.params.days
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell("Physical mining"),
        ui::header_cell("Buy & hold BTC"),
    ]);
    table.add_row(vec![
        Cell::new(format!("Investment ({currency})")),
        Cell::new(format!("{:.2}", c.params.miner_price)),
        Cell::new(format!("{:.2}", c.params.miner_price)),
    ]);
    table.add_row(vec![
        Cell::new("BTC acquired"),
        Cell::new(format!("{:.4} mined", physical.btc_mined)),
        Cell::new(format!("{:.4} bought", hold.btc_bought)),
    ]);
    table.add_row(vec![
        Cell::new(format!("Electricity ({currency})")),
        Cell::new(format!("-{:.2}", physical.electricity_cost)),
        Cell::new("0.00"),
    ]);
    table.add_row(vec![
        Cell::new(format!("Pool fees ({currency})")),
        Cell::new(format!("-{:.2}", physical.pool_fees)),
        Cell::new("0.00"),
    ]);
    table.add_row(vec![
        Cell::new("BTC deducted (mining equivalent)"),
        Cell::new("-"),
        Cell::new(format!("-{:.4}", hold.btc_deducted)),
    ]);
    table.add_row(vec![
        Cell::new(format!("Hardware residual ({currency})")),
        Cell::new(format!("{:.2}", physical.residual)),
        Cell::new("-"),
    ]);
    table.add_row(vec![
        Cell::new(format!("Net profit ({currency})")),
        Cell::new(format!("{:.2}", physical.net_profit)),
        Cell::new(format!("{:.2}", hold.net_profit)),
    ]);
    table.add_row(vec![
        Cell::new("ROI"),
        ui::change_cell(physical.roi_pct),
        ui::change_cell(hold.roi_pct),
    ]);
    println!("{table}");

    let advantage = c.hold_advantage();
    let (winner, margin) = if advantage > 0.0 {
        ("Buy & hold BTC", advantage)
    } else {
        ("Physical mining", -advantage)
    };
    let banner = format!(
        "{winner} outperforms by {margin:.2} {currency} ({:.1}% better ROI)",
        (hold.roi_pct - physical.roi_pct).abs()
    );
    println!("\n{}", style(&banner).bold().green());

    ui::print_separator();
    println!(
        "First-year monthly breakdown (valued at BTC start price {:.2} {currency})\n",
        c.params.btc_start_price
    );

    let mut monthly = ui::new_styled_table();
    monthly.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell("Mined (BTC)"),
        ui::header_cell(&format!("Costs ({currency})")),
        ui::header_cell(&format!("Mining net ({currency})")),
        ui::header_cell("Held (BTC)"),
        ui::header_cell(&format!("Hold value ({currency})")),
    ]);
    for row in &c.monthly {
        monthly.add_row(vec![
            Cell::new(row.month.to_string()),
            Cell::new(format!("{:.6}", row.physical_btc_mined)),
            Cell::new(format!("{:.2}", row.physical_costs)),
            Cell::new(format!("{:.2}", row.physical_net_value)),
            Cell::new(format!("{:.6}", row.virtual_btc_held)),
            Cell::new(format!("{:.2}", row.virtual_value)),
        ]);
    }
    println!("{monthly}");
}

fn to_csv(model_name: &str, currency: &str, c: &Comparison) -> String {
    let physical = &c.physical;
    let hold = &c.hold;
    let params = &c.params;
    let mut csv = String::new();

    csv.push_str("PARAMETERS\n");
    csv.push_str(&format!("Miner Model,{model_name}\n"));
    csv.push_str(&format!("Hashrate (TH/s),{}\n", params.hashrate));
    csv.push_str(&format!("Power (W),{}\n", params.power));
    csv.push_str(&format!(
        "Initial Investment ({currency}),{:.2}\n",
        params.miner_price
    ));
    csv.push_str(&format!("BTC Start Price,{:.2}\n", params.btc_start_price));
    csv.push_str(&format!("BTC End Price,{:.2}\n", params.btc_end_price));
    csv.push_str(&format!(
        "Electricity Rate ({currency}/kWh),{}\n",
        params.electricity_rate
    ));
    csv.push_str(&format!("Pool Fee (%),{}\n", params.pool_fee * 100.0));
    csv.push_str(&format!(
        "Analysis Period,{} to {}\n\n",
        params.start_date, params.end_date()
    ));

    csv.push_str("PHYSICAL MINING STRATEGY\n");
    csv.push_str(&format!("Total BTC Mined,{:.8}\n", physical.btc_mined));
    csv.push_str(&format!(
        "Total Electricity Costs,-{:.2}\n",
        physical.electricity_cost
    ));
    csv.push_str(&format!("Total Pool Fees,-{:.2}\n", physical.pool_fees));
    csv.push_str(&format!("Final BTC Value,{:.2}\n", physical.btc_value));
    csv.push_str(&format!("Hardware Residual Value,{:.2}\n", physical.residual));
    csv.push_str(&format!("Net Profit/Loss,{:.2}\n", physical.net_profit));
    csv.push_str(&format!("ROI,{:.2}%\n\n", physical.roi_pct));

    csv.push_str("BUY & HOLD STRATEGY\n");
    csv.push_str(&format!("Initial BTC Purchase,{:.8}\n", hold.btc_bought));
    csv.push_str(&format!(
        "BTC Deducted (Mining Equivalent),-{:.8}\n",
        hold.btc_deducted
    ));
    csv.push_str(&format!("Final BTC Held,{:.8}\n", hold.btc_held));
    csv.push_str(&format!("Final Value,{:.2}\n", hold.final_value));
    csv.push_str(&format!("Net Profit/Loss,{:.2}\n", hold.net_profit));
    csv.push_str(&format!("ROI,{:.2}%\n\n", hold.roi_pct));

    csv.push_str("COMPARISON SUMMARY\n");
    let advantage = c.hold_advantage();
    let winner = if advantage > 0.0 {
        "Buy & hold BTC"
    } else {
        "Physical mining"
    };
    csv.push_str(&format!("Winner,{winner}\n"));
    csv.push_str(&format!("Profit Difference,{:.2}\n", advantage.abs()));
    csv.push_str(&format!(
        "ROI Difference,{:.2}%\n\n",
        (hold.roi_pct - physical.roi_pct).abs()
    ));

    csv.push_str("MONTHLY BREAKDOWN (FIRST YEAR)\n");
    csv.push_str("Month,Mined BTC,Costs,Mining Net Value,Held BTC,Hold Value\n");
    for row in &c.monthly {
        csv.push_str(&format!(
            "{},{:.8},{:.2},{:.2},{:.8},{:.2}\n",
            row.month,
            row.physical_btc_mined,
            row.physical_costs,
            row.physical_net_value,
            row.virtual_btc_held,
            row.virtual_value
        ));
    }

    csv
}
