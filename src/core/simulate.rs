//! Physical-vs-virtual mining strategy comparison.
//!
//! Physical: buy the hardware, mine daily against a growing network
//! difficulty, pay electricity and pool fees, keep a residual on the
//! hardware. Virtual: spend the same budget on BTC up front and deduct the
//! amount the hardware would have mined. A deterministic arithmetic walk
//! over fixed daily steps; BTC price moves linearly from start to end.

use chrono::{Duration, NaiveDate};
use tracing::debug;

/// Simplified Bitcoin network assumptions for the simulated period.
pub mod network {
    use chrono::NaiveDate;

    pub const BLOCKS_PER_DAY: f64 = 144.0;
    pub const BLOCK_REWARD: f64 = 6.25;
    pub const POST_HALVING_REWARD: f64 = 3.125;
    /// Average network hashrate in EH/s over 2021-2024.
    pub const AVG_NETWORK_HASHRATE_EHS: f64 = 400.0;

    pub fn halving_date() -> NaiveDate {
        // 2024-04-20, the fourth halving.
        NaiveDate::from_ymd_opt(2024, 4, 20).unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct ComparisonParams {
    /// Rated hashrate in TH/s.
    pub hashrate: f64,
    /// Wall power draw in watts.
    pub power: u32,
    /// Hardware purchase price in USD.
    pub miner_price: f64,
    pub btc_start_price: f64,
    pub btc_end_price: f64,
    /// USD per kWh.
    pub electricity_rate: f64,
    /// Pool fee as a fraction, e.g. 0.02.
    pub pool_fee: f64,
    /// Yearly network difficulty growth as a fraction, e.g. 0.30.
    pub difficulty_growth: f64,
    pub start_date: NaiveDate,
    /// Analysis horizon in days.
    pub days: u32,
    /// Hardware residual value at the end, as a fraction of purchase price.
    pub residual_fraction: f64,
}

impl ComparisonParams {
    pub fn end_date(&self) -> NaiveDate {
        self.start_date + Duration::days(self.days as i64)
    }
}

#[derive(Debug, Clone)]
pub struct PhysicalOutcome {
    pub btc_mined: f64,
    pub electricity_cost: f64,
    pub pool_fees: f64,
    pub btc_value: f64,
    pub residual: f64,
    pub net_profit: f64,
    pub roi_pct: f64,
}

#[derive(Debug, Clone)]
pub struct VirtualOutcome {
    pub btc_bought: f64,
    pub btc_deducted: f64,
    pub btc_held: f64,
    pub final_value: f64,
    pub net_profit: f64,
    pub roi_pct: f64,
}

/// One first-year monthly sample (30-day buckets, valued at the start price).
#[derive(Debug, Clone)]
pub struct MonthRow {
    pub month: u32,
    pub physical_btc_mined: f64,
    pub physical_costs: f64,
    pub physical_net_value: f64,
    pub virtual_btc_held: f64,
    pub virtual_value: f64,
}

#[derive(Debug, Clone)]
pub struct Comparison {
    pub params: ComparisonParams,
    pub physical: PhysicalOutcome,
    pub hold: VirtualOutcome,
    pub monthly: Vec<MonthRow>,
}

impl Comparison {
    /// Positive when holding BTC beats running the hardware.
    pub fn hold_advantage(&self) -> f64 {
        self.hold.net_profit - self.physical.net_profit
    }
}

/// Runs the daily walk and produces both strategy outcomes.
pub fn compare(params: ComparisonParams) -> Comparison {
    let btc_bought = params.miner_price / params.btc_start_price;

    let mut total_btc_mined = 0.0;
    let mut total_electricity = 0.0;
    let mut monthly = Vec::new();

    let daily_kwh = (params.power as f64 / 1000.0) * 24.0;
    let daily_electricity = daily_kwh * params.electricity_rate;
    let halving = network::halving_date();

    for day in 0..params.days {
        let years_elapsed = day as f64 / 365.0;
        let difficulty_multiplier = (1.0 + params.difficulty_growth).powf(years_elapsed);
        let network_ths = network::AVG_NETWORK_HASHRATE_EHS * difficulty_multiplier * 1_000_000.0;

        let current_date = params.start_date + Duration::days(day as i64);
        let reward = if current_date > halving {
            network::POST_HALVING_REWARD
        } else {
            network::BLOCK_REWARD
        };

        let hashrate_share = params.hashrate / network_ths;
        let daily_gross = hashrate_share * reward * network::BLOCKS_PER_DAY;
        let daily_net = daily_gross * (1.0 - params.pool_fee);

        total_btc_mined += daily_net;
        total_electricity += daily_electricity;

        // First-year monthly snapshot, 30-day buckets.
        if day % 30 == 0 && day < 365 {
            let monthly_mined = daily_net * 30.0;
            let monthly_electricity = daily_electricity * 30.0;
            let monthly_pool_fees = (daily_gross - daily_net) * 30.0 * params.btc_start_price;
            monthly.push(MonthRow {
                month: day / 30 + 1,
                physical_btc_mined: monthly_mined,
                physical_costs: monthly_electricity + monthly_pool_fees,
                physical_net_value: monthly_mined * params.btc_start_price
                    - monthly_electricity
                    - monthly_pool_fees,
                virtual_btc_held: btc_bought,
                virtual_value: btc_bought * params.btc_start_price,
            });
        }
    }

    let btc_value = total_btc_mined * params.btc_end_price;
    let pool_fees = if params.pool_fee < 1.0 {
        (total_btc_mined / (1.0 - params.pool_fee) - total_btc_mined) * params.btc_end_price
    } else {
        0.0
    };
    let residual = params.miner_price * params.residual_fraction;
    let physical_net = btc_value - params.miner_price - total_electricity + residual;

    let physical = PhysicalOutcome {
        btc_mined: total_btc_mined,
        electricity_cost: total_electricity,
        pool_fees,
        btc_value,
        residual,
        net_profit: physical_net,
        roi_pct: physical_net / params.miner_price * 100.0,
    };

    let btc_held = btc_bought - total_btc_mined;
    let final_value = btc_held * params.btc_end_price;
    let hold_net = final_value - params.miner_price;
    let hold = VirtualOutcome {
        btc_bought,
        btc_deducted: total_btc_mined,
        btc_held,
        final_value,
        net_profit: hold_net,
        roi_pct: hold_net / params.miner_price * 100.0,
    };

    debug!(
        btc_mined = physical.btc_mined,
        physical_roi = physical.roi_pct,
        hold_roi = hold.roi_pct,
        "Comparison complete"
    );

    Comparison {
        params,
        physical,
        hold,
        monthly,
    }
}
