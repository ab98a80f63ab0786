use api_types::item::{Asset, Debt, Stock};

/// Summary metrics derived from one read of the three collections.
///
/// Never patched: every cycle computes a new one from scratch.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AggregateSnapshot {
    pub assets_total: f64,
    pub debts_total: f64,
    pub stocks_total: f64,
    pub net_worth: f64,
}

impl AggregateSnapshot {
    /// Sums each collection (left fold from `0.0`) and derives net worth as
    /// `assets + stocks - debts`.
    #[must_use]
    pub fn compute(assets: &[Asset], debts: &[Debt], stocks: &[Stock]) -> Self {
        let assets_total = assets.iter().fold(0.0, |sum, asset| sum + asset.value);
        let debts_total = debts.iter().fold(0.0, |sum, debt| sum + debt.value);
        let stocks_total = stocks
            .iter()
            .fold(0.0, |sum, stock| sum + stock.market_value());

        Self {
            assets_total,
            debts_total,
            stocks_total,
            net_worth: assets_total + stocks_total - debts_total,
        }
    }
}

/// The three collections as read during one cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Holdings {
    pub assets: Vec<Asset>,
    pub debts: Vec<Debt>,
    pub stocks: Vec<Stock>,
}

impl Holdings {
    #[must_use]
    pub fn snapshot(&self) -> AggregateSnapshot {
        AggregateSnapshot::compute(&self.assets, &self.debts, &self.stocks)
    }
}
