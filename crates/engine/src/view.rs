//! Declarative view of the dashboard.
//!
//! Everything the screen shows, and every action a row offers, is derived
//! here from [`DashboardState`]. Input handling resolves against the derived
//! view, so there is nothing to re-attach after a redraw.

use api_types::item::{Asset, Debt, ItemId, ItemKind, Stock};

use crate::{
    money::{format_compact, format_grouped},
    snapshot::AggregateSnapshot,
    sync::DashboardState,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Primary,
    Negative,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatCard {
    pub label: &'static str,
    pub subtitle: &'static str,
    /// Compact amount, e.g. `$1.2M`.
    pub display: String,
    /// Full amount, e.g. `$1,234,567`.
    pub full: String,
    pub tone: Tone,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Summary {
    Loading,
    Ready(Vec<StatCard>),
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Delete { kind: ItemKind, id: ItemId },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListRow {
    pub title: String,
    pub subtitle: String,
    pub value: String,
    pub tone: Tone,
    pub action: Action,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListSection {
    pub kind: ItemKind,
    pub title: &'static str,
    pub rows: Vec<ListRow>,
}

impl ListSection {
    /// Title and hint shown when the collection is empty.
    pub fn empty_text(&self) -> (&'static str, &'static str) {
        match self.kind {
            ItemKind::Asset => ("No assets yet", "Add your first asset above"),
            ItemKind::Debt => ("No debts yet", "Add debt information above"),
            ItemKind::Stock => ("No stocks yet", "Add your first stock above"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardView {
    pub summary: Summary,
    /// One section per collection, only when the last cycle succeeded.
    pub sections: Vec<ListSection>,
}

impl DashboardView {
    pub fn derive(state: &DashboardState) -> Self {
        match state {
            DashboardState::Loading => Self {
                summary: Summary::Loading,
                sections: Vec::new(),
            },
            DashboardState::Failed(message) => Self {
                summary: Summary::Failed(message.clone()),
                sections: Vec::new(),
            },
            DashboardState::Ready(loaded) => Self {
                summary: Summary::Ready(stat_cards(&loaded.snapshot)),
                sections: vec![
                    asset_section(&loaded.holdings.assets),
                    debt_section(&loaded.holdings.debts),
                    stock_section(&loaded.holdings.stocks),
                ],
            },
        }
    }

    pub fn section(&self, kind: ItemKind) -> Option<&ListSection> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    /// Action bound to the `index`-th row of a section.
    pub fn action_at(&self, kind: ItemKind, index: usize) -> Option<&Action> {
        self.section(kind)
            .and_then(|section| section.rows.get(index))
            .map(|row| &row.action)
    }
}

fn dollars_compact(amount: f64) -> String {
    format!("${}", format_compact(amount))
}

fn dollars(amount: f64) -> String {
    format!("${}", format_grouped(amount))
}

fn stat_cards(snapshot: &AggregateSnapshot) -> Vec<StatCard> {
    let card = |label, subtitle, amount: f64, tone| StatCard {
        label,
        subtitle,
        display: dollars_compact(amount),
        full: dollars(amount),
        tone,
    };

    let net_tone = if snapshot.net_worth >= 0.0 {
        Tone::Positive
    } else {
        Tone::Negative
    };

    vec![
        card(
            "Total Assets",
            "Physical & Financial",
            snapshot.assets_total,
            Tone::Positive,
        ),
        card(
            "Stock Holdings",
            "Market Value",
            snapshot.stocks_total,
            Tone::Primary,
        ),
        card(
            "Total Debts",
            "Outstanding Balance",
            snapshot.debts_total,
            Tone::Negative,
        ),
        card("Net Worth", "Assets - Debts", snapshot.net_worth, net_tone),
    ]
}

fn asset_section(assets: &[Asset]) -> ListSection {
    ListSection {
        kind: ItemKind::Asset,
        title: "Assets",
        rows: assets
            .iter()
            .map(|asset| ListRow {
                title: asset.name.clone(),
                subtitle: "Asset".to_string(),
                value: dollars(asset.value),
                tone: Tone::Positive,
                action: Action::Delete {
                    kind: ItemKind::Asset,
                    id: asset.id.clone(),
                },
            })
            .collect(),
    }
}

fn debt_section(debts: &[Debt]) -> ListSection {
    ListSection {
        kind: ItemKind::Debt,
        title: "Debts",
        rows: debts
            .iter()
            .map(|debt| ListRow {
                title: debt.name.clone(),
                subtitle: "Debt".to_string(),
                value: dollars(debt.value),
                tone: Tone::Negative,
                action: Action::Delete {
                    kind: ItemKind::Debt,
                    id: debt.id.clone(),
                },
            })
            .collect(),
    }
}

fn stock_section(stocks: &[Stock]) -> ListSection {
    ListSection {
        kind: ItemKind::Stock,
        title: "Stocks",
        rows: stocks
            .iter()
            .map(|stock| {
                // A zero quote is treated like a missing one.
                let quote = match stock.price {
                    Some(price) if price != 0.0 && !price.is_nan() => format!("${price}"),
                    _ => "Loading...".to_string(),
                };
                ListRow {
                    title: stock.symbol.clone(),
                    subtitle: format!("{} shares @ {quote}", stock.shares),
                    value: dollars(stock.market_value()),
                    tone: Tone::Primary,
                    action: Action::Delete {
                        kind: ItemKind::Stock,
                        id: stock.id.clone(),
                    },
                }
            })
            .collect(),
    }
}
