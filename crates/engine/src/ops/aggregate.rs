use crate::{
    ResultEngine,
    snapshot::Holdings,
    sync::{Cycle, Loaded},
};

use super::Engine;

impl Engine {
    /// Runs one aggregation cycle: reads the three collections concurrently
    /// and derives the snapshot.
    ///
    /// The cycle fails as a whole if any read fails; the cause is logged and
    /// kept in the outcome, callers only show a generic message for it.
    pub async fn refresh(&self) -> Cycle {
        let seq = self.next_seq();
        let token = self.session.token();

        let outcome = self.load(token.as_deref()).await;
        match &outcome {
            Ok(loaded) => tracing::info!(
                "cycle {seq} loaded {} assets, {} debts, {} stocks",
                loaded.holdings.assets.len(),
                loaded.holdings.debts.len(),
                loaded.holdings.stocks.len(),
            ),
            Err(err) => tracing::error!("cycle {seq} failed to load data: {err}"),
        }

        Cycle { seq, outcome }
    }

    async fn load(&self, token: Option<&str>) -> ResultEngine<Loaded> {
        let (assets, debts, stocks) = tokio::try_join!(
            self.backend.list_assets(token),
            self.backend.list_debts(token),
            self.backend.list_stocks(token),
        )?;

        Ok(Loaded::new(Holdings {
            assets,
            debts,
            stocks,
        }))
    }
}
