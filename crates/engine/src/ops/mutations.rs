use api_types::item::{ItemId, ItemKind};

use crate::{ResultEngine, forms::Draft};

use super::Engine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationOp {
    Create,
    Delete,
}

/// Outcome of a create or delete request.
///
/// The report is ready as soon as the write settles. Callers follow every
/// report with [`Engine::refresh`], whatever the result.
#[derive(Debug)]
pub struct MutationReport {
    pub kind: ItemKind,
    pub op: MutationOp,
    pub result: ResultEngine<()>,
}

impl MutationReport {
    /// Short user-facing notice for the mutation result.
    pub fn notice(&self) -> String {
        let kind = self.kind.as_str();
        match (self.op, self.result.is_ok()) {
            (MutationOp::Create, true) => format!("{} added", self.kind.label()),
            (MutationOp::Create, false) => format!("Failed to add {kind}"),
            (MutationOp::Delete, true) => format!("{} deleted", self.kind.label()),
            (MutationOp::Delete, false) => format!("Failed to delete {kind}"),
        }
    }
}

impl Engine {
    /// Sends a create request and reports once the write settles.
    pub async fn submit(&self, draft: Draft) -> MutationReport {
        let kind = draft.kind();
        let token = self.session.token();
        let token = token.as_deref();

        let result = match &draft {
            Draft::Asset(payload) => self.backend.create_asset(token, payload).await,
            Draft::Debt(payload) => self.backend.create_debt(token, payload).await,
            Draft::Stock(payload) => self.backend.create_stock(token, payload).await,
        };
        match &result {
            Ok(()) => tracing::info!("{} created", kind.as_str()),
            Err(err) => tracing::error!("error adding {}: {err}", kind.as_str()),
        }

        MutationReport {
            kind,
            op: MutationOp::Create,
            result,
        }
    }

    /// Sends a delete request for `id` and reports once the write settles.
    pub async fn remove(&self, kind: ItemKind, id: &ItemId) -> MutationReport {
        let token = self.session.token();

        let result = self.backend.delete_item(token.as_deref(), kind, id).await;
        match &result {
            Ok(()) => tracing::info!("{} {id} deleted", kind.as_str()),
            Err(err) => tracing::error!("error deleting {} {id}: {err}", kind.as_str()),
        }

        MutationReport {
            kind,
            op: MutationOp::Delete,
            result,
        }
    }
}
