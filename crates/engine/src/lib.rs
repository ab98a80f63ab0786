//! Aggregation and synchronization engine of the net worth dashboard.
//!
//! The engine reads the three backend collections (assets, debts, stocks),
//! derives the summary metrics, and keeps them consistent across mutations
//! by refetching everything after each write. It owns no I/O of its own: the
//! backend and the session holder are injected through [`Backend`] and
//! [`SessionProvider`].

pub use api_types::item::{Asset, Debt, ItemId, ItemKind, Stock};
pub use backend::Backend;
pub use error::{EngineError, LOAD_FAILED_MESSAGE};
pub use forms::{CreateForm, Draft, Field, FormError};
pub use money::{format_compact, format_grouped};
pub use ops::{AuthOutcome, Engine, EngineBuilder, MutationOp, MutationReport};
pub use session::{MemorySession, Preferences, SessionProvider, ThemeMode};
pub use snapshot::{AggregateSnapshot, Holdings};
pub use sync::{Cycle, CycleSeq, DashboardState, Loaded, SyncState};
pub use view::{Action, DashboardView, ListRow, ListSection, StatCard, Summary, Tone};

mod backend;
mod error;
mod forms;
mod money;
mod ops;
mod session;
mod snapshot;
mod sync;
mod view;

pub type ResultEngine<T> = Result<T, EngineError>;
