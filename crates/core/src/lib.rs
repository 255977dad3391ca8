#![forbid(unsafe_code)]

pub mod aggregate;
pub mod equivalence;
pub mod ledger;
pub mod model;
pub mod persist;
pub mod store;

pub use aggregate::{Snapshot, View};
pub use ledger::SubmissionLedger;
pub use persist::{PersistError, PersistedState, STATE_KEY};
pub use store::{Action, Effect, RootState, Transition, reduce};
