//! Entry bookkeeping and deal ranking live here.

pub mod app_state;
pub mod entry;
pub mod pricing;
pub mod ranking;
pub mod store;

#[allow(unused_imports)]
pub use app_state::{AppState, UserSettings};
#[allow(unused_imports)]
pub use entry::{Entry, EntryCandidate, EntryError, EntryId};
#[allow(unused_imports)]
pub use ranking::{best_deal, rank, sort_by, BestDealPolicy, RankedRow, RankedView, SortMode};
#[allow(unused_imports)]
pub use store::{EntryStore, StorageStatus};
