//! Deterministic synthetic customer dataset with an in-memory
//! filter/search/sort/paginate pipeline.
//!
//! `index → Record` is a pure function of the index, the fixed reference
//! lists, and a session clock captured once (`Synthesizer::new`). Nothing is
//! persisted; the whole dataset is virtual and any index can be re-derived at
//! will. The generator is deterministic by design and NOT cryptographically
//! secure.

pub mod output;
pub mod query;
pub mod record;
pub mod refdata;
pub mod rng;
pub mod synth;
pub mod window;

pub use query::{DatasetView, FilterState, QuerySpec, Recency, ScoreBand, SortDir, SortKey};
pub use record::{Avatar, Record};
pub use refdata::RefLists;
pub use synth::Synthesizer;
pub use window::PaginationWindow;
