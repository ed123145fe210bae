pub mod dataset;
pub mod error;
pub mod filename;
pub mod loader;
pub mod output;
pub mod record;
pub mod render;
pub mod state_map;
pub mod summary;
pub mod years;

pub use dataset::FarsData;
pub use error::FarsError;
pub use filename::filename_for;
pub use loader::read;
pub use state_map::{MapOutcome, MapRenderer};
pub use summary::{SummaryTable, summarize};
