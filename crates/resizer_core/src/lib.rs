//! Resizer core: pure batch state machine, partitioning policy and view-model helpers.
mod effect;
mod msg;
mod partition;
mod request;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use partition::{PartitionPolicy, FOUR_WORKERS_ABOVE, TWO_WORKERS_ABOVE};
pub use request::{is_supported_image, ResizeRequest, ScaleMode, ScaleSettings, SUPPORTED_EXTENSIONS};
pub use state::{AppState, BatchId, BatchRejection, BatchSummary, FileFailure};
pub use update::update;
pub use view_model::{AppViewModel, BatchStatus};
