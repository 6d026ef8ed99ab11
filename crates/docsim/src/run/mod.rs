pub mod controller;
pub mod error;
pub mod pairs;
pub mod progress;
pub mod state;

pub use controller::{RunController, RunSummary};
pub use error::RunError;
pub use pairs::{enumerate_pairs, Pair};
pub use progress::{
    BroadcastProgress, NoopProgress, ProgressReporter, RunProgressBroadcaster, RunProgressEvent,
};
pub use state::{RunState, RunStateHandle, RunStatus};
