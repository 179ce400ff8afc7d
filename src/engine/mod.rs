pub mod barrier;
pub mod conduit;
pub mod lifecycle;
pub mod relay;
pub mod worker;

pub use barrier::{BarrierGuard, JoinBarrier};
pub use conduit::{conduit, conduit_set, default_conduit, Inlet, Outlet};
pub use lifecycle::{PipelineHandle, PipelineReport};
pub use relay::{Relay, RelayStats};
pub use worker::{Worker, WorkerId, WorkerTask};
