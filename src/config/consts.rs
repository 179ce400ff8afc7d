/// Buffer size of every conduit unless configured otherwise. One slot is enough to avoid
/// immediate rendezvous stalls; correctness does not depend on it.
pub const DEFAULT_CONDUIT_CAPACITY: usize = 1;
/// Name used for pipelines that were not given one.
pub const DEFAULT_PIPELINE_NAME: &str = "pipeline";
/// Label of the first layer when built through the builder.
pub const SOURCE_LABEL: &str = "source";
/// Label of the last layer when built through the builder.
pub const SINK_LABEL: &str = "sink";
