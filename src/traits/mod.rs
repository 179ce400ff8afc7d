pub mod stage;

pub use stage::{Sink, Source, Transform};
