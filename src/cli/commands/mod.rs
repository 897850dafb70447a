mod migrate;
mod queue;

pub use migrate::cmd_migrate;
pub use queue::cmd_queue;
