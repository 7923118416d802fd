mod executor;
mod partition;
mod pool;
mod threads;

pub use executor::Executor;
pub use partition::{partition, shard_range};
pub use pool::RayonExecutor;
pub use threads::ThreadExecutor;
