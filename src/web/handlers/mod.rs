pub mod job_handlers;
pub mod system_handlers;

pub use job_handlers::*;
pub use system_handlers::*;
