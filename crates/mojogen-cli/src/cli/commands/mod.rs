//! CLI command handlers. Each command is in its own file.

mod checksum;
mod ensure;
mod generate;
mod plan;

pub use checksum::run_checksum;
pub use ensure::run_ensure;
pub use generate::run_generate;
pub use plan::{run_plan, run_show_plan};
