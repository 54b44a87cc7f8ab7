mod args;
mod commands;
mod push;
mod smoke;

pub use args::{Cli, Command, PushArgs};
pub use push::run_push;
pub use smoke::{SmokeOutcome, mask_api_key, run_smoke};
