pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, ConfigArgs, DetectArgs, DetectorsArgs};
pub use handlers::{handle_config, handle_detect, handle_detectors};
pub use output::{OutputFormat, OutputFormatter};
