//! CLI domain: parse, route, output, and presentation only.
//! No generator logic; the route table dispatches to the runner.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, TargetArgs};
pub use presentation::{format_outcome, format_section_heading, format_status};
pub use route::RunContext;
