mod dispatch;
mod parse;

pub use crate::cli::dispatch::dispatch;
pub use crate::cli::parse::parse_from_safe;

use crate::cloud::FirewallId;
use crate::config::Overrides;

#[derive(Debug, Eq, PartialEq)]
pub enum Command {
    Edit { firewall_id: FirewallId },
}

#[derive(Debug, Eq, PartialEq)]
pub struct Invocation {
    pub command: Command,
    pub overrides: Overrides,
    pub verbose: bool,
}
