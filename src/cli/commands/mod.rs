pub mod budget;
pub mod recurring;
pub mod report;
pub mod system;
pub mod transaction;

use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::CommandError;

/// Every shell command, in the order `help` lists them.
pub(crate) fn all() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(transaction::definitions());
    commands.extend(budget::definitions());
    commands.extend(recurring::definitions());
    commands.extend(report::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn usage(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {usage}"))
}

pub(crate) fn invalid(message: impl Into<String>) -> CommandError {
    CommandError::InvalidArguments(message.into())
}
