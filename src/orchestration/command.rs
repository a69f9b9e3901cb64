//! The contract every runnable command implements

use crate::core::SiteResult;
use crate::orchestration::{Arguments, ExecutionContext, Options};

/// Process-style exit status: `0` is success, anything else is failure
pub type ExitStatus = i32;

/// A command that can be registered, configured and executed by name
///
/// `configure` only records input. Anything that can fail (missing
/// arguments, unknown connections, external processes) is checked in
/// `execute`, so configuring a command never has side effects.
pub trait Command: CommandClone {
    /// Unique name the command is registered under
    fn name(&self) -> &'static str;

    /// Alternative names that resolve to the same command
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// One-line description for `list`
    fn description(&self) -> &'static str;

    /// Record the arguments and options of a request
    fn configure(&mut self, arguments: &Arguments, options: &Options);

    /// Run the command against the shared context
    fn execute(&self, context: &ExecutionContext<'_>) -> SiteResult<ExitStatus>;
}

/// Cloning support for boxed commands
///
/// The registry hands out a fresh copy of the registered prototype on every
/// resolution.
pub trait CommandClone {
    fn clone_box(&self) -> Box<dyn Command>;
}

impl<T> CommandClone for T
where
    T: 'static + Command + Clone,
{
    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Command> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
