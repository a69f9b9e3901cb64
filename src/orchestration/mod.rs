//! Command orchestration
//!
//! Commands never call each other directly. A command that needs other
//! commands builds a list of [`RequestDescriptor`]s and hands it to a
//! [`Runner`], which resolves every name against the [`CommandRegistry`],
//! configures the resolved command and executes it with the shared
//! [`ExecutionContext`], stopping at the first failure.

pub mod command;
pub mod context;
pub mod descriptor;
pub mod registry;
pub mod runner;

#[cfg(test)]
pub mod testing;

pub use command::{Command, ExitStatus};
pub use context::{ExecutionContext, GlobalFlags};
pub use descriptor::{Arguments, Options, RequestDescriptor};
pub use registry::CommandRegistry;
pub use runner::Runner;
