//! Ambient state shared by every command of a run

use std::path::Path;

use crate::core::{Config, Io, SiteResult};
use crate::orchestration::{CommandRegistry, ExitStatus, Options, RequestDescriptor, Runner};

/// Process-wide switches every command may consult
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalFlags {
    /// Answer yes to every confirmation
    pub yes: bool,
    /// Never prompt; use defaults
    pub no_interaction: bool,
    /// Echo generated queries and shell commands before running them
    pub learning: bool,
}

impl GlobalFlags {
    /// Flags as seen by a command whose request carries its own flag options
    ///
    /// Options named `yes`, `no-interaction` or `learning` win over the
    /// ambient value when present.
    pub fn overlay(&self, options: &Options) -> GlobalFlags {
        GlobalFlags {
            yes: options.explicit_flag("yes").unwrap_or(self.yes),
            no_interaction: options
                .explicit_flag("no-interaction")
                .unwrap_or(self.no_interaction),
            learning: options.explicit_flag("learning").unwrap_or(self.learning),
        }
    }

    /// Whether prompts should be skipped
    pub fn skip_prompts(&self) -> bool {
        self.yes || self.no_interaction
    }
}

/// Read-only context handed to every `execute` call of a run
pub struct ExecutionContext<'a> {
    registry: &'a CommandRegistry,
    io: &'a dyn Io,
    config: &'a Config,
    site_root: &'a Path,
    flags: GlobalFlags,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(
        registry: &'a CommandRegistry,
        io: &'a dyn Io,
        config: &'a Config,
        site_root: &'a Path,
        flags: GlobalFlags,
    ) -> Self {
        Self {
            registry,
            io,
            config,
            site_root,
            flags,
        }
    }

    pub fn io(&self) -> &dyn Io {
        self.io
    }

    pub fn flags(&self) -> GlobalFlags {
        self.flags
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    pub fn site_root(&self) -> &Path {
        self.site_root
    }

    pub fn registry(&self) -> &CommandRegistry {
        self.registry
    }

    /// Runner bound to this context
    pub fn runner(&self) -> Runner<'_> {
        Runner::new(self)
    }

    /// Run a chain of requests against this context
    pub fn run_commands<I>(&self, requests: I) -> SiteResult<ExitStatus>
    where
        I: IntoIterator<Item = RequestDescriptor>,
    {
        self.runner().run(requests)
    }
}
