//! Instrumented commands and fixtures for orchestration tests

use std::cell::RefCell;
use std::rc::Rc;

use tempfile::TempDir;

use crate::core::io::testing::RecordingIo;
use crate::core::{Config, SiteError, SiteResult};
use crate::orchestration::{
    Arguments, Command, CommandRegistry, ExecutionContext, ExitStatus, GlobalFlags, Options,
};

/// One recorded execution
#[derive(Debug, Clone)]
pub struct Execution {
    pub name: String,
    pub arguments: Arguments,
    pub options: Options,
}

/// Shared, ordered log of executions across cloned commands
#[derive(Debug, Clone, Default)]
pub struct ExecutionLog(Rc<RefCell<Vec<Execution>>>);

impl ExecutionLog {
    pub fn entries(&self) -> Vec<Execution> {
        self.0.borrow().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.0.borrow().iter().map(|e| e.name.clone()).collect()
    }

    fn push(&self, execution: Execution) {
        self.0.borrow_mut().push(execution);
    }
}

/// Command that records its execution and returns a fixed outcome
#[derive(Clone)]
pub struct ScriptedCommand {
    name: &'static str,
    aliases: &'static [&'static str],
    status: ExitStatus,
    error: Option<fn() -> SiteError>,
    log: ExecutionLog,
    arguments: Arguments,
    options: Options,
}

impl ScriptedCommand {
    pub fn new(name: &'static str, status: ExitStatus, log: &ExecutionLog) -> Self {
        Self {
            name,
            aliases: &[],
            status,
            error: None,
            log: log.clone(),
            arguments: Arguments::default(),
            options: Options::default(),
        }
    }

    /// Command whose execution raises the error built by `error`
    pub fn failing(name: &'static str, log: &ExecutionLog, error: fn() -> SiteError) -> Self {
        Self {
            error: Some(error),
            ..Self::new(name, 0, log)
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }
}

impl Command for ScriptedCommand {
    fn name(&self) -> &'static str {
        self.name
    }

    fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    fn description(&self) -> &'static str {
        "Scripted test command"
    }

    fn configure(&mut self, arguments: &Arguments, options: &Options) {
        self.arguments = arguments.clone();
        self.options = options.clone();
    }

    fn execute(&self, _context: &ExecutionContext<'_>) -> SiteResult<ExitStatus> {
        self.log.push(Execution {
            name: self.name.to_string(),
            arguments: self.arguments.clone(),
            options: self.options.clone(),
        });

        match self.error {
            Some(error) => Err(error()),
            None => Ok(self.status),
        }
    }
}

/// Registry, recording I/O, config and a scratch site root
pub struct Fixture {
    pub registry: CommandRegistry,
    pub io: RecordingIo,
    pub config: Config,
    pub root: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            registry: CommandRegistry::new(),
            io: RecordingIo::new(),
            config: Config::default(),
            root: tempfile::tempdir().expect("create temp site root"),
        }
    }

    pub fn with_io(mut self, io: RecordingIo) -> Self {
        self.io = io;
        self
    }

    pub fn add<C: Command + 'static>(&mut self, command: C) {
        self.registry.add(Box::new(command));
    }

    pub fn context(&self, flags: GlobalFlags) -> ExecutionContext<'_> {
        ExecutionContext::new(&self.registry, &self.io, &self.config, self.root.path(), flags)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
