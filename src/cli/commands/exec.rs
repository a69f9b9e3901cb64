//! sitectl exec - Run a shell command line from the site root

use clap::Args;

use crate::core::SiteResult;
use crate::orchestration::{
    Arguments, Command, ExecutionContext, ExitStatus, Options, RequestDescriptor,
};
use crate::process::{shell_quote, ProcessRunner};

pub const NAME: &str = "exec";

#[derive(Args)]
pub struct ExecArgs {
    /// Command line to execute
    ///
    /// A single argument is taken as a complete shell line (`exec "ls | wc -l"`).
    /// Several arguments are quoted word by word, so `exec echo "a b"` keeps
    /// `a b` as one word.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub bin: Vec<String>,
}

impl ExecArgs {
    pub fn into_request(self) -> RequestDescriptor {
        let line = match self.bin.as_slice() {
            [line] => line.clone(),
            words => words
                .iter()
                .map(|word| shell_quote(word))
                .collect::<Vec<_>>()
                .join(" "),
        };
        RequestDescriptor::new(NAME).argument("bin", line)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExecCommand {
    bin: Option<String>,
    options: Options,
}

impl Command for ExecCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Execute an external command"
    }

    fn configure(&mut self, arguments: &Arguments, options: &Options) {
        self.bin = arguments.get("bin").map(str::to_string);
        self.options = options.clone();
    }

    fn execute(&self, context: &ExecutionContext<'_>) -> SiteResult<ExitStatus> {
        let flags = context.flags().overlay(&self.options);

        let bin = match self.bin.as_deref().map(str::trim) {
            Some(bin) if !bin.is_empty() => bin,
            _ => {
                context.io().error("No command given to execute");
                return Ok(1);
            }
        };

        if flags.learning {
            context.io().comment(bin);
        }

        let status = ProcessRunner::new(context.site_root()).run_shell(bin)?;
        if status != 0 {
            tracing::debug!(status, "Command exited with failure");
        }

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::testing::Level;
    use crate::orchestration::testing::Fixture;
    use crate::orchestration::GlobalFlags;

    fn fixture() -> Fixture {
        let mut fixture = Fixture::new();
        fixture.add(ExecCommand::default());
        fixture
    }

    #[test]
    fn test_args_are_joined() {
        let request = ExecArgs {
            bin: vec!["ls".to_string(), "-la".to_string()],
        }
        .into_request();
        assert_eq!(request.arguments().get("bin"), Some("ls -la"));
    }

    #[test]
    fn test_words_keep_their_quoting() {
        let request = ExecArgs {
            bin: vec!["echo".to_string(), "a b".to_string(), "it's".to_string()],
        }
        .into_request();
        assert_eq!(request.arguments().get("bin"), Some(r"echo 'a b' 'it'\''s'"));

        let request = ExecArgs {
            bin: vec!["ls | wc -l".to_string()],
        }
        .into_request();
        assert_eq!(request.arguments().get("bin"), Some("ls | wc -l"));
    }

    #[test]
    fn test_missing_bin() {
        let fixture = fixture();
        let context = fixture.context(GlobalFlags::default());

        let status = context.run_commands([RequestDescriptor::new(NAME)]).unwrap();

        assert_eq!(status, 1);
        assert_eq!(fixture.io.messages(Level::Error).len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_returned() {
        let fixture = fixture();
        let context = fixture.context(GlobalFlags::default());

        let status = context
            .run_commands([RequestDescriptor::new(NAME).argument("bin", "exit 4")])
            .unwrap();

        assert_eq!(status, 4);
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_in_site_root() {
        let fixture = fixture();
        let context = fixture.context(GlobalFlags {
            learning: true,
            ..GlobalFlags::default()
        });

        let status = context
            .run_commands([RequestDescriptor::new(NAME).argument("bin", "touch marker")])
            .unwrap();

        assert_eq!(status, 0);
        assert!(fixture.root.path().join("marker").exists());
        assert_eq!(fixture.io.messages(Level::Comment), vec!["touch marker"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_chain_stops_after_failing_exec() {
        let fixture = fixture();
        let context = fixture.context(GlobalFlags::default());

        let status = context
            .run_commands([
                RequestDescriptor::new(NAME).argument("bin", "touch first"),
                RequestDescriptor::new(NAME).argument("bin", "exit 2"),
                RequestDescriptor::new(NAME).argument("bin", "touch third"),
            ])
            .unwrap();

        assert_eq!(status, 2);
        assert!(fixture.root.path().join("first").exists());
        assert!(!fixture.root.path().join("third").exists());
    }
}
