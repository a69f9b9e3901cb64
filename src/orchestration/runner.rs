//! Fail-fast execution of request chains

use crate::core::SiteResult;
use crate::orchestration::{ExecutionContext, ExitStatus, RequestDescriptor};

/// Executes requests one after another against a shared context
///
/// The first nonzero status stops the chain. Steps that already ran are not
/// undone: a dropped database stays dropped when the import after it fails.
pub struct Runner<'c> {
    context: &'c ExecutionContext<'c>,
}

impl<'c> Runner<'c> {
    pub fn new(context: &'c ExecutionContext<'c>) -> Self {
        Self { context }
    }

    /// Run `requests` in order and return the combined status
    ///
    /// Returns `Err` only for requests naming an unregistered command; every
    /// other failure of a sub-command is reported through the context I/O and
    /// becomes its exit status.
    pub fn run<I>(&self, requests: I) -> SiteResult<ExitStatus>
    where
        I: IntoIterator<Item = RequestDescriptor>,
    {
        let requests: Vec<RequestDescriptor> = requests.into_iter().collect();
        let total = requests.len();

        for (index, request) in requests.iter().enumerate() {
            let status = self.run_one(index + 1, total, request)?;
            if status != 0 {
                tracing::info!(
                    command = request.name(),
                    status,
                    skipped = total - index - 1,
                    "Sub-command failed, stopping chain"
                );
                return Ok(status);
            }
        }

        Ok(0)
    }

    fn run_one(&self, number: usize, total: usize, request: &RequestDescriptor) -> SiteResult<ExitStatus> {
        let mut command = self.context.registry().resolve(request.name())?;
        command.configure(request.arguments(), request.options());

        if self.context.flags().learning {
            self.context.io().step(number, total, request.name());
        }
        tracing::debug!(command = request.name(), step = number, total, "Running sub-command");

        match command.execute(self.context) {
            Ok(status) => Ok(status),
            Err(e) if e.is_resolution() => Err(e),
            Err(e) => {
                tracing::debug!(command = request.name(), error = %e, "Sub-command raised an error");
                self.context.io().error(&e.to_string());
                Ok(e.exit_code())
            }
        }
    }
}
