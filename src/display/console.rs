//! Terminal and headless summary presenters.

use super::{GameSummary, REPLAY_PROMPT, SummaryPresenter};
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use tracing::{debug, instrument};

/// Presenter for headless runs. Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPresenter;

impl SummaryPresenter for NoopPresenter {
    fn present(&mut self, _summary: &GameSummary) -> io::Result<()> {
        Ok(())
    }
}

/// Prints the summary in a banner and waits for the viewer to press Enter.
pub struct ConsolePresenter<R, W> {
    input: R,
    output: W,
}

impl ConsolePresenter<BufReader<Stdin>, Stdout> {
    /// Creates a presenter on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePresenter<R, W> {
    /// Creates a presenter over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the presenter, returning its streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R, W> SummaryPresenter for ConsolePresenter<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    #[instrument(skip_all)]
    fn present(&mut self, summary: &GameSummary) -> io::Result<()> {
        let rule = "=".repeat(REPLAY_PROMPT.len());
        writeln!(self.output, "{}", rule)?;
        writeln!(self.output, "{}", summary)?;
        writeln!(self.output, "{}", rule)?;
        writeln!(self.output, "{}", REPLAY_PROMPT)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        debug!(bytes = read, "Summary dismissed");
        Ok(())
    }
}
