//! Line-oriented prompts for menus and confirmations.
//!
//! Generic over reader and writer so menus can be driven from tests.

use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Question/answer channel with the user.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

/// Prompt bound to the process's stdin and stdout.
pub type StdPrompt = Prompt<io::BufReader<io::Stdin>, io::Stdout>;

impl StdPrompt {
    /// Prompt on the terminal. The reader buffers ahead, so create one per process.
    pub fn stdio() -> Self {
        Prompt::new(io::BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    /// Create a prompt over arbitrary streams.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line.
    pub fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", text.as_ref())?;
        Ok(())
    }

    /// Ask a question; `None` on end of input. The answer is trimmed.
    pub fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }
        Ok(Some(answer.trim().to_string()))
    }

    /// Ask and compare the lowercased answer with `expected` (`"y"`, `"yes"`).
    pub fn confirm(&mut self, question: &str, expected: &str) -> Result<bool> {
        Ok(self
            .ask(question)?
            .is_some_and(|a| a.to_lowercase() == expected))
    }

    /// Clear the screen and home the cursor.
    pub fn clear_screen(&mut self) -> Result<()> {
        crossterm::execute!(
            self.output,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
            crossterm::cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Give back the output stream.
    pub fn into_output(self) -> W {
        self.output
    }
}
