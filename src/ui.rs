//! Console output and prompts.
//!
//! Everything the user sees goes through [`Ui`]. While a transcript sink is
//! attached, each line is written twice: styled to the console and plain to
//! the transcript.

use colored::Colorize;
use std::io::{self, BufRead, IsTerminal, Write};

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors_enabled: bool,
}

impl UiConfig {
    pub fn from_env() -> Self {
        Self {
            colors_enabled: should_use_colors(),
        }
    }

    pub fn plain() -> Self {
        Self {
            colors_enabled: false,
        }
    }
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    // Check NO_COLOR env (standard: https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    io::stdout().is_terminal()
}

pub struct Ui {
    config: UiConfig,
    writer: Box<dyn Write>,
    input: Box<dyn BufRead>,
    mirror: Option<Box<dyn Write>>,
}

impl Ui {
    /// Create a UI bound to stdout and stdin
    pub fn new(config: UiConfig) -> Self {
        Self::with_io(
            config,
            Box::new(io::BufReader::new(io::stdin())),
            Box::new(io::stdout()),
        )
    }

    /// Create a UI with custom input and output (for testing)
    pub fn with_io(config: UiConfig, input: Box<dyn BufRead>, writer: Box<dyn Write>) -> Self {
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self {
            config,
            writer,
            input,
            mirror: None,
        }
    }

    /// Run `f` with `sink` receiving a plain copy of all output.
    ///
    /// The sink is detached and flushed when `f` returns; a previously
    /// attached sink is restored.
    pub fn mirrored<T>(&mut self, sink: Box<dyn Write>, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = self.mirror.replace(sink);
        let result = f(self);
        if let Some(mut sink) = std::mem::replace(&mut self.mirror, previous) {
            let _ = sink.flush();
        }
        result
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirror.is_some()
    }

    fn emit(&mut self, styled: &str, plain: &str, newline: bool) {
        let text = if self.config.colors_enabled { styled } else { plain };
        if newline {
            let _ = writeln!(self.writer, "{}", text);
        } else {
            let _ = write!(self.writer, "{}", text);
            let _ = self.writer.flush();
        }

        if let Some(mirror) = self.mirror.as_mut() {
            if newline {
                let _ = writeln!(mirror, "{}", plain);
            } else {
                let _ = write!(mirror, "{}", plain);
            }
        }
    }

    fn line(&mut self, styled: String, plain: String) {
        self.emit(&styled, &plain, true);
    }

    /// Print a section header
    pub fn section(&mut self, title: &str) {
        self.blank();
        self.line(title.bold().to_string(), format!("[{}]", title));
    }

    pub fn info(&mut self, msg: &str) {
        self.line(msg.cyan().to_string(), msg.to_string());
    }

    pub fn plain(&mut self, msg: &str) {
        self.line(msg.to_string(), msg.to_string());
    }

    /// Print a success message with checkmark
    pub fn success(&mut self, msg: &str) {
        self.line(
            format!("{} {}", "✓".green().bold(), msg.green()),
            format!("* {}", msg),
        );
    }

    pub fn warning(&mut self, msg: &str) {
        self.line(
            format!("{} {}", "!".yellow().bold(), msg.yellow()),
            format!("! {}", msg),
        );
    }

    pub fn error(&mut self, msg: &str) {
        self.line(
            format!("{} {}", "✗".red().bold(), msg.red()),
            format!("X {}", msg),
        );
    }

    pub fn dim(&mut self, msg: &str) {
        self.line(msg.dimmed().to_string(), msg.to_string());
    }

    /// Print a planned change: "from" => "to"
    pub fn list_item(&mut self, from: &str, to: &str) {
        self.line(
            format!("  \"{}\" {} \"{}\"", from.dimmed(), "=>".cyan(), to.bold()),
            format!("  \"{}\"\t=>\t\"{}\"", from, to),
        );
    }

    pub fn kv(&mut self, key: &str, value: &str) {
        self.line(
            format!("{}: {}", key.bold(), value),
            format!("{}: {}", key, value),
        );
    }

    pub fn blank(&mut self) {
        self.line(String::new(), String::new());
    }

    /// Read one line of input, echoing it into the transcript.
    ///
    /// Returns `None` at end of input.
    fn read_answer(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        let read = self.input.read_line(&mut buf)?;
        if read == 0 {
            if let Some(mirror) = self.mirror.as_mut() {
                let _ = writeln!(mirror);
            }
            // Keep the console on a fresh line after an unanswered prompt
            let _ = writeln!(self.writer);
            return Ok(None);
        }

        let answer = buf.trim_end_matches(['\r', '\n']).to_string();
        if let Some(mirror) = self.mirror.as_mut() {
            let _ = writeln!(mirror, "{}", answer);
        }
        Ok(Some(answer))
    }

    /// Ask a yes/no question. Only "y" or "yes" counts as yes.
    pub fn confirm(&mut self, msg: &str) -> io::Result<bool> {
        let prompt = format!("{} [y/n]: ", msg);
        self.emit(&prompt.bold().to_string(), &prompt, false);

        Ok(match self.read_answer()? {
            Some(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            None => false,
        })
    }

    /// Ask for a free-form line; `None` at end of input.
    pub fn ask_line(&mut self, msg: &str) -> io::Result<Option<String>> {
        let prompt = format!("{}: ", msg);
        self.emit(&prompt.bold().to_string(), &prompt, false);
        self.read_answer()
    }

    /// Ask for a decimal number in `0..=max`, re-prompting until valid.
    pub fn ask_number(&mut self, msg: &str, max: u32) -> io::Result<u32> {
        let prompt = format!("{}: ", msg);
        self.emit(&prompt.bold().to_string(), &prompt, false);

        loop {
            let answer = self.read_answer()?.ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "input closed while waiting for a number")
            })?;

            if let Some(number) = parse_bounded(&answer, max) {
                return Ok(number);
            }

            let retry = format!("Invalid input. {}", prompt);
            self.emit(&retry.yellow().to_string(), &retry, false);
        }
    }
}

fn parse_bounded(answer: &str, max: u32) -> Option<u32> {
    let answer = answer.trim();
    if answer.is_empty() || !answer.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    answer.parse::<u32>().ok().filter(|n| *n <= max)
}
