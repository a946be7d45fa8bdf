//! User interaction seam: prompts, confirmations and path pickers.
//!
//! Operation code only talks to [`Interaction`], so it runs the same against the terminal
//! ([`ConsoleInteraction`]) and against scripted answers in tests.

use anyhow::{Context, Result, bail};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::utils::config::PackagePaths;

pub trait Interaction {
    /// Read one line of free text (trimmed). End of input is an error.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Read a secret without echo.
    fn read_secret(&mut self, prompt: &str) -> Result<String>;

    /// Yes/no question. Anything but `y`/`yes` is no.
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.read_line(&format!("{prompt} (y/n): "))?;
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }

    /// Pick an existing file. `None` when the user cancels (blank input).
    fn pick_file(&mut self, title: &str) -> Result<Option<PathBuf>> {
        let answer = self.read_line(&format!("{title} (blank to cancel): "))?;
        Ok((!answer.is_empty()).then(|| PathBuf::from(answer)))
    }

    /// Pick a directory (created later if missing). `None` when the user cancels.
    fn pick_dir(&mut self, title: &str) -> Result<Option<PathBuf>> {
        self.pick_file(title)
    }
}

/// Terminal implementation: stdin for text, rpassword for secrets.
#[derive(Default)]
pub struct ConsoleInteraction;

impl ConsoleInteraction {
    pub fn new() -> Self {
        Self
    }
}

impl Interaction for ConsoleInteraction {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        print!("{prompt}");
        io::stdout().flush().context("flush stdout")?;
        let mut line = String::new();
        let n = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("read stdin")?;
        if n == 0 {
            bail!("end of input");
        }
        Ok(line.trim().to_string())
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        rpassword::prompt_password(prompt).context("read password")
    }

    fn pick_file(&mut self, title: &str) -> Result<Option<PathBuf>> {
        let label = format!("[{}]", PackagePaths::get().pkg_name()).cyan().bold();
        let answer = self.read_line(&format!("{label} {title} (blank to cancel): "))?;
        let answer = answer.trim_matches('"');
        Ok((!answer.is_empty()).then(|| PathBuf::from(answer)))
    }
}
