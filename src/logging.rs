use std::fmt::Display;

/// Stderr logger gated by verbosity.
///
/// Level 0 prints summaries only, 1 adds per-group progress, 2 adds every
/// deleted file and 3 every discovered file. Warnings are printed unless
/// quiet.
#[derive(Clone, Copy, Debug, Default)]
pub struct Logger {
    verbose: u8,
    quiet: bool,
}

impl Logger {
    pub fn new(verbose: u8, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn info(&self, message: impl Display) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }

    pub fn verbose(&self, level: u8, message: impl Display) {
        if !self.quiet && self.verbose >= level {
            eprintln!("{message}");
        }
    }

    pub fn warn(&self, message: impl Display) {
        if !self.quiet {
            eprintln!("Warning: {message}");
        }
    }

    /// Errors are printed even in quiet mode.
    pub fn error(&self, message: impl Display) {
        eprintln!("Error: {message}");
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn level(&self) -> u8 {
        self.verbose
    }
}
