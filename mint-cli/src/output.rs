//! Output abstraction for testable printing

use crate::error::CliResult;

/// Output abstraction for printing results
pub trait Output {
    /// Print normal output
    fn print(&self, msg: &str) -> CliResult<()>;

    /// Print formatted JSON
    fn print_json(&self, data: &serde_json::Value) -> CliResult<()> {
        self.print(&serde_json::to_string_pretty(data)?)
    }

    /// Print a `key: value` line
    fn field(&self, key: &str, value: &str) -> CliResult<()> {
        self.print(&format!("{:<12} {}", format!("{}:", key), value))
    }
}

/// Standard console output implementation
pub struct ConsoleOutput;

impl Output for ConsoleOutput {
    fn print(&self, msg: &str) -> CliResult<()> {
        println!("{}", msg);
        Ok(())
    }
}

/// Output that records everything it is given
#[derive(Debug, Default)]
pub struct CapturedOutput {
    messages: std::cell::RefCell<Vec<String>>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn contains(&self, substring: &str) -> bool {
        self.messages.borrow().iter().any(|m| m.contains(substring))
    }
}

impl Output for CapturedOutput {
    fn print(&self, msg: &str) -> CliResult<()> {
        self.messages.borrow_mut().push(msg.to_string());
        Ok(())
    }
}
