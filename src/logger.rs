use chrono::Local;
use colored::*;
use std::io::{ self, Write };

use crate::config::is_debug_fetch_enabled;

/// Subsystem tag shown in every log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTag {
    Fetch,
    Server,
    Config,
}

impl LogTag {
    fn label(&self) -> ColoredString {
        match self {
            LogTag::Fetch => "FETCH".cyan().bold(),
            LogTag::Server => "SERVER".green().bold(),
            LogTag::Config => "CONFIG".blue().bold(),
        }
    }
}

/// Log a message with a subsystem tag and level.
///
/// Levels are plain strings the way the rest of the codebase calls them:
/// "INFO", "WARN", "ERROR", "DEBUG". DEBUG lines only print when the process
/// was started with --debug-fetch.
pub fn log(tag: LogTag, level: &str, message: &str) {
    if level == "DEBUG" && !is_debug_fetch_enabled() {
        return;
    }

    let timestamp = Local::now().format("%H:%M:%S").to_string();
    let level_str = match level {
        "ERROR" => level.red().bold(),
        "WARN" => level.yellow().bold(),
        "DEBUG" => level.purple().bold(),
        _ => level.normal(),
    };

    println!(
        "{} [{}] [{}] {}",
        timestamp.dimmed(),
        tag.label(),
        level_str,
        message
    );
    io::stdout().flush().ok();
}

pub fn header(title: &str) {
    println!();
    println!("{} {}", "coindata".green().bold(), format!("- {}", title).bright_white().bold());
    println!("{}", "─".repeat(50).dimmed());
    io::stdout().flush().ok();
}
