use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

/// Debug topics understood by `--debug-filter`.
pub const DEBUG_TOPICS: [&str; 5] = ["motion", "collision", "weapon", "hazard", "arena"];

#[derive(Debug)]
struct ArenaLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl ArenaLogger {
    // Debug and trace records only pass when their target matches a filter
    fn topic_allowed(&self, metadata: &Metadata) -> bool {
        match &self.debug_filters {
            Some(filters) if metadata.level() >= log::Level::Debug => filters
                .iter()
                .any(|f| metadata.target() == f || metadata.target().starts_with(f.as_str())),
            _ => true,
        }
    }
}

impl log::Log for ArenaLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && self.topic_allowed(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let message = record.args().to_string();
        let context = context_prefix(&message);

        let mut output = format!(
            "{timestamp} {level_color}{level:5}{reset} {context}{target}: {message}",
            level = record.level(),
            target = record.target(),
        );

        if let Some(module_path) = record.module_path() {
            if module_path != record.target() {
                output.push_str(&format!(" [{}]", module_path));
            }
        }

        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", output);
        let _ = stdout.flush();
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

// Parses the digits immediately following `marker` in `message`
fn number_after(message: &str, marker: &str) -> Option<u64> {
    let start = message.find(marker)? + marker.len();
    let rest = &message[start..];
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// Builds the `[V##][T####] ` prefix for messages that mention a vehicle or tick.
///
/// Messages from the topic macros already carry their `[V##]` tag and are left alone.
fn context_prefix(message: &str) -> String {
    let mut context = String::new();

    if !message.starts_with("[V") {
        if let Some(id) = number_after(message, "Vehicle ") {
            context.push_str(&format!("[V{:02}]", id));
        }
    }
    if let Some(tick) = number_after(message, "Tick ") {
        context.push_str(&format!("[T{:04}]", tick));
    }

    if !context.is_empty() {
        context.push(' ');
    }
    context
}

static LOGGER: OnceLock<ArenaLogger> = OnceLock::new();

/// Installs the arena logger. `debug_filter` is a comma separated list of topics;
/// when given, only debug output for those topics is shown.
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let debug_filters = debug_filter.map(|filter_str| {
        filter_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<HashSet<String>>()
    });

    let unknown: Vec<String> = debug_filters
        .iter()
        .flatten()
        .filter(|topic| !DEBUG_TOPICS.contains(&topic.as_str()))
        .cloned()
        .collect();

    let logger = LOGGER.get_or_init(|| ArenaLogger {
        level,
        debug_filters,
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))?;

    for topic in unknown {
        log::warn!("Unknown debug topic '{}', expected one of {:?}", topic, DEBUG_TOPICS);
    }
    Ok(())
}

// Topic macros. Each tags the message with the vehicle id it concerns.
#[macro_export]
macro_rules! debug_motion {
    ($vehicle_id:expr, $($arg:tt)+) => {
        log::debug!(target: "motion", "[V{:02}] {}", $vehicle_id, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug_collision {
    ($vehicle_id:expr, $($arg:tt)+) => {
        log::debug!(target: "collision", "[V{:02}] {}", $vehicle_id, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug_weapon {
    ($vehicle_id:expr, $($arg:tt)+) => {
        log::debug!(target: "weapon", "[V{:02}] {}", $vehicle_id, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug_hazard {
    ($vehicle_id:expr, $($arg:tt)+) => {
        log::debug!(target: "hazard", "[V{:02}] {}", $vehicle_id, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug_arena {
    ($tick:expr, $($arg:tt)+) => {
        log::debug!(target: "arena", "Tick {} {}", $tick, format_args!($($arg)+))
    };
}
