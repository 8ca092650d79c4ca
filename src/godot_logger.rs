// Copyright 2016 Victor Brekenfeld
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Module providing the GodotLogger Implementation

use log::{Level, LevelFilter, Log, Metadata, Record};
use simplelog::{CombinedLogger, Config, SharedLogger};

use chrono::prelude::*;
use godot::prelude::*;

/// Sends log records to the editor's output panel. Errors and warnings go
/// through the engine's error/warning channels so they show up in the
/// debugger's error list as well.
pub struct GodotLogger {
    level: LevelFilter,
    config: Config,
}

impl GodotLogger {
    #[must_use]
    pub fn new(log_level: LevelFilter, config: Config) -> Box<GodotLogger> {
        Box::new(GodotLogger {
            level: log_level,
            config,
        })
    }
}

impl Log for GodotLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            log(&self.config, record);
        }
    }

    fn flush(&self) {}
}

#[inline(always)]
pub fn log(_config: &Config, record: &Record<'_>) {
    match record.level() {
        Level::Error => godot_error!("[godot-components] {}", record.args()),
        Level::Warn => godot_warn!("[godot-components] {}", record.args()),
        level => {
            let local: DateTime<Local> = Local::now();
            let formatted_time = local.format("%Y-%m-%d %I:%M:%S %P").to_string();
            godot_print!("[{}] {} - {}", formatted_time, level, record.args());
        }
    }
}

impl SharedLogger for GodotLogger {
    fn level(&self) -> LevelFilter {
        self.level
    }

    fn config(&self) -> Option<&Config> {
        Some(&self.config)
    }

    fn as_log(self: Box<Self>) -> Box<dyn Log> {
        Box::new(*self)
    }
}

/// Installs the logger. The extension can be initialised more than once per
/// process (hot reload), so an already-installed logger is not an error.
pub fn setup_logging() {
    match CombinedLogger::init(vec![GodotLogger::new(LevelFilter::Trace, Config::default())]) {
        Ok(()) => {
            log::set_max_level(LevelFilter::Info);
        }
        Err(err) => {
            godot_print!("setup_logging skipped: {:?}", err);
        }
    }
}

/// Applies the configured verbosity to the installed logger.
pub fn set_level(level: LevelFilter) {
    log::set_max_level(level);
}
