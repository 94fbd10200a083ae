//! Process-wide registry of named loggers
//!
//! Looking up the same name twice yields the same [`Logger`], so appenders and
//! level set through one handle are seen by every other handle.

use super::logger::Logger;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

static REGISTRY: OnceLock<RwLock<HashMap<String, Arc<Logger>>>> = OnceLock::new();

fn loggers() -> &'static RwLock<HashMap<String, Arc<Logger>>> {
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Return the logger registered under `name`, creating it on first use
pub fn get(name: &str) -> Arc<Logger> {
    if let Some(logger) = loggers().read().get(name) {
        return Arc::clone(logger);
    }

    let mut registry = loggers().write();
    let logger = registry
        .entry(name.to_string())
        .or_insert_with(|| Arc::new(Logger::new(name)));
    Arc::clone(logger)
}

/// Whether a logger has been created under `name`
pub fn contains(name: &str) -> bool {
    loggers().read().contains_key(name)
}
