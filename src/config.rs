//! Bridge configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! Environment overrides use the `RNATIVE_` prefix.
use serde::{Deserialize, Serialize};
use tracing::warn;

/// GNU R's default `R_PPStackSize`.
pub const DEFAULT_PROTECT_STACK_SIZE: usize = 50_000;
pub const DEFAULT_GC_THRESHOLD: usize = 10_000;
pub const DEFAULT_PARALLEL_SCAN_THRESHOLD: usize = 65_536;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Maximum depth of the protection stack.
    pub protect_stack_size: usize,
    /// Allocations between heap collections.
    pub gc_threshold: usize,
    pub gc_enabled: bool,
    /// Log every upcall entry at `trace` level.
    pub trace_upcalls: bool,
    /// Verify protection-stack balance around native callbacks.
    pub check_native_balance: bool,
    /// Minimum vector length scanned for NA in parallel.
    pub parallel_scan_threshold: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            protect_stack_size: DEFAULT_PROTECT_STACK_SIZE,
            gc_threshold: DEFAULT_GC_THRESHOLD,
            gc_enabled: true,
            trace_upcalls: false,
            check_native_balance: true,
            parallel_scan_threshold: DEFAULT_PARALLEL_SCAN_THRESHOLD,
        }
    }
}

impl BridgeConfig {
    pub fn from_json_str(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Defaults overlaid with `RNATIVE_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Applies overrides from `lookup`; unparsable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = parse_override(&lookup, "RNATIVE_PROTECT_STACK_SIZE") {
            self.protect_stack_size = v;
        }
        if let Some(v) = parse_override(&lookup, "RNATIVE_GC_THRESHOLD") {
            self.gc_threshold = v;
        }
        if let Some(v) = parse_override(&lookup, "RNATIVE_GC_ENABLED") {
            self.gc_enabled = v;
        }
        if let Some(v) = parse_override(&lookup, "RNATIVE_TRACE_UPCALLS") {
            self.trace_upcalls = v;
        }
    }
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable configuration override");
            None
        }
    }
}
