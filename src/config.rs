//! Runtime-wide configuration.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
// (none)

/// Fixed sentinel scheduler name used as the implicit default when no
/// scheduler has been registered via
/// [`crate::director::Director::set_default_scheduler`].
pub const DEFAULT_SCHEDULER_NAME: &str = "default";

/// Default mailbox capacity for actors that don't request one
/// explicitly.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 10_000_000;

/// Process-wide settings a [`crate::director::Director`] is built with.
///
/// Currently just the default mailbox capacity, but kept as its own
/// type (rather than a bare `usize` parameter) so new knobs can be
/// added without changing every constructor call site.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    default_mailbox_capacity: usize,
}

impl RuntimeConfig {
    /// Start from the built-in defaults.
    pub fn builder() -> RuntimeConfigBuilder {
        RuntimeConfigBuilder::default()
    }

    pub fn default_mailbox_capacity(&self) -> usize {
        self.default_mailbox_capacity
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
        }
    }
}

/// Builder for [`RuntimeConfig`].
#[derive(Debug, Default)]
pub struct RuntimeConfigBuilder {
    default_mailbox_capacity: Option<usize>,
}

impl RuntimeConfigBuilder {
    pub fn default_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.default_mailbox_capacity = Some(capacity);
        self
    }

    pub fn build(self) -> RuntimeConfig {
        RuntimeConfig {
            default_mailbox_capacity: self
                .default_mailbox_capacity
                .unwrap_or(DEFAULT_MAILBOX_CAPACITY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_order_of_magnitude() {
        assert_eq!(RuntimeConfig::default().default_mailbox_capacity(), 10_000_000);
    }

    #[test]
    fn builder_overrides_default() {
        let config = RuntimeConfig::builder().default_mailbox_capacity(16).build();
        assert_eq!(config.default_mailbox_capacity(), 16);
    }
}
