//! Copy context configuration

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Limits and cancellation for copy calls.
///
/// A context is consulted before every pending task, so a copy can be
/// interrupted from another thread or stopped once it has grown too large.
#[derive(Debug, Clone, Default)]
pub struct CopyContext {
    /// Maximum number of non-atomic nodes one call may copy (`None` = unbounded)
    pub max_nodes: Option<usize>,

    /// Interrupt flag - set to true to abort copying
    pub interrupt: Arc<AtomicBool>,
}

impl CopyContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a node limit.
    pub fn with_max_nodes(max_nodes: usize) -> Self {
        Self {
            max_nodes: Some(max_nodes),
            ..Default::default()
        }
    }

    /// Check if copying has been interrupted.
    pub fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }

    /// Request interruption of copying.
    pub fn interrupt(&self) {
        self.interrupt.store(true, Ordering::Relaxed);
    }

    /// Reset the interrupt flag.
    pub fn reset_interrupt(&self) {
        self.interrupt.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        let ctx = CopyContext::new();
        assert_eq!(ctx.max_nodes, None);
        assert!(!ctx.is_interrupted());
    }

    #[test]
    fn test_interrupt_is_shared_between_clones() {
        let ctx = CopyContext::with_max_nodes(10);
        let other = ctx.clone();
        other.interrupt();
        assert!(ctx.is_interrupted());
        ctx.reset_interrupt();
        assert!(!other.is_interrupted());
        assert_eq!(other.max_nodes, Some(10));
    }
}
