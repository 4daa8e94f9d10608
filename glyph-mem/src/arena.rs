//! Host-replaceable allocator and the OOM notification hook.
//!
//! All allocations within a single engine or VM are meant to share one
//! parent allocator, so [`Arena`] is constructed once per engine and
//! handed down (by reference or `Arc`) to everything that allocates:
//! value pools, byte buffers, hashmap node storage.

use std::sync::Arc;

use crate::error::MemError;

/// A host-replaceable allocation backend.
///
/// The default [`SystemAllocator`] just forwards to the global Rust
/// allocator; a host embedding the engine may install its own (e.g. to
/// route through a custom heap or to inject allocation-failure testing)
/// via the `USER_MALLOC` configuration verb.
pub trait AllocatorOps: Send + Sync {
    /// Allocates `size` bytes, or returns `None` to signal OOM.
    fn alloc(&self, size: usize) -> Option<Vec<u8>>;

    /// Grows (or shrinks) `buf` to `new_size` bytes, preserving its
    /// existing content up to `min(old_len, new_size)`.
    fn realloc(&self, buf: &mut Vec<u8>, new_size: usize) -> bool {
        if let Some(mut fresh) = self.alloc(new_size) {
            let keep = buf.len().min(new_size);
            fresh[..keep].copy_from_slice(&buf[..keep]);
            *buf = fresh;
            true
        } else {
            false
        }
    }
}

/// Default allocator: the ordinary global Rust allocator via `Vec`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAllocator;

impl AllocatorOps for SystemAllocator {
    fn alloc(&self, size: usize) -> Option<Vec<u8>> {
        Some(vec![0u8; size])
    }
}

/// A callback the host can install to be notified the instant an
/// allocation fails, before the `Nomem`/`Oom` error kind is even
/// returned to the caller that triggered it.
pub type OomHook = Arc<dyn Fn() + Send + Sync>;

/// Per-engine allocation context.
///
/// Cheaply cloneable (an `Arc` wrapper internally would be the natural
/// next step for a host juggling multiple VMs off one engine; for now an
/// `Arena` is constructed once and borrowed for the engine's lifetime).
pub struct Arena {
    allocator: Arc<dyn AllocatorOps>,
    oom_hook: Option<OomHook>,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(Arc::new(SystemAllocator))
    }
}

impl Arena {
    pub fn new(allocator: Arc<dyn AllocatorOps>) -> Self {
        Self { allocator, oom_hook: None }
    }

    /// Installs (or replaces) the out-of-memory notification callback,
    /// mirroring the `MEM_ERR_CALLBACK` library configuration verb.
    pub fn set_oom_hook(&mut self, hook: OomHook) {
        self.oom_hook = Some(hook);
    }

    /// Replaces the allocator backend, mirroring `USER_MALLOC`.
    pub fn set_allocator(&mut self, allocator: Arc<dyn AllocatorOps>) {
        self.allocator = allocator;
    }

    /// Allocates `size` zeroed bytes, firing the OOM hook and returning
    /// [`MemError::Oom`] on failure.
    pub fn alloc(&self, size: usize) -> Result<Vec<u8>, MemError> {
        self.allocator.alloc(size).ok_or_else(|| {
            tracing::error!(size, "allocation failed");
            if let Some(hook) = &self.oom_hook {
                hook();
            }
            MemError::Oom
        })
    }

    pub fn realloc(&self, buf: &mut Vec<u8>, new_size: usize) -> Result<(), MemError> {
        if self.allocator.realloc(buf, new_size) {
            Ok(())
        } else {
            tracing::error!(new_size, "reallocation failed");
            if let Some(hook) = &self.oom_hook {
                hook();
            }
            Err(MemError::Oom)
        }
    }
}
