//! `Library` performs the one-time, process-wide subsystem init every
//! engine depends on; `Engine` owns a set of VMs and the per-engine
//! error log. The split mirrors the library-verb/engine-verb split in
//! the host API surface: library verbs only make sense before `init`,
//! engine verbs only make sense after it.

use glyph_mem::ByteBuffer;
use glyph_util::{define_idx, ErrorKind, IndexVec};

use crate::config::{EngineVerb, ErrorConsumer, LibraryVerb, ThreadLevel};
use crate::error::EngineResult;
use crate::mutex::Guarded;
use crate::vfs::{NullVfs, Vfs};
use crate::vm::Vm;

define_idx!(VmId);

enum LibraryState {
    Uninitialized,
    Initialized,
}

/// The process-wide, one-time-init half of the host API surface.
/// Library verbs (`VFS`, `USER_MALLOC`, `USER_MUTEX`, `THREAD_LEVEL_*`,
/// `MEM_ERR_CALLBACK`) are only accepted before [`Library::init`] runs;
/// afterward they return [`ErrorKind::Locked`].
pub struct Library {
    state: LibraryState,
    thread_level: ThreadLevel,
    vfs: Box<dyn Vfs>,
    mem_err_callback: Option<Box<dyn FnMut() + Send>>,
    mutex: Guarded,
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Library {
    pub fn new() -> Self {
        Self {
            state: LibraryState::Uninitialized,
            thread_level: ThreadLevel::Single,
            vfs: Box::new(NullVfs),
            mem_err_callback: None,
            mutex: Guarded::new(ThreadLevel::Single),
        }
    }

    /// Applies one library-level configuration verb. Rejected once
    /// `init` has already run.
    pub fn configure(&mut self, verb: LibraryVerb) -> EngineResult<()> {
        let _ticket = self.mutex.enter();
        if matches!(self.state, LibraryState::Initialized) {
            return Err(ErrorKind::Locked);
        }
        match verb {
            LibraryVerb::Vfs(vfs) => self.vfs = vfs,
            LibraryVerb::UserMalloc => {
                tracing::warn!("USER_MALLOC accepted but has no effect: allocation goes through the Rust global allocator");
            }
            LibraryVerb::MemErrCallback(cb) => self.mem_err_callback = Some(cb),
            LibraryVerb::UserMutex => {
                tracing::warn!("USER_MUTEX accepted but has no effect: mutexing always goes through parking_lot");
            }
            LibraryVerb::ThreadLevelSingle => {
                self.thread_level = ThreadLevel::Single;
                self.mutex.set_level(ThreadLevel::Single);
            }
            LibraryVerb::ThreadLevelMulti => {
                self.thread_level = ThreadLevel::Multi;
                self.mutex.set_level(ThreadLevel::Multi);
            }
        }
        Ok(())
    }

    /// Runs one-time subsystem init; further `configure` calls are
    /// refused afterward. Calling `init` twice returns `Locked`.
    pub fn init(&mut self) -> EngineResult<()> {
        let _ticket = self.mutex.enter();
        if matches!(self.state, LibraryState::Initialized) {
            return Err(ErrorKind::Locked);
        }
        self.state = LibraryState::Initialized;
        tracing::debug!("library subsystem initialized");
        Ok(())
    }

    pub fn vfs(&self) -> &dyn Vfs {
        self.vfs.as_ref()
    }

    pub fn notify_oom(&mut self) {
        if let Some(cb) = &mut self.mem_err_callback {
            cb();
        }
    }

    /// Creates a new engine inheriting the library's current thread
    /// level. Fails with `Corrupt` if `init` has not run yet.
    pub fn new_engine(&self) -> EngineResult<Engine> {
        if matches!(self.state, LibraryState::Uninitialized) {
            return Err(ErrorKind::Corrupt);
        }
        Ok(Engine::new(self.thread_level))
    }
}

/// One engine: a set of VMs, an accumulated compile-error log, and the
/// consumer that log is optionally forwarded to.
pub struct Engine {
    vms: IndexVec<VmId, Option<Vm>>,
    error_log: ByteBuffer<'static>,
    error_consumer: Option<ErrorConsumer>,
    thread_level: ThreadLevel,
    mutex: Guarded,
}

impl Engine {
    pub fn new(thread_level: ThreadLevel) -> Self {
        Self {
            vms: IndexVec::new(),
            error_log: ByteBuffer::new(),
            error_consumer: None,
            thread_level,
            mutex: Guarded::new(thread_level),
        }
    }

    /// Applies one engine-level configuration verb.
    pub fn configure(&mut self, verb: EngineVerb) -> EngineResult<()> {
        let _ticket = self.mutex.enter();
        match verb {
            EngineVerb::ErrOutput(consumer) => self.error_consumer = consumer,
            EngineVerb::ErrLog => {
                // The fetch itself goes through `error_log`; this verb
                // exists only so the table lists all three together.
            }
            EngineVerb::ErrAbort => {}
        }
        Ok(())
    }

    /// Appends one compile-time error to the accumulated log and
    /// forwards it to the installed consumer, if any.
    pub fn record_error(&mut self, message: &str) {
        let _ticket = self.mutex.enter();
        let _ = self.error_log.append_str(message);
        let _ = self.error_log.append_str("\n");
        if let Some(consumer) = &mut self.error_consumer {
            consumer(message);
        }
    }

    pub fn error_log(&self) -> &str {
        self.error_log.as_str()
    }

    pub fn create_vm(&mut self) -> VmId {
        let _ticket = self.mutex.enter();
        self.vms.push(Some(Vm::new(self.thread_level)))
    }

    /// Releases a VM, freeing the slot's contents. The `VmId` itself
    /// stays reserved (never reused), matching `IndexVec`'s append-only
    /// handle space.
    pub fn release_vm(&mut self, id: VmId) -> EngineResult<()> {
        let _ticket = self.mutex.enter();
        match self.vms.get_mut(id) {
            Some(slot) if slot.is_some() => {
                *slot = None;
                Ok(())
            }
            _ => Err(ErrorKind::Corrupt),
        }
    }

    pub fn vm(&self, id: VmId) -> Option<&Vm> {
        self.vms.get(id)?.as_ref()
    }

    pub fn vm_mut(&mut self, id: VmId) -> Option<&mut Vm> {
        self.vms.get_mut(id)?.as_mut()
    }

    /// Every VM id that hasn't been released, for the "per-engine list
    /// of VMs" surface.
    pub fn live_vms(&self) -> impl Iterator<Item = VmId> + '_ {
        self.vms.iter_enumerated().filter_map(|(id, slot)| slot.is_some().then_some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_rejects_configure_after_init() {
        let mut lib = Library::new();
        lib.configure(LibraryVerb::ThreadLevelMulti).unwrap();
        lib.init().unwrap();
        assert_eq!(lib.configure(LibraryVerb::ThreadLevelSingle), Err(ErrorKind::Locked));
    }

    #[test]
    fn new_engine_fails_before_init() {
        let lib = Library::new();
        assert_eq!(lib.new_engine().err(), Some(ErrorKind::Corrupt));
    }

    #[test]
    fn new_engine_inherits_thread_level_after_init() {
        let mut lib = Library::new();
        lib.configure(LibraryVerb::ThreadLevelMulti).unwrap();
        lib.init().unwrap();
        let engine = lib.new_engine().unwrap();
        assert_eq!(engine.thread_level, ThreadLevel::Multi);
    }

    #[test]
    fn create_and_release_vm_round_trips() {
        let mut engine = Engine::new(ThreadLevel::Single);
        let id = engine.create_vm();
        assert!(engine.vm(id).is_some());
        engine.release_vm(id).unwrap();
        assert!(engine.vm(id).is_none());
        assert_eq!(engine.live_vms().count(), 0);
    }

    #[test]
    fn releasing_an_already_released_vm_errors() {
        let mut engine = Engine::new(ThreadLevel::Single);
        let id = engine.create_vm();
        engine.release_vm(id).unwrap();
        assert_eq!(engine.release_vm(id), Err(ErrorKind::Corrupt));
    }

    #[test]
    fn record_error_accumulates_and_forwards() {
        let mut engine = Engine::new(ThreadLevel::Single);
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen2 = seen.clone();
        engine.configure(EngineVerb::ErrOutput(Some(Box::new(move |msg: &str| seen2.lock().unwrap().push(msg.to_string()))))).unwrap();
        engine.record_error("unexpected token ';'");
        engine.record_error("undefined variable");
        assert_eq!(seen.lock().unwrap().len(), 2);
        assert!(engine.error_log().contains("unexpected token"));
        assert!(engine.error_log().contains("undefined variable"));
    }

    #[test]
    fn live_vms_lists_only_unreleased_ids() {
        let mut engine = Engine::new(ThreadLevel::Single);
        let a = engine.create_vm();
        let _b = engine.create_vm();
        engine.release_vm(a).unwrap();
        assert_eq!(engine.live_vms().count(), 1);
    }
}
