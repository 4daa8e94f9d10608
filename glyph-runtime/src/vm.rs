//! A VM: one script's worth of value storage, constants, installed
//! foreign functions, and the output/abort contract a host observes
//! while it runs.
//!
//! Building and executing bytecode is out of scope here; this crate
//! stops at the host-facing bookkeeping a VM needs before and around
//! execution — value/array cells, constant expansion, function
//! registration, output forwarding.

use std::collections::HashMap;

use glyph_map::{Key, WalkControl};
use glyph_value::{ArrayHandle, ArrayHost, Value, ValueId};

use crate::constant::ConstantRegistry;
use crate::error::EngineResult;
use crate::host::EngineHost;
use crate::mutex::{Guarded, ThreadLevel, Ticket};
use glyph_util::ErrorKind;

/// A host-installed function the VM can resolve by name. The opaque
/// user-data a C host would thread through separately is just whatever
/// the closure itself captures.
pub struct ForeignFunction {
    pub callback: Box<dyn FnMut(&[Value]) -> Value + Send>,
}

/// Each `echo`/`print` write is forwarded to this consumer; a `true`
/// return aborts the VM, matching the cooperative-cancellation contract
/// the rest of the host API surface uses.
pub type OutputConsumer = Box<dyn FnMut(&[u8]) -> bool + Send>;

pub struct Vm {
    host: EngineHost,
    constants: ConstantRegistry,
    functions: HashMap<Vec<u8>, ForeignFunction>,
    output_consumer: Option<OutputConsumer>,
    mutex: Guarded,
}

impl Vm {
    pub fn new(thread_level: ThreadLevel) -> Self {
        let mut constants = ConstantRegistry::new();
        constants.seed_builtins();
        Self {
            host: EngineHost::new(),
            constants,
            functions: HashMap::new(),
            output_consumer: None,
            mutex: Guarded::new(thread_level),
        }
    }

    /// Acquires this VM's recursive mutex for the duration of the
    /// returned guard. A no-op under single-thread mode.
    pub fn lock(&self) -> Ticket<'_> {
        self.mutex.enter()
    }

    pub fn host_mut(&mut self) -> &mut EngineHost {
        &mut self.host
    }

    pub fn host(&self) -> &EngineHost {
        &self.host
    }

    // -- constants ---------------------------------------------------

    pub fn create_constant(&mut self, name: impl Into<Vec<u8>>, expander: crate::constant::Expander) {
        self.constants.create(name, expander);
    }

    pub fn delete_constant(&mut self, name: &[u8]) -> bool {
        self.constants.delete(name)
    }

    /// Expands a named constant into `value`. Returns whether `name`
    /// was recognized.
    pub fn expand_constant(&mut self, name: &[u8], value: &mut Value) -> bool {
        self.constants.expand(name, value, &mut self.host)
    }

    // -- value cells ---------------------------------------------------

    pub fn new_value(&mut self, value: Value) -> ValueId {
        self.host.heap.values.alloc(value)
    }

    pub fn value(&self, id: ValueId) -> Option<&Value> {
        self.host.heap.values.get(id)
    }

    pub fn release_value(&mut self, id: ValueId) {
        let mut values = std::mem::take(&mut self.host.heap.values);
        values.release(id, &mut self.host);
        self.host.heap.values = values;
    }

    // -- arrays ----------------------------------------------------------

    pub fn array_new(&mut self) -> ArrayHandle {
        self.host.array_new_empty()
    }

    /// Enters `value` under `key` (`None` for PHP's keyless
    /// auto-index rule). A value superseding an existing key is
    /// released, unless the superseded slot was a by-reference alias.
    pub fn array_insert(&mut self, handle: ArrayHandle, key: Option<Key>, value: Value) -> EngineResult<()> {
        let value_id = self.host.heap.values.alloc(value);
        let outcome = match self.host.heap.array_mut(handle) {
            Some(map) => map.insert(key, value_id),
            None => return Err(ErrorKind::Corrupt),
        };
        if let glyph_map::Insert::Replaced { previous, previous_foreign, .. } = outcome {
            if !previous_foreign {
                self.release_value(previous);
            }
        }
        Ok(())
    }

    pub fn array_get(&self, handle: ArrayHandle, key: &Key) -> Option<&Value> {
        let map = self.host.heap.array(handle)?;
        let id = map.lookup(key)?;
        let value_id = map.get(id)?.value;
        self.host.heap.values.get(value_id)
    }

    /// Visits every entry in insertion order until the callback asks to
    /// stop.
    pub fn array_walk<F>(&self, handle: ArrayHandle, mut f: F)
    where
        F: FnMut(&Key, &Value) -> WalkControl,
    {
        let Some(map) = self.host.heap.array(handle) else { return };
        map.for_each(|key, value_id| match self.host.heap.values.get(value_id) {
            Some(value) => f(key, value),
            None => WalkControl::Continue,
        });
    }

    // -- foreign functions -------------------------------------------

    /// Installs a foreign function under `name`, trimmed of leading and
    /// trailing whitespace. An empty name is rejected.
    pub fn install_function(&mut self, name: &[u8], callback: Box<dyn FnMut(&[Value]) -> Value + Send>) -> EngineResult<()> {
        let trimmed = trim_ascii(name);
        if trimmed.is_empty() {
            return Err(ErrorKind::Corrupt);
        }
        if self.functions.contains_key(trimmed) {
            tracing::warn!(name = %String::from_utf8_lossy(trimmed), "foreign function registry: overriding an existing function");
        }
        self.functions.insert(trimmed.to_vec(), ForeignFunction { callback });
        Ok(())
    }

    pub fn has_function(&self, name: &[u8]) -> bool {
        self.functions.contains_key(trim_ascii(name))
    }

    /// Invokes an installed function by name, if one is registered.
    /// Temporarily removed from the table for the duration of the call
    /// so a callback that installs or re-installs a function during its
    /// own invocation cannot alias its own storage.
    pub fn call_function(&mut self, name: &[u8], args: &[Value]) -> Option<Value> {
        let key = trim_ascii(name).to_vec();
        let mut func = self.functions.remove(&key)?;
        let result = (func.callback)(args);
        self.functions.insert(key, func);
        Some(result)
    }

    // -- objects -------------------------------------------------------

    pub fn active_instances(&self) -> impl Iterator<Item = glyph_value::ObjectHandle> + '_ {
        self.host.objects.active()
    }

    // -- output ----------------------------------------------------------

    pub fn set_output_consumer(&mut self, consumer: OutputConsumer) {
        self.output_consumer = Some(consumer);
    }

    /// Forwards `bytes` (an `echo`/`print` write) to the installed
    /// consumer. Returns whether the consumer asked to abort the VM; a
    /// VM with no consumer installed never aborts.
    pub fn emit_output(&mut self, bytes: &[u8]) -> bool {
        match &mut self.output_consumer {
            Some(consumer) => consumer(bytes),
            None => false,
        }
    }
}

fn trim_ascii(name: &[u8]) -> &[u8] {
    let start = name.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(name.len());
    let end = name.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(start, |i| i + 1);
    &name[start..end]
}
