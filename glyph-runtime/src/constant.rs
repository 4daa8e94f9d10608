//! The constant registry: a per-VM name -> expander map, seeded at VM
//! construction with the engine's built-in constants and open for a
//! host to extend or override with `create`/`delete`.
//!
//! An expander is handed the value cell to fill in and the VM's value
//! host, so it can mint arrays/resources as easily as scalars. Rust
//! closures capture their own state, so there is no separate
//! user-data parameter the way a C callback would need.

use std::collections::HashMap;

use glyph_value::{ResourceHandle, Value, ValueHost};

pub type Expander = Box<dyn FnMut(&mut Value, &mut dyn ValueHost) + Send>;

#[derive(Default)]
pub struct ConstantRegistry {
    expanders: HashMap<Vec<u8>, Expander>,
}

impl ConstantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or overrides) a named constant. A second `create` for
    /// the same name replaces the first; overriding a built-in is
    /// allowed, matching a host's ability to shadow the defaults.
    pub fn create(&mut self, name: impl Into<Vec<u8>>, expander: Expander) {
        let name = name.into();
        if self.expanders.contains_key(&name) {
            tracing::warn!(name = %String::from_utf8_lossy(&name), "constant registry: overriding an existing constant");
        }
        self.expanders.insert(name, expander);
    }

    pub fn delete(&mut self, name: &[u8]) -> bool {
        self.expanders.remove(name).is_some()
    }

    pub fn contains(&self, name: &[u8]) -> bool {
        self.expanders.contains_key(name)
    }

    /// Looks up `name` and, if found, fills `value` through its
    /// expander. Returns whether the name was known.
    pub fn expand(&mut self, name: &[u8], value: &mut Value, host: &mut dyn ValueHost) -> bool {
        match self.expanders.get_mut(name) {
            Some(expander) => {
                expander(value, host);
                true
            }
            None => false,
        }
    }

    /// Registers every constant the engine defines out of the box:
    /// integer limits, platform path conventions, error-level bitmasks,
    /// sort/case/count/seek option codes, the standard stream handles,
    /// and the magic compile-time literals.
    pub fn seed_builtins(&mut self) {
        self.int_const("PHP_INT_MAX", i64::MAX);
        self.int_const("PHP_INT_MIN", i64::MIN);
        self.int_const("PHP_INT_SIZE", 8);

        self.str_const("PHP_EOL", if cfg!(windows) { "\r\n" } else { "\n" });
        self.str_const("DIRECTORY_SEPARATOR", if cfg!(windows) { "\\" } else { "/" });
        self.str_const("PATH_SEPARATOR", if cfg!(windows) { ";" } else { ":" });
        self.str_const("PHP_OS", std::env::consts::OS);
        self.str_const("GLYPH_VERSION", env!("CARGO_PKG_VERSION"));

        for (name, level) in [
            ("E_ERROR", 1),
            ("E_WARNING", 2),
            ("E_PARSE", 4),
            ("E_NOTICE", 8),
            ("E_CORE_ERROR", 16),
            ("E_CORE_WARNING", 32),
            ("E_COMPILE_ERROR", 64),
            ("E_COMPILE_WARNING", 128),
            ("E_USER_ERROR", 256),
            ("E_USER_WARNING", 512),
            ("E_USER_NOTICE", 1024),
            ("E_STRICT", 2048),
            ("E_RECOVERABLE_ERROR", 4096),
            ("E_DEPRECATED", 8192),
            ("E_USER_DEPRECATED", 16384),
            ("E_ALL", 32767),
        ] {
            self.int_const(name, level);
        }

        self.int_const("CASE_LOWER", 0);
        self.int_const("CASE_UPPER", 1);

        // Numbered in the order these options are documented here,
        // not the historical language's actual constant values.
        self.int_const("SORT_ASC", 1);
        self.int_const("SORT_DESC", 2);
        self.int_const("SORT_REGULAR", 3);
        self.int_const("SORT_NUMERIC", 4);
        self.int_const("SORT_STRING", 5);

        self.int_const("COUNT_NORMAL", 0);
        self.int_const("COUNT_RECURSIVE", 1);

        self.int_const("SEEK_SET", 0);
        self.int_const("SEEK_CUR", 1);
        self.int_const("SEEK_END", 2);

        self.int_const("STR_PAD_RIGHT", 1);
        self.int_const("STR_PAD_LEFT", 0);
        self.int_const("STR_PAD_BOTH", 2);

        self.resource_const("STDIN", 1);
        self.resource_const("STDOUT", 2);
        self.resource_const("STDERR", 3);

        // Magic literals whose real value depends on the current
        // compile unit (current file, current class) or wall clock.
        // No VM dispatch context exists at this seam to supply one, so
        // these expand to a null placeholder; a VM binds real expanders
        // for the names it actually tracks context for.
        for name in ["__FILE__", "__DIR__", "__TIME__", "__DATE__", "__CLASS__", "self", "parent", "static"] {
            self.create(name, Box::new(|value, _host| *value = Value::null()));
        }
    }

    fn int_const(&mut self, name: &'static str, v: i64) {
        self.create(name, Box::new(move |value, _host| *value = Value::from_int(v)));
    }

    fn str_const(&mut self, name: &'static str, v: &'static str) {
        self.create(name, Box::new(move |value, _host| *value = Value::from_string(v.as_bytes().to_vec())));
    }

    fn resource_const(&mut self, name: &'static str, id: u64) {
        self.create(name, Box::new(move |value, _host| {
            *value = Value::from_resource(ResourceHandle(std::num::NonZeroU64::new(id)));
        }));
    }
}
