//! `info` — bring up a library and one VM, and report what's live:
//! the built-in constants a script can see and the VM's bookkeeping.
//! A sanity check for the engine lifecycle with no script involved.

use glyph_runtime::{Library, LibraryVerb};

use crate::error::Result;

const SAMPLE_CONSTANTS: &[&str] = &["PHP_INT_MAX", "PHP_INT_SIZE", "PHP_EOL", "E_ALL", "STDOUT"];

pub struct EngineInfo {
    pub thread_level: glyph_runtime::ThreadLevel,
    pub constants: Vec<(String, String)>,
}

pub fn run_info(multi_thread: bool) -> Result<EngineInfo> {
    let mut lib = Library::new();
    lib.configure(if multi_thread { LibraryVerb::ThreadLevelMulti } else { LibraryVerb::ThreadLevelSingle })?;
    lib.init()?;

    let mut engine = lib.new_engine()?;
    let vm_id = engine.create_vm();
    let vm = engine.vm_mut(vm_id).ok_or(glyph_util::ErrorKind::Corrupt)?;

    let mut constants = Vec::with_capacity(SAMPLE_CONSTANTS.len());
    for name in SAMPLE_CONSTANTS {
        let mut value = glyph_value::Value::null();
        vm.expand_constant(name.as_bytes(), &mut value);
        constants.push((name.to_string(), format!("{:?}", value.kind())));
    }

    let thread_level = if multi_thread { glyph_runtime::ThreadLevel::Multi } else { glyph_runtime::ThreadLevel::Single };
    Ok(EngineInfo { thread_level, constants })
}

pub fn print_info(info: &EngineInfo) {
    println!("thread level: {:?}", info.thread_level);
    for (name, value) in &info.constants {
        println!("{name} = {value}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_lists_the_sample_constants() {
        let info = run_info(false).unwrap();
        assert_eq!(info.constants.len(), SAMPLE_CONSTANTS.len());
        assert!(info.constants.iter().any(|(name, _)| name == "PHP_INT_MAX"));
    }

    #[test]
    fn multi_thread_flag_is_reflected_back() {
        let info = run_info(true).unwrap();
        assert_eq!(info.thread_level, glyph_runtime::ThreadLevel::Multi);
    }
}
