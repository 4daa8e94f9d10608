//! Shared message templates for command output.

pub mod error_messages {
    pub const NO_INPUT_FILES: &str = "no input files specified";
    pub const TARGET_NOT_DIR: &str = "target path is not a directory";
    pub const DIR_NOT_EMPTY: &str = "directory is not empty";
}

pub mod output_messages {
    pub const CREATED_DIR: &str = "created directory";
    pub const CREATED_FILE: &str = "created file";
    pub const CHECK_OK: &str = "parsed cleanly";
    pub const CHECK_FAILED: &str = "syntax errors";
}
