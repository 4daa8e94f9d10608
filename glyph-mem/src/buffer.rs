//! Growable byte buffer.
//!
//! Every cached string representation of a value, every compile-time
//! error message, and the engine's `ERR_LOG` blob are built on this one
//! abstraction instead of ad-hoc `String`/`Vec<u8>` juggling.

use crate::arena::Arena;
use crate::error::MemError;

enum Storage<'a> {
    Owned(Vec<u8>),
    /// A read-only view over externally-owned bytes. Any attempt to
    /// mutate a buffer in this mode first copies the borrowed bytes into
    /// an owned `Vec` (copy-on-write), matching the "borrows an external
    /// buffer" contract without ever letting a write alias
    /// memory the buffer does not own.
    Borrowed(&'a [u8]),
}

/// A growable, optionally-null-terminated byte buffer.
pub struct ByteBuffer<'a> {
    storage: Storage<'a>,
}

impl<'a> ByteBuffer<'a> {
    pub fn new() -> Self {
        Self { storage: Storage::Owned(Vec::new()) }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self { storage: Storage::Owned(Vec::with_capacity(cap)) }
    }

    /// Wraps `bytes` in read-only mode: no allocation happens until the
    /// first mutating call.
    pub fn borrowed(bytes: &'a [u8]) -> Self {
        Self { storage: Storage::Borrowed(bytes) }
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(self.storage, Storage::Borrowed(_))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match &self.storage {
            Storage::Owned(v) => v.as_slice(),
            Storage::Borrowed(b) => b,
        }
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(self.as_bytes()).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    fn to_owned_mut(&mut self) -> &mut Vec<u8> {
        if let Storage::Borrowed(b) = &self.storage {
            self.storage = Storage::Owned(b.to_vec());
        }
        match &mut self.storage {
            Storage::Owned(v) => v,
            Storage::Borrowed(_) => unreachable!(),
        }
    }

    /// Appends raw bytes, upgrading a borrowed buffer to owned on first
    /// write.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), MemError> {
        self.to_owned_mut().extend_from_slice(bytes);
        Ok(())
    }

    pub fn append_str(&mut self, s: &str) -> Result<(), MemError> {
        self.append(s.as_bytes())
    }

    /// printf-style append. Supports `%z` (a borrowed `&str` argument,
    /// inserted verbatim) and `%qd` (a 64-bit signed integer) in addition
    /// to the usual `%d`/`%s`/`%%`.
    pub fn format_append(&mut self, fmt: &str, args: &[FormatArg<'_>]) -> Result<(), MemError> {
        let mut arg_iter = args.iter();
        let mut chars = fmt.chars().peekable();
        let mut out = String::new();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.peek() {
                Some('%') => {
                    chars.next();
                    out.push('%');
                }
                Some('z') => {
                    chars.next();
                    if let Some(FormatArg::Str(s)) = arg_iter.next() {
                        out.push_str(s);
                    }
                }
                Some('q') => {
                    chars.next();
                    if chars.peek() == Some(&'d') {
                        chars.next();
                        if let Some(FormatArg::I64(v)) = arg_iter.next() {
                            out.push_str(&v.to_string());
                        }
                    }
                }
                Some('d') => {
                    chars.next();
                    if let Some(FormatArg::I64(v)) = arg_iter.next() {
                        out.push_str(&v.to_string());
                    }
                }
                Some('s') => {
                    chars.next();
                    if let Some(FormatArg::Str(s)) = arg_iter.next() {
                        out.push_str(s);
                    }
                }
                _ => out.push('%'),
            }
        }
        self.append_str(&out)
    }

    /// Drops all content, returning the buffer to owned-and-empty.
    pub fn reset(&mut self) {
        self.storage = Storage::Owned(Vec::new());
    }

    /// Ensures the buffer ends with a `\0` byte (without counting it in
    /// [`ByteBuffer::len`]'s logical content) and returns the full
    /// null-terminated slice, suitable for handing to a C-style host API.
    pub fn null_terminated(&mut self) -> &[u8] {
        let buf = self.to_owned_mut();
        if buf.last() != Some(&0) {
            buf.push(0);
        }
        buf.as_slice()
    }
}

impl<'a> Default for ByteBuffer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// An argument to [`ByteBuffer::format_append`].
pub enum FormatArg<'a> {
    Str(&'a str),
    I64(i64),
}

/// Allocates a [`ByteBuffer`] through an [`Arena`], pre-reserving
/// capacity; surfaces [`MemError::Oom`] if the arena's allocator can't
/// back the initial reservation.
pub fn with_arena_capacity<'a>(arena: &Arena, cap: usize) -> Result<ByteBuffer<'a>, MemError> {
    arena.alloc(cap)?;
    Ok(ByteBuffer::with_capacity(cap))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_accumulates() {
        let mut buf = ByteBuffer::new();
        buf.append_str("hello, ").unwrap();
        buf.append_str("world").unwrap();
        assert_eq!(buf.as_str(), "hello, world");
    }

    #[test]
    fn format_append_handles_z_and_qd() {
        let mut buf = ByteBuffer::new();
        buf.format_append(
            "name=%z value=%qd",
            &[FormatArg::Str("count"), FormatArg::I64(-42)],
        )
        .unwrap();
        assert_eq!(buf.as_str(), "name=count value=-42");
    }

    #[test]
    fn borrowed_buffer_upgrades_on_write() {
        let source = b"existing".to_vec();
        let mut buf = ByteBuffer::borrowed(&source);
        assert!(buf.is_borrowed());
        assert_eq!(buf.as_str(), "existing");
        buf.append_str(" more").unwrap();
        assert!(!buf.is_borrowed());
        assert_eq!(buf.as_str(), "existing more");
    }

    #[test]
    fn null_terminated_appends_single_nul() {
        let mut buf = ByteBuffer::new();
        buf.append_str("abc").unwrap();
        let bytes = buf.null_terminated().to_vec();
        assert_eq!(bytes, b"abc\0");
        // Calling twice must not append a second NUL.
        let bytes2 = buf.null_terminated();
        assert_eq!(bytes2, b"abc\0");
    }

    #[test]
    fn reset_drops_content_and_clears_borrow() {
        let source = b"x".to_vec();
        let mut buf = ByteBuffer::borrowed(&source);
        buf.reset();
        assert!(!buf.is_borrowed());
        assert_eq!(buf.len(), 0);
    }
}
