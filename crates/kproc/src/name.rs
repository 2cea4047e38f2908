//! Fixed-size process names.

use core::fmt;

/// Longest name a record keeps, in bytes. Longer names are truncated.
pub const PROCESS_NAME_LEN: usize = 16;

/// A process name stored inline, without allocation.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ProcessName {
    bytes: [u8; PROCESS_NAME_LEN],
    len: u8,
}

impl ProcessName {
    pub const EMPTY: ProcessName = ProcessName {
        bytes: [0; PROCESS_NAME_LEN],
        len: 0,
    };

    /// Copy at most [`PROCESS_NAME_LEN`] bytes of `name`.
    pub fn new(name: &[u8]) -> Self {
        let len = name.len().min(PROCESS_NAME_LEN);
        let mut bytes = [0; PROCESS_NAME_LEN];
        bytes[..len].copy_from_slice(&name[..len]);
        Self { bytes, len: len as u8 }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for ProcessName {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Renders each byte as the character with the same code point
/// (Latin-1), for log records. Screen output writes [`ProcessName::as_bytes`]
/// directly instead.
impl fmt::Display for ProcessName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for &b in self.as_bytes() {
            f.write_char(b as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ProcessName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_kept_whole() {
        let name = ProcessName::new(b"init");
        assert_eq!(name.as_bytes(), b"init");
        assert_eq!(name.len(), 4);
        assert_eq!(name.to_string(), "init");
    }

    #[test]
    fn long_names_are_truncated() {
        let name = ProcessName::new(b"a-very-long-daemon-name");
        assert_eq!(name.len(), PROCESS_NAME_LEN);
        assert_eq!(name.as_bytes(), b"a-very-long-daem");
    }

    #[test]
    fn exact_length_fits() {
        let name = ProcessName::new(b"0123456789abcdef");
        assert_eq!(name.as_bytes(), b"0123456789abcdef");
    }

    #[test]
    fn empty_name() {
        let name = ProcessName::new(b"");
        assert!(name.is_empty());
        assert_eq!(name, ProcessName::EMPTY);
        assert_eq!(format!("{:?}", name), "\"\"");
    }
}
