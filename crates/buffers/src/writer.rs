//! Auto-growing binary buffer writer.

/// A binary buffer writer that appends big-endian encodings to a `Vec<u8>`.
///
/// # Example
///
/// ```
/// use archivist_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u32(5);
/// writer.utf8("Alice");
/// assert_eq!(writer.flush(), b"\x00\x00\x00\x05Alice".to_vec());
/// ```
#[derive(Debug, Default, Clone)]
pub struct Writer {
    uint8: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self { uint8: Vec::new() }
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    /// Returns the written bytes and leaves the writer empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }

    /// Consumes the writer, returning the written bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.uint8
    }

    #[inline]
    pub fn u8(&mut self, n: u8) {
        self.uint8.push(n);
    }

    #[inline]
    pub fn i8(&mut self, n: i8) {
        self.uint8.push(n as u8);
    }

    #[inline]
    pub fn u16(&mut self, n: u16) {
        self.uint8.extend_from_slice(&n.to_be_bytes());
    }

    #[inline]
    pub fn i16(&mut self, n: i16) {
        self.uint8.extend_from_slice(&n.to_be_bytes());
    }

    #[inline]
    pub fn u32(&mut self, n: u32) {
        self.uint8.extend_from_slice(&n.to_be_bytes());
    }

    #[inline]
    pub fn i32(&mut self, n: i32) {
        self.uint8.extend_from_slice(&n.to_be_bytes());
    }

    #[inline]
    pub fn u64(&mut self, n: u64) {
        self.uint8.extend_from_slice(&n.to_be_bytes());
    }

    #[inline]
    pub fn i64(&mut self, n: i64) {
        self.uint8.extend_from_slice(&n.to_be_bytes());
    }

    #[inline]
    pub fn f32(&mut self, n: f32) {
        self.uint8.extend_from_slice(&n.to_be_bytes());
    }

    #[inline]
    pub fn f64(&mut self, n: f64) {
        self.uint8.extend_from_slice(&n.to_be_bytes());
    }

    /// Appends the UTF-8 bytes of `s` without a length prefix.
    pub fn utf8(&mut self, s: &str) {
        self.uint8.extend_from_slice(s.as_bytes());
    }
}
