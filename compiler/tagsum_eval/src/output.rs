//! Output captured from `print`.

use parking_lot::Mutex;

/// Buffer that `print` appends to; the driver drains it.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    buffer: Mutex<String>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `msg` and a newline.
    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    /// Everything printed so far, without draining it.
    pub fn contents(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Drain the buffer.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.buffer.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }
}
