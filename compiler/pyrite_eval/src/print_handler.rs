//! Print sink for the `print` builtin.
//!
//! Output goes to stdout by default; tests capture it in a buffer, and a
//! silent handler discards it. Enum dispatch keeps the call static.

use std::sync::Arc;

use parking_lot::Mutex;

/// Writes to stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn println(&self, msg: &str) {
        println!("{msg}");
    }
}

/// Captures output in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    /// Everything printed so far.
    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

/// Print handler implementation using enum dispatch.
pub enum PrintHandlerImpl {
    /// Writes to stdout (default).
    Stdout(StdoutPrintHandler),
    /// Captures to a buffer (tests, embedding hosts).
    Buffer(BufferPrintHandler),
    /// Discards all output.
    Silent,
}

impl PrintHandlerImpl {
    /// Print a line (with newline).
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for handlers that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    /// Clear captured output. No-op for stdout and silent.
    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Print handler shared between interpreters.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}
