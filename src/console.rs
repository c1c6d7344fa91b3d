//! Line-oriented console output shared between the driver and the Lua host API.
//!
//! `line` always starts a fresh line; `same_line` moves the cursor up one line and
//! overwrites it, so repeated progress updates stay on a single row.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Cursor to the start of the previous line, then carriage return.
pub const REDRAW_PREVIOUS_LINE: &str = "\x1b[F\r";

pub const RULE: &str = "-----------------------------------------------";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LastLine {
    Full,
    Same,
}

struct Inner {
    out: Box<dyn Write + Send>,
    last: LastLine,
}

/// Cloneable handle; all clones write to the same sink.
#[derive(Clone)]
pub struct Console {
    inner: Arc<Mutex<Inner>>,
}

impl Console {
    pub fn new<W: Write + Send + 'static>(out: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                out: Box::new(out),
                last: LastLine::Same,
            })),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn line(&self, msg: &str) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        let _ = write!(inner.out, "\n{}", msg);
        let _ = inner.out.flush();
        inner.last = LastLine::Full;
    }

    pub fn same_line(&self, msg: &str) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        if inner.last == LastLine::Full {
            let _ = writeln!(inner.out);
        }
        let _ = write!(inner.out, "{}{}", REDRAW_PREVIOUS_LINE, msg);
        let _ = inner.out.flush();
        inner.last = LastLine::Same;
    }

    pub fn rule(&self) {
        self.line(RULE);
    }
}

/// In-memory sink; clones share the buffer.
#[derive(Clone, Default)]
pub struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        match self.buf.lock() {
            Ok(buf) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => String::new(),
        }
    }
}

impl Write for Capture {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self
            .buf
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
