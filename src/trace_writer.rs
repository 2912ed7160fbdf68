use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// In-memory sink for the debug trace. Clones share one buffer, so a caller can hand
/// one clone to a tree and read the trace back through another.
#[derive(Clone, Default)]
pub struct TraceWriter(Rc<RefCell<String>>);

impl fmt::Write for TraceWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.borrow_mut().push_str(s);
        Ok(())
    }
}

impl TraceWriter {
    pub fn new() -> Self {
        TraceWriter(Rc::new(RefCell::new(String::new())))
    }

    pub fn borrow(&self) -> Ref<'_, String> {
        self.0.borrow()
    }

    /// Returns the trace written so far and empties the buffer.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}
