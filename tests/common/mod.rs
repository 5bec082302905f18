#![allow(dead_code)]

use portico::{FrameSink, SendOutcome};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Engine-side frame sink double: records sent text frames and can be
/// flipped to "closed" to simulate the peer going away underneath us.
pub struct TestFrameSink {
    sent: Mutex<Vec<String>>,
    closed: AtomicBool,
}

impl TestFrameSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        })
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    /// Simulate the engine reporting the connection as closed.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

impl FrameSink for TestFrameSink {
    fn send_text(&self, text: &str) -> SendOutcome {
        if self.closed.load(Ordering::SeqCst) {
            return SendOutcome::Closed;
        }
        self.sent.lock().unwrap().push(text.to_string());
        SendOutcome::Sent(text.len())
    }
}
