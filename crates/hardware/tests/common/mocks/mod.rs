//! Mock implementations of the harness seams.



use std::cell::RefCell;
use std::rc::Rc;

/// Shared, ordered log of teardown events across mocks.
pub type EventLog = Rc<RefCell<Vec<&'static str>>>;

/// Creates an empty event log.
pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}
