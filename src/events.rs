//! Cross-context command queue.
//!
//! Command events are produced by the Zigbee stack task (inside the SDK's
//! action callback) and consumed by the main control loop, which dispatches
//! them one at a time to completion — no reentrancy into the dispatcher.
//!
//! ```text
//! ┌──────────────────┐     ┌───────────────┐     ┌──────────────┐
//! │ Zigbee stack task│────▶│ Command Queue │────▶│  Main Loop   │
//! │ (action callback)│     │ (fixed-cap)   │     │  (consumer)  │
//! └──────────────────┘     └───────────────┘     └──────────────┘
//! ```
//!
//! The queue is a fixed-capacity deque behind a critical-section mutex, so
//! pushing from the stack task never allocates and never blocks for longer
//! than the copy of one small `CommandEvent`.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use heapless::Deque;

use crate::app::commands::CommandEvent;

/// Maximum number of pending command events.  Commands are idempotent
/// set-operations, so a dropped event is superseded by the controller's
/// next write rather than lost state.
const QUEUE_CAP: usize = 16;

static COMMAND_QUEUE: Mutex<CriticalSectionRawMutex, RefCell<Deque<CommandEvent, QUEUE_CAP>>> =
    Mutex::new(RefCell::new(Deque::new()));

/// Push a command event from any context.
/// Returns `false` if the queue is full (event dropped).
pub fn push_command(event: CommandEvent) -> bool {
    COMMAND_QUEUE.lock(|q| q.borrow_mut().push_back(event).is_ok())
}

/// Pop the oldest pending command event.
/// Called from the main loop (single consumer).
pub fn pop_command() -> Option<CommandEvent> {
    COMMAND_QUEUE.lock(|q| q.borrow_mut().pop_front())
}

/// Drain all pending command events into a handler, in FIFO order.
pub fn drain_commands(mut handler: impl FnMut(CommandEvent)) {
    while let Some(event) = pop_command() {
        handler(event);
    }
}

/// Number of pending command events.
pub fn queue_len() -> usize {
    COMMAND_QUEUE.lock(|q| q.borrow().len())
}

/// Check if the command queue is empty.
pub fn queue_is_empty() -> bool {
    queue_len() == 0
}
