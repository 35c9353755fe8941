//! Next-turn task queue.
//!
//! A zero-delay timer for an event loop that has none: [`defer`] queues a
//! task, the host calls [`run_turn`] once per loop iteration. Tasks deferred
//! while a turn runs wait for the next turn, so a task that keeps
//! rescheduling itself cannot starve the loop.
//!
//! # Example
//!
//! ```
//! use spark_ellipsis::shell::scheduler::{cancel, defer, pending_count, run_turn};
//!
//! let task = defer(|| println!("later"));
//! assert_eq!(pending_count(), 1);
//! assert!(cancel(task));
//! assert_eq!(run_turn(), 0);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// Handle of a deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

type Task = Box<dyn FnOnce()>;

thread_local! {
    static QUEUE: RefCell<VecDeque<(TaskId, Task)>> = RefCell::new(VecDeque::new());
    static NEXT_TASK_ID: Cell<u64> = const { Cell::new(0) };
}

/// Queue `task` for the next turn.
pub fn defer(task: impl FnOnce() + 'static) -> TaskId {
    let id = NEXT_TASK_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        TaskId(id)
    });
    QUEUE.with(|queue| queue.borrow_mut().push_back((id, Box::new(task))));
    id
}

/// Drop a queued task. Returns false if it already ran or was cancelled.
pub fn cancel(id: TaskId) -> bool {
    QUEUE.with(|queue| {
        let mut queue = queue.borrow_mut();
        match queue.iter().position(|(queued, _)| *queued == id) {
            Some(pos) => {
                queue.remove(pos);
                true
            }
            None => false,
        }
    })
}

/// Run every task queued before this call, in order. Returns how many ran.
pub fn run_turn() -> usize {
    let horizon = NEXT_TASK_ID.with(Cell::get);
    let mut ran = 0;

    loop {
        // Release the borrow before running: tasks defer and cancel.
        let next = QUEUE.with(|queue| {
            let mut queue = queue.borrow_mut();
            match queue.front() {
                Some((id, _)) if id.0 < horizon => queue.pop_front(),
                _ => None,
            }
        });
        let Some((_, task)) = next else { break };
        task();
        ran += 1;
    }

    ran
}

/// Number of tasks waiting.
pub fn pending_count() -> usize {
    QUEUE.with(|queue| queue.borrow().len())
}

/// Drop every pending task (for testing).
pub fn reset_scheduler() {
    // Tasks may own values whose Drop defers or cancels.
    let dropped = QUEUE.with(|queue| std::mem::take(&mut *queue.borrow_mut()));
    drop(dropped);
}
