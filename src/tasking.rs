//! Single-slot handoff between an integration-task producer and a consumer.
//!
//! A [`TaskSlot`] is a rendezvous holding at most one [`Task`]: `put` blocks
//! while the slot is full and `take` blocks while it is empty, so a
//! generator and an integrator running on separate threads alternate in
//! strict ping-pong. Cancellation is cooperative: [`TaskSlot::close`] wakes
//! every waiter, after which `put` fails and `take` drains the remaining
//! task and then returns `None` — the task record itself is never corrupted.
//!
//! The tabulated-function engines stay single-owner and unsynchronized;
//! only the slot is shared.
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use tabfn::tasking::{TaskSlot, generate_tasks, integrate_tasks};
//!
//! let slot = Arc::new(TaskSlot::new());
//! let producer = {
//!     let slot = Arc::clone(&slot);
//!     thread::spawn(move || generate_tasks(&slot, 3))
//! };
//! let results = integrate_tasks(&slot, 3);
//! producer.join().unwrap();
//! assert_eq!(results.len(), 3);
//! ```

use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use log::{info, warn};
use rand::Rng;
use thiserror::Error;

use crate::function::Function;
use crate::function::basic::Log;
use crate::integrate::integrate;

/// One integration job: a function and the bounds and step to integrate
/// over.
#[derive(Clone)]
pub struct Task {
    /// The function to integrate.
    pub function: Arc<dyn Function + Send + Sync>,
    /// Lower integration bound.
    pub left: f64,
    /// Upper integration bound.
    pub right: f64,
    /// Sampling step along x.
    pub step: f64,
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("left", &self.left)
            .field("right", &self.right)
            .field("step", &self.step)
            .finish_non_exhaustive()
    }
}

/// Returned by [`TaskSlot::put`] once the slot has been closed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("the task slot is closed")]
pub struct SlotClosed;

#[derive(Default)]
struct SlotState {
    task: Option<Task>,
    closed: bool,
}

/// A monitor-style single-slot rendezvous for [`Task`]s.
#[derive(Default)]
pub struct TaskSlot {
    state: Mutex<SlotState>,
    produced: Condvar,
    consumed: Condvar,
}

impl TaskSlot {
    /// Creates an empty, open slot.
    pub fn new() -> Self {
        TaskSlot::default()
    }

    /// Deposits a task, blocking while the slot is full.
    ///
    /// Fails once the slot has been closed; a task deposited before the
    /// close stays available to `take`.
    pub fn put(&self, task: Task) -> Result<(), SlotClosed> {
        let mut state = self.lock();
        while state.task.is_some() && !state.closed {
            state = self
                .consumed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        if state.closed {
            return Err(SlotClosed);
        }
        state.task = Some(task);
        self.produced.notify_one();
        Ok(())
    }

    /// Removes and returns the deposited task, blocking while the slot is
    /// empty. Returns `None` once the slot is closed and drained.
    pub fn take(&self) -> Option<Task> {
        let mut state = self.lock();
        loop {
            if let Some(task) = state.task.take() {
                self.consumed.notify_one();
                return Some(task);
            }
            if state.closed {
                return None;
            }
            state = self
                .produced
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Closes the slot and wakes every waiter on both sides.
    pub fn close(&self) {
        let mut state = self.lock();
        state.closed = true;
        self.produced.notify_all();
        self.consumed.notify_all();
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Produces `count` randomized logarithmic integration tasks into the slot.
///
/// Returns the number of tasks actually deposited, which is lower than
/// `count` only when the slot is closed early.
pub fn generate_tasks(slot: &TaskSlot, count: usize) -> usize {
    let mut rng = rand::thread_rng();
    for index in 0..count {
        let base = rng.gen_range(2.0..10.0);
        let left = rng.gen_range(1.0..100.0);
        let right = rng.gen_range(100.0..200.0);
        let step = rng.gen_range(0.01..1.0);
        let task = Task {
            function: Arc::new(Log::new(base)),
            left,
            right,
            step,
        };
        info!("task {index}: left = {left:.6}, right = {right:.6}, step = {step:.6}");
        if slot.put(task).is_err() {
            warn!("task slot closed after {index} tasks");
            return index;
        }
    }
    count
}

/// Consumes up to `count` tasks from the slot, integrating each one.
///
/// Stops early when the slot is closed and drained. Failed integrations are
/// reported and skipped, so the returned values are the successful results
/// in consumption order.
pub fn integrate_tasks(slot: &TaskSlot, count: usize) -> Vec<f64> {
    let mut results = Vec::with_capacity(count);
    for index in 0..count {
        let Some(task) = slot.take() else {
            warn!("task slot closed after {index} results");
            break;
        };
        match integrate(task.function.as_ref(), task.left, task.right, task.step) {
            Ok(value) => {
                info!(
                    "result {index}: left = {:.6}, right = {:.6}, step = {:.6}, integral = {value:.6}",
                    task.left, task.right, task.step
                );
                results.push(value);
            }
            Err(error) => warn!("task {index} failed: {error}"),
        }
    }
    results
}
