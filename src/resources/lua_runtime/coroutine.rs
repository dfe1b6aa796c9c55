//! Per-tick coroutine driving.
//!
//! The frame loop resumes the script's `MoveCoroutine` global at most once
//! per tick. The rules are an explicit transition table rather than ad hoc
//! status checks:
//!
//! | thread status        | action      | outcome                    |
//! |----------------------|-------------|----------------------------|
//! | not a thread         | none        | [`ResumeOutcome::NotAThread`] |
//! | resumable, yields    | resume once | [`ResumeOutcome::Suspended`]  |
//! | resumable, returns   | resume once | [`ResumeOutcome::Completed`]  |
//! | resumable, raises    | resume once | [`ResumeOutcome::Faulted`]    |
//! | finished / errored   | none        | [`ResumeOutcome::AlreadyTerminal`] |
//!
//! A fault is terminal: the thread is left in its errored state and never
//! resumed or restarted by the engine, and the error surfaces exactly once
//! (as the `Faulted` payload). Completion is not an error. There is no
//! watchdog: a coroutine that never yields stalls the frame.

use mlua::prelude::*;
use mlua::ThreadStatus;

/// What happened when the frame driver looked at the coroutine this tick.
#[derive(Debug)]
pub enum ResumeOutcome {
    /// The global is absent or holds a non-thread value.
    NotAThread,
    /// The coroutine yielded and will be resumed again next tick.
    Suspended,
    /// The coroutine ran to completion this tick.
    Completed,
    /// The coroutine raised; it is now terminal.
    Faulted(LuaError),
    /// The coroutine completed or faulted on an earlier tick.
    AlreadyTerminal,
}

/// Drives a candidate coroutine value through one tick.
pub fn resume_once(value: &LuaValue) -> ResumeOutcome {
    let LuaValue::Thread(thread) = value else {
        return ResumeOutcome::NotAThread;
    };

    match thread.status() {
        ThreadStatus::Resumable => match thread.resume::<()>(()) {
            Ok(()) => {
                if thread.status() == ThreadStatus::Resumable {
                    ResumeOutcome::Suspended
                } else {
                    ResumeOutcome::Completed
                }
            }
            Err(err) => ResumeOutcome::Faulted(err),
        },
        _ => ResumeOutcome::AlreadyTerminal,
    }
}
