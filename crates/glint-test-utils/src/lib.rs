//! Test utilities and fixtures for Glint development.
//!
//! Provides scripted tick sources and ready-made [`RawConfig`](glint_caps::RawConfig) profiles
//! so tests across crates start from the same boards.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::Cell;

use glint_core::{Tick, TickSource};

/// Tick source that replays a fixed sequence, then repeats the last value.
///
/// Handy for driving wrap-around and late-poll cases without a real
/// timer.
#[derive(Debug)]
pub struct ScriptedTick {
    script: Vec<u32>,
    next: Cell<usize>,
}

impl ScriptedTick {
    pub fn new(script: impl Into<Vec<u32>>) -> Self {
        Self {
            script: script.into(),
            next: Cell::new(0),
        }
    }

    /// Number of reads so far.
    pub fn reads(&self) -> usize {
        self.next.get()
    }
}

impl TickSource for ScriptedTick {
    fn now(&self) -> Tick {
        let i = self.next.get();
        self.next.set(i + 1);
        let at = i.min(self.script.len().saturating_sub(1));
        Tick(self.script.get(at).copied().unwrap_or(0))
    }
}
