#![allow(dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;

use anyhow::{Result, bail};
use choose_text_editor::PathLookup;

/// Programs the fake PATH knows about.
pub const INSTALLED: &[&str] = &["vim", "nano", "emacs", "code", "atom", "subl", "kate"];

pub const CHOOSER: &str = "choose-text-editor";

/// PATH lookup over [`INSTALLED`] that records every probe, in order.
#[derive(Debug, Default)]
pub struct RecordingLookup {
    calls: RefCell<Vec<String>>,
}

impl RecordingLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl PathLookup for RecordingLookup {
    fn probe(&self, program: &str) -> Result<PathBuf> {
        self.calls.borrow_mut().push(program.to_string());
        if INSTALLED.contains(&program) {
            Ok(PathBuf::from(format!("/usr/bin/{program}")))
        } else {
            bail!("not found: {program}")
        }
    }
}
