use std::fmt::Display;

/// A leveled trace printer.
///
/// Level `0` means silent. Level `1` ("normal") prints a one-line summary per step. Level `2` or
/// higher ("verbose") additionally prints the full before/after state. This mirrors the numeric
/// `trace`/`debug_level` knobs threaded through the specification rather than a named set of log
/// severities, since the levels here gate *how much* of the same event is shown, not *which*
/// events are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Trace(pub usize);

impl Trace {
    pub fn is_enabled(&self) -> bool {
        self.0 > 0
    }

    pub fn is_verbose(&self) -> bool {
        self.0 > 1
    }

    /// Print `message` if tracing is enabled at all.
    pub fn normal(&self, message: impl Display) {
        if self.is_enabled() {
            println!("{}", message);
        }
    }

    /// Print `message` only at the verbose level.
    pub fn verbose(&self, message: impl Display) {
        if self.is_verbose() {
            println!("{}", message);
        }
    }
}

impl From<usize> for Trace {
    fn from(level: usize) -> Self {
        Trace(level)
    }
}
