//! Debug logging of kernel dispatch decisions.

/// Set to `true` to dump dispatch events to stderr. The branch is
/// compiled out when `false`.
pub(crate) const DUMP_LOGS: bool = false;

#[derive(Debug)]
pub(crate) enum Event {
    ReduceSerial { n: usize },
    ReduceBlocked { n: usize, blocks: usize },
    ScanSerial { n: usize },
    ScanBlocked { n: usize, blocks: usize },
    PackBlocked { n: usize, blocks: usize, kept: usize },
    SplitBlocked { n: usize, blocks: usize },
    QuicksortFork { n: usize, mid_skipped: bool },
}

macro_rules! log {
    ($event:expr) => {
        if crate::log::DUMP_LOGS {
            eprintln!("{:?}", $event);
        }
    };
}
