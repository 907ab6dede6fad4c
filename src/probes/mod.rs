//! Platform probe adapter: one operation per OS fact, all funneled
//! through a process-wide scratch state so repeated calls reuse the
//! same native buffers.

pub(crate) mod net;
pub(crate) mod system;
pub(crate) mod user;

use once_cell::sync::Lazy;
use std::sync::{Mutex, PoisonError};
use sysinfo::{System, SystemExt};

/// Stride of the reusable CPU value buffer: speed, user, nice, sys,
/// idle, irq per logical CPU.
pub(crate) const CPU_VALUE_STRIDE: usize = 6;

/// Platform maximum the fixed CPU buffer is sized to. Probes fail with
/// `ResourceExceeded` rather than overflow past it.
pub(crate) const MAX_CPUS: usize = 1024;

pub(crate) const MAX_INTERFACES: usize = 256;

/// Probe-owned mutable state: the long-lived sysinfo handle plus the
/// fixed scratch buffers successive probe calls write into. Never
/// exposed past this module; normalizers copy out under the lock.
pub(crate) struct Scratch {
    pub system: System,
    pub avg_values: [f64; 3],
    pub cpu_values: Box<[f64]>,
}

static SCRATCH: Lazy<Mutex<Scratch>> = Lazy::new(|| {
    Mutex::new(Scratch {
        system: System::new(),
        avg_values: [0.0; 3],
        cpu_values: vec![0.0; CPU_VALUE_STRIDE * MAX_CPUS].into_boxed_slice(),
    })
});

/// Runs one probe-and-copy step under the scratch lock. The lock scope
/// bounds both the native refresh and the copy into caller-owned data,
/// so concurrent callers never observe each other's writes.
pub(crate) fn with_scratch<T>(f: impl FnOnce(&mut Scratch) -> T) -> T {
    let mut guard = SCRATCH.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}
