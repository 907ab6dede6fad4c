use crate::checked::ProbeContext;
use crate::constants;
use std::panic::Location;
use thiserror::Error;

/// Failure captured at the native probe boundary. Carries enough context
/// to reconstruct a platform diagnostic, including the public call site.
#[derive(Debug, Clone, Error)]
#[error("{syscall} {code}: {message}")]
pub struct SystemError {
    pub syscall: &'static str,
    pub code: &'static str,
    pub errno: i32,
    pub message: String,
    pub path: Option<String>,
    pub location: &'static Location<'static>,
}

impl SystemError {
    pub(crate) fn from_probe(ctx: ProbeContext, location: &'static Location<'static>) -> Self {
        Self {
            syscall: ctx.syscall,
            code: constants::errno_name(ctx.errno).unwrap_or("EUNKNOWN"),
            errno: ctx.errno,
            message: ctx.message,
            path: ctx.path,
            location,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum FactsError {
    #[error(transparent)]
    System(#[from] SystemError),
    #[error("{probe}: native result count {count} exceeds probe capacity {capacity}")]
    ResourceExceeded {
        probe: &'static str,
        count: usize,
        capacity: usize,
    },
}
