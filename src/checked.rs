use crate::constants;
use crate::error::{FactsError, SystemError};
use std::panic::Location;

/// Out-of-band context a probe fills in when the native boundary fails.
#[derive(Debug, Clone)]
pub(crate) struct ProbeContext {
    pub syscall: &'static str,
    pub errno: i32,
    pub message: String,
    pub path: Option<String>,
}

impl ProbeContext {
    pub(crate) fn new(syscall: &'static str, errno: i32) -> Self {
        Self {
            syscall,
            errno,
            message: std::io::Error::from_raw_os_error(errno).to_string(),
            path: None,
        }
    }

    pub(crate) fn from_io(syscall: &'static str, err: &std::io::Error) -> Self {
        Self {
            syscall,
            errno: err.raw_os_error().unwrap_or(constants::errno::EIO),
            message: err.to_string(),
            path: None,
        }
    }
}

/// Maps a fallible probe outcome into the public error model. The probe
/// never hands its failure sentinel to the caller; the context becomes a
/// [`SystemError`] stamped with the originating call site.
#[track_caller]
pub(crate) fn checked<T>(outcome: Result<T, ProbeContext>) -> Result<T, FactsError> {
    match outcome {
        Ok(value) => Ok(value),
        Err(ctx) => Err(FactsError::System(SystemError::from_probe(
            ctx,
            Location::caller(),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_passes_value_unchanged() {
        let out = checked(Ok::<_, ProbeContext>("value"));
        assert_eq!(out.unwrap(), "value");
    }

    #[test]
    fn failure_maps_context_into_system_error() {
        let ctx = ProbeContext::new("getpwuid_r", constants::errno::ENOENT);
        let out: Result<String, _> = checked(Err(ctx));
        match out {
            Err(FactsError::System(err)) => {
                assert_eq!(err.syscall, "getpwuid_r");
                assert_eq!(err.errno, constants::errno::ENOENT);
                assert_eq!(err.code, "ENOENT");
                assert!(err.path.is_none());
                assert!(err.location.file().ends_with("checked.rs"));
            }
            other => panic!("expected SystemError, got {other:?}"),
        }
    }

    #[test]
    fn io_context_keeps_os_errno() {
        let io = std::io::Error::from_raw_os_error(constants::errno::EACCES);
        let ctx = ProbeContext::from_io("getifaddrs", &io);
        assert_eq!(ctx.errno, constants::errno::EACCES);
        assert_eq!(ctx.syscall, "getifaddrs");
    }
}
