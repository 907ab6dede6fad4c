//! Read-only platform constant table: errno and signal numbers as the
//! host defines them. Exposed both as plain consts and as an ordered
//! name-to-value map for consumers that want the raw table.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

pub mod errno {
    pub const EPERM: i32 = 1;
    pub const ENOENT: i32 = 2;
    pub const ESRCH: i32 = 3;
    pub const EINTR: i32 = 4;
    pub const EIO: i32 = 5;
    pub const ENXIO: i32 = 6;
    pub const E2BIG: i32 = 7;
    pub const ENOEXEC: i32 = 8;
    pub const EBADF: i32 = 9;
    pub const ECHILD: i32 = 10;
    pub const ENOMEM: i32 = 12;
    pub const EACCES: i32 = 13;
    pub const EFAULT: i32 = 14;
    pub const EBUSY: i32 = 16;
    pub const EEXIST: i32 = 17;
    pub const EXDEV: i32 = 18;
    pub const ENODEV: i32 = 19;
    pub const ENOTDIR: i32 = 20;
    pub const EISDIR: i32 = 21;
    pub const EINVAL: i32 = 22;
    pub const ENFILE: i32 = 23;
    pub const EMFILE: i32 = 24;
    pub const ENOTTY: i32 = 25;
    pub const EFBIG: i32 = 27;
    pub const ENOSPC: i32 = 28;
    pub const ESPIPE: i32 = 29;
    pub const EROFS: i32 = 30;
    pub const EMLINK: i32 = 31;
    pub const EPIPE: i32 = 32;
    pub const EDOM: i32 = 33;
    pub const ERANGE: i32 = 34;

    #[cfg(target_os = "macos")]
    pub const EAGAIN: i32 = 35;
    #[cfg(not(target_os = "macos"))]
    pub const EAGAIN: i32 = 11;

    #[cfg(target_os = "macos")]
    pub const ENOSYS: i32 = 78;
    #[cfg(target_os = "windows")]
    pub const ENOSYS: i32 = 40;
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    pub const ENOSYS: i32 = 38;
}

pub mod signal {
    pub const SIGHUP: i32 = 1;
    pub const SIGINT: i32 = 2;
    pub const SIGQUIT: i32 = 3;
    pub const SIGILL: i32 = 4;
    pub const SIGTRAP: i32 = 5;
    pub const SIGFPE: i32 = 8;
    pub const SIGKILL: i32 = 9;
    pub const SIGSEGV: i32 = 11;
    pub const SIGPIPE: i32 = 13;
    pub const SIGALRM: i32 = 14;
    pub const SIGTERM: i32 = 15;

    #[cfg(target_os = "windows")]
    pub const SIGABRT: i32 = 22;
    #[cfg(not(target_os = "windows"))]
    pub const SIGABRT: i32 = 6;
}

macro_rules! constant_table {
    ($($module:ident :: $name:ident),* $(,)?) => {
        &[$((stringify!($name), $module::$name as i64)),*]
    };
}

static ENTRIES: &[(&str, i64)] = constant_table![
    errno::EPERM,
    errno::ENOENT,
    errno::ESRCH,
    errno::EINTR,
    errno::EIO,
    errno::ENXIO,
    errno::E2BIG,
    errno::ENOEXEC,
    errno::EBADF,
    errno::ECHILD,
    errno::EAGAIN,
    errno::ENOMEM,
    errno::EACCES,
    errno::EFAULT,
    errno::EBUSY,
    errno::EEXIST,
    errno::EXDEV,
    errno::ENODEV,
    errno::ENOTDIR,
    errno::EISDIR,
    errno::EINVAL,
    errno::ENFILE,
    errno::EMFILE,
    errno::ENOTTY,
    errno::EFBIG,
    errno::ENOSPC,
    errno::ESPIPE,
    errno::EROFS,
    errno::EMLINK,
    errno::EPIPE,
    errno::EDOM,
    errno::ERANGE,
    errno::ENOSYS,
    signal::SIGHUP,
    signal::SIGINT,
    signal::SIGQUIT,
    signal::SIGILL,
    signal::SIGTRAP,
    signal::SIGABRT,
    signal::SIGFPE,
    signal::SIGKILL,
    signal::SIGSEGV,
    signal::SIGPIPE,
    signal::SIGALRM,
    signal::SIGTERM,
];

static TABLE: Lazy<IndexMap<&'static str, i64>> =
    Lazy::new(|| ENTRIES.iter().copied().collect());

/// The full name-to-value table, in declaration order.
pub fn all() -> &'static IndexMap<&'static str, i64> {
    &TABLE
}

/// Reverse lookup of an errno value to its symbolic name.
pub(crate) fn errno_name(value: i32) -> Option<&'static str> {
    ENTRIES
        .iter()
        .find(|(name, v)| name.starts_with('E') && *v == i64::from(value))
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_holds_known_values() {
        let table = all();
        assert_eq!(table["ENOENT"], 2);
        assert_eq!(table["SIGTERM"], 15);
        assert_eq!(table["SIGKILL"], 9);
    }

    #[test]
    fn errno_reverse_lookup() {
        assert_eq!(errno_name(errno::ENOENT), Some("ENOENT"));
        assert_eq!(errno_name(errno::EACCES), Some("EACCES"));
        assert_eq!(errno_name(-9999), None);
    }

    #[test]
    fn table_order_is_stable() {
        let first = all().keys().next().copied();
        assert_eq!(first, Some("EPERM"));
    }
}
