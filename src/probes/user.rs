use crate::checked::ProbeContext;
use crate::constants::errno;
use crate::UserInfo;

#[cfg(unix)]
pub(crate) fn user_info() -> Result<UserInfo, ProbeContext> {
    use users::os::unix::UserExt;

    let uid = users::get_current_uid();
    let user = users::get_user_by_uid(uid)
        .ok_or_else(|| ProbeContext::new("getpwuid_r", errno::ENOENT))?;
    let shell = user.shell().to_string_lossy().into_owned();
    Ok(UserInfo {
        username: user.name().to_string_lossy().into_owned(),
        homedir: user.home_dir().to_string_lossy().into_owned(),
        shell: Some(shell).filter(|s| !s.is_empty()),
        uid: Some(uid),
        gid: Some(user.primary_group_id()),
    })
}

// No POSIX ids or shell concept on Windows; identity comes from the
// environment and the profile directory.
#[cfg(windows)]
pub(crate) fn user_info() -> Result<UserInfo, ProbeContext> {
    let username = std::env::var("USERNAME")
        .map_err(|_| ProbeContext::new("GetUserName", errno::ENOENT))?;
    let homedir = home_directory()?;
    Ok(UserInfo {
        username,
        homedir,
        shell: None,
        uid: None,
        gid: None,
    })
}

pub(crate) fn home_directory() -> Result<String, ProbeContext> {
    dirs::home_dir()
        .map(|path| path.to_string_lossy().into_owned())
        .ok_or_else(|| ProbeContext::new("gethomedir", errno::ENOENT))
}
