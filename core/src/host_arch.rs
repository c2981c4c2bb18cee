//! Detection of the host OS architecture when the launcher itself runs under
//! emulation (an x64 build under Rosetta 2, or an x86/x64 build on Windows on
//! Arm). Other hosts report `None` and the compiled architecture is used.

use crate::platform::Arch;

#[cfg(target_os = "macos")]
pub(crate) fn native_arch() -> Option<Arch> {
    running_under_rosetta().then_some(Arch::Arm64)
}

#[cfg(target_os = "macos")]
fn running_under_rosetta() -> bool {
    let mut translated: libc::c_int = 0;
    let mut size = std::mem::size_of::<libc::c_int>();
    // SAFETY: the name is NUL-terminated, `translated` and `size` are live
    // locals sized for the `int` this sysctl returns, and no new value is set.
    let result = unsafe {
        libc::sysctlbyname(
            c"sysctl.proc_translated".as_ptr(),
            (&raw mut translated).cast(),
            &raw mut size,
            std::ptr::null_mut(),
            0,
        )
    };
    // ENOENT means the OS predates Rosetta 2, so nothing is translated.
    result == 0 && translated == 1
}

#[cfg(windows)]
pub(crate) fn native_arch() -> Option<Arch> {
    use windows_sys::Win32::System::SystemInformation::IMAGE_FILE_MACHINE;
    use windows_sys::Win32::System::Threading::GetCurrentProcess;
    use windows_sys::Win32::System::Threading::IsWow64Process2;

    let mut process_machine: IMAGE_FILE_MACHINE = 0;
    let mut native_machine: IMAGE_FILE_MACHINE = 0;
    // SAFETY: the pseudo handle from `GetCurrentProcess` is always valid and
    // both out-pointers refer to live locals.
    let ok = unsafe {
        IsWow64Process2(
            GetCurrentProcess(),
            &mut process_machine,
            &mut native_machine,
        )
    };
    if ok == 0 {
        tracing::debug!("IsWow64Process2 failed, using the compiled architecture");
        return None;
    }
    arch_from_image_file_machine(native_machine)
}

#[cfg(windows)]
fn arch_from_image_file_machine(machine: u16) -> Option<Arch> {
    use windows_sys::Win32::System::SystemInformation::IMAGE_FILE_MACHINE_AMD64;
    use windows_sys::Win32::System::SystemInformation::IMAGE_FILE_MACHINE_ARM;
    use windows_sys::Win32::System::SystemInformation::IMAGE_FILE_MACHINE_ARM64;
    use windows_sys::Win32::System::SystemInformation::IMAGE_FILE_MACHINE_ARMNT;
    use windows_sys::Win32::System::SystemInformation::IMAGE_FILE_MACHINE_I386;

    match machine {
        IMAGE_FILE_MACHINE_AMD64 => Some(Arch::X64),
        IMAGE_FILE_MACHINE_ARM64 => Some(Arch::Arm64),
        IMAGE_FILE_MACHINE_I386 => Some(Arch::X86),
        IMAGE_FILE_MACHINE_ARM | IMAGE_FILE_MACHINE_ARMNT => Some(Arch::Arm),
        _ => None,
    }
}

#[cfg(not(any(target_os = "macos", windows)))]
pub(crate) fn native_arch() -> Option<Arch> {
    None
}
