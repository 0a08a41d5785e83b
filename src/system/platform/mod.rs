use super::SourceError;
use super::snapshot::CpuTimes;

pub trait PlatformCounters {
    fn cpu_times() -> Result<CpuTimes, SourceError>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
mod unsupported;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
use unsupported as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn cpu_times() -> Result<CpuTimes, SourceError> {
    platform_impl::Platform::cpu_times()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_times_is_monotonic_across_reads() {
        let Ok(first) = cpu_times() else {
            return;
        };
        let second = cpu_times().unwrap();
        assert!(second.idle >= first.idle);
        assert!(second.kernel >= first.kernel);
        assert!(second.user >= first.user);
    }
}
