use super::PlatformCounters;
use crate::system::SourceError;
use crate::system::snapshot::CpuTimes;

use windows_sys::Win32::Foundation::{FILETIME, GetLastError};
use windows_sys::Win32::System::Threading::GetSystemTimes;

pub struct Platform;

fn filetime_to_u64(ft: &FILETIME) -> u64 {
    (u64::from(ft.dwHighDateTime) << 32) | u64::from(ft.dwLowDateTime)
}

impl PlatformCounters for Platform {
    fn cpu_times() -> Result<CpuTimes, SourceError> {
        let mut idle = FILETIME {
            dwLowDateTime: 0,
            dwHighDateTime: 0,
        };
        let mut kernel = idle;
        let mut user = idle;
        // Kernel time reported here already contains idle time.
        let ok = unsafe { GetSystemTimes(&mut idle, &mut kernel, &mut user) };
        if ok == 0 {
            let code = unsafe { GetLastError() };
            return Err(SourceError::Os(i64::from(code)));
        }
        Ok(CpuTimes {
            idle: filetime_to_u64(&idle),
            kernel: filetime_to_u64(&kernel),
            user: filetime_to_u64(&user),
        })
    }
}
