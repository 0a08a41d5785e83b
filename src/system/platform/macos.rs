use super::PlatformCounters;
use crate::system::SourceError;
use crate::system::snapshot::CpuTimes;

pub struct Platform;

impl PlatformCounters for Platform {
    // libc marks mach_host_self deprecated in favor of the mach2 crate.
    #[allow(deprecated)]
    fn cpu_times() -> Result<CpuTimes, SourceError> {
        let mut info = unsafe { std::mem::zeroed::<libc::host_cpu_load_info>() };
        let mut count = (std::mem::size_of::<libc::host_cpu_load_info>()
            / std::mem::size_of::<libc::integer_t>())
            as libc::mach_msg_type_number_t;
        let rc = unsafe {
            libc::host_statistics(
                libc::mach_host_self(),
                libc::HOST_CPU_LOAD_INFO,
                &mut info as *mut libc::host_cpu_load_info as libc::host_info_t,
                &mut count,
            )
        };
        if rc != libc::KERN_SUCCESS {
            return Err(SourceError::Os(i64::from(rc)));
        }

        let ticks = |state: libc::c_int| u64::from(info.cpu_ticks[state as usize]);
        let idle = ticks(libc::CPU_STATE_IDLE);
        Ok(CpuTimes {
            idle,
            kernel: ticks(libc::CPU_STATE_SYSTEM) + idle,
            user: ticks(libc::CPU_STATE_USER) + ticks(libc::CPU_STATE_NICE),
        })
    }
}
