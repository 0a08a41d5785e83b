/// Cumulative processor time counters since boot, in OS ticks.
///
/// `kernel` includes `idle`, so the elapsed window between two snapshots is
/// `Δkernel + Δuser` and the busy share is that window minus `Δidle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub idle: u64,
    pub kernel: u64,
    pub user: u64,
}

/// Tick deltas between two snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuDelta {
    pub idle: u64,
    pub total: u64,
}

impl CpuTimes {
    pub fn new(idle: u64, kernel: u64, user: u64) -> Self {
        Self { idle, kernel, user }
    }

    /// Differences against an earlier snapshot, or `None` if any counter went backwards.
    pub fn delta_since(&self, earlier: &CpuTimes) -> Option<CpuDelta> {
        let idle = self.idle.checked_sub(earlier.idle)?;
        let kernel = self.kernel.checked_sub(earlier.kernel)?;
        let user = self.user.checked_sub(earlier.user)?;
        Some(CpuDelta {
            idle,
            total: kernel.saturating_add(user),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_sums_kernel_and_user() {
        let before = CpuTimes::new(100, 200, 100);
        let after = CpuTimes::new(150, 240, 120);
        assert_eq!(
            after.delta_since(&before),
            Some(CpuDelta {
                idle: 50,
                total: 60
            })
        );
    }

    #[test]
    fn delta_rejects_backwards_counters() {
        let before = CpuTimes::new(100, 200, 100);
        let after = CpuTimes::new(90, 240, 120);
        assert_eq!(after.delta_since(&before), None);
    }
}
