use super::PlatformCounters;
use crate::system::SourceError;
use crate::system::snapshot::CpuTimes;

const PROC_STAT: &str = "/proc/stat";

pub struct Platform;

impl PlatformCounters for Platform {
    fn cpu_times() -> Result<CpuTimes, SourceError> {
        let contents = std::fs::read_to_string(PROC_STAT)?;
        parse_proc_stat(&contents)
    }
}

/// Parses the aggregate `cpu` line of `/proc/stat`.
///
/// Fields: user nice system idle iowait irq softirq steal (guest and
/// guest_nice are already counted in user/nice). Kernel time is reported
/// with idle folded in to match the GetSystemTimes layout.
pub(crate) fn parse_proc_stat(contents: &str) -> Result<CpuTimes, SourceError> {
    let line = contents
        .lines()
        .find(|l| l.starts_with("cpu "))
        .ok_or_else(|| SourceError::Parse("no aggregate cpu line".to_string()))?;

    let fields = line
        .split_whitespace()
        .skip(1)
        .map(|f| {
            f.parse::<u64>()
                .map_err(|e| SourceError::Parse(format!("field {f:?}: {e}")))
        })
        .collect::<Result<Vec<u64>, _>>()?;
    if fields.len() < 4 {
        return Err(SourceError::Parse(format!(
            "expected at least 4 cpu fields, got {}",
            fields.len()
        )));
    }

    let field = |i: usize| fields.get(i).copied().unwrap_or(0);
    let sum = |indices: &[usize]| {
        indices
            .iter()
            .try_fold(0u64, |acc, &i| acc.checked_add(field(i)))
            .ok_or_else(|| SourceError::Parse(format!("cpu counters overflow: {line}")))
    };
    let user = sum(&[0, 1])?;
    let idle = sum(&[3, 4])?;
    let kernel = sum(&[2, 3, 4, 5, 6, 7])?;

    Ok(CpuTimes { idle, kernel, user })
}
