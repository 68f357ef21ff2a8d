pub mod check;
pub mod exec;
pub mod interval;
pub mod snap;

use std::time::Duration;

/// Parse a non-negative number of seconds.
pub fn parse_secs(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("{s:?} is not a number of seconds"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid duration {s:?}: {e}"))
}

/// Parse `FLAG=VALUE`; a bare `FLAG` gets an empty value.
pub fn parse_option(s: &str) -> Result<(String, String), String> {
    let (flag, value) = s.split_once('=').unwrap_or((s, ""));
    if !flag.starts_with('-') {
        return Err(format!("{flag:?} is not a flag (expected something like -vf=scale=320:-1)"));
    }
    Ok((flag.to_string(), value.to_string()))
}

/// Turn an ffmpeg `false` result into a CLI error so the exit status is non-zero.
pub fn require_success(ok: bool) -> anyhow::Result<()> {
    if ok {
        Ok(())
    } else {
        Err(anyhow::anyhow!("ffmpeg did not complete successfully"))
    }
}
