// src/types.rs

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// How long a child process may run before it is killed.
///
/// - `None`: block indefinitely waiting for exit (the default).
/// - `After(d)`: kill the child once `d` has elapsed without an exit.
///
/// Parsed from strings in config files and on the CLI: `none` or `0`
/// disable the timeout; otherwise a number with an optional unit
/// (`ms`, `s`, `m`, `h`), a bare number meaning seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Timeout {
    #[default]
    None,
    After(Duration),
}

impl Timeout {
    /// The enforced limit, or `None` when waiting is unbounded.
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Timeout::None => None,
            Timeout::After(d) => Some(*d),
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        if ms == 0 {
            Timeout::None
        } else {
            Timeout::After(Duration::from_millis(ms))
        }
    }
}

impl FromStr for Timeout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") {
            return Ok(Timeout::None);
        }

        let (digits, multiplier_ms) = match s {
            _ if s.ends_with("ms") => (&s[..s.len() - 2], 1u64),
            _ if s.ends_with('s') => (&s[..s.len() - 1], 1_000),
            _ if s.ends_with('m') => (&s[..s.len() - 1], 60_000),
            _ if s.ends_with('h') => (&s[..s.len() - 1], 3_600_000),
            _ => (s, 1_000),
        };

        let value: u64 = digits
            .trim()
            .parse()
            .map_err(|_| format!("invalid timeout: {s:?} (expected e.g. \"500ms\", \"30s\", \"5m\", \"1h\", or \"none\")"))?;

        let ms = value
            .checked_mul(multiplier_ms)
            .ok_or_else(|| format!("timeout too large: {s:?}"))?;

        Ok(Timeout::from_millis(ms))
    }
}

impl TryFrom<String> for Timeout {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeout::None => write!(f, "none"),
            Timeout::After(d) => {
                let ms = d.as_millis();
                if ms % 1_000 == 0 {
                    write!(f, "{}s", ms / 1_000)
                } else {
                    write!(f, "{ms}ms")
                }
            }
        }
    }
}
