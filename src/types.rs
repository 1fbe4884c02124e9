use std::fmt;
use std::str::FromStr;

/// Unix permission bits used when creating a redirect target.
///
/// Parsed from an octal string such as `"644"` or `"0o600"`. Anything above
/// `0o777` (setuid, sticky, ...) is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMode(u32);

impl FileMode {
    pub const MAX: u32 = 0o777;

    pub fn new(bits: u32) -> Result<Self, String> {
        if bits > Self::MAX {
            return Err(format!(
                "file mode {bits:o} has bits outside of 0o777"
            ));
        }
        Ok(FileMode(bits))
    }

    pub fn bits(&self) -> u32 {
        self.0
    }
}

impl Default for FileMode {
    fn default() -> Self {
        FileMode(0o644)
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

impl FromStr for FileMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("0o").unwrap_or(trimmed);
        if digits.is_empty() {
            return Err("file mode must not be empty".to_string());
        }
        let bits = u32::from_str_radix(digits, 8)
            .map_err(|_| format!("invalid octal file mode: {trimmed}"))?;
        FileMode::new(bits)
    }
}
