//! Wall-clock service.

use tinydesk_types::error::Result;

/// A simple UTC wall-clock timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl std::fmt::Display for WallTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second,
        )
    }
}

/// Abstraction over platform time services.
pub trait TimeService {
    /// Current wall-clock time.
    fn now(&self) -> Result<WallTime>;
}

/// System clock backed by `std::time::SystemTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopClock;

impl TimeService for DesktopClock {
    fn now(&self) -> Result<WallTime> {
        use std::time::SystemTime;
        let secs = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Ok(from_unix_secs(secs))
    }
}

/// Break seconds since the Unix epoch into a UTC timestamp.
pub fn from_unix_secs(secs: u64) -> WallTime {
    let days = secs / 86400;
    let time_of_day = secs % 86400;
    let (year, month, day) = days_to_ymd(days);
    WallTime {
        year,
        month,
        day,
        hour: (time_of_day / 3600) as u8,
        minute: ((time_of_day % 3600) / 60) as u8,
        second: (time_of_day % 60) as u8,
    }
}

fn days_to_ymd(mut days: u64) -> (u16, u8, u8) {
    let mut year = 1970u16;
    loop {
        let year_days = if is_leap(year) { 366 } else { 365 };
        if days < year_days {
            break;
        }
        days -= year_days;
        year += 1;
    }
    let feb = if is_leap(year) { 29 } else { 28 };
    let month_days: [u64; 12] = [31, feb, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let mut month = 12u8;
    for (i, &md) in month_days.iter().enumerate() {
        if days < md {
            month = (i + 1) as u8;
            break;
        }
        days -= md;
    }
    (year, month, (days + 1) as u8)
}

fn is_leap(y: u16) -> bool {
    (y % 4 == 0 && y % 100 != 0) || y % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_first_of_january_1970() {
        let t = from_unix_secs(0);
        assert_eq!(t.to_string(), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn leap_day_2024() {
        // 2024-02-29 is day 19782.
        let t = from_unix_secs(19782 * 86400 + 3661);
        assert_eq!((t.year, t.month, t.day), (2024, 2, 29));
        assert_eq!((t.hour, t.minute, t.second), (1, 1, 1));
    }

    #[test]
    fn last_day_of_1970() {
        assert_eq!(days_to_ymd(364), (1970, 12, 31));
    }

    #[test]
    fn century_leap_rules() {
        assert!(is_leap(2000));
        assert!(!is_leap(1900));
        assert!(!is_leap(2023));
    }

    #[test]
    fn desktop_clock_is_after_2020() {
        let now = DesktopClock.now().unwrap();
        assert!(now.year >= 2020);
    }
}
