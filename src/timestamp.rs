//! Timestamp parsing and formatting.
//!
//! Format strings use strftime syntax as chrono implements it. Rule files
//! written for the original pipeline dialect spell sub-second fractions as
//! `%N` / `%3N` / `%6N` / `%9N` / `%L`; [`translate_format`] rewrites those
//! into chrono's `%f` family so both spellings work.
//!
//! Parsers and formatters are compiled once at bind time and are immutable
//! value objects afterwards: parsing and formatting are pure reads, safe to
//! share across threads without locking.

use crate::error::{CastError, CastResult, ConfigError, ConfigResult};
use crate::value::{Kind, Timestamp};
use chrono::format::{Fixed, Item, Numeric, StrftimeItems};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Rewrite the original dialect's fraction tokens into chrono's `%f` family.
///
/// `%N` and `%9N` become `%9f`, `%6N` becomes `%6f`, `%3N` and `%L` become
/// `%3f`. Everything else passes through untouched, including `%%`.
pub(crate) fn translate_format(format: &str) -> String {
    let mut out = String::with_capacity(format.len() + 4);
    let mut chars = format.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('N') => {
                chars.next();
                out.push_str("%9f");
            }
            Some('L') => {
                chars.next();
                out.push_str("%3f");
            }
            Some(width @ ('3' | '6' | '9')) => {
                let mut ahead = chars.clone();
                ahead.next();
                if ahead.peek() == Some(&'N') {
                    chars.next();
                    chars.next();
                    out.push('%');
                    out.push(width);
                    out.push('f');
                } else {
                    out.push('%');
                }
            }
            _ => out.push('%'),
        }
    }
    out
}

/// Which field groups a compiled format mentions. Decides the parse entry
/// point and which missing pieces fall back to defaults.
#[derive(Debug, Clone, Copy, Default)]
struct FormatSpec {
    has_date: bool,
    has_time: bool,
    has_offset: bool,
}

impl FormatSpec {
    /// Lex the format once; `Err` on any item chrono cannot compile.
    fn inspect(format: &str) -> Result<Self, ()> {
        let mut spec = Self::default();
        for item in StrftimeItems::new(format) {
            match item {
                Item::Error => return Err(()),
                Item::Numeric(numeric, _) => match numeric {
                    Numeric::Year
                    | Numeric::YearDiv100
                    | Numeric::YearMod100
                    | Numeric::IsoYear
                    | Numeric::IsoYearDiv100
                    | Numeric::IsoYearMod100
                    | Numeric::Month
                    | Numeric::Day
                    | Numeric::WeekFromSun
                    | Numeric::WeekFromMon
                    | Numeric::IsoWeek
                    | Numeric::NumDaysFromSun
                    | Numeric::WeekdayFromMon
                    | Numeric::Ordinal => spec.has_date = true,
                    Numeric::Hour
                    | Numeric::Hour12
                    | Numeric::Minute
                    | Numeric::Second
                    | Numeric::Nanosecond => spec.has_time = true,
                    Numeric::Timestamp => {
                        spec.has_date = true;
                        spec.has_time = true;
                    }
                    _ => {}
                },
                Item::Fixed(fixed) => match fixed {
                    Fixed::ShortMonthName
                    | Fixed::LongMonthName
                    | Fixed::ShortWeekdayName
                    | Fixed::LongWeekdayName => spec.has_date = true,
                    Fixed::LowerAmPm
                    | Fixed::UpperAmPm
                    | Fixed::Nanosecond
                    | Fixed::Nanosecond3
                    | Fixed::Nanosecond6
                    | Fixed::Nanosecond9 => spec.has_time = true,
                    Fixed::TimezoneOffset
                    | Fixed::TimezoneOffsetColon
                    | Fixed::TimezoneOffsetColonZ
                    | Fixed::TimezoneOffsetZ => spec.has_offset = true,
                    Fixed::RFC2822 | Fixed::RFC3339 => {
                        spec.has_date = true;
                        spec.has_time = true;
                        spec.has_offset = true;
                    }
                    _ => {}
                },
                _ => {}
            }
        }
        Ok(spec)
    }
}

/// Parse a timezone string: `UTC`, `Z`, or a fixed offset (`+09:00`,
/// `+0900`, `-05`). Named tzdata zones are the host's concern.
pub(crate) fn parse_timezone(timezone: &str) -> Option<FixedOffset> {
    if matches!(timezone, "UTC" | "utc" | "GMT" | "Z" | "z") {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = if let Some(rest) = timezone.strip_prefix('+') {
        (1, rest)
    } else {
        (-1, timezone.strip_prefix('-')?)
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes): (i32, i32) = match digits.len() {
        2 => (digits.parse().ok()?, 0),
        4 => (digits[..2].parse().ok()?, digits[2..].parse().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Compiled text-to-instant parser for one column.
#[derive(Debug, Clone)]
pub struct TimestampParser {
    column: String,
    format: String,
    offset: FixedOffset,
    default_date: NaiveDate,
    spec: FormatSpec,
}

impl TimestampParser {
    pub fn new(
        column: &str,
        format: &str,
        timezone: &str,
        default_date: &str,
    ) -> ConfigResult<Self> {
        let translated = translate_format(format);
        let spec = FormatSpec::inspect(&translated).map_err(|_| ConfigError::InvalidFormat {
            column: column.to_string(),
            format: format.to_string(),
        })?;
        let offset = parse_timezone(timezone).ok_or_else(|| ConfigError::InvalidTimezone {
            column: column.to_string(),
            timezone: timezone.to_string(),
        })?;
        let default_date =
            NaiveDate::parse_from_str(default_date, "%Y-%m-%d").map_err(|_| {
                ConfigError::InvalidDate {
                    column: column.to_string(),
                    date: default_date.to_string(),
                }
            })?;
        Ok(Self {
            column: column.to_string(),
            format: translated,
            offset,
            default_date,
            spec,
        })
    }

    /// Parse `text` into a UTC instant.
    ///
    /// A format with no date fields takes the configured default date; a
    /// format with no time fields parses as midnight. Formats that carry an
    /// offset (`%z`) resolve the instant from the text itself; otherwise the
    /// naive result is interpreted in the configured zone.
    pub fn parse(&self, text: &str) -> CastResult<Timestamp> {
        let utc: DateTime<Utc> = if self.spec.has_offset {
            DateTime::parse_from_str(text, &self.format)
                .map_err(|e| self.invalid(e.to_string()))?
                .with_timezone(&Utc)
        } else {
            let naive = if self.spec.has_date && self.spec.has_time {
                NaiveDateTime::parse_from_str(text, &self.format)
                    .map_err(|e| self.invalid(e.to_string()))?
            } else if self.spec.has_date {
                NaiveDate::parse_from_str(text, &self.format)
                    .map_err(|e| self.invalid(e.to_string()))?
                    .and_time(NaiveTime::MIN)
            } else {
                let time = NaiveTime::parse_from_str(text, &self.format)
                    .map_err(|e| self.invalid(e.to_string()))?;
                self.default_date.and_time(time)
            };
            naive
                .checked_sub_signed(Duration::seconds(self.offset.local_minus_utc() as i64))
                .ok_or_else(|| self.invalid("instant out of range".to_string()))?
                .and_utc()
        };
        Ok(Timestamp::new(utc.timestamp(), utc.timestamp_subsec_nanos()))
    }

    fn invalid(&self, reason: String) -> CastError {
        CastError::Invalid {
            column: self.column.clone(),
            from: Kind::String,
            to: Kind::Timestamp,
            reason,
        }
    }
}

/// Compiled instant-to-text formatter for one column.
#[derive(Debug, Clone)]
pub struct TimestampFormatter {
    column: String,
    format: String,
    offset: FixedOffset,
}

impl TimestampFormatter {
    pub fn new(column: &str, format: &str, timezone: &str) -> ConfigResult<Self> {
        let translated = translate_format(format);
        FormatSpec::inspect(&translated).map_err(|_| ConfigError::InvalidFormat {
            column: column.to_string(),
            format: format.to_string(),
        })?;
        let offset = parse_timezone(timezone).ok_or_else(|| ConfigError::InvalidTimezone {
            column: column.to_string(),
            timezone: timezone.to_string(),
        })?;
        Ok(Self {
            column: column.to_string(),
            format: translated,
            offset,
        })
    }

    /// Render the instant in the configured zone.
    pub fn format(&self, value: Timestamp) -> CastResult<String> {
        let utc = DateTime::from_timestamp(value.epoch_second(), value.nanos()).ok_or_else(
            || CastError::Invalid {
                column: self.column.clone(),
                from: Kind::Timestamp,
                to: Kind::String,
                reason: "instant out of range".to_string(),
            },
        )?;
        Ok(utc.with_timezone(&self.offset).format(&self.format).to_string())
    }
}
