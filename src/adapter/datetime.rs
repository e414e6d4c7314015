//! Преобразования дат между представлением бэкенда и черновиками.
//!
//! Время приёма хранится и гоняется туда-обратно в UTC: дата и время в
//! черновике считаются настенными часами UTC, а момент без смещения,
//! пришедший с бэкенда, тоже читается как UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, ParseError, Timelike, Utc};
use serde::{de, Deserialize, Deserializer};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Разбирает календарную дату. Полный момент времени тоже подходит, от него
/// остаётся дата по UTC.
pub fn parse_date(value: &str) -> Result<NaiveDate, ParseError> {
    let value = value.trim();

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .or_else(|_| parse_instant(value).map(|i| i.date_naive()))
}

/// Разбирает момент времени в ISO формате. Без смещения считаем что это UTC.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, ParseError> {
    let value = value.trim();

    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc()))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").map(|n| n.and_utc()))
}

/// Разбирает время в формате `ЧЧ:ММ`, секунды допускаются.
pub fn parse_time(value: &str) -> Result<NaiveTime, ParseError> {
    let value = value.trim();

    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S%.f"))
}

/// Делит момент на дату и время с точностью до минуты.
pub fn split_instant(instant: DateTime<Utc>) -> (NaiveDate, NaiveTime) {
    let time = NaiveTime::from_hms_opt(instant.hour(), instant.minute(), 0).unwrap_or_else(|| instant.time());

    (instant.date_naive(), time)
}

/// Собирает дату и время обратно в момент.
pub fn join_instant(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    date.and_time(time).and_utc()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Десериализует календарную дату, которая может отсутствовать.
pub fn calendar_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;

    raw.filter(|s| !s.trim().is_empty())
        .map(|s| parse_date(&s).map_err(de::Error::custom))
        .transpose()
}

/// Десериализует момент времени, который может отсутствовать.
pub fn instant<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;

    raw.filter(|s| !s.trim().is_empty())
        .map(|s| parse_instant(&s).map_err(de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn date_accepts_plain_and_instant_forms() {
        assert_eq!(parse_date("2024-07-10").unwrap(), day("2024-07-10"));
        assert_eq!(parse_date("2024-07-10T00:00:00.000Z").unwrap(), day("2024-07-10"));
        assert_eq!(parse_date("2024-07-10T23:30:00+00:00").unwrap(), day("2024-07-10"));
        assert!(parse_date("10.07.2024").is_err());
    }

    #[test]
    fn instant_without_offset_is_utc() {
        let a = parse_instant("2024-06-01T14:30:00").unwrap();
        let b = parse_instant("2024-06-01T14:30:00.000Z").unwrap();
        let c = parse_instant("2024-06-01T14:30").unwrap();

        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn instant_with_offset_is_moved_to_utc() {
        let instant = parse_instant("2024-06-01T17:30:00+03:00").unwrap();
        let (date, time) = split_instant(instant);

        assert_eq!(format_date(date), "2024-06-01");
        assert_eq!(format_time(time), "14:30");
    }

    #[test]
    fn split_and_join_do_not_drift() {
        let date = day("2024-06-01");
        let time = parse_time("14:30").unwrap();

        let instant = join_instant(date, time);
        assert_eq!(instant.to_rfc3339(), "2024-06-01T14:30:00+00:00");

        assert_eq!(split_instant(instant), (date, time));
    }

    #[test]
    fn split_drops_seconds() {
        let instant = parse_instant("2024-06-01T14:30:59.999Z").unwrap();

        assert_eq!(format_time(split_instant(instant).1), "14:30");
    }

    #[test]
    fn time_accepts_seconds() {
        assert_eq!(parse_time("09:05:00").unwrap(), parse_time("09:05").unwrap());
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("").is_err());
    }
}
