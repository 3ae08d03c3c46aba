//! Calendar durations and long dates for timelines.

use acervo_content::Locale;
use chrono::{Datelike, Months, NaiveDate};

/// Years, months and days between two dates, borrowing across month ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalendarSpan {
    pub years: i32,
    pub months: u32,
    pub days: u32,
}

impl CalendarSpan {
    /// `None` when `end` is before `start`.
    ///
    /// Whole months are counted first; a month only counts once the end's day
    /// reaches the start's day. The remainder is counted in days from the
    /// anniversary, which is clamped to the month's last day (Jan 31 + 1 month = Feb 28/29).
    pub fn between(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if end < start {
            return None;
        }
        let mut months =
            (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
        if end.day() < start.day() {
            months -= 1;
        }
        let months = months.max(0) as u32;
        let anchor = start.checked_add_months(Months::new(months))?;
        let days = (end - anchor).num_days().max(0) as u32;
        Some(Self { years: (months / 12) as i32, months: months % 12, days })
    }
}

fn unit(n: u32, locale: Locale, singular: (&str, &str), plural: (&str, &str)) -> String {
    let (pt, en) = if n == 1 { singular } else { plural };
    match locale {
        Locale::Pt => format!("{n} {pt}"),
        Locale::En => format!("{n} {en}"),
    }
}

/// The two most significant non-zero units ("1 year, 2 months").
pub fn format_span(span: CalendarSpan, locale: Locale) -> String {
    let parts: Vec<String> = [
        (span.years.max(0) as u32, ("ano", "year"), ("anos", "years")),
        (span.months, ("mês", "month"), ("meses", "months")),
        (span.days, ("dia", "day"), ("dias", "days")),
    ]
    .into_iter()
    .filter(|(n, _, _)| *n > 0)
    .take(2)
    .map(|(n, one, many)| unit(n, locale, one, many))
    .collect();

    if parts.is_empty() {
        return unit(0, locale, ("dia", "day"), ("dias", "days"));
    }
    parts.join(", ")
}

/// Duration from `start` to `end` (or `today` when open); empty when `end` precedes `start`.
pub fn format_duration(
    start: NaiveDate,
    end: Option<NaiveDate>,
    today: NaiveDate,
    locale: Locale,
) -> String {
    CalendarSpan::between(start, end.unwrap_or(today))
        .map(|span| format_span(span, locale))
        .unwrap_or_default()
}

const MONTHS_PT: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// "15 de janeiro de 2020" / "January 15, 2020".
pub fn long_date(date: NaiveDate, locale: Locale) -> String {
    let m = date.month0() as usize;
    match locale {
        Locale::Pt => format!("{} de {} de {}", date.day(), MONTHS_PT[m], date.year()),
        Locale::En => format!("{} {}, {}", MONTHS_EN[m], date.day(), date.year()),
    }
}

/// Today's date in local time.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn year_and_months() {
        let (start, end, today) = (d(2020, 1, 15), Some(d(2021, 3, 20)), d(2030, 1, 1));
        assert_eq!(format_duration(start, end, today, Locale::En), "1 year, 2 months");
        assert_eq!(format_duration(start, end, today, Locale::Pt), "1 ano, 2 meses");
    }

    #[test]
    fn borrows_across_months() {
        let span = CalendarSpan::between(d(2020, 1, 31), d(2020, 3, 1)).unwrap();
        assert_eq!(span, CalendarSpan { years: 0, months: 1, days: 1 });
        let span = CalendarSpan::between(d(2019, 12, 20), d(2020, 1, 5)).unwrap();
        assert_eq!(span, CalendarSpan { years: 0, months: 0, days: 16 });
        assert_eq!(format_span(span, Locale::Pt), "16 dias");
    }

    #[test]
    fn open_end_uses_today() {
        let duration = format_duration(d(2000, 5, 1), None, d(2003, 5, 2), Locale::En);
        assert_eq!(duration, "3 years, 1 day");
    }

    #[test]
    fn reversed_and_same_day() {
        let (start, today) = (d(2021, 1, 1), d(2030, 1, 1));
        assert_eq!(format_duration(start, Some(d(2020, 1, 1)), today, Locale::En), "");
        assert_eq!(format_duration(start, Some(start), today, Locale::En), "0 days");
        assert_eq!(format_duration(start, Some(start), today, Locale::Pt), "0 dias");
    }

    #[test]
    fn singular_units() {
        let span = CalendarSpan { years: 1, months: 1, days: 0 };
        assert_eq!(format_span(span, Locale::Pt), "1 ano, 1 mês");
    }

    #[test]
    fn long_dates() {
        assert_eq!(long_date(d(2020, 1, 15), Locale::Pt), "15 de janeiro de 2020");
        assert_eq!(long_date(d(2020, 1, 15), Locale::En), "January 15, 2020");
    }
}
