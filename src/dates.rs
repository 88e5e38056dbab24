use time::{Date, Duration, Month};

/// Returns the Monday of the week containing `date`.
///
/// The offset subtracted is 0 for a Monday through 6 for a Sunday, so any
/// two dates in the same Monday-to-Sunday span normalize to the same day.
pub(crate) fn week_start_of(date: Date) -> Date {
    let offset = i64::from(date.weekday().number_days_from_monday());
    date.checked_sub(Duration::days(offset))
        .expect("every supported date has a Monday in its week")
}

/// Canonical week identifier: the week's Monday as zero-padded `YYYY-MM-DD`.
pub(crate) fn week_id_of(date: Date) -> String {
    let monday = week_start_of(date);
    let year = monday.year();
    let month = u8::from(monday.month());
    let day = monday.day();
    format!("{year:04}-{month:02}-{day:02}")
}

/// Short display form of a date, e.g. `12 Mar`.
pub(crate) fn day_display(date: Date) -> String {
    format!("{} {}", date.day(), short_month(date.month()))
}

pub(crate) fn short_month(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

pub(crate) fn first_of_month(year: i32, month: Month) -> Date {
    Date::from_calendar_date(year, month, 1).expect("day 1 is valid in every month")
}

pub(crate) fn last_of_month(year: i32, month: Month) -> Date {
    let (next_year, next_month) = month_after(year, month);
    first_of_month(next_year, next_month)
        .previous_day()
        .expect("every month has a last day")
}

pub(crate) fn month_after(year: i32, month: Month) -> (i32, Month) {
    if month == Month::December {
        (year + 1, Month::January)
    } else {
        (year, month.next())
    }
}

pub(crate) fn month_before(year: i32, month: Month) -> (i32, Month) {
    if month == Month::January {
        (year - 1, Month::December)
    } else {
        (year, month.previous())
    }
}
