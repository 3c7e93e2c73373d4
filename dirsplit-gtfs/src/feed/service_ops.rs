use super::FeedError;
use chrono::{Datelike, NaiveDate};
use gtfs_structures::{Calendar, Exception, Gtfs};
use std::collections::HashMap;

/// inclusive date range a trip's service must touch for the trip to be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// calendar_dates.txt grouped by service id, then date.
pub type DateExceptions = HashMap<String, HashMap<NaiveDate, Exception>>;

impl ServiceWindow {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, FeedError> {
        if end_date < start_date {
            return Err(FeedError::MalformedGtfsError(format!(
                "service window ends ({end_date}) before it starts ({start_date})"
            )));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// tests whether `service_id` has at least one active day within the window, using
    /// calendar.txt and the exceptions of calendar_dates.txt.
    pub fn is_active(
        &self,
        gtfs: &Gtfs,
        exceptions: &DateExceptions,
        service_id: &str,
    ) -> Result<bool, FeedError> {
        let calendar = gtfs.calendar.get(service_id);
        let dates = exceptions.get(service_id);
        match (calendar, dates) {
            (Some(c), _) => {
                let query_start = std::cmp::max(self.start_date, c.start_date);
                let query_end = std::cmp::min(self.end_date, c.end_date);
                let empty = HashMap::new();
                let lookup = dates.unwrap_or(&empty);
                // a regular day not deleted by an exception
                let regular = first_active_date(&query_start, &query_end, |d| {
                    runs_on_weekday(c, d) && !matches!(lookup.get(d), Some(Exception::Deleted))
                })?;
                if regular.is_some() {
                    return Ok(true);
                }
                // or an added day anywhere in the window
                has_addition(self, lookup)
            }
            (None, Some(lookup)) => has_addition(self, lookup),
            (None, None) => Err(FeedError::MalformedGtfsError(format!(
                "service_id '{service_id}' has no entry in either calendar.txt or calendar_dates.txt"
            ))),
        }
    }
}

/// groups calendar_dates.txt by service id for constant time date lookups.
pub fn date_exceptions(gtfs: &Gtfs) -> DateExceptions {
    gtfs.calendar_dates
        .iter()
        .map(|(service_id, dates)| {
            let lookup = dates
                .iter()
                .map(|d| (d.date, d.exception_type.clone()))
                .collect::<HashMap<_, _>>();
            (service_id.clone(), lookup)
        })
        .collect()
}

pub fn runs_on_weekday(c: &Calendar, date: &NaiveDate) -> bool {
    match date.weekday() {
        chrono::Weekday::Mon => c.monday,
        chrono::Weekday::Tue => c.tuesday,
        chrono::Weekday::Wed => c.wednesday,
        chrono::Weekday::Thu => c.thursday,
        chrono::Weekday::Fri => c.friday,
        chrono::Weekday::Sat => c.saturday,
        chrono::Weekday::Sun => c.sunday,
    }
}

fn has_addition(
    window: &ServiceWindow,
    lookup: &HashMap<NaiveDate, Exception>,
) -> Result<bool, FeedError> {
    let found = first_active_date(&window.start_date, &window.end_date, |d| {
        matches!(lookup.get(d), Some(Exception::Added))
    })?;
    Ok(found.is_some())
}

/// walks [query_start, query_end] one day at a time and returns the first date accepted
/// by `is_active`. an empty range yields None.
pub fn first_active_date(
    query_start: &NaiveDate,
    query_end: &NaiveDate,
    is_active: impl Fn(&NaiveDate) -> bool,
) -> Result<Option<NaiveDate>, FeedError> {
    let mut current_date = *query_start;
    while &current_date <= query_end {
        if is_active(&current_date) {
            return Ok(Some(current_date));
        }
        current_date = increment_date(&current_date, query_start, query_end)?;
    }
    Ok(None)
}

/// increments a date by one day, failing on calendar overflow.
fn increment_date(
    current_date: &NaiveDate,
    range_start: &NaiveDate,
    range_end: &NaiveDate,
) -> Result<NaiveDate, FeedError> {
    current_date.succ_opt().ok_or_else(|| {
        let msg = format!(
            "date overflow in service coverage check. cursor: '{}', date range: [{},{}]",
            current_date.format("%m-%d-%Y"),
            range_start.format("%m-%d-%Y"),
            range_end.format("%m-%d-%Y"),
        );
        FeedError::MalformedGtfsError(msg)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_first_active_date_scans_range() {
        // 2024-08-17 is a saturday
        let found = first_active_date(&date(2024, 8, 12), &date(2024, 8, 20), |d| {
            d.weekday() == chrono::Weekday::Sat
        })
        .expect("no overflow");
        assert_eq!(found, Some(date(2024, 8, 17)));
    }

    #[test]
    fn test_empty_range_has_no_active_date() {
        let found = first_active_date(&date(2024, 8, 20), &date(2024, 8, 12), |_| true)
            .expect("no overflow");
        assert_eq!(found, None);
    }

    #[test]
    fn test_addition_within_window() {
        let window = ServiceWindow::new(date(2024, 8, 12), date(2024, 8, 18)).expect("window");
        let added = HashMap::from([(date(2024, 8, 14), Exception::Added)]);
        assert!(has_addition(&window, &added).expect("no overflow"));
        let deleted = HashMap::from([(date(2024, 8, 14), Exception::Deleted)]);
        assert!(!has_addition(&window, &deleted).expect("no overflow"));
        let outside = HashMap::from([(date(2024, 9, 1), Exception::Added)]);
        assert!(!has_addition(&window, &outside).expect("no overflow"));
    }

    /// a feed with one weekday-only service running through august 2024.
    fn weekday_feed(service_id: &str) -> Gtfs {
        let calendar = Calendar {
            id: service_id.to_string(),
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: false,
            sunday: false,
            start_date: date(2024, 8, 1),
            end_date: date(2024, 8, 31),
        };
        let mut gtfs = Gtfs::default();
        gtfs.calendar.insert(service_id.to_string(), calendar);
        gtfs
    }

    #[test]
    fn test_deleted_weekdays_leave_service_inactive() {
        let gtfs = weekday_feed("wk");
        // monday 2024-08-12 and tuesday 2024-08-13
        let window = ServiceWindow::new(date(2024, 8, 12), date(2024, 8, 13)).expect("window");
        assert!(window
            .is_active(&gtfs, &DateExceptions::new(), "wk")
            .expect("valid service"));

        let exceptions = DateExceptions::from([(
            String::from("wk"),
            HashMap::from([
                (date(2024, 8, 12), Exception::Deleted),
                (date(2024, 8, 13), Exception::Deleted),
            ]),
        )]);
        assert!(!window
            .is_active(&gtfs, &exceptions, "wk")
            .expect("valid service"));
    }

    #[test]
    fn test_added_date_outside_calendar_is_active() {
        let gtfs = weekday_feed("wk");
        // a september weekend, after the calendar ends
        let window = ServiceWindow::new(date(2024, 9, 7), date(2024, 9, 8)).expect("window");
        assert!(!window
            .is_active(&gtfs, &DateExceptions::new(), "wk")
            .expect("valid service"));

        let exceptions = DateExceptions::from([(
            String::from("wk"),
            HashMap::from([(date(2024, 9, 8), Exception::Added)]),
        )]);
        assert!(window
            .is_active(&gtfs, &exceptions, "wk")
            .expect("valid service"));
    }

    #[test]
    fn test_service_from_calendar_dates_only() {
        let gtfs = Gtfs::default();
        let window = ServiceWindow::new(date(2024, 8, 12), date(2024, 8, 18)).expect("window");
        let exceptions = DateExceptions::from([(
            String::from("holiday"),
            HashMap::from([(date(2024, 8, 15), Exception::Added)]),
        )]);
        assert!(window
            .is_active(&gtfs, &exceptions, "holiday")
            .expect("valid service"));
    }

    #[test]
    fn test_unknown_service_is_malformed() {
        let gtfs = weekday_feed("wk");
        let window = ServiceWindow::new(date(2024, 8, 12), date(2024, 8, 18)).expect("window");
        let result = window.is_active(&gtfs, &DateExceptions::new(), "missing");
        assert!(matches!(result, Err(FeedError::MalformedGtfsError(_))));
    }

    #[test]
    fn test_inverted_window_rejected() {
        assert!(ServiceWindow::new(date(2024, 8, 18), date(2024, 8, 12)).is_err());
    }
}
