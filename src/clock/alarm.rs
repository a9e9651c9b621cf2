use std::fmt;

use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike, Weekday};

/// the weekday names in display order, sunday first
pub const WEEK: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

#[must_use]
pub const fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// one recurring weekly alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alarm {
    pub time: NaiveTime,
    pub day: Weekday,
    pub active: bool,
}

impl Alarm {
    #[must_use]
    pub const fn new(time: NaiveTime, day: Weekday) -> Self {
        Self {
            time,
            day,
            active: true,
        }
    }

    /// sunday is 0
    #[must_use]
    pub fn day_index(&self) -> u32 {
        self.day.num_days_from_sunday()
    }

    #[must_use]
    pub fn time_string(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    /// Only true on the zeroth second of the matching minute, so a tick that
    /// lands late misses the alarm until next week.
    #[must_use]
    pub fn rings_at(&self, now: NaiveDateTime) -> bool {
        self.active
            && now.weekday() == self.day
            && now.hour() == self.time.hour()
            && now.minute() == self.time.minute()
            && now.second() == 0
    }
}

impl fmt::Display for Alarm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", day_name(self.day), self.time.format("%H:%M"))
    }
}

#[derive(Debug, Default, Clone)]
pub struct AlarmList {
    alarms: Vec<Alarm>,
    armed: bool,
}

impl AlarmList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, batch: impl IntoIterator<Item = Alarm>) {
        self.alarms.extend(batch);
        self.armed = true;
    }

    /// returns the removed alarm, out of range indexes are ignored
    pub fn remove(&mut self, index: usize) -> Option<Alarm> {
        if index >= self.alarms.len() {
            return None;
        }
        let removed = self.alarms.remove(index);
        if self.alarms.is_empty() {
            self.armed = false;
        }
        Some(removed)
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    #[must_use]
    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    /// the alarms that should ring at `now`
    pub fn due(&self, now: NaiveDateTime) -> impl Iterator<Item = &Alarm> {
        let armed = self.armed;
        self.alarms
            .iter()
            .filter(move |alarm| armed && alarm.rings_at(now))
    }
}
