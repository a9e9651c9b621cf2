use chrono::{NaiveTime, Weekday};
use eframe::egui::{self, TextEdit};
use thiserror::Error;

use super::alarm::{Alarm, WEEK};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlarmError {
    #[error("Please select both time and at least one day for the alarm")]
    Incomplete,
    #[error("Please enter the alarm time as HH:MM")]
    BadTime,
}

/// what the user has typed into the alarm form so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmDraft {
    pub time: String,
    /// in the order they were picked
    days: Vec<Weekday>,
}

impl AlarmDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_day(&mut self, day: Weekday) {
        if let Some(pos) = self.days.iter().position(|d| *d == day) {
            self.days.remove(pos);
        } else {
            self.days.push(day);
        }
    }

    #[must_use]
    pub fn is_selected(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    #[must_use]
    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    /// one alarm per selected day
    pub fn build(&self) -> Result<Vec<Alarm>, AlarmError> {
        let time = self.time.trim();
        if time.is_empty() || self.days.is_empty() {
            return Err(AlarmError::Incomplete);
        }
        let time = NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| AlarmError::BadTime)?;
        Ok(self.days.iter().map(|day| Alarm::new(time, *day)).collect())
    }

    /// "Alarm set successfully for Mon, Wed at 07:30!", with `time` as the
    /// alarms were built with rather than as it was typed
    #[must_use]
    pub fn confirmation(&self, time: NaiveTime) -> String {
        let days = self
            .days
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!("Alarm set successfully for {days} at {}!", time.format("%H:%M"))
    }

    pub fn clear(&mut self) {
        self.time.clear();
        self.days.clear();
    }

    /// returns true when "Set Alarm" was clicked
    pub(crate) fn render_alarm_editor(&mut self, ui: &mut egui::Ui) -> bool {
        ui.horizontal(|ui| {
            ui.label("Time");
            ui.add(
                TextEdit::singleline(&mut self.time)
                    .hint_text("HH:MM")
                    .desired_width(60.0)
                    .char_limit(5),
            );
        });
        ui.horizontal(|ui| {
            for day in WEEK {
                if ui
                    .selectable_label(self.is_selected(day), day.to_string())
                    .clicked()
                {
                    self.toggle_day(day);
                }
            }
        });
        ui.button("Set Alarm").clicked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(time: &str, days: &[Weekday]) -> AlarmDraft {
        let mut draft = AlarmDraft::new();
        draft.time = time.to_string();
        for day in days {
            draft.toggle_day(*day);
        }
        draft
    }

    #[test]
    fn monday_and_wednesday_at_seven_thirty() {
        let alarms = draft("07:30", &[Weekday::Mon, Weekday::Wed])
            .build()
            .unwrap();
        assert_eq!(alarms.len(), 2);
        assert_eq!(alarms[0].day_index(), 1);
        assert_eq!(alarms[0].time_string(), "07:30");
        assert!(alarms[0].active);
        assert_eq!(alarms[1].day_index(), 3);
        assert_eq!(alarms[1].time_string(), "07:30");
        assert!(alarms[1].active);
    }

    #[test]
    fn one_active_alarm_per_selected_day() {
        for count in 1..=WEEK.len() {
            let alarms = draft("23:59", &WEEK[..count]).build().unwrap();
            assert_eq!(alarms.len(), count);
            assert!(alarms.iter().all(|alarm| alarm.active));
            assert!(alarms
                .iter()
                .zip(&WEEK[..count])
                .all(|(alarm, day)| alarm.day == *day));
        }
    }

    #[test]
    fn keeps_selection_order() {
        let alarms = draft("06:00", &[Weekday::Fri, Weekday::Sun]).build().unwrap();
        assert_eq!(alarms[0].day, Weekday::Fri);
        assert_eq!(alarms[1].day, Weekday::Sun);
    }

    #[test]
    fn needs_time_and_a_day() {
        assert_eq!(
            draft("", &[Weekday::Mon]).build(),
            Err(AlarmError::Incomplete)
        );
        assert_eq!(draft("07:30", &[]).build(), Err(AlarmError::Incomplete));
        assert_eq!(
            AlarmError::Incomplete.to_string(),
            "Please select both time and at least one day for the alarm"
        );
    }

    #[test]
    fn rejects_malformed_time() {
        assert_eq!(
            draft("7.30", &[Weekday::Mon]).build(),
            Err(AlarmError::BadTime)
        );
        assert_eq!(
            draft("25:00", &[Weekday::Mon]).build(),
            Err(AlarmError::BadTime)
        );
    }

    #[test]
    fn toggling_twice_deselects() {
        let mut draft = draft("07:30", &[Weekday::Mon, Weekday::Tue]);
        draft.toggle_day(Weekday::Mon);
        assert_eq!(draft.days(), &[Weekday::Tue]);
        assert!(!draft.is_selected(Weekday::Mon));
    }

    #[test]
    fn confirmation_uses_short_day_names() {
        let draft = draft("07:30", &[Weekday::Mon, Weekday::Wed]);
        let alarms = draft.build().unwrap();
        assert_eq!(
            draft.confirmation(alarms[0].time),
            "Alarm set successfully for Mon, Wed at 07:30!"
        );
    }

    #[test]
    fn confirmation_pads_the_hour() {
        let draft = draft("7:05", &[Weekday::Fri]);
        let alarms = draft.build().unwrap();
        assert_eq!(alarms[0].time_string(), "07:05");
        assert_eq!(
            draft.confirmation(alarms[0].time),
            "Alarm set successfully for Fri at 07:05!"
        );
    }

    #[test]
    fn clear_resets_everything() {
        let mut draft = draft("07:30", &[Weekday::Mon]);
        draft.clear();
        assert_eq!(draft, AlarmDraft::new());
    }
}
