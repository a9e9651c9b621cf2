//! The clock, stopwatch and alarm panel.

use std::{
    sync::mpsc::{self, Receiver, Sender},
    time::Duration,
};

use chrono::{Local, NaiveDateTime, Timelike};
use eframe::egui::{
    self, Align, Button, CentralPanel, Context, Grid, Layout, RichText, ScrollArea,
    TopBottomPanel,
};

use crate::{
    communication::{ClockEvent, Ticker},
    config::{Config, Theme},
    widgets::Alert,
};
use alarm::AlarmList;
use alarm_edit::AlarmDraft;
use stopwatch::Stopwatch;
use tone::TonePlayer;

pub mod alarm;
/// the alarm form
pub mod alarm_edit;
pub mod stopwatch;
pub mod tone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Clock,
    Stopwatch,
    Alarm,
}

pub struct ClockWidget {
    config: Config,
    theme: Theme,
    mode: Mode,
    now: NaiveDateTime,
    /// the last second alarms were checked against
    checked: Option<NaiveDateTime>,
    stopwatch: Stopwatch,
    alarms: AlarmList,
    draft: AlarmDraft,
    alert: Option<Alert>,
    tone: TonePlayer,
    ctx: Option<Context>,
    sender: Sender<ClockEvent>,
    events: Receiver<ClockEvent>,
    _clock_ticker: Ticker,
    stopwatch_ticker: Option<Ticker>,
}

impl ClockWidget {
    /// without a `ctx` nothing asks for repaints, which is fine headless
    #[must_use]
    pub fn new(config: Config, ctx: Option<Context>) -> Self {
        let (sender, events) = mpsc::channel();
        let clock_ticker = Ticker::spawn(
            Duration::from_secs(1),
            || ClockEvent::Second(Local::now().naive_local()),
            sender.clone(),
            ctx.clone(),
        );
        Self {
            theme: config.theme,
            config,
            mode: Mode::default(),
            now: Local::now().naive_local(),
            checked: None,
            stopwatch: Stopwatch::new(),
            alarms: AlarmList::new(),
            draft: AlarmDraft::new(),
            alert: None,
            tone: TonePlayer::spawn(),
            ctx,
            sender,
            events,
            _clock_ticker: clock_ticker,
            stopwatch_ticker: None,
        }
    }

    /// Apply everything the tickers sent since the last frame, each clock tick
    /// at the time it fired. Returns how many alarms went off.
    pub fn drain_events(&mut self) -> usize {
        let mut rang = 0;
        while let Ok(event) = self.events.try_recv() {
            match event {
                ClockEvent::Second(at) => rang += self.on_second(at),
                ClockEvent::StopwatchStep => self.stopwatch.tick(),
            }
        }
        rang
    }

    /// Returns how many alarms went off. A second that was already checked
    /// rings nothing the second time.
    pub fn on_second(&mut self, now: NaiveDateTime) -> usize {
        self.now = now;
        let second = now.with_nanosecond(0).unwrap_or(now);
        if self.checked == Some(second) {
            return 0;
        }
        self.checked = Some(second);
        let mut rang = 0;
        for alarm in self.alarms.due(now) {
            log::info!("alarm {alarm} triggered");
            self.tone.play(self.config.tone);
            rang += 1;
        }
        rang
    }

    pub fn toggle_stopwatch(&mut self) {
        if self.stopwatch.is_running() {
            self.stopwatch.stop();
            // dropping the ticker stops it
            self.stopwatch_ticker = None;
            log::debug!("stopwatch stopped at {}", self.stopwatch.display());
        } else {
            self.stopwatch.start();
            self.stopwatch_ticker = Some(Ticker::spawn(
                stopwatch::STEP,
                || ClockEvent::StopwatchStep,
                self.sender.clone(),
                self.ctx.clone(),
            ));
            log::debug!("stopwatch started");
        }
    }

    pub fn reset_stopwatch(&mut self) {
        self.stopwatch.reset();
        log::debug!("stopwatch reset");
    }

    pub fn set_alarm(&mut self) {
        match self.draft.build() {
            Ok(batch) => {
                let confirmation = self.draft.confirmation(batch[0].time);
                log::info!("{confirmation}");
                self.alarms.add(batch);
                self.draft.clear();
                self.alert = Some(Alert::new("Alarm", confirmation));
            }
            Err(e) => {
                self.alert = Some(Alert::new("Alarm", e.to_string()));
            }
        }
    }

    pub fn delete_alarm(&mut self, index: usize) {
        if let Some(alarm) = self.alarms.remove(index) {
            log::info!("deleted alarm {alarm}");
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = !self.theme;
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub const fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    #[must_use]
    pub const fn alarms(&self) -> &AlarmList {
        &self.alarms
    }

    pub fn draft_mut(&mut self) -> &mut AlarmDraft {
        &mut self.draft
    }

    #[must_use]
    pub const fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    fn render_header(&mut self, ctx: &Context) {
        TopBottomPanel::top("modes").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.mode, Mode::Clock, "Clock");
                ui.selectable_value(&mut self.mode, Mode::Stopwatch, "Stop Watch");
                ui.selectable_value(&mut self.mode, Mode::Alarm, "Alarm");
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let theme_btn = ui.add(Button::new(if self.theme == Theme::Dark {
                        "🌞 Light Mode"
                    } else {
                        "🌙 Dark Mode"
                    }));
                    if theme_btn.clicked() {
                        self.toggle_theme();
                    }
                });
            });
        });
    }

    fn render_time(&self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new(self.now.format(&self.config.time_format).to_string())
                .size(48.0)
                .strong(),
        );
    }

    fn render_clock(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            self.render_time(ui);
            ui.label(self.now.format(&self.config.date_format).to_string());
        });
    }

    fn render_stopwatch(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(self.stopwatch.display()).size(48.0).monospace());
            ui.horizontal(|ui| {
                let label = if self.stopwatch.is_running() {
                    "Stop"
                } else {
                    "Start"
                };
                if ui.button(label).clicked() {
                    self.toggle_stopwatch();
                }
                if ui.button("Reset").clicked() {
                    self.reset_stopwatch();
                }
            });
        });
    }

    fn render_alarms(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| self.render_time(ui));
        if self.draft.render_alarm_editor(ui) {
            self.set_alarm();
        }
        if self.alarms.is_empty() {
            return;
        }
        ui.separator();
        ui.heading("Current Alarms:");
        let mut delete = None;
        ScrollArea::vertical().show(ui, |ui| {
            Grid::new("alarms").show(ui, |ui| {
                for (i, alarm) in self.alarms.alarms().iter().enumerate() {
                    ui.label(alarm.to_string());
                    if ui.button("Delete").clicked() {
                        delete = Some(i);
                    }
                    ui.end_row();
                }
            });
        });
        if let Some(i) = delete {
            self.delete_alarm(i);
        }
    }
}

impl eframe::App for ClockWidget {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        ctx.set_visuals(self.theme.into());
        self.render_header(ctx);
        CentralPanel::default().show(ctx, |ui| match self.mode {
            Mode::Clock => self.render_clock(ui),
            Mode::Stopwatch => self.render_stopwatch(ui),
            Mode::Alarm => self.render_alarms(ui),
        });
        if let Some(alert) = &self.alert {
            if alert.show(ctx) {
                self.alert = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use chrono::{NaiveDate, Weekday};

    use super::*;

    fn widget() -> ClockWidget {
        ClockWidget::new(Config::default(), None)
    }

    fn monday(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn set_alarm_arms_and_clears_the_form() {
        let mut clock = widget();
        clock.draft_mut().time = "07:30".to_string();
        clock.draft_mut().toggle_day(Weekday::Mon);
        clock.draft_mut().toggle_day(Weekday::Wed);
        clock.set_alarm();

        assert!(clock.alarms().is_armed());
        assert_eq!(clock.alarms().len(), 2);
        assert_eq!(clock.draft_mut(), &mut AlarmDraft::new());
        assert_eq!(
            clock.alert().map(Alert::message),
            Some("Alarm set successfully for Mon, Wed at 07:30!")
        );
    }

    #[test]
    fn incomplete_alarm_is_rejected_and_kept() {
        let mut clock = widget();
        clock.draft_mut().time = "07:30".to_string();
        clock.set_alarm();

        assert!(clock.alarms().is_empty());
        assert!(!clock.alarms().is_armed());
        assert_eq!(clock.draft_mut().time, "07:30");
        assert_eq!(
            clock.alert().map(Alert::message),
            Some("Please select both time and at least one day for the alarm")
        );
    }

    #[test]
    fn matching_second_rings_once() {
        let mut clock = widget();
        clock.draft_mut().time = "07:30".to_string();
        clock.draft_mut().toggle_day(Weekday::Mon);
        clock.set_alarm();

        assert_eq!(clock.on_second(monday(7, 29, 59)), 0);
        assert_eq!(clock.on_second(monday(7, 30, 0)), 1);
        assert_eq!(clock.on_second(monday(7, 30, 1)), 0);
    }

    #[test]
    fn queued_ticks_for_the_same_second_ring_once() {
        let mut clock = widget();
        clock.draft_mut().time = "07:30".to_string();
        clock.draft_mut().toggle_day(Weekday::Mon);
        clock.set_alarm();

        for _ in 0..4 {
            clock.sender.send(ClockEvent::Second(monday(7, 30, 0))).unwrap();
        }
        clock
            .sender
            .send(ClockEvent::Second(
                monday(7, 30, 0).with_nanosecond(400_000_000).unwrap(),
            ))
            .unwrap();
        clock.sender.send(ClockEvent::Second(monday(7, 30, 1))).unwrap();
        assert_eq!(clock.drain_events(), 1);
    }

    #[test]
    fn backlog_is_checked_at_tick_time() {
        let mut clock = widget();
        clock.draft_mut().time = "07:30".to_string();
        clock.draft_mut().toggle_day(Weekday::Mon);
        clock.set_alarm();

        for second in [58, 59] {
            clock.sender.send(ClockEvent::Second(monday(7, 29, second))).unwrap();
        }
        clock.sender.send(ClockEvent::Second(monday(7, 30, 0))).unwrap();
        clock.sender.send(ClockEvent::Second(monday(7, 30, 1))).unwrap();
        assert_eq!(clock.drain_events(), 1);
    }

    #[test]
    fn set_alarm_confirms_the_parsed_time() {
        let mut clock = widget();
        clock.draft_mut().time = "7:30".to_string();
        clock.draft_mut().toggle_day(Weekday::Mon);
        clock.set_alarm();

        assert_eq!(
            clock.alert().map(Alert::message),
            Some("Alarm set successfully for Mon at 07:30!")
        );
        assert_eq!(clock.alarms().alarms()[0].to_string(), "Monday at 07:30");
    }

    #[test]
    fn deleting_every_alarm_disarms() {
        let mut clock = widget();
        clock.draft_mut().time = "07:30".to_string();
        clock.draft_mut().toggle_day(Weekday::Mon);
        clock.set_alarm();
        clock.delete_alarm(0);

        assert!(!clock.alarms().is_armed());
        assert_eq!(clock.on_second(monday(7, 30, 0)), 0);
    }

    #[test]
    fn stopwatch_ticker_drives_and_stops() {
        let mut clock = widget();
        clock.toggle_stopwatch();
        assert!(clock.stopwatch().is_running());
        thread::sleep(Duration::from_millis(100));
        clock.drain_events();
        clock.toggle_stopwatch();
        clock.drain_events();

        let elapsed = clock.stopwatch().elapsed_ms();
        assert!(elapsed > 0);
        assert_eq!(elapsed % stopwatch::STEP_MS, 0);

        thread::sleep(Duration::from_millis(50));
        clock.drain_events();
        assert_eq!(clock.stopwatch().elapsed_ms(), elapsed);

        clock.reset_stopwatch();
        assert_eq!(clock.stopwatch().display(), "00:00.00");
    }

    #[test]
    fn theme_and_mode_switch_freely() {
        let mut clock = widget();
        assert_eq!(clock.theme(), Theme::Dark);
        clock.toggle_theme();
        assert_eq!(clock.theme(), Theme::Light);

        assert_eq!(clock.mode(), Mode::Clock);
        clock.set_mode(Mode::Alarm);
        clock.set_mode(Mode::Stopwatch);
        assert_eq!(clock.mode(), Mode::Stopwatch);
    }
}
