//! The registration form and its round trip to the record store.

use std::{
    sync::{
        mpsc::{self, Receiver, TryRecvError},
        Arc,
    },
    thread,
};

use eframe::egui::{self, Button, CentralPanel, Color32, Context, RichText, TextEdit};

use crate::{config::Theme, widgets::Alert};
use form::{Field, FormState};
use store::RecordStore;
use submit::{Outcome, RegistrationError};

pub mod form;
pub mod store;
pub mod submit;
pub mod validate;

type Submission = Receiver<Result<Outcome, RegistrationError>>;

pub struct RegistrationForm {
    form: FormState,
    store: Arc<dyn RecordStore>,
    /// submissions still waiting on the network, the button stays enabled so
    /// there can be more than one
    pending: Vec<Submission>,
    alert: Option<Alert>,
    theme: Theme,
    ctx: Option<Context>,
}

impl RegistrationForm {
    #[must_use]
    pub fn new(
        store: Arc<dyn RecordStore>,
        allowed_domains: Vec<String>,
        theme: Theme,
        ctx: Option<Context>,
    ) -> Self {
        Self {
            form: FormState::new(allowed_domains),
            store,
            pending: Vec::new(),
            alert: None,
            theme,
            ctx,
        }
    }

    #[must_use]
    pub const fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    #[must_use]
    pub const fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        !self.pending.is_empty()
    }

    /// checks every field and, if they all pass, starts the lookup and insert
    /// on a worker thread
    pub fn submit(&mut self) {
        if !self.form.validate_all() {
            self.alert = Some(Alert::new(
                "Registration",
                "Please correct the highlighted errors in the form.",
            ));
            return;
        }
        let record = self.form.to_record();
        let store = Arc::clone(&self.store);
        let ctx = self.ctx.clone();
        let (tx, rx) = mpsc::channel();
        log::info!("submitting registration for {}", record.email);
        thread::spawn(move || {
            let result = submit::register(store.as_ref(), &record);
            // the form may have been closed in the meantime
            if tx.send(result).is_ok() {
                if let Some(ctx) = ctx {
                    ctx.request_repaint();
                }
            }
        });
        self.pending.push(rx);
    }

    /// picks up finished submissions
    pub fn poll(&mut self) {
        let mut finished = Vec::new();
        self.pending.retain(|submission| match submission.try_recv() {
            Ok(result) => {
                finished.push(result);
                false
            }
            Err(TryRecvError::Empty) => true,
            Err(TryRecvError::Disconnected) => {
                log::error!("registration worker exited without an answer");
                false
            }
        });
        for result in finished {
            let message = submit::resolve(&mut self.form, &result);
            self.alert = Some(Alert::new("Registration", message));
        }
    }

    fn render_field(&mut self, ui: &mut egui::Ui, field: Field) {
        ui.label(RichText::new(field.label()).strong());
        let edit = TextEdit::singleline(self.form.value_mut(field))
            .password(field.is_secret())
            .desired_width(f32::INFINITY);
        if ui.add(edit).changed() {
            self.form.revalidate(field);
        }
        if let Some(error) = self.form.error(field) {
            ui.colored_label(Color32::RED, error.to_string());
        } else if self.form.is_valid(field) {
            ui.colored_label(Color32::GREEN, field.valid_message());
        }
        if let Some(requirements) = field.requirements() {
            ui.small(requirements);
        }
        ui.add_space(8.0);
    }
}

impl eframe::App for RegistrationForm {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll();
        ctx.set_visuals(self.theme.into());
        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| ui.heading("Registration Form"));
            ui.add_space(16.0);
            for field in Field::ALL {
                self.render_field(ui, field);
            }
            let register = ui.add_enabled(self.form.can_submit(), Button::new("Register"));
            if register.clicked() {
                self.submit();
            }
            if self.is_submitting() {
                ui.spinner();
            }
        });
        if let Some(alert) = &self.alert {
            if alert.show(ctx) {
                self.alert = None;
            }
        }
    }
}
