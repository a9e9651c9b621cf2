use eframe::egui::{Align2, Context, Vec2, Window};

/// A blocking message box, stays up until OK is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    title: &'static str,
    message: String,
}

impl Alert {
    #[must_use]
    pub fn new(title: &'static str, message: impl Into<String>) -> Self {
        Self {
            title,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.title
    }

    /// returns true once dismissed
    pub fn show(&self, ctx: &Context) -> bool {
        let mut dismissed = false;
        Window::new(self.title)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(&self.message);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });
        dismissed
    }
}
