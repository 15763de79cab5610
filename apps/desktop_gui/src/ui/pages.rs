use client_core::{DirectoryRender, FormField, PHONE_MAX_LEN};
use eframe::egui;
use shared::domain::{Entry, Gender};

use super::app::{Route, StudentPortalApp, ACCENT, ERROR_RED};

const CARD_WIDTH: f32 = 260.0;
const CARD_HEIGHT: f32 = 96.0;

impl StudentPortalApp {
    pub(crate) fn show_dashboard(&mut self, ui: &mut egui::Ui) {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.heading("Student Directory");
            ui.add_space(8.0);
            match &self.dashboard {
                Some(summary) => {
                    ui.label(egui::RichText::new(summary.headline()).color(ACCENT));
                }
                None => {
                    ui.spinner();
                }
            }
            ui.add_space(16.0);
            ui.horizontal(|ui| {
                if ui.button("ACCESS_DATABASE").clicked() {
                    self.navigate(Route::Students);
                }
                if ui.button("NEW_ENTRY").clicked() {
                    self.navigate(Route::AddStudent);
                }
            });
        });
    }

    pub(crate) fn show_students(&mut self, ui: &mut egui::Ui) {
        ui.heading("Students");
        ui.add_space(8.0);

        if self.directory.is_ready() {
            let mut query = self.directory.query().to_string();
            ui.horizontal(|ui| {
                ui.label("Search");
                ui.add(
                    egui::TextEdit::singleline(&mut query)
                        .hint_text("name or email")
                        .desired_width(320.0),
                );
            });
            if query != self.directory.query() {
                self.directory.set_query(query);
            }
            ui.add_space(8.0);
        }

        match self.directory.render() {
            DirectoryRender::Loading { placeholders } => {
                card_grid(ui, placeholders, |ui, _| {
                    ui.spinner();
                });
            }
            DirectoryRender::Failed { message } => {
                egui::Frame::group(ui.style())
                    .stroke(egui::Stroke::new(1.0, ERROR_RED))
                    .show(ui, |ui| {
                        ui.colored_label(ERROR_RED, egui::RichText::new("Critical Failure").strong());
                        ui.label(message);
                    });
            }
            DirectoryRender::Ready { entries } if entries.is_empty() => {
                ui.label("No matching entries.");
            }
            DirectoryRender::Ready { entries } => {
                card_grid(ui, entries.len(), |ui, index| entry_card(ui, entries[index]));
            }
        }
    }

    pub(crate) fn show_add_student(&mut self, ui: &mut egui::Ui) {
        ui.heading("Add Student");
        ui.add_space(8.0);

        if let Some(message) = self.form.success_message() {
            ui.colored_label(ACCENT, message);
        }
        if let Some(entry) = self.form.last_added() {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.label(egui::RichText::new(&entry.name).strong());
                ui.label(&entry.email);
                ui.label(added_summary(entry));
            });
        }

        ui.add_enabled_ui(!self.submitting, |ui| {
            for field in [FormField::Name, FormField::Email, FormField::Phone] {
                self.text_field(ui, field);
            }

            ui.horizontal(|ui| {
                ui.label("Gender");
                let mut selected = self.form.gender();
                for gender in Gender::ALL {
                    ui.radio_value(&mut selected, Some(gender), gender.label());
                }
                if selected != self.form.gender() {
                    self.form.set_gender(selected);
                }
            });
            field_error(ui, &self.form, FormField::Gender);

            ui.add_space(8.0);
            if ui.button("Submit").clicked() {
                self.submit_form();
            }
        });
        if self.submitting {
            ui.spinner();
        }
    }

    fn text_field(&mut self, ui: &mut egui::Ui, field: FormField) {
        let (label, limit) = match field {
            FormField::Name => ("Name", usize::MAX),
            FormField::Email => ("Email", usize::MAX),
            FormField::Phone => ("Phone", PHONE_MAX_LEN),
            FormField::Gender => return,
        };
        let changed = ui
            .horizontal(|ui| {
                ui.label(label);
                match self.form.text_mut(field) {
                    Some(text) => ui
                        .add(egui::TextEdit::singleline(text).char_limit(limit))
                        .changed(),
                    None => false,
                }
            })
            .inner;
        if changed {
            self.form.clear_error(field);
        }
        field_error(ui, &self.form, field);
    }
}

fn field_error(ui: &mut egui::Ui, form: &client_core::EntryForm, field: FormField) {
    if let Some(err) = form.errors().get(field) {
        ui.colored_label(ERROR_RED, format!("ERR: {err}"));
    }
}

fn added_summary(entry: &Entry) -> String {
    match entry.gender {
        Some(gender) => format!("{} • {}", entry.phone, gender),
        None => entry.phone.clone(),
    }
}

fn card_grid(ui: &mut egui::Ui, count: usize, mut card: impl FnMut(&mut egui::Ui, usize)) {
    let columns = ((ui.available_width() / (CARD_WIDTH + 12.0)).floor() as usize).max(1);
    egui::Grid::new("entry_cards")
        .spacing([12.0, 12.0])
        .show(ui, |ui| {
            for index in 0..count {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_min_size(egui::vec2(CARD_WIDTH, CARD_HEIGHT));
                    ui.vertical(|ui| card(ui, index));
                });
                if (index + 1) % columns == 0 {
                    ui.end_row();
                }
            }
        });
}

fn entry_card(ui: &mut egui::Ui, entry: &Entry) {
    ui.horizontal(|ui| {
        let initial = entry.initial().map(String::from).unwrap_or_default();
        ui.label(egui::RichText::new(initial).strong().size(22.0).color(ACCENT));
        ui.label(
            egui::RichText::new(format!("Entry #{}", entry.id))
                .monospace()
                .small(),
        );
    });
    ui.label(egui::RichText::new(&entry.name).strong());
    ui.label(&entry.email);
    ui.label(&entry.phone);
}
