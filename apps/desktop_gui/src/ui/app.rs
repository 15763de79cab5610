use std::time::Duration;

use client_core::{DashboardSummary, DirectoryView, EntryForm};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

pub(crate) const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x4c, 0xc9, 0xf0);
pub(crate) const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(0xe7, 0x4c, 0x3c);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Students,
    AddStudent,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Dashboard, Route::Students, Route::AddStudent];

    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Students => "/students",
            Route::AddStudent => "/add",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Dashboard => "Home",
            Route::Students => "Students",
            Route::AddStudent => "Add Student",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}

pub struct StudentPortalApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    pub(crate) route: Route,
    pub(crate) status: String,
    pub(crate) last_error: Option<UiError>,
    pub(crate) backend_ready: bool,
    pub(crate) dashboard: Option<DashboardSummary>,
    pub(crate) directory: DirectoryView,
    pub(crate) form: EntryForm,
    pub(crate) submitting: bool,
}

impl StudentPortalApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, start: Route) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            route: start,
            status: "Starting".to_string(),
            last_error: None,
            backend_ready: false,
            dashboard: None,
            directory: DirectoryView::new(),
            form: EntryForm::new(),
            submitting: false,
        };
        app.enter_route(start);
        app
    }

    pub(crate) fn dispatch(&mut self, cmd: BackendCommand) -> bool {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status)
    }

    pub(crate) fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        if self.route == Route::Students {
            self.directory.abandon();
        }
        tracing::debug!(from = self.route.path(), to = route.path(), "navigate");
        self.route = route;
        self.enter_route(route);
    }

    fn enter_route(&mut self, route: Route) {
        match route {
            Route::Dashboard => {
                self.dispatch(BackendCommand::LoadDashboard);
            }
            Route::Students => {
                let ticket = self.directory.begin_load();
                self.dispatch(BackendCommand::LoadDirectory { ticket });
            }
            Route::AddStudent => {}
        }
    }

    pub(crate) fn submit_form(&mut self) {
        if self.submitting {
            return;
        }
        let form = self.form.clone();
        self.submitting = self.dispatch(BackendCommand::SubmitEntry { form });
    }

    pub(crate) fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::BackendReady => {
                    self.backend_ready = true;
                    self.status = "SYS.ON_LINE".to_string();
                }
                UiEvent::DashboardLoaded(summary) => {
                    self.dashboard = Some(summary);
                }
                UiEvent::DirectoryLocalLoaded { ticket, entries } => {
                    self.directory.apply_local(ticket, entries);
                }
                UiEvent::DirectoryRemoteResolved { ticket, result } => {
                    self.directory.resolve_remote(ticket, result);
                }
                UiEvent::EntrySubmitted { form } => {
                    self.submitting = false;
                    self.form = form;
                }
                UiEvent::EntrySubmitFailed { form, error } => {
                    self.submitting = false;
                    self.form = form;
                    self.show_error(error);
                }
                UiEvent::Error(error) => self.show_error(error),
            }
        }
    }

    fn show_error(&mut self, error: UiError) {
        tracing::warn!(context = ?error.context(), "{}", error.message());
        self.status = format!("{}: {}", error.label(), error.message());
        self.last_error = Some(error);
    }

    fn show_nav_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Student Portal").strong().size(18.0));
                let (dot, label) = if self.backend_ready {
                    (ACCENT, "SYS.ON_LINE")
                } else {
                    (ERROR_RED, "SYS.OFF_LINE")
                };
                ui.colored_label(dot, "●");
                ui.label(egui::RichText::new(label).monospace().small());
                ui.separator();
                for route in Route::ALL {
                    let button = egui::Button::new(route.label()).selected(self.route == route);
                    if ui.add(button).clicked() {
                        self.navigate(route);
                    }
                }
            });
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(error) = &self.last_error {
                    ui.colored_label(ERROR_RED, error.label());
                    if ui.small_button("dismiss").clicked() {
                        self.last_error = None;
                    }
                }
                ui.label(egui::RichText::new(&self.status).monospace().small());
            });
        });
    }
}

impl eframe::App for StudentPortalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_nav_bar(ctx);
        self.show_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.route {
                Route::Dashboard => self.show_dashboard(ui),
                Route::Students => self.show_students(ui),
                Route::AddStudent => self.show_add_student(ui),
            });
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
