use eframe::{egui, egui::RichText};
use std::time::Duration;
use tissuescope_core::{PageId, SessionConfig, SessionContext};

mod dialog_polling;
mod export;
mod file_dialogs;
mod notification_handler;
mod notifications;
mod plots;
mod state;
mod ui;
mod utils;

use file_dialogs::FileDialogManager;
use notification_handler::NotificationHandler;
use state::{ConfirmAction, ConfirmDialogState, PageDrafts};

pub use export::{export_cross_section_svg, export_transmission_svg};

#[derive(Debug, Clone)]
pub struct GuiConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            title: "Deep Tissue Imaging Optimizer".to_string(),
            width: 1400.0,
            height: 900.0,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum GuiError {
    #[error("gui error: {0}")]
    Gui(String),
}

/// Opens the dashboard window and runs it until the window is closed.
///
/// The session is started before the window opens, so dataset loading
/// problems are already listed on the first frame.
///
/// # Parameters
///
/// * `config` - window title and size
/// * `session` - where to find the data and which mode to start in
///
/// # Returns
///
/// * `Ok(())` - the window was closed normally
/// * `Err(GuiError)` - the native window could not be created
pub fn run_gui(config: GuiConfig, session: SessionConfig) -> Result<(), GuiError> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width, config.height])
            .with_title(config.title.clone()),
        ..Default::default()
    };
    let context = SessionContext::start(session);

    eframe::run_native(
        &config.title,
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(context))),
    )
    .map_err(|err| GuiError::Gui(err.to_string()))
}

/// Top-level application state: the session plus the UI-only state around
/// it (form drafts, dialogs, notifications).
pub(crate) struct GuiApp {
    pub(crate) session: SessionContext,
    pub(crate) drafts: PageDrafts,
    pub(crate) notification_handler: NotificationHandler,
    pub(crate) file_dialogs: FileDialogManager,
    pub(crate) confirm_dialog: ConfirmDialogState,
}

impl GuiApp {
    pub(crate) fn new(session: SessionContext) -> Self {
        let mut app = Self {
            session,
            drafts: PageDrafts::default(),
            notification_handler: NotificationHandler::new(),
            file_dialogs: FileDialogManager::new(),
            confirm_dialog: ConfirmDialogState::default(),
        };
        let errors = app
            .session
            .messages()
            .iter()
            .filter(|m| m.level == tissuescope_core::MessageLevel::Error)
            .count();
        if errors > 0 {
            app.show_info(
                "Data",
                &format!("{errors} dataset(s) could not be loaded. See Diagnostics."),
            );
        }
        app
    }

    pub(crate) fn show_info(&mut self, title: &str, message: &str) {
        self.notification_handler.show_info(title, message);
    }

    pub(crate) fn show_confirm(
        &mut self,
        title: &str,
        message: &str,
        action_label: &str,
        action: ConfirmAction,
    ) {
        self.confirm_dialog.title = title.to_string();
        self.confirm_dialog.message = message.to_string();
        self.confirm_dialog.action_label = action_label.to_string();
        self.confirm_dialog.action = Some(action);
        self.confirm_dialog.open = true;
    }

    pub(crate) fn perform_confirm_action(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::ResetSession => {
                self.session.reset();
                self.drafts = PageDrafts::default();
                self.show_info("Session", "Datasets reloaded and parameters reset.");
            }
            ConfirmAction::FactoryDefaults => match self.session.restore_factory_defaults() {
                Ok(()) => self.show_info("Defaults", "Factory defaults restored."),
                Err(err) => self.show_info("Defaults", &err),
            },
            ConfirmAction::RestoreDefaultLasers => {
                self.session.lasers = dataset::default_lasers();
                self.show_info("Lasers", "Default laser list restored (not saved yet).");
            }
        }
    }

    pub(crate) fn navigate(&mut self, page: PageId) {
        if let Err(err) = self.session.navigate(page) {
            self.show_info("Navigation", &err);
        }
    }
}

impl eframe::App for GuiApp {
    /// Frame update: polls pending file dialogs, then draws the header, the
    /// navigation sidebar, the current page and any overlays.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.style_mut(|style| {
            style.interaction.selectable_labels = false;
        });
        self.poll_export_config_dialog();
        self.poll_import_config_dialog();
        self.poll_export_svg_dialog();
        self.notification_handler.cleanup_old_notifications(10.0);
        if self.file_dialogs.any_pending() {
            ctx.request_repaint_after(Duration::from_millis(100));
        } else if !self.notification_handler.get_recent_notifications().is_empty() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && self.confirm_dialog.open {
            self.confirm_dialog.open = false;
            self.confirm_dialog.action = None;
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Deep Tissue Imaging Optimizer");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(6.0);
                    ui.label(
                        RichText::new(format!("TissueScope {}", env!("CARGO_PKG_VERSION")))
                            .weak(),
                    );
                    ui.label(
                        RichText::new(format!(
                            "{} mode \u{2022} {}",
                            self.session.mode(),
                            self.session.current_page()
                        ))
                        .weak(),
                    );
                });
            });
        });

        egui::SidePanel::left("navigation")
            .resizable(false)
            .default_width(250.0)
            .show(ctx, |ui| {
                self.render_sidebar(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.render_current_page(ui);
                });
        });

        self.render_confirm_dialog(ctx);
        self.render_info_toasts(ctx);
    }
}
