use eframe::egui;
use eframe::egui::RichText;
use std::time::Instant;

use crate::file_dialogs::SvgTarget;
use crate::notification_handler::TOAST_SECONDS;
use crate::state::ConfirmAction;
use crate::GuiApp;
use tissuescope_core::{MessageLevel, PageId};

mod pages;
mod sidebar;
mod widgets;

pub(crate) use widgets::{kv_row_wrapped, parameter_controls, styled_button};

pub(crate) const BUTTON_SIZE: egui::Vec2 = egui::vec2(120.0, 26.0);

/// Requests a page makes of the surrounding application while it renders.
/// Pages only see the session and their drafts, so anything that touches
/// dialogs or notifications goes through here.
#[derive(Debug, Default)]
pub(crate) struct PageActions {
    pub(crate) notices: Vec<(String, String)>,
    pub(crate) export_svg: Option<SvgTarget>,
    pub(crate) confirm: Option<ConfirmAction>,
    pub(crate) navigate: Option<PageId>,
}

impl PageActions {
    pub(crate) fn notify(&mut self, title: &str, message: impl Into<String>) {
        self.notices.push((title.to_string(), message.into()));
    }
}

impl GuiApp {
    pub(crate) fn render_current_page(&mut self, ui: &mut egui::Ui) {
        let page = self.session.current_page();
        if let Some(section) = self.session.navigation().section_of(page) {
            ui.label(RichText::new(section).weak());
        }
        ui.heading(page.title());
        ui.add_space(4.0);

        let mut actions = PageActions::default();
        let session = &mut self.session;
        let drafts = &mut self.drafts;
        match page {
            PageId::LaserConfiguration => pages::lasers::render(ui, session, drafts, &mut actions),
            PageId::WavelengthSettings => {
                pages::wavelength::render(ui, session, drafts, &mut actions)
            }
            PageId::TissueParameters => {
                pages::tissue_params::render(ui, session, drafts, &mut actions)
            }
            PageId::CrossSections => {
                pages::cross_sections::render(ui, session, drafts, &mut actions)
            }
            PageId::TissueAnalysis => {
                pages::tissue_analysis::render(ui, session, drafts, &mut actions)
            }
            PageId::FluorophoreLibrary => pages::library::render(ui, session, drafts, &mut actions),
            PageId::TissueModel => pages::tissue_model::render(ui, session, drafts, &mut actions),
            PageId::Diagnostics => pages::diagnostics::render(ui, session, drafts, &mut actions),
        }
        self.apply_page_actions(actions);
    }

    fn apply_page_actions(&mut self, actions: PageActions) {
        for (title, message) in actions.notices {
            self.show_info(&title, &message);
        }
        if let Some(target) = actions.export_svg {
            self.open_export_svg_dialog(target);
        }
        if let Some(action) = actions.confirm {
            self.request_confirm(action);
        }
        if let Some(page) = actions.navigate {
            self.navigate(page);
        }
    }

    pub(crate) fn request_confirm(&mut self, action: ConfirmAction) {
        let (title, message, label) = action.prompt();
        self.show_confirm(title, message, label, action);
    }

    pub(crate) fn render_confirm_dialog(&mut self, ctx: &egui::Context) {
        if !self.confirm_dialog.open {
            return;
        }

        let screen_rect = ctx.screen_rect();
        egui::Area::new(egui::Id::new("modal_blocker"))
            .order(egui::Order::Middle)
            .fixed_pos(screen_rect.min)
            .show(ctx, |ui| {
                ui.allocate_rect(screen_rect, egui::Sense::click());
                ui.painter()
                    .rect_filled(screen_rect, 0.0, egui::Color32::from_black_alpha(220));
            });

        let center = screen_rect.center();
        egui::Area::new(egui::Id::new("modal_dialog"))
            .order(egui::Order::Foreground)
            .pivot(egui::Align2::CENTER_CENTER)
            .fixed_pos(center)
            .show(ctx, |ui| {
                egui::Frame::window(ui.style())
                    .rounding(egui::Rounding::same(6.0))
                    .show(ui, |ui| {
                        ui.heading(&self.confirm_dialog.title);
                        ui.label(&self.confirm_dialog.message);
                        ui.horizontal(|ui| {
                            if styled_button(ui, "Cancel").clicked() {
                                self.confirm_dialog.open = false;
                                self.confirm_dialog.action = None;
                            }
                            if styled_button(ui, &self.confirm_dialog.action_label).clicked() {
                                if let Some(action) = self.confirm_dialog.action.clone() {
                                    self.perform_confirm_action(action);
                                }
                                self.confirm_dialog.open = false;
                                self.confirm_dialog.action = None;
                            }
                        });
                    });
            });
    }

    pub(crate) fn render_info_toasts(&mut self, ctx: &egui::Context) {
        let notifications = self.notification_handler.get_recent_notifications();
        if notifications.is_empty() {
            return;
        }

        let now = Instant::now();
        let screen_rect = ctx.screen_rect();
        let max_width = 380.0;
        let mut y = screen_rect.min.y + 32.0;
        let x = screen_rect.max.x - 4.0;
        let total = TOAST_SECONDS;
        for (idx, notification) in notifications.into_iter().enumerate() {
            let age = now.duration_since(notification.created_at).as_secs_f32();
            let slide_in = 0.35;
            let slide_out = 0.45;
            let smooth = |t: f32| t * t * (3.0 - 2.0 * t);
            let slide = if age < slide_in {
                smooth((age / slide_in).clamp(0.0, 1.0))
            } else if age > total - slide_out {
                smooth(((total - age) / slide_out).clamp(0.0, 1.0))
            } else {
                1.0
            };
            let offscreen = max_width + 24.0;
            let x_pos = x + (1.0 - slide) * offscreen;
            let fill = egui::Color32::from_rgba_premultiplied(20, 20, 20, 200);
            let stroke = egui::Color32::from_rgba_premultiplied(80, 80, 80, 200);
            let text = egui::Color32::from_rgba_premultiplied(235, 235, 235, 230);

            egui::Area::new(egui::Id::new(("info_toast", idx)))
                .order(egui::Order::Foreground)
                .interactable(false)
                .pivot(egui::Align2::RIGHT_TOP)
                .fixed_pos(egui::pos2(x_pos, y))
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style())
                        .fill(fill)
                        .stroke(egui::Stroke::new(1.0, stroke))
                        .rounding(egui::Rounding::same(6.0))
                        .show(ui, |ui| {
                            ui.set_max_width(max_width);
                            ui.add_space(2.0);
                            ui.label(
                                RichText::new(&notification.title)
                                    .color(text)
                                    .strong()
                                    .size(16.0),
                            );
                            ui.label(RichText::new(&notification.message).color(text).size(14.0));
                            ui.add_space(2.0);
                        });
                });
            y += 66.0;
        }
    }
}

/// Session messages at or above `min_level`, drawn inline in their level's
/// colour.
pub(crate) fn session_messages(
    ui: &mut egui::Ui,
    session: &tissuescope_core::SessionContext,
    min_level: MessageLevel,
) {
    let rank = |level: MessageLevel| match level {
        MessageLevel::Info => 0,
        MessageLevel::Warning => 1,
        MessageLevel::Error => 2,
    };
    for message in session.messages() {
        if rank(message.level) < rank(min_level) {
            continue;
        }
        let color = match message.level {
            MessageLevel::Info => ui.visuals().weak_text_color(),
            MessageLevel::Warning => ui.visuals().warn_fg_color,
            MessageLevel::Error => ui.visuals().error_fg_color,
        };
        ui.label(RichText::new(&message.text).color(color));
    }
}
