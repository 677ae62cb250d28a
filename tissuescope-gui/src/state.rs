use dataset::FluorophoreRecord;
use tissue::SweepParameter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConfirmAction {
    ResetSession,
    FactoryDefaults,
    RestoreDefaultLasers,
}

impl ConfirmAction {
    /// Dialog title, message and confirm button label.
    pub(crate) fn prompt(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            ConfirmAction::ResetSession => (
                "Reset session",
                "Reload every dataset and reset all parameters to their defaults?",
                "Reset",
            ),
            ConfirmAction::FactoryDefaults => (
                "Factory defaults",
                "Overwrite the saved defaults with the factory values?",
                "Restore",
            ),
            ConfirmAction::RestoreDefaultLasers => (
                "Default lasers",
                "Replace the current laser list with the built-in lasers?",
                "Replace",
            ),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ConfirmDialogState {
    pub(crate) open: bool,
    pub(crate) title: String,
    pub(crate) message: String,
    pub(crate) action_label: String,
    pub(crate) action: Option<ConfirmAction>,
}

/// Inputs of the "add laser" form.
#[derive(Debug, Clone)]
pub(crate) struct LaserDraft {
    pub(crate) name: String,
    pub(crate) start_nm: f64,
    pub(crate) end_nm: f64,
    pub(crate) color: [u8; 3],
    pub(crate) has_power: bool,
    pub(crate) power_mw: f64,
}

impl Default for LaserDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            start_nm: 900.0,
            end_nm: 1000.0,
            color: [128, 128, 128],
            has_power: false,
            power_mw: 1000.0,
        }
    }
}

/// Inputs of the "add fluorophore" row on the library page.
#[derive(Debug, Clone)]
pub(crate) struct FluorophoreDraft {
    pub(crate) name: String,
    pub(crate) wavelength: f64,
    pub(crate) cross_section: f64,
    pub(crate) reference: String,
}

impl Default for FluorophoreDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            wavelength: 920.0,
            cross_section: 10.0,
            reference: String::new(),
        }
    }
}

/// UI-only state of the pages. Lives beside the session rather than in it
/// since none of it is part of the analysis.
#[derive(Debug, Clone)]
pub(crate) struct PageDrafts {
    pub(crate) laser: LaserDraft,
    pub(crate) fluorophore: FluorophoreDraft,
    /// Working copy of the fluorophore table while it is being edited.
    pub(crate) table_edit: Option<Vec<FluorophoreRecord>>,
    pub(crate) fluorophore_filter: String,
    pub(crate) selected_spectrum: Option<String>,
    pub(crate) sweep_parameter: SweepParameter,
    pub(crate) show_effective_cross_section: bool,
    pub(crate) show_depth_profile: bool,
    pub(crate) parameter_error: Option<String>,
    pub(crate) import_text: String,
}

impl Default for PageDrafts {
    fn default() -> Self {
        Self {
            laser: LaserDraft::default(),
            fluorophore: FluorophoreDraft::default(),
            table_edit: None,
            fluorophore_filter: String::new(),
            selected_spectrum: None,
            sweep_parameter: SweepParameter::Anisotropy,
            show_effective_cross_section: false,
            show_depth_profile: true,
            parameter_error: None,
            import_text: String::new(),
        }
    }
}
