use std::path::PathBuf;
use std::sync::mpsc::Receiver;

/// Which plot an SVG export dialog was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SvgTarget {
    CrossSections,
    Transmission,
}

pub struct FileDialogManager {
    pub(crate) export_config_rx: Option<Receiver<Option<PathBuf>>>,
    pub(crate) import_config_rx: Option<Receiver<Option<PathBuf>>>,
    pub(crate) export_svg_rx: Option<(SvgTarget, Receiver<Option<PathBuf>>)>,
}

impl FileDialogManager {
    pub fn new() -> Self {
        Self {
            export_config_rx: None,
            import_config_rx: None,
            export_svg_rx: None,
        }
    }

    pub fn any_pending(&self) -> bool {
        self.export_config_rx.is_some()
            || self.import_config_rx.is_some()
            || self.export_svg_rx.is_some()
    }
}

impl Default for FileDialogManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a blocking native dialog off the UI thread.
pub(crate) fn spawn_file_dialog_thread<F, T>(f: F) -> std::thread::JoinHandle<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    std::thread::spawn(f)
}
