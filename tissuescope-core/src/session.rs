use crate::cache::TissueCache;
use crate::defaults::DefaultsManager;
use crate::markers::MarkerStyles;
use crate::navigation::{navigation_for, Mode, Navigation, PageId};
use crate::params::ParameterStore;
use crate::plot_data::{
    fluorophore_points, laser_bands, library_peaks, FluorophorePoint, LaserBand, LibraryPeak,
};
use crate::visibility::VisibilityMap;
use dataset::{
    default_lasers, load_cross_section_library, load_fluorophores, load_lasers,
    save_fluorophores, save_lasers, CrossSectionSpectrum, DatasetError, FluorophoreRecord,
    LaserRecord, WaterAbsorption,
};
use std::path::{Path, PathBuf};
use tissue::TissueProfile;

pub const FLUOROPHORES_FILE: &str = "fluorophores.csv";
pub const LASERS_FILE: &str = "lasers.csv";
pub const CROSS_SECTIONS_DIR: &str = "cross_sections";
pub const WATER_ABSORPTION_FILE: &str = "kou93b.dat";

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub data_dir: PathBuf,
    pub mode: Mode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            mode: Mode::default(),
        }
    }
}

impl SessionConfig {
    pub fn new(data_dir: impl Into<PathBuf>, mode: Mode) -> Self {
        Self {
            data_dir: data_dir.into(),
            mode,
        }
    }

    pub fn fluorophores_path(&self) -> PathBuf {
        self.data_dir.join(FLUOROPHORES_FILE)
    }

    pub fn lasers_path(&self) -> PathBuf {
        self.data_dir.join(LASERS_FILE)
    }

    pub fn cross_sections_dir(&self) -> PathBuf {
        self.data_dir.join(CROSS_SECTIONS_DIR)
    }

    pub fn water_path(&self) -> PathBuf {
        self.data_dir.join(WATER_ABSORPTION_FILE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// A message about the loaded data, shown inline on the pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMessage {
    pub level: MessageLevel,
    pub text: String,
}

impl SessionMessage {
    fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Result of one diagnostics check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticCheck {
    pub name: &'static str,
    pub ok: bool,
    pub detail: String,
}

/// Everything one dashboard session knows: mode and page, parameters,
/// loaded datasets and derived caches. Created at session start and passed
/// to every page renderer.
pub struct SessionContext {
    config: SessionConfig,
    mode: Mode,
    navigation: Navigation,
    current_page: PageId,
    pub params: ParameterStore,
    defaults: DefaultsManager,
    pub fluorophores: Vec<FluorophoreRecord>,
    pub lasers: Vec<LaserRecord>,
    pub library: Vec<CrossSectionSpectrum>,
    pub water: WaterAbsorption,
    pub visibility: VisibilityMap,
    pub markers: MarkerStyles,
    cache: TissueCache,
    messages: Vec<SessionMessage>,
    fluorophores_loaded: bool,
}

impl SessionContext {
    pub fn start(config: SessionConfig) -> Self {
        let defaults = DefaultsManager::new(&config.data_dir);
        let params = ParameterStore::with_defaults(*defaults.defaults());
        let navigation = navigation_for(config.mode);
        let mut session = Self {
            mode: config.mode,
            current_page: navigation.default_page(),
            navigation,
            params,
            defaults,
            fluorophores: Vec::new(),
            lasers: Vec::new(),
            library: Vec::new(),
            water: WaterAbsorption::fallback(),
            visibility: VisibilityMap::default(),
            markers: MarkerStyles::default(),
            cache: TissueCache::default(),
            messages: Vec::new(),
            fluorophores_loaded: false,
            config,
        };
        session.reload_datasets();
        log::info!(
            "session started in {} mode with data from {}",
            session.mode,
            session.config.data_dir.display()
        );
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn current_page(&self) -> PageId {
        self.current_page
    }

    /// Switches the experience mode. A page the new mode does not offer is
    /// replaced by the mode's default page; parameters are kept.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.navigation = navigation_for(mode);
        if !self.navigation.contains(self.current_page) {
            self.current_page = self.navigation.default_page();
        }
        log::info!("mode changed to {mode}, showing {}", self.current_page);
    }

    pub fn navigate(&mut self, page: PageId) -> Result<(), String> {
        if !self.navigation.contains(page) {
            return Err(format!("{page} is not available in {} mode", self.mode));
        }
        self.current_page = page;
        Ok(())
    }

    pub fn messages(&self) -> &[SessionMessage] {
        &self.messages
    }

    pub fn fluorophores_loaded(&self) -> bool {
        self.fluorophores_loaded
    }

    /// Reloads every dataset from the data directory. Missing or malformed
    /// files become session messages; loading never fails as a whole.
    pub fn reload_datasets(&mut self) {
        self.messages.clear();
        self.cache.clear();
        self.load_fluorophore_table();
        self.load_laser_table();
        self.load_library();

        let (water, warning) = WaterAbsorption::load_or_fallback(&self.config.water_path());
        self.water = water;
        if let Some(warning) = warning {
            self.push(MessageLevel::Warning, warning);
        }

        self.sync_fluorophore_views();
    }

    fn load_fluorophore_table(&mut self) {
        let path = self.config.fluorophores_path();
        match load_fluorophores(&path) {
            Ok(report) => {
                log::info!(
                    "loaded {} fluorophores from {}",
                    report.records.len(),
                    path.display()
                );
                for warning in &report.warnings {
                    self.push(
                        MessageLevel::Warning,
                        format!("{FLUOROPHORES_FILE} {warning}"),
                    );
                }
                self.fluorophores = report.records;
                self.fluorophores_loaded = true;
            }
            Err(DatasetError::NotFound(_)) => {
                self.fluorophores.clear();
                self.fluorophores_loaded = false;
                self.push(
                    MessageLevel::Error,
                    format!("Fluorophore data file not found: {}", path.display()),
                );
            }
            Err(err) => {
                self.fluorophores.clear();
                self.fluorophores_loaded = false;
                self.push(
                    MessageLevel::Error,
                    format!("Error loading fluorophore data: {err}"),
                );
            }
        }
    }

    fn load_laser_table(&mut self) {
        let path = self.config.lasers_path();
        match load_lasers(&path) {
            Ok(report) => {
                for warning in &report.warnings {
                    self.push(MessageLevel::Warning, format!("{LASERS_FILE} {warning}"));
                }
                self.lasers = report.records;
            }
            Err(DatasetError::NotFound(_)) => {
                log::info!("no laser table at {}, using default lasers", path.display());
                self.push(MessageLevel::Info, "No laser table found; using default lasers");
                self.lasers = default_lasers();
            }
            Err(err) => {
                self.push(
                    MessageLevel::Error,
                    format!("Error loading laser data: {err}; using default lasers"),
                );
                self.lasers = default_lasers();
            }
        }
    }

    fn load_library(&mut self) {
        let dir = self.config.cross_sections_dir();
        match load_cross_section_library(&dir) {
            Ok(report) => {
                for warning in &report.warnings {
                    self.push(
                        MessageLevel::Warning,
                        format!("{CROSS_SECTIONS_DIR}: {}", warning.message),
                    );
                }
                self.library = report.records;
            }
            Err(DatasetError::NotFound(_)) => {
                log::info!("no cross-section library at {}", dir.display());
                self.push(MessageLevel::Info, "No cross-section library found");
                self.library.clear();
            }
            Err(err) => {
                self.library.clear();
                self.push(
                    MessageLevel::Error,
                    format!("Error loading cross-section library: {err}"),
                );
            }
        }
    }

    fn sync_fluorophore_views(&mut self) {
        self.visibility.sync(&self.fluorophores);
        self.markers
            .assign_all(self.fluorophores.iter().map(|r| r.reference.as_str()));
    }

    /// Drops custom marker styles and hands out the default cycle again in
    /// table order.
    pub fn reset_marker_styles(&mut self) {
        self.markers.reset();
        self.markers
            .assign_all(self.fluorophores.iter().map(|r| r.reference.as_str()));
        log::info!("marker styles reset");
    }

    fn push(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.messages.push(SessionMessage::new(level, text));
    }

    /// Clears datasets and parameters, then loads everything afresh.
    pub fn reset(&mut self) {
        self.fluorophores.clear();
        self.lasers.clear();
        self.library.clear();
        self.visibility.clear();
        self.markers.reset();
        self.params.reset();
        self.reload_datasets();
        log::info!("session reset");
    }

    pub fn add_laser(
        &mut self,
        name: &str,
        start_nm: f64,
        end_nm: f64,
        color: &str,
        power_mw: Option<f64>,
    ) -> Result<(), String> {
        let mut laser =
            LaserRecord::new(name, start_nm, end_nm, color).map_err(|e| e.to_string())?;
        if let Some(power) = power_mw {
            laser = laser.with_power(power).map_err(|e| e.to_string())?;
        }
        if self.lasers.iter().any(|l| l.name == laser.name) {
            return Err(format!("A laser named '{}' already exists", laser.name));
        }
        log::info!("added laser {}", laser.name);
        self.lasers.push(laser);
        Ok(())
    }

    pub fn remove_laser(&mut self, index: usize) -> Result<LaserRecord, String> {
        if index >= self.lasers.len() {
            return Err(format!("No laser at position {index}"));
        }
        Ok(self.lasers.remove(index))
    }

    pub fn save_lasers(&self) -> Result<PathBuf, String> {
        let path = self.config.lasers_path();
        save_lasers(&path, &self.lasers).map_err(|e| {
            log::error!("failed to save lasers: {e}");
            format!("Failed to save lasers to '{}': {e}", path.display())
        })?;
        Ok(path)
    }

    /// Replaces the fluorophore table after an edit. Rows with an empty name
    /// or non-finite numbers are rejected.
    pub fn set_fluorophores(&mut self, records: Vec<FluorophoreRecord>) -> Result<(), String> {
        for (idx, record) in records.iter().enumerate() {
            record
                .check()
                .map_err(|e| format!("Row {}: {e}", idx + 1))?;
        }
        self.fluorophores = records;
        self.fluorophores_loaded = true;
        self.sync_fluorophore_views();
        Ok(())
    }

    pub fn save_fluorophores(&self) -> Result<PathBuf, String> {
        let path = self.config.fluorophores_path();
        save_fluorophores(&path, &self.fluorophores).map_err(|e| {
            log::error!("failed to save fluorophores: {e}");
            format!("Failed to save fluorophores to '{}': {e}", path.display())
        })?;
        Ok(path)
    }

    /// Tissue profile for the current parameters, served from the cache when
    /// the same parameters were seen recently.
    pub fn tissue_profile(&mut self) -> Result<&TissueProfile, String> {
        let parameters = *self.params.values();
        self.cache
            .profile(&parameters, &self.water)
            .map_err(|e| format!("Tissue model failed: {e}"))
    }

    pub fn cache(&self) -> &TissueCache {
        &self.cache
    }

    pub fn cross_section_points(&mut self) -> Vec<FluorophorePoint> {
        let parameters = *self.params.values();
        let profile = match self.cache.profile(&parameters, &self.water) {
            Ok(profile) => Some(profile),
            Err(err) => {
                log::warn!("plotting without tissue transmission: {err}");
                None
            }
        };
        fluorophore_points(&self.fluorophores, &self.visibility, profile)
    }

    pub fn laser_bands(&self) -> Vec<LaserBand> {
        laser_bands(&self.lasers, self.params.wavelength_range())
    }

    pub fn library_peaks(&self) -> Vec<LibraryPeak> {
        library_peaks(&self.library)
    }

    pub fn export_parameters(&self) -> Result<String, String> {
        self.params.export_json()
    }

    pub fn save_parameters_as_defaults(&mut self) -> Result<(), String> {
        self.defaults.update_defaults(*self.params.values())?;
        self.params.set_defaults(*self.defaults.defaults());
        Ok(())
    }

    /// Restores the factory defaults file and resets the parameters to it.
    pub fn restore_factory_defaults(&mut self) -> Result<(), String> {
        self.defaults.reset_defaults_to_factory()?;
        self.params.set_defaults(*self.defaults.defaults());
        self.params.reset();
        Ok(())
    }

    pub fn defaults(&self) -> &DefaultsManager {
        &self.defaults
    }

    pub fn diagnostics(&self) -> Vec<DiagnosticCheck> {
        let water_detail = if self.water.fallback {
            "using zero-absorption fallback".to_string()
        } else {
            format!("{} points", self.water.len())
        };
        vec![
            DiagnosticCheck {
                name: "Fluorophore data",
                ok: self.fluorophores_loaded,
                detail: format!("{} rows", self.fluorophores.len()),
            },
            DiagnosticCheck {
                name: "Laser data",
                ok: !self.lasers.is_empty(),
                detail: format!("{} rows", self.lasers.len()),
            },
            DiagnosticCheck {
                name: "Cross-section library",
                ok: !self.library.is_empty(),
                detail: format!("{} files", self.library.len()),
            },
            DiagnosticCheck {
                name: "Water absorption",
                ok: !self.water.fallback,
                detail: water_detail,
            },
            DiagnosticCheck {
                name: "Parameters",
                ok: self.params.values().validate().is_ok(),
                detail: format!("{} mode, page {}", self.mode, self.current_page),
            },
        ]
    }
}
