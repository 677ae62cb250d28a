pub mod cache;
pub mod defaults;
pub mod markers;
pub mod navigation;
pub mod params;
pub mod plot_data;
pub mod session;
pub mod validation;
pub mod visibility;

pub use cache::TissueCache;
pub use defaults::DefaultsManager;
pub use markers::{MarkerShape, MarkerStyle, MarkerStyles};
pub use navigation::{navigation_for, visible_parameters, Mode, Navigation, PageId, Section};
pub use params::{
    ParameterError, ParameterKey, ParameterKind, ParameterStore, ParameterValue,
    SessionParameters,
};
pub use plot_data::{FluorophorePoint, LaserBand, LibraryPeak};
pub use session::{
    DiagnosticCheck, MessageLevel, SessionConfig, SessionContext, SessionMessage,
};
pub use visibility::VisibilityMap;
