use crate::params::ParameterKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Experience tier selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    QuickSetup,
    #[default]
    Standard,
    Advanced,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::QuickSetup, Mode::Standard, Mode::Advanced];

    pub fn label(self) -> &'static str {
        match self {
            Mode::QuickSetup => "Quick Setup",
            Mode::Standard => "Standard",
            Mode::Advanced => "Advanced",
        }
    }

    pub fn parse(value: &str) -> Option<Mode> {
        let normalized: String = value
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "quicksetup" | "quick" => Some(Mode::QuickSetup),
            "standard" => Some(Mode::Standard),
            "advanced" => Some(Mode::Advanced),
            _ => None,
        }
    }

    /// Parses a mode name, falling back to [`Mode::Standard`] for anything
    /// unrecognized.
    pub fn parse_or_default(value: &str) -> Mode {
        Self::parse(value).unwrap_or_else(|| {
            log::warn!("unknown mode '{value}', falling back to {}", Mode::default());
            Mode::default()
        })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageId {
    LaserConfiguration,
    WavelengthSettings,
    TissueParameters,
    CrossSections,
    TissueAnalysis,
    FluorophoreLibrary,
    TissueModel,
    Diagnostics,
}

impl PageId {
    pub fn title(self) -> &'static str {
        match self {
            PageId::LaserConfiguration => "Laser Configuration",
            PageId::WavelengthSettings => "Wavelength Settings",
            PageId::TissueParameters => "Tissue Parameters",
            PageId::CrossSections => "Cross-sections",
            PageId::TissueAnalysis => "Tissue Analysis",
            PageId::FluorophoreLibrary => "Fluorophore Library",
            PageId::TissueModel => "Tissue Model",
            PageId::Diagnostics => "Diagnostics",
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub pages: &'static [PageId],
}

/// Ordered page grouping for one mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    mode: Mode,
    sections: Vec<Section>,
    default_page: PageId,
}

const QUICK_SETUP: &[Section] = &[
    Section {
        title: "Setup",
        pages: &[PageId::WavelengthSettings, PageId::TissueParameters],
    },
    Section {
        title: "Results",
        pages: &[PageId::CrossSections],
    },
];

const STANDARD: &[Section] = &[
    Section {
        title: "Configuration",
        pages: &[
            PageId::LaserConfiguration,
            PageId::WavelengthSettings,
            PageId::TissueParameters,
        ],
    },
    Section {
        title: "Analysis",
        pages: &[PageId::CrossSections, PageId::TissueAnalysis],
    },
    Section {
        title: "Library",
        pages: &[PageId::FluorophoreLibrary],
    },
];

const ADVANCED_EXTRA: Section = Section {
    title: "Advanced",
    pages: &[PageId::TissueModel, PageId::Diagnostics],
};

pub fn navigation_for(mode: Mode) -> Navigation {
    let sections = match mode {
        Mode::QuickSetup => QUICK_SETUP.to_vec(),
        Mode::Standard => STANDARD.to_vec(),
        Mode::Advanced => {
            let mut sections = STANDARD.to_vec();
            sections.push(ADVANCED_EXTRA);
            sections
        }
    };
    Navigation {
        mode,
        sections,
        default_page: PageId::CrossSections,
    }
}

impl Navigation {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn default_page(&self) -> PageId {
        self.default_page
    }

    pub fn contains(&self, page: PageId) -> bool {
        self.sections.iter().any(|s| s.pages.contains(&page))
    }

    pub fn pages(&self) -> Vec<PageId> {
        self.sections
            .iter()
            .flat_map(|s| s.pages.iter().copied())
            .collect()
    }

    pub fn section_of(&self, page: PageId) -> Option<&'static str> {
        self.sections
            .iter()
            .find(|s| s.pages.contains(&page))
            .map(|s| s.title)
    }
}

const ESSENTIAL_KEYS: &[ParameterKey] = &[
    ParameterKey::WavelengthRange,
    ParameterKey::NormalizationWavelength,
    ParameterKey::Depth,
];
const STANDARD_KEYS: &[ParameterKey] = &[
    ParameterKey::WaterContent,
    ParameterKey::AbsorptionThreshold,
];
const ADVANCED_KEYS: &[ParameterKey] = &[
    ParameterKey::Anisotropy,
    ParameterKey::ScatteringScale,
    ParameterKey::ScatteringPower,
    ParameterKey::TwoPhotonEnabled,
    ParameterKey::LambdaA,
    ParameterKey::LambdaB,
];

fn page_shows(page: PageId, key: ParameterKey) -> bool {
    use ParameterKey::*;
    match page {
        PageId::WavelengthSettings => matches!(
            key,
            WavelengthRange | NormalizationWavelength | AbsorptionThreshold
        ),
        PageId::TissueParameters => matches!(
            key,
            Depth | WaterContent | Anisotropy | ScatteringScale | ScatteringPower
        ),
        PageId::TissueAnalysis | PageId::TissueModel => true,
        PageId::CrossSections => matches!(
            key,
            WavelengthRange | NormalizationWavelength | Depth | WaterContent
        ),
        PageId::LaserConfiguration | PageId::FluorophoreLibrary | PageId::Diagnostics => false,
    }
}

/// Parameter keys editable on `page` in `mode`, in display order.
///
/// The result depends only on its arguments: the mode decides which tier of
/// keys is available and the page picks the ones it edits.
pub fn visible_parameters(mode: Mode, page: PageId) -> Vec<ParameterKey> {
    let mut tiers: Vec<&[ParameterKey]> = vec![ESSENTIAL_KEYS];
    if matches!(mode, Mode::Standard | Mode::Advanced) {
        tiers.push(STANDARD_KEYS);
    }
    if mode == Mode::Advanced {
        tiers.push(ADVANCED_KEYS);
    }
    tiers
        .into_iter()
        .flatten()
        .copied()
        .filter(|key| page_shows(page, *key))
        .collect()
}
