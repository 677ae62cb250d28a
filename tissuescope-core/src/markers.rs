use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerShape {
    Circle,
    Square,
    Diamond,
    TriangleUp,
    TriangleDown,
    Star,
}

impl MarkerShape {
    pub fn label(self) -> &'static str {
        match self {
            Self::Circle => "Circle",
            Self::Square => "Square",
            Self::Diamond => "Diamond",
            Self::TriangleUp => "Triangle up",
            Self::TriangleDown => "Triangle down",
            Self::Star => "Star",
        }
    }
}

pub const MARKER_SHAPES: [MarkerShape; 6] = [
    MarkerShape::Circle,
    MarkerShape::Square,
    MarkerShape::Diamond,
    MarkerShape::TriangleUp,
    MarkerShape::TriangleDown,
    MarkerShape::Star,
];

pub const MARKER_COLORS: [&str; 6] = [
    "#00008B", "#000000", "#FFC0CB", "#008080", "#808080", "#4B0082",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    pub color: String,
}

/// Marker style per literature reference, assigned from a fixed cycle in
/// first-seen order.
#[derive(Debug, Clone, Default)]
pub struct MarkerStyles {
    assigned: Vec<(String, MarkerStyle)>,
}

impl MarkerStyles {
    fn cycle(index: usize) -> MarkerStyle {
        MarkerStyle {
            shape: MARKER_SHAPES[index % MARKER_SHAPES.len()],
            color: MARKER_COLORS[index % MARKER_COLORS.len()].to_string(),
        }
    }

    pub fn style_for(&mut self, reference: &str) -> MarkerStyle {
        if let Some((_, style)) = self.assigned.iter().find(|(r, _)| r == reference) {
            return style.clone();
        }
        let style = Self::cycle(self.assigned.len());
        self.assigned.push((reference.to_string(), style.clone()));
        style
    }

    pub fn get(&self, reference: &str) -> Option<&MarkerStyle> {
        self.assigned
            .iter()
            .find(|(r, _)| r == reference)
            .map(|(_, style)| style)
    }

    pub fn set(&mut self, reference: &str, style: MarkerStyle) {
        match self.assigned.iter_mut().find(|(r, _)| r == reference) {
            Some((_, existing)) => *existing = style,
            None => self.assigned.push((reference.to_string(), style)),
        }
    }

    /// Assigns styles to every reference not yet seen.
    pub fn assign_all<'a>(&mut self, references: impl IntoIterator<Item = &'a str>) {
        for reference in references {
            self.style_for(reference);
        }
    }

    pub fn entries(&self) -> &[(String, MarkerStyle)] {
        &self.assigned
    }

    pub fn reset(&mut self) {
        self.assigned.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_cycle_and_stay_stable() {
        let mut styles = MarkerStyles::default();
        let first = styles.style_for("Zipfel Lab");
        assert_eq!(first.shape, MarkerShape::Circle);
        assert_eq!(first.color, "#00008B");
        let second = styles.style_for("FPbase");
        assert_eq!(second.shape, MarkerShape::Square);
        assert_eq!(styles.style_for("Zipfel Lab"), first);

        for idx in 0..6 {
            styles.style_for(&format!("ref {idx}"));
        }
        assert_eq!(styles.get("ref 4").map(|s| s.shape), Some(MarkerShape::Circle));
    }

    #[test]
    fn reset_restarts_the_cycle() {
        let mut styles = MarkerStyles::default();
        styles.assign_all(["a", "b"]);
        styles.reset();
        assert_eq!(styles.style_for("b").shape, MarkerShape::Circle);
    }

    #[test]
    fn set_overrides_one_reference() {
        let mut styles = MarkerStyles::default();
        styles.assign_all(["Zipfel Lab", "FPbase"]);
        let custom = MarkerStyle {
            shape: MarkerShape::Star,
            color: "#ff0000".to_string(),
        };
        styles.set("FPbase", custom.clone());
        assert_eq!(styles.get("FPbase"), Some(&custom));
        assert_eq!(styles.style_for("FPbase"), custom);
        assert_eq!(styles.get("Zipfel Lab").map(|s| s.shape), Some(MarkerShape::Circle));
        assert_eq!(styles.entries().len(), 2);

        styles.set("Drobizhev", custom.clone());
        assert_eq!(styles.entries().len(), 3);
    }
}
