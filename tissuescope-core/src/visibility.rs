use dataset::FluorophoreRecord;
use std::collections::BTreeMap;

/// Which fluorophores the cross-section plot shows. Unknown names count as
/// visible, so newly loaded fluorophores appear by default.
#[derive(Debug, Clone, Default)]
pub struct VisibilityMap {
    visible: BTreeMap<String, bool>,
}

impl VisibilityMap {
    /// Adds an entry for every record not yet tracked and drops entries whose
    /// fluorophore is gone.
    pub fn sync(&mut self, records: &[FluorophoreRecord]) {
        self.visible
            .retain(|name, _| records.iter().any(|r| &r.name == name));
        for record in records {
            self.visible.entry(record.name.clone()).or_insert(true);
        }
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.visible.get(name).copied().unwrap_or(true)
    }

    pub fn set_visible(&mut self, name: &str, visible: bool) {
        self.visible.insert(name.to_string(), visible);
    }

    pub fn set_all_visible(&mut self, visible: bool) {
        for value in self.visible.values_mut() {
            *value = visible;
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible.values().filter(|v| **v).count()
    }

    pub fn visible_fluorophores<'a>(
        &self,
        records: &'a [FluorophoreRecord],
    ) -> Vec<&'a FluorophoreRecord> {
        records
            .iter()
            .filter(|record| self.is_visible(&record.name))
            .collect()
    }

    pub fn clear(&mut self) {
        self.visible.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> FluorophoreRecord {
        FluorophoreRecord::new(name, 920.0, 10.0, "Zipfel Lab")
    }

    #[test]
    fn visible_fluorophores_keep_table_order() {
        let records = vec![record("EGFP"), record("mCherry"), record("tdTomato")];
        let mut visibility = VisibilityMap::default();
        visibility.sync(&records);
        visibility.set_visible("mCherry", false);
        let names: Vec<_> = visibility
            .visible_fluorophores(&records)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["EGFP", "tdTomato"]);

        visibility.set_all_visible(false);
        assert!(visibility.visible_fluorophores(&records).is_empty());
        assert_eq!(visibility.visible_count(), 0);
    }

    #[test]
    fn sync_drops_removed_names() {
        let mut visibility = VisibilityMap::default();
        visibility.sync(&[record("EGFP"), record("mCherry")]);
        visibility.set_visible("mCherry", false);
        visibility.sync(&[record("EGFP")]);
        assert_eq!(visibility.visible_count(), 1);
        // Untracked names default to visible.
        assert!(visibility.is_visible("mCherry"));
    }
}
