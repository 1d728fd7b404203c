//! The platform→extension table consumed by discovery.
//!
//! An explicit configuration value rather than process-wide static state so
//! callers (and tests) can register custom mappings.

use crate::platform::Platform;

/// One registered platform with the extensions that identify its ROM files.
#[derive(Debug, Clone)]
pub struct PlatformEntry {
    pub platform: Platform,
    /// Lowercase, dot-free extensions (e.g. "nes", "smc").
    pub extensions: Vec<String>,
}

impl PlatformEntry {
    pub fn new(platform: Platform, extensions: &[&str]) -> Self {
        Self {
            platform,
            extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
        }
    }
}

/// Ordered mapping of platforms to ROM file extensions.
///
/// Entry order is significant: discovery emits items in table order, and a
/// file matching two entries is attributed to the first.
#[derive(Debug, Clone)]
pub struct PlatformTable {
    entries: Vec<PlatformEntry>,
}

impl PlatformTable {
    /// Build a table from explicit entries.
    pub fn new(entries: Vec<PlatformEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PlatformEntry] {
        &self.entries
    }

    /// The platform owning a given extension (case-insensitive), if any.
    pub fn platform_for_extension(&self, ext: &str) -> Option<Platform> {
        let lower = ext.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.extensions.iter().any(|x| *x == lower))
            .map(|e| e.platform)
    }
}

impl Default for PlatformTable {
    /// Every known platform with its default extensions.
    fn default() -> Self {
        Self {
            entries: Platform::all()
                .iter()
                .map(|&p| PlatformEntry::new(p, p.default_extensions()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_all_platforms() {
        let table = PlatformTable::default();
        assert_eq!(table.entries().len(), Platform::all().len());
    }

    #[test]
    fn extension_lookup_is_case_insensitive() {
        let table = PlatformTable::default();
        assert_eq!(table.platform_for_extension("NES"), Some(Platform::Nes));
        assert_eq!(table.platform_for_extension("smc"), Some(Platform::Snes));
        assert_eq!(table.platform_for_extension("txt"), None);
    }

    #[test]
    fn custom_entries_override_defaults() {
        let table = PlatformTable::new(vec![PlatformEntry::new(Platform::Nes, &["rom"])]);
        assert_eq!(table.platform_for_extension("rom"), Some(Platform::Nes));
        assert_eq!(table.platform_for_extension("smc"), None);
    }

    #[test]
    fn first_entry_wins_on_duplicate_extension() {
        let table = PlatformTable::new(vec![
            PlatformEntry::new(Platform::Snes, &["bin"]),
            PlatformEntry::new(Platform::Genesis, &["bin"]),
        ]);
        assert_eq!(table.platform_for_extension("bin"), Some(Platform::Snes));
    }
}
