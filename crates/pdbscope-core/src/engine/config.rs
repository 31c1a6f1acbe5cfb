/// Options controlling how a structure file is turned into a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    /// Translate the finished model so that its centroid sits at the origin.
    pub center_at_origin: bool,
    /// Treat `HETATM` records like `ATOM` records instead of skipping them.
    pub include_hetero_atoms: bool,
    /// Name used when the file declares no `MOLECULE:` names.
    pub fallback_name: Option<String>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            center_at_origin: true,
            include_hetero_atoms: false,
            fallback_name: None,
        }
    }
}

#[derive(Default)]
pub struct LoadConfigBuilder {
    center_at_origin: Option<bool>,
    include_hetero_atoms: Option<bool>,
    fallback_name: Option<String>,
}

impl LoadConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn center_at_origin(mut self, center: bool) -> Self {
        self.center_at_origin = Some(center);
        self
    }
    pub fn include_hetero_atoms(mut self, include: bool) -> Self {
        self.include_hetero_atoms = Some(include);
        self
    }
    pub fn fallback_name(mut self, name: impl Into<String>) -> Self {
        self.fallback_name = Some(name.into());
        self
    }

    pub fn build(self) -> LoadConfig {
        let defaults = LoadConfig::default();
        LoadConfig {
            center_at_origin: self.center_at_origin.unwrap_or(defaults.center_at_origin),
            include_hetero_atoms: self
                .include_hetero_atoms
                .unwrap_or(defaults.include_hetero_atoms),
            fallback_name: self
                .fallback_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_default_config() {
        assert_eq!(LoadConfigBuilder::new().build(), LoadConfig::default());
        assert!(LoadConfig::default().center_at_origin);
        assert!(!LoadConfig::default().include_hetero_atoms);
    }

    #[test]
    fn builder_overrides_each_field() {
        let config = LoadConfigBuilder::new()
            .center_at_origin(false)
            .include_hetero_atoms(true)
            .fallback_name(" 6vxx ")
            .build();
        assert!(!config.center_at_origin);
        assert!(config.include_hetero_atoms);
        assert_eq!(config.fallback_name.as_deref(), Some("6vxx"));
    }

    #[test]
    fn blank_fallback_name_is_dropped() {
        let config = LoadConfigBuilder::new().fallback_name("   ").build();
        assert_eq!(config.fallback_name, None);
    }
}
