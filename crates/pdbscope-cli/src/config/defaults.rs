use pdbscope::engine::config::LoadConfig;

pub struct DefaultsConfig {
    pub center: bool,
    pub include_hetero_atoms: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let core = LoadConfig::default();
        Self {
            center: core.center_at_origin,
            include_hetero_atoms: core.include_hetero_atoms,
        }
    }
}
