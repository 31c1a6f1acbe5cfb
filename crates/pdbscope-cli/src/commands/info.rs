use super::load_structure;
use crate::cli::{InfoArgs, InfoFormat};
use crate::error::{CliError, Result};
use pdbscope::core::io::pdb::ParseDiagnostic;
use pdbscope::core::models::molecules::MoleculeSummary;
use pdbscope::core::models::structure::StructureKind;
use pdbscope::core::utils::geometry::BoundingBox;
use pdbscope::workflows::load::LoadResult;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChainReport {
    pub id: String,
    pub residue_count: usize,
    pub atom_count: usize,
    pub helices: Vec<String>,
    pub sheets: Vec<String>,
}

/// Everything `info` prints. Scalar fields come before nested tables so the
/// TOML rendering stays valid.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct InfoReport {
    pub name: String,
    pub centered: bool,
    pub model_count: usize,
    pub molecule_names: Vec<String>,
    pub summary: MoleculeSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
    pub chains: Vec<ChainReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl InfoReport {
    pub fn new(result: &LoadResult, with_diagnostics: bool) -> Self {
        let molecules = &result.molecules;
        let chains = molecules
            .polymers()
            .iter()
            .map(|polymer| {
                let ids_of = |kind: StructureKind| {
                    polymer
                        .structures()
                        .iter()
                        .filter(|s| s.kind == kind)
                        .map(|s| s.id.clone())
                        .collect()
                };
                ChainReport {
                    id: polymer.unit_id().to_string(),
                    residue_count: polymer.monomer_handles().len(),
                    atom_count: polymer.atom_count(),
                    helices: ids_of(StructureKind::Helix),
                    sheets: ids_of(StructureKind::Sheet),
                }
            })
            .collect();

        Self {
            name: molecules.name().to_string(),
            centered: molecules.is_centered(),
            model_count: result.metadata.model_count,
            molecule_names: result.metadata.molecule_names.clone(),
            summary: *molecules.summary(),
            bounds: molecules.bounds(),
            chains,
            diagnostics: if with_diagnostics {
                result.metadata.diagnostics.clone()
            } else {
                Vec::new()
            },
        }
    }

    pub fn to_text(&self) -> String {
        let yes_no = |flag: bool| if flag { "yes" } else { "no" };
        let mut lines = vec![
            format!("Name:       {}", self.name),
            format!("Chains:     {}", self.summary.polymer_count),
            format!("Atoms:      {}", self.summary.atom_count),
            format!("Helices:    {}", yes_no(self.summary.has_helix)),
            format!("Sheets:     {}", yes_no(self.summary.has_sheet)),
            format!("Centered:   {}", yes_no(self.centered)),
        ];
        if self.model_count > 1 {
            lines.push(format!("Models:     {} (first one loaded)", self.model_count));
        }
        if let Some(bounds) = &self.bounds {
            let extent = bounds.extent();
            lines.push(format!(
                "Extent:     {:.2} x {:.2} x {:.2} Å",
                extent.x, extent.y, extent.z
            ));
        }

        lines.push(String::new());
        lines.push(format!("{:<6} {:>8} {:>8}  {}", "Chain", "Residues", "Atoms", "Secondary"));
        for chain in &self.chains {
            let secondary: Vec<String> = chain
                .helices
                .iter()
                .map(|id| format!("helix {}", id))
                .chain(chain.sheets.iter().map(|id| format!("sheet {}", id)))
                .collect();
            let secondary = if secondary.is_empty() {
                "-".to_string()
            } else {
                secondary.join(", ")
            };
            lines.push(format!(
                "{:<6} {:>8} {:>8}  {}",
                chain.id, chain.residue_count, chain.atom_count, secondary
            ));
        }

        if !self.diagnostics.is_empty() {
            lines.push(String::new());
            lines.push("Diagnostics:".to_string());
            lines.extend(self.diagnostics.iter().map(|d| format!("  {}", d)));
        }
        lines.join("\n")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self)
            .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to render TOML summary: {}", e)))
    }
}

pub async fn run(args: InfoArgs) -> Result<()> {
    let result = load_structure(&args.load).await?;
    let report = InfoReport::new(&result, args.diagnostics);
    info!("Rendering summary as {:?}", args.format);

    let rendered = match args.format {
        InfoFormat::Text => report.to_text(),
        InfoFormat::Toml => report.to_toml()?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::sample_load;

    #[test]
    fn report_lists_chains_and_secondary_structure() {
        let report = InfoReport::new(&sample_load(), false);
        assert_eq!(report.name, "TEST PEPTIDE");
        assert_eq!(report.summary.atom_count, 6);
        assert!(report.summary.has_helix);
        assert!(!report.summary.has_sheet);
        assert!(report.diagnostics.is_empty());

        let ids: Vec<&str> = report.chains.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(report.chains[0].helices, vec!["H1".to_string()]);
        assert_eq!(report.chains[0].residue_count, 3);
        assert_eq!(report.chains[0].atom_count, 4);
        assert_eq!(report.chains[1].atom_count, 2);
    }

    #[test]
    fn text_rendering_includes_the_chain_table() {
        let text = InfoReport::new(&sample_load(), false).to_text();
        assert!(text.starts_with("Name:       TEST PEPTIDE"));
        assert!(text.contains("Helices:    yes"));
        assert!(text.contains("helix H1"));
        assert!(!text.contains("Diagnostics:"));
    }

    #[test]
    fn toml_rendering_uses_kebab_case_keys() {
        let rendered = InfoReport::new(&sample_load(), false).to_toml().unwrap();
        assert!(rendered.contains("name = \"TEST PEPTIDE\""));
        assert!(rendered.contains("model-count = 0"));
        assert!(rendered.contains("atom-count = 6"));
        assert!(rendered.contains("[[chains]]"));
        assert!(!rendered.contains("diagnostics"));
    }
}
