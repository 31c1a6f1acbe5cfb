use super::load_structure;
use crate::cli::{CompositionArgs, TableFormat};
use crate::error::{CliError, Result};
use pdbscope::core::models::molecules::Molecules;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositionRow {
    pub chain: String,
    pub element: String,
    pub count: usize,
}

/// One row per element and chain, chains in file order and elements sorted by name.
pub fn composition_rows(molecules: &Molecules, chain: Option<&str>) -> Result<Vec<CompositionRow>> {
    let chains: Vec<&str> = match chain {
        Some(id) => {
            let polymer = molecules.polymer(&id.trim().to_uppercase()).ok_or_else(|| {
                CliError::Argument(format!(
                    "Chain '{}' not found; available chains: {}",
                    id,
                    molecules.chain_ids().into_iter().collect::<Vec<_>>().join(", ")
                ))
            })?;
            vec![polymer.unit_id()]
        }
        None => molecules.polymers().iter().map(|p| p.unit_id()).collect(),
    };

    Ok(chains
        .into_iter()
        .flat_map(|chain| {
            molecules
                .atom_counts_of_chain(chain)
                .into_iter()
                .map(move |(element, count)| CompositionRow {
                    chain: chain.to_string(),
                    element,
                    count,
                })
        })
        .collect())
}

pub fn render_table(rows: &[CompositionRow]) -> String {
    let width = rows
        .iter()
        .map(|r| r.element.len())
        .max()
        .unwrap_or(0)
        .max("Element".len());
    let mut lines = vec![format!("{:<6} {:<width$} {:>7}", "Chain", "Element", "Count")];
    lines.extend(
        rows.iter()
            .map(|r| format!("{:<6} {:<width$} {:>7}", r.chain, r.element, r.count)),
    );
    lines.join("\n")
}

pub fn write_csv<W: Write>(rows: &[CompositionRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer
            .serialize(row)
            .map_err(|e| CliError::Other(e.into()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn emit<W: Write>(rows: &[CompositionRow], format: TableFormat, mut writer: W) -> Result<()> {
    match format {
        TableFormat::Table => {
            writeln!(writer, "{}", render_table(rows))?;
            writer.flush()?;
            Ok(())
        }
        TableFormat::Csv => write_csv(rows, writer),
    }
}

pub async fn run(args: CompositionArgs) -> Result<()> {
    let result = load_structure(&args.load).await?;
    let rows = composition_rows(&result.molecules, args.chain.as_deref())?;
    info!("Computed {} composition row(s).", rows.len());

    match &args.output {
        Some(path) => {
            info!("Writing composition to {:?}", path);
            let file = File::create(path)?;
            emit(&rows, args.format, BufWriter::new(file))
        }
        None => emit(&rows, args.format, io::stdout().lock()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::sample_load;

    fn row(chain: &str, element: &str, count: usize) -> CompositionRow {
        CompositionRow {
            chain: chain.to_string(),
            element: element.to_string(),
            count,
        }
    }

    #[test]
    fn rows_cover_every_chain_in_order() {
        let rows = composition_rows(&sample_load().molecules, None).unwrap();
        assert_eq!(
            rows,
            vec![
                row("A", "Carbon", 2),
                row("A", "Nitrogen", 1),
                row("A", "Oxygen", 1),
                row("B", "Nitrogen", 1),
                row("B", "Oxygen", 1),
            ]
        );
    }

    #[test]
    fn chain_filter_ignores_surrounding_whitespace() {
        let rows = composition_rows(&sample_load().molecules, Some(" B ")).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.chain == "B"));
    }

    #[test]
    fn chain_filter_matches_lower_case_ids() {
        let rows = composition_rows(&sample_load().molecules, Some("a")).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.chain == "A"));
    }

    #[test]
    fn unknown_chain_is_an_argument_error() {
        let err = composition_rows(&sample_load().molecules, Some("Z")).unwrap_err();
        match err {
            CliError::Argument(msg) => assert!(msg.contains("A, B")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn csv_output_has_a_header_row() {
        let mut buffer = Vec::new();
        write_csv(&[row("A", "Carbon", 2), row("B", "Oxygen", 1)], &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "chain,element,count\nA,Carbon,2\nB,Oxygen,1\n"
        );
    }

    #[test]
    fn table_columns_widen_to_the_longest_element() {
        let table = render_table(&[row("A", "Phosphorus", 12)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Chain  Element      Count");
        assert_eq!(lines[1], "A      Phosphorus      12");
    }

    #[test]
    fn table_output_can_be_written_to_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("composition.txt");
        let rows = composition_rows(&sample_load().molecules, Some("A")).unwrap();
        emit(&rows, TableFormat::Table, File::create(&path).unwrap()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("Chain"));
        assert_eq!(content.lines().count(), 4);
    }
}
