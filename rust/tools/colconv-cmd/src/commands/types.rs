//! Types command implementation

use anyhow::{Context, Result};
use colconv::{ConvertedType, PhysicalType, dispatch};
use serde_json::{Value, json};

pub fn run(as_json: bool) -> Result<()> {
    let table = dispatch::supported_conversions();
    if as_json {
        let output = serde_json::to_string_pretty(&table_to_json(&table))
            .context("Failed to serialize conversion table")?;
        println!("{output}");
    } else {
        for line in format_table(&table) {
            println!("{line}");
        }
    }
    Ok(())
}

fn table_to_json(table: &[(ConvertedType, PhysicalType)]) -> Value {
    table
        .iter()
        .map(|(converted, physical)| {
            json!({
                "converted_type": converted.name(),
                "converted_type_id": converted.id(),
                "physical_type": physical.name(),
            })
        })
        .collect()
}

fn format_table(table: &[(ConvertedType, PhysicalType)]) -> Vec<String> {
    let width = table
        .iter()
        .map(|(converted, _)| converted.name().len())
        .max()
        .unwrap_or(0);
    table
        .iter()
        .map(|(converted, physical)| format!("{:<width$}  {physical}", converted.name()))
        .collect()
}
