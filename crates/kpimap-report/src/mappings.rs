//! KPI field-mapping summary export.

use kpimap_model::{KpiDefinition, MappingKey};
use kpimap_session::MappingStore;

/// Render the mapping summary for the given KPIs, in the order supplied
/// (callers pass selected KPIs in catalog order). Each KPI block lists its
/// required fields in definition order and ends with a blank separator
/// line.
pub fn render_kpi_mappings(kpis: &[&KpiDefinition], mappings: &MappingStore) -> String {
    let mut out = String::new();
    for kpi in kpis {
        out.push_str(&format!("KPI: {}\n", kpi.name));
        for field in &kpi.required_fields {
            out.push_str(&format!("  Field: {field}\n"));
            match mappings.get(&MappingKey::new(kpi.name.clone(), field.clone())) {
                Some(target) => {
                    out.push_str(&format!(
                        "    Mapped to '{}' in table '{}'\n",
                        target.column, target.table
                    ));
                }
                None => {
                    out.push_str("    Unmapped! (Calculation Required)\n");
                }
            }
        }
        out.push('\n');
    }
    out
}
