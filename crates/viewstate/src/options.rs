//! View-state codec options.

use serde::{Deserialize, Serialize};

/// Options for building a view-state codec.
///
/// Mode lists are enumeration domains: new modes must be appended, never
/// inserted or reordered, or previously shared links decode to the wrong
/// mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewStateOptions {
    /// Leading version written into every encoded link
    pub schema_version: u32,

    /// Sort key domains instead of keeping the metadata's listing order
    pub sort_keys: bool,

    /// Number of scatter-plot panels per axis
    pub plot_panels: usize,

    pub heatmap_modes: Vec<String>,
    pub sparkline_col_modes: Vec<String>,
    pub sparkline_gene_modes: Vec<String>,
    pub scatter_modes: Vec<String>,
}

impl Default for ViewStateOptions {
    fn default() -> Self {
        Self {
            schema_version: 1,
            sort_keys: true,
            plot_panels: 4,
            heatmap_modes: strings(&[
                "Text",
                "Bars",
                "Categorical",
                "Heatmap",
                "Stacked",
                "Flame",
                "Box",
            ]),
            sparkline_col_modes: strings(&[
                "Bars",
                "Categorical",
                "Heatmap",
                "Stacked",
                "Flame",
                "Box",
            ]),
            sparkline_gene_modes: strings(&["Bars", "Heatmap", "Flame", "Box"]),
            scatter_modes: strings(&["Heatmap", "Categorical"]),
        }
    }
}

impl ViewStateOptions {
    /// Parse options from JSON; missing fields keep their defaults.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = ViewStateOptions::default();
        assert_eq!(o.schema_version, 1);
        assert!(o.sort_keys);
        assert_eq!(o.plot_panels, 4);
        assert_eq!(o.heatmap_modes.len(), 7);
        assert_eq!(o.scatter_modes, ["Heatmap", "Categorical"]);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let o = ViewStateOptions::from_json(r#"{"sortKeys": false, "schemaVersion": 2}"#).unwrap();
        assert!(!o.sort_keys);
        assert_eq!(o.schema_version, 2);
        assert_eq!(o.sparkline_gene_modes, ["Bars", "Heatmap", "Flame", "Box"]);
    }
}
