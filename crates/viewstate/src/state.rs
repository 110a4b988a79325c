//! Typed view-state records.
//!
//! These mirror the view-state schema field for field, with every field
//! optional so that sparse states (what a shared link usually carries)
//! serialize without placeholders.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shareable view state of one dataset session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heatmap: Option<HeatmapState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col: Option<AxisState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<AxisState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparkline: Option<SparklineState>,

    #[serde(rename = "cellMD", default, skip_serializing_if = "Option::is_none")]
    pub cell_md: Option<SearchState>,

    #[serde(rename = "geneMD", default, skip_serializing_if = "Option::is_none")]
    pub gene_md: Option<SearchState>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<LatLng>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_attr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_attr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<i64>,
}

/// Map viewport centre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Sort order, filters and scatter plots of rows or columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisState {
    #[serde(default)]
    pub order: Vec<SortKey>,
    #[serde(default)]
    pub filter: Vec<FilterPredicate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scatter_plots: Option<ScatterPlots>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub key: String,
    pub asc: bool,
}

impl SortKey {
    pub fn new(key: impl Into<String>, asc: bool) -> Self {
        Self {
            key: key.into(),
            asc,
        }
    }
}

/// Keep only entries whose `attr` attribute equals `val`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPredicate {
    pub attr: String,
    /// `null` is encoded as absent and comes back through the default.
    #[serde(default)]
    pub val: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPlots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_plot: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_plots: Option<i64>,
    /// Panel index to settings.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub plot_settings: BTreeMap<u8, PlotConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<PlotAxis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<PlotAxis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_attr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_scale: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emphasize_non_zero: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_factor: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotAxis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jitter: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_scale: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparklineState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_attr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_mode: Option<String>,
    #[serde(default)]
    pub genes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gene_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_labels: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<bool>,
}

/// Free-text search box contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_val: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sparse_state_serializes_only_present_fields() {
        let state = ViewState {
            col: Some(AxisState {
                order: vec![SortKey::new("Class", true)],
                ..Default::default()
            }),
            cell_md: Some(SearchState {
                search_val: Some("Actb".to_string()),
            }),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({
                "col": {"order": [{"key": "Class", "asc": true}], "filter": []},
                "cellMD": {"searchVal": "Actb"}
            })
        );
    }

    #[test]
    fn plot_settings_keys_are_panel_indices() {
        let json = json!({
            "selectedPlot": 1,
            "plotSettings": {"0": {"clip": true}, "3": {"scaleFactor": 40}}
        });
        let plots: ScatterPlots = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(plots.plot_settings[&0].clip, Some(true));
        assert_eq!(plots.plot_settings[&3].scale_factor, Some(40));
        assert_eq!(serde_json::to_value(&plots).unwrap(), json);
    }
}
