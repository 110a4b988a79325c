//! The view-state schema.
//!
//! Only state that cannot be reconstructed from other state is described
//! here; everything else is left out of shared links.

use loom_state_codec::{Atom, Schema};

use crate::keys::KeyDomains;
use crate::options::ViewStateOptions;

/// Build the view-state schema for one dataset's key domains.
pub fn view_state_schema(domains: &KeyDomains, options: &ViewStateOptions) -> Schema {
    let scatter_modes = Atom::enumeration(options.scatter_modes.clone());
    Schema::object([
        ("heatmap", heatmap_schema(domains, options)),
        ("col", axis_schema(&domains.col, &scatter_modes, options.plot_panels)),
        ("row", axis_schema(&domains.row, &scatter_modes, options.plot_panels)),
        ("sparkline", sparkline_schema(domains, options)),
        ("cellMD", search_schema()),
        ("geneMD", search_schema()),
    ])
}

fn heatmap_schema(domains: &KeyDomains, options: &ViewStateOptions) -> Schema {
    let modes = Atom::enumeration(options.heatmap_modes.clone());
    Schema::object([
        (
            "center",
            Schema::object([("lat", Schema::passthrough()), ("lng", Schema::passthrough())]),
        ),
        ("colAttr", domains.col.clone().into()),
        ("colMode", modes.clone().into()),
        ("rowAttr", domains.row.clone().into()),
        ("rowMode", modes.into()),
        ("zoom", Schema::integer()),
    ])
}

/// Sort order, filters and scatter plots of one axis (rows or columns).
fn axis_schema(keys: &Atom, scatter_modes: &Atom, panels: usize) -> Schema {
    let plot = plot_schema(keys, scatter_modes);
    Schema::object([
        (
            "order",
            Schema::vector([Schema::object([
                ("key", keys.clone().into()),
                ("asc", Schema::boolean()),
            ])]),
        ),
        (
            "filter",
            Schema::vector([Schema::object([
                ("attr", keys.clone().into()),
                ("val", Schema::passthrough()),
            ])]),
        ),
        (
            "scatterPlots",
            Schema::object([
                ("selectedPlot", Schema::integer()),
                ("totalPlots", Schema::integer()),
                (
                    "plotSettings",
                    Schema::object((0..panels).map(|i| (i.to_string(), plot.clone()))),
                ),
            ]),
        ),
    ])
}

fn plot_schema(keys: &Atom, scatter_modes: &Atom) -> Schema {
    let axis = || {
        Schema::object([
            ("attr", keys.clone().into()),
            ("jitter", Schema::boolean()),
            ("logScale", Schema::boolean()),
        ])
    };
    Schema::object([
        ("x", axis()),
        ("y", axis()),
        ("colorAttr", keys.clone().into()),
        ("colorMode", scatter_modes.clone().into()),
        ("logScale", Schema::boolean()),
        ("clip", Schema::boolean()),
        ("lowerBound", Schema::integer()),
        ("upperBound", Schema::integer()),
        ("emphasizeNonZero", Schema::boolean()),
        ("scaleFactor", Schema::integer()),
    ])
}

fn sparkline_schema(domains: &KeyDomains, options: &ViewStateOptions) -> Schema {
    Schema::object([
        ("colAttr", domains.plottable_col.clone().into()),
        ("colMode", Atom::enumeration(options.sparkline_col_modes.clone()).into()),
        ("genes", Schema::vector([Schema::from(domains.gene.clone())])),
        ("geneMode", Atom::enumeration(options.sparkline_gene_modes.clone()).into()),
        ("showLabels", Schema::boolean()),
        ("groupBy", Schema::boolean()),
    ])
}

fn search_schema() -> Schema {
    Schema::object([("searchVal", Schema::passthrough())])
}
