//! Dataset key lists and the enumeration domains derived from them.

use std::collections::HashSet;

use loom_state_codec::Atom;
use serde::{Deserialize, Serialize};

/// Attribute keys of one dataset, as listed by its metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatasetKeys {
    pub row_keys: Vec<String>,
    pub col_keys: Vec<String>,
    pub gene_keys: Vec<String>,
}

impl DatasetKeys {
    pub fn new<R, C, G, S>(row_keys: R, col_keys: C, gene_keys: G) -> Self
    where
        R: IntoIterator<Item = S>,
        C: IntoIterator<Item = S>,
        G: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            row_keys: row_keys.into_iter().map(Into::into).collect(),
            col_keys: col_keys.into_iter().map(Into::into).collect(),
            gene_keys: gene_keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Column keys that are attributes rather than genes, in listing order.
    pub fn plottable_col_keys(&self) -> Vec<String> {
        let genes: HashSet<&str> = self.gene_keys.iter().map(String::as_str).collect();
        self.col_keys
            .iter()
            .filter(|k| !genes.contains(k.as_str()))
            .cloned()
            .collect()
    }
}

/// The four enumeration domains used by the view-state schema.
///
/// Each domain is a snapshot; changing the [`DatasetKeys`] afterwards has no
/// effect on codecs built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyDomains {
    pub row: Atom,
    pub col: Atom,
    pub plottable_col: Atom,
    pub gene: Atom,
}

impl KeyDomains {
    pub fn new(keys: &DatasetKeys, sort: bool) -> Self {
        let domain = |list: Vec<String>| {
            if sort {
                Atom::sorted_keys(list)
            } else {
                Atom::enumeration(list)
            }
        };
        Self {
            row: domain(keys.row_keys.clone()),
            col: domain(keys.col_keys.clone()),
            plottable_col: domain(keys.plottable_col_keys()),
            gene: domain(keys.gene_keys.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys() -> DatasetKeys {
        DatasetKeys::new(
            ["GeneName", "Accession"],
            ["Name", "Age", "Class", "Gfap", "Actb"],
            ["Gfap", "Actb"],
        )
    }

    #[test]
    fn plottable_excludes_genes() {
        assert_eq!(keys().plottable_col_keys(), ["Name", "Age", "Class"]);
    }

    #[test]
    fn sorted_domains() {
        let d = KeyDomains::new(&keys(), true);
        assert_eq!(
            d.plottable_col.domain().unwrap().values(),
            &[json!("Age"), json!("Class"), json!("Name")]
        );
        assert_eq!(
            d.row.domain().unwrap().values(),
            &[json!("Accession"), json!("GeneName")]
        );
    }

    #[test]
    fn listing_order_domains() {
        let d = KeyDomains::new(&keys(), false);
        assert_eq!(
            d.gene.domain().unwrap().values(),
            &[json!("Gfap"), json!("Actb")]
        );
    }

    #[test]
    fn from_metadata_json() {
        let k = DatasetKeys::from_json(r#"{"rowKeys": ["a"], "colKeys": ["b", "c"]}"#).unwrap();
        assert_eq!(k.row_keys, ["a"]);
        assert_eq!(k.col_keys, ["b", "c"]);
        assert!(k.gene_keys.is_empty());
    }

    #[test]
    fn domains_are_snapshots() {
        let mut k = keys();
        let d = KeyDomains::new(&k, true);
        k.col_keys.push("Tissue".to_string());
        k.col_keys.reverse();
        assert_eq!(d, KeyDomains::new(&keys(), true));
    }
}
