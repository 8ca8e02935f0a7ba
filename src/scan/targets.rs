use serde::Deserialize;

use crate::error::ConfigError;

/// A table to search: its primary key column and the text columns that may
/// hold markup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScanTarget {
    pub table: String,
    pub key: String,
    pub columns: Vec<String>,
}

impl ScanTarget {
    pub fn new(table: &str, key: &str, columns: &[&str]) -> Self {
        ScanTarget {
            table: table.to_string(),
            key: key.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn with_prefix(&self, prefix: &str) -> Self {
        ScanTarget {
            table: format!("{prefix}{}", self.table),
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table.trim().is_empty() {
            return Err(ConfigError::Target("table name is empty".into()));
        }
        if self.key.trim().is_empty() {
            return Err(ConfigError::Target(format!("{}: key column is empty", self.table)));
        }
        if self.columns.is_empty() {
            return Err(ConfigError::Target(format!("{}: no columns to search", self.table)));
        }
        if let Some(col) = self.columns.iter().find(|c| c.trim().is_empty() || **c == self.key) {
            return Err(ConfigError::Target(format!(
                "{}: invalid search column '{col}'",
                self.table
            )));
        }
        for (idx, col) in self.columns.iter().enumerate() {
            if self.columns[..idx].contains(col) {
                return Err(ConfigError::Target(format!(
                    "{}: column '{col}' listed twice",
                    self.table
                )));
            }
        }
        Ok(())
    }
}

/// Content tables of a typical storefront schema that accept raw HTML.
pub fn default_targets() -> Vec<ScanTarget> {
    vec![
        ScanTarget::new("core_config_data", "config_id", &["value"]),
        ScanTarget::new("cms_block", "block_id", &["content"]),
        ScanTarget::new("cms_page", "page_id", &["content", "layout_update_xml"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        for target in default_targets() {
            target.validate().unwrap();
        }
    }

    #[test]
    fn prefix_only_changes_table() {
        let target = ScanTarget::new("cms_page", "page_id", &["content"]).with_prefix("shop_");
        assert_eq!(target.table, "shop_cms_page");
        assert_eq!(target.key, "page_id");
        assert_eq!(target.columns, vec!["content"]);
    }

    #[test]
    fn rejects_bad_targets() {
        assert!(ScanTarget::new("", "id", &["c"]).validate().is_err());
        assert!(ScanTarget::new("t", " ", &["c"]).validate().is_err());
        assert!(ScanTarget::new("t", "id", &[]).validate().is_err());
        assert!(ScanTarget::new("t", "id", &["id"]).validate().is_err());
    }

    #[test]
    fn rejects_repeated_columns() {
        let err = ScanTarget::new("cms_page", "page_id", &["content", "layout_update_xml", "content"])
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("'content' listed twice"));
    }
}
