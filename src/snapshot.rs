//! Snapshot of script fingerprints found in one scan.
//!
//! Nested as table -> record id -> column -> fingerprints. A column's
//! fingerprint list is a multiset: order carries no meaning, repeats do.
//! Empty columns, records and tables are never kept.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::scan::fingerprint::{Fingerprint, ScriptExtractor};

pub type ColumnMap = BTreeMap<String, Vec<Fingerprint>>;
pub type RecordMap = BTreeMap<String, ColumnMap>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    tables: BTreeMap<String, RecordMap>,
}

/// Map level of a serialized snapshot. A repeated key is an error rather
/// than last-one-wins.
struct UniqueKeys<V>(BTreeMap<String, V>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for UniqueKeys<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeysVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for KeysVisitor<V> {
            type Value = UniqueKeys<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map with unique keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = BTreeMap::new();
                while let Some(key) = access.next_key::<String>()? {
                    if map.contains_key(&key) {
                        return Err(de::Error::custom(format_args!("duplicate key '{key}'")));
                    }
                    let value = access.next_value()?;
                    map.insert(key, value);
                }
                Ok(UniqueKeys(map))
            }
        }

        deserializer.deserialize_map(KeysVisitor(PhantomData))
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = UniqueKeys::<UniqueKeys<UniqueKeys<Vec<Fingerprint>>>>::deserialize(deserializer)?;
        let tables = raw
            .0
            .into_iter()
            .map(|(table, records)| {
                let records = records
                    .0
                    .into_iter()
                    .map(|(record, columns)| (record, columns.0))
                    .collect();
                (table, records)
            })
            .collect();
        Ok(Snapshot { tables })
    }
}

impl Snapshot {
    pub fn new() -> Self {
        Snapshot::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn tables(&self) -> &BTreeMap<String, RecordMap> {
        &self.tables
    }

    pub fn bucket(&self, table: &str, record: &str, column: &str) -> Option<&[Fingerprint]> {
        self.tables
            .get(table)?
            .get(record)?
            .get(column)
            .map(Vec::as_slice)
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn record_count(&self) -> usize {
        self.tables.values().map(BTreeMap::len).sum()
    }

    pub fn fingerprint_count(&self) -> usize {
        self.triples().map(|(_, _, _, hashes)| hashes.len()).sum()
    }

    /// Every (table, record, column, fingerprints) bucket, in key order.
    pub fn triples(&self) -> impl Iterator<Item = (&str, &str, &str, &[Fingerprint])> {
        self.tables.iter().flat_map(|(table, records)| {
            records.iter().flat_map(move |(record, columns)| {
                columns.iter().map(move |(column, hashes)| {
                    (table.as_str(), record.as_str(), column.as_str(), hashes.as_slice())
                })
            })
        })
    }

    /// Copy with every empty bucket, record and table removed, bottom-up.
    pub fn pruned(&self) -> Snapshot {
        let mut out = Snapshot::new();
        for (table, record, column, hashes) in self.triples() {
            out.insert_bucket(table, record, column, hashes.to_vec());
        }
        out
    }

    /// Adds a whole bucket. An empty `hashes` is dropped rather than stored.
    pub(crate) fn insert_bucket(
        &mut self,
        table: &str,
        record: &str,
        column: &str,
        hashes: Vec<Fingerprint>,
    ) {
        if hashes.is_empty() {
            return;
        }
        self.tables
            .entry(table.to_string())
            .or_default()
            .entry(record.to_string())
            .or_default()
            .entry(column.to_string())
            .or_default()
            .extend(hashes);
    }
}

/// Raw text of one searched column in one scanned row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRow {
    pub table: String,
    pub record: String,
    pub column: String,
    pub text: String,
}

pub struct SnapshotBuilder<'a> {
    extractor: &'a ScriptExtractor,
    snapshot: Snapshot,
}

impl<'a> SnapshotBuilder<'a> {
    pub fn new(extractor: &'a ScriptExtractor) -> Self {
        SnapshotBuilder {
            extractor,
            snapshot: Snapshot::new(),
        }
    }

    pub fn add(&mut self, row: &ScanRow) {
        let hashes = self.extractor.fingerprints(&row.text);
        self.snapshot
            .insert_bucket(&row.table, &row.record, &row.column, hashes);
    }

    pub fn extend<'r>(&mut self, rows: impl IntoIterator<Item = &'r ScanRow>) {
        for row in rows {
            self.add(row);
        }
    }

    pub fn finish(self) -> Snapshot {
        self.snapshot
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Builds a snapshot straight from literal buckets.
    pub fn snapshot(buckets: &[(&str, &str, &str, &[&str])]) -> Snapshot {
        let mut s = Snapshot::new();
        for (table, record, column, hashes) in buckets {
            let hashes = hashes.iter().map(|h| Fingerprint::from(*h)).collect();
            s.insert_bucket(table, record, column, hashes);
        }
        s
    }
}
