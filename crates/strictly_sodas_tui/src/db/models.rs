//! Database models.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::db::schema;

/// A stored key and its serialized value.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::kv_entries)]
pub struct KvEntry {
    name: String,
    value: String,
    updated_at: NaiveDateTime,
}

/// Insertable entry; written with `REPLACE` so a key holds one row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::kv_entries)]
pub struct NewKvEntry<'a> {
    name: &'a str,
    value: &'a str,
    updated_at: NaiveDateTime,
}
