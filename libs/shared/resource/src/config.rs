use chrono::NaiveDate;
use serde_json::Value;

use crate::form::FormData;

/// How a free-text search is answered.
pub enum SearchMode<T: 'static> {
    /// Backend name query, e.g. `/pacientes/query?nombre=`.
    Remote { path: &'static str, param: &'static str },
    /// Full list filtered on the client with the given predicate. The term
    /// passed in is already lowercased.
    Local { matches: fn(&T, &str) -> bool },
}

#[derive(Clone, Copy)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Date { default_today: bool },
    Time,
    TextArea,
    Select(&'static [&'static str]),
    /// Options loaded from a backend collection; the option value is the `id`.
    Lookup { endpoint: &'static str, label: fn(&Value) -> String },
}

#[derive(Clone, Copy)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FormField {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }
}

/// A derived figure shown above the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub id: &'static str,
    pub label: &'static str,
    pub value: String,
}

impl Stat {
    pub fn count(id: &'static str, label: &'static str, value: usize) -> Self {
        Self { id, label, value: value.to_string() }
    }
}

/// User-facing confirmations after a successful mutation.
#[derive(Debug, Clone, Copy)]
pub struct Notices {
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
}

/// Everything that differs between the patient, staff and appointment pages.
pub struct ResourceConfig<T: 'static> {
    /// Backend collection path, e.g. `/pacientes`.
    pub endpoint: &'static str,
    /// Where the router is mounted in the front end, e.g. `/patients`.
    pub base_path: &'static str,
    pub title: &'static str,
    pub search: SearchMode<T>,
    pub search_placeholder: &'static str,
    /// Extra controls rendered under the search bar, e.g. a filter form.
    pub toolbar: &'static str,
    pub required_fields: &'static [&'static str],
    pub required_message: &'static str,
    pub form_fields: &'static [FormField],
    pub table_headers: &'static [&'static str],
    pub empty_message: &'static str,
    pub notices: Notices,
    pub id_of: fn(&T) -> Option<i64>,
    /// Data cells of one table row (`<td>` elements).
    pub row_template: fn(&T, NaiveDate) -> String,
    pub detail_template: fn(&T) -> String,
    pub stats: fn(&[T], NaiveDate) -> Vec<Stat>,
    /// Request payload from submitted fields. Runs after the required-field
    /// check.
    pub from_form: fn(&FormData) -> Result<T, String>,
    /// Pre-fill values for the edit form.
    pub to_form: fn(&T) -> FormData,
}

impl<T> ResourceConfig<T> {
    /// Stats are recomputed on search only when the search filters locally.
    pub fn restats_on_search(&self) -> bool {
        matches!(self.search, SearchMode::Local { .. })
    }

    pub fn lookup_fields(&self) -> impl Iterator<Item = (&'static str, &'static str, fn(&Value) -> String)> + '_ {
        self.form_fields.iter().filter_map(|field| match field.kind {
            FieldKind::Lookup { endpoint, label } => Some((field.name, endpoint, label)),
            _ => None,
        })
    }
}
