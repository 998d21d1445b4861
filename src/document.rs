//! The document side of the binding: a hierarchical key-value store addressed
//! by dotted paths.
//!
//! The binder only ever calls [`Document::get`] and [`Document::set`] with
//! fully-qualified paths such as `"server.maxPlayers"`. Two implementations
//! ship with the crate:
//!
//! - [`toml::Table`] for plain in-memory data.
//! - [`toml_edit::DocumentMut`] for files whose comments and formatting must
//!   survive a store.
//!
//! Writing through a path creates intermediate tables as needed. An
//! intermediate key that holds a scalar is replaced by a table, so the
//! written path always becomes reachable.

use toml::{Table, Value};
use toml_edit::{DocumentMut, InlineTable, Item};

/// A hierarchical key-value store addressed by dotted paths.
pub trait Document {
    /// Read the value at `path`, or `None` if any segment is missing.
    fn get(&self, path: &str) -> Option<Value>;

    /// Write `value` at `path`, creating intermediate sections.
    fn set(&mut self, path: &str, value: Value);
}

impl Document for Table {
    fn get(&self, path: &str) -> Option<Value> {
        table_get(self, path).cloned()
    }

    fn set(&mut self, path: &str, value: Value) {
        let (parents, leaf) = match path.rsplit_once('.') {
            Some((p, l)) => (Some(p), l),
            None => (None, path),
        };

        let mut current = self;
        for segment in parents.into_iter().flat_map(|p| p.split('.')) {
            if !current.get(segment).is_some_and(Value::is_table) {
                current.insert(segment.to_string(), Value::Table(Table::new()));
            }
            let Some(next) = current.get_mut(segment).and_then(Value::as_table_mut) else {
                return;
            };
            current = next;
        }

        current.insert(leaf.to_string(), value);
    }
}

/// Navigate a `toml::Table` by dotted key path (e.g. `"database.url"`).
pub fn table_get<'a>(table: &'a Table, dotted_key: &str) -> Option<&'a Value> {
    let (path, leaf) = match dotted_key.rsplit_once('.') {
        Some((p, l)) => (Some(p), l),
        None => (None, dotted_key),
    };

    let tbl = match path {
        Some(path) => {
            let mut current = table;
            for segment in path.split('.') {
                current = current.get(segment)?.as_table()?;
            }
            current
        }
        None => table,
    };

    tbl.get(leaf)
}

impl Document for DocumentMut {
    fn get(&self, path: &str) -> Option<Value> {
        let mut current = self.as_item();
        for segment in path.split('.') {
            current = current.get(segment)?;
        }
        item_to_value(current)
    }

    fn set(&mut self, path: &str, value: Value) {
        let segments: Vec<&str> = path.split('.').collect();
        let Some((leaf, parents)) = segments.split_last() else {
            return;
        };

        let mut current: &mut Item = self.as_item_mut();
        for segment in parents {
            if !current.get(segment).is_some_and(Item::is_table_like) {
                // Standard tables nested in an inline table are never printed.
                current[segment] = if current.is_inline_table() {
                    Item::Value(InlineTable::new().into())
                } else {
                    let mut table = toml_edit::Table::new();
                    table.set_implicit(true);
                    Item::Table(table)
                };
            }
            current = &mut current[segment];
        }

        current[leaf] = toml_edit::value(to_edit_value(value));
    }
}

/// Convert a `toml::Value` into an inline `toml_edit::Value`.
pub(crate) fn to_edit_value(value: Value) -> toml_edit::Value {
    match value {
        Value::String(s) => s.into(),
        Value::Integer(i) => i.into(),
        Value::Float(f) => f.into(),
        Value::Boolean(b) => b.into(),
        Value::Datetime(d) => d.into(),
        Value::Array(items) => items
            .into_iter()
            .map(to_edit_value)
            .collect::<toml_edit::Array>()
            .into(),
        Value::Table(table) => table
            .into_iter()
            .map(|(k, v)| (k, to_edit_value(v)))
            .collect::<toml_edit::InlineTable>()
            .into(),
    }
}

pub(crate) fn edit_value_to_value(value: &toml_edit::Value) -> Value {
    match value {
        toml_edit::Value::String(s) => Value::String(s.value().clone()),
        toml_edit::Value::Integer(i) => Value::Integer(*i.value()),
        toml_edit::Value::Float(f) => Value::Float(*f.value()),
        toml_edit::Value::Boolean(b) => Value::Boolean(*b.value()),
        toml_edit::Value::Datetime(d) => Value::Datetime(*d.value()),
        toml_edit::Value::Array(a) => Value::Array(a.iter().map(edit_value_to_value).collect()),
        toml_edit::Value::InlineTable(t) => Value::Table(
            t.iter()
                .map(|(k, v)| (k.to_string(), edit_value_to_value(v)))
                .collect(),
        ),
    }
}

fn edit_table_to_table(table: &toml_edit::Table) -> Table {
    table
        .iter()
        .filter_map(|(k, item)| item_to_value(item).map(|v| (k.to_string(), v)))
        .collect()
}

fn item_to_value(item: &Item) -> Option<Value> {
    match item {
        Item::None => None,
        Item::Value(v) => Some(edit_value_to_value(v)),
        Item::Table(t) => Some(Value::Table(edit_table_to_table(t))),
        Item::ArrayOfTables(a) => Some(Value::Array(
            a.iter()
                .map(|t| Value::Table(edit_table_to_table(t)))
                .collect(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn table(toml_str: &str) -> Table {
        toml_str.parse::<Table>().unwrap()
    }

    #[test]
    fn table_get_flat() {
        let t = table("port = 8080");
        assert_eq!(t.get("port").and_then(|v| v.as_integer()), Some(8080));
        assert_eq!(Document::get(&t, "port"), Some(Value::Integer(8080)));
    }

    #[test]
    fn table_get_nested() {
        let t = table("[server]\nmaxPlayers = 20");
        assert_eq!(
            Document::get(&t, "server.maxPlayers"),
            Some(Value::Integer(20))
        );
    }

    #[test]
    fn table_get_missing() {
        let t = table("port = 8080");
        assert!(Document::get(&t, "nope").is_none());
        assert!(Document::get(&t, "port.deeper").is_none());
    }

    #[test]
    fn table_set_creates_sections() {
        let mut t = Table::new();
        Document::set(&mut t, "a.b.c", Value::Integer(1));
        assert_eq!(t["a"]["b"]["c"].as_integer(), Some(1));
    }

    #[test]
    fn table_set_keeps_siblings() {
        let mut t = table("[server]\nport = 1\nname = \"x\"");
        Document::set(&mut t, "server.port", Value::Integer(2));
        assert_eq!(t["server"]["port"].as_integer(), Some(2));
        assert_eq!(t["server"]["name"].as_str(), Some("x"));
    }

    #[test]
    fn table_set_replaces_scalar_parent() {
        let mut t = table("server = 5");
        Document::set(&mut t, "server.port", Value::Integer(2));
        assert_eq!(t["server"]["port"].as_integer(), Some(2));
    }

    #[test]
    fn edit_get_reads_tables_and_inline_tables() {
        let doc: DocumentMut = indoc! {r#"
            name = "demo"
            limits = { max = 3 }

            [server]
            maxPlayers = 20
        "#}
        .parse()
        .unwrap();
        assert_eq!(Document::get(&doc, "name"), Some(Value::String("demo".into())));
        assert_eq!(Document::get(&doc, "limits.max"), Some(Value::Integer(3)));
        assert_eq!(Document::get(&doc, "server.maxPlayers"), Some(Value::Integer(20)));
        assert!(Document::get(&doc, "server.missing").is_none());
    }

    #[test]
    fn edit_set_nests_inside_inline_tables() {
        let mut doc: DocumentMut = "server = { port = 1 }\n".parse().unwrap();
        doc.set("server.port", Value::Integer(2));
        doc.set("server.limits.max_players", Value::Integer(8));

        let reparsed: DocumentMut = doc.to_string().parse().unwrap();
        assert_eq!(
            Document::get(&reparsed, "server.limits.max_players"),
            Some(Value::Integer(8))
        );
        assert_eq!(Document::get(&reparsed, "server.port"), Some(Value::Integer(2)));
    }

    #[test]
    fn edit_set_keeps_inline_parent_inline() {
        let mut doc: DocumentMut = "server = { port = 1 }\n".parse().unwrap();
        doc.set("server.limits.max_players", Value::Integer(8));
        let out = doc.to_string();
        assert!(out.starts_with("server = {"));
        assert!(!out.contains("[server"));
    }

    #[test]
    fn edit_set_creates_nested_tables() {
        let mut doc = DocumentMut::new();
        doc.set("server.maxPlayers", Value::Integer(20));
        doc.set("name", Value::String("demo".into()));
        let out = doc.to_string();
        assert!(out.contains("name = \"demo\""));
        assert!(out.contains("[server]"));
        assert!(out.contains("maxPlayers = 20"));
    }

    #[test]
    fn edit_set_preserves_comments() {
        let mut doc: DocumentMut = "# keep me\nport = 8080\n".parse().unwrap();
        doc.set("port", Value::Integer(3000));
        let out = doc.to_string();
        assert!(out.contains("# keep me"));
        assert!(out.contains("port = 3000"));
        assert!(!out.contains("8080"));
    }

    #[test]
    fn edit_set_array_value() {
        let mut doc = DocumentMut::new();
        doc.set(
            "tags",
            Value::Array(vec![Value::String("a".into()), Value::String("b".into())]),
        );
        assert_eq!(
            Document::get(&doc, "tags"),
            Some(Value::Array(vec![
                Value::String("a".into()),
                Value::String("b".into())
            ]))
        );
    }
}
