//! Commented rendering and file persistence.
//!
//! Uses `toml_edit` so that the comment lines declared on fields end up in
//! the written document, above the key (or section header) they describe.
//! When a file already exists it is patched in place: keys the node does not
//! own, and the user's own comments on them, are preserved. Creates parent
//! directories as needed.

use std::path::Path;

use toml_edit::DocumentMut;

use crate::document::Document;
use crate::error::BindError;
use crate::path::parent_sections;
use crate::populate::{construct, populate};
use crate::resolve::{CommentsProvider, SchemaComments};
use crate::schema::ConfigNode;
use crate::types::Strictness;
use crate::walk::walk;

/// Store `node` into `doc` below `section`, then annotate every written key
/// and section with the comments supplied by `comments`.
pub fn store_annotated<N: ConfigNode>(
    node: &N,
    doc: &mut DocumentMut,
    section: &str,
    comments: &dyn CommentsProvider,
    strictness: Strictness,
) -> Result<(), BindError> {
    let mut paths = Vec::new();
    walk(
        node,
        section,
        &mut |path: &str, value: toml::Value| {
            doc.set(path, value);
            paths.push(path.to_string());
        },
        strictness,
    )?;
    annotate(doc, &paths, comments);
    Ok(())
}

/// Render `node` as a commented TOML document.
pub fn render<N: ConfigNode>(node: &N) -> Result<String, BindError> {
    let mut doc = DocumentMut::new();
    store_annotated(
        node,
        &mut doc,
        "",
        &SchemaComments::<N>::new(),
        Strictness::Strict,
    )?;
    Ok(doc.to_string())
}

/// Render a freshly constructed `N` as a commented TOML template.
pub fn generate_template<N: ConfigNode>() -> Result<String, BindError> {
    render(&construct::<N>()?)
}

/// Prefix each path's key, and each section header above it, with its
/// comment lines. Paths whose comments are empty are left untouched.
pub fn annotate(doc: &mut DocumentMut, paths: &[String], comments: &dyn CommentsProvider) {
    let mut sections: Vec<&str> = Vec::new();
    for path in paths {
        for section in parent_sections(path) {
            if !sections.contains(&section) {
                sections.push(section);
            }
        }
        let lines = comments.comments(path);
        if !lines.is_empty() {
            decorate_key(doc, path, &lines);
        }
    }

    for section in sections {
        let lines = comments.comments(section);
        if !lines.is_empty() {
            decorate_section(doc, section, &lines);
        }
    }
}

fn decorate_key(doc: &mut DocumentMut, path: &str, lines: &[String]) {
    let (parent, leaf) = match path.rsplit_once('.') {
        Some((p, l)) => (Some(p), l),
        None => (None, path),
    };
    let Some(table) = table_at(doc, parent) else {
        log::debug!("`{path}` is not inside a standard table, leaving it uncommented");
        return;
    };
    if let Some(mut key) = table.key_mut(leaf) {
        key.leaf_decor_mut().set_prefix(comment_block(lines));
    }
}

fn decorate_section(doc: &mut DocumentMut, section: &str, lines: &[String]) {
    let Some(table) = table_at(doc, Some(section)) else {
        log::debug!("`{section}` is not a standard table, leaving it uncommented");
        return;
    };
    table.set_implicit(false);
    table
        .decor_mut()
        .set_prefix(format!("\n{}", comment_block(lines)));
}

fn table_at<'a>(
    doc: &'a mut DocumentMut,
    section: Option<&str>,
) -> Option<&'a mut toml_edit::Table> {
    let mut item = doc.as_item_mut();
    for segment in section.into_iter().flat_map(|s| s.split('.')) {
        item = item.get_mut(segment)?;
    }
    item.as_table_mut()
}

fn comment_block(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| {
            if line.is_empty() {
                "#\n".to_string()
            } else {
                format!("# {line}\n")
            }
        })
        .collect()
}

/// Read and parse a TOML file. A missing file is `None`.
fn read_document(path: &Path) -> Result<Option<DocumentMut>, BindError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(BindError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    content
        .parse::<DocumentMut>()
        .map(Some)
        .map_err(|e| BindError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
}

pub(crate) fn read_file<N: ConfigNode>(
    path: &Path,
    section: &str,
    strictness: Strictness,
) -> Result<N, BindError> {
    let doc = match read_document(path)? {
        Some(doc) => doc,
        None => {
            log::debug!("{} does not exist, loading defaults", path.display());
            DocumentMut::new()
        }
    };
    populate(&doc, section, strictness)
}

pub(crate) fn write_file<N: ConfigNode>(
    node: &N,
    path: &Path,
    section: &str,
    strictness: Strictness,
) -> Result<(), BindError> {
    let mut doc = read_document(path)?.unwrap_or_default();
    store_annotated(
        node,
        &mut doc,
        section,
        &SchemaComments::<N>::under(section),
        strictness,
    )?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| BindError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, doc.to_string()).map_err(|e| BindError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a node from the root of a TOML file. A missing file loads defaults.
pub fn load_file<N: ConfigNode>(path: &Path) -> Result<N, BindError> {
    read_file(path, "", Strictness::Strict)
}

/// Store a node at the root of a TOML file, keeping unrelated content.
pub fn save_file<N: ConfigNode>(node: &N, path: &Path) -> Result<(), BindError> {
    write_file(node, path, "", Strictness::Strict)
}
