//! Minimal DOT document builder.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{Result, VisualizeError};

pub type Attrs = Vec<(String, String)>;

/// Build an attribute list from string pairs.
pub fn attrs<const N: usize>(pairs: [(&str, &str); N]) -> Attrs {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A directed graph in DOT form, with the output format used when rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Digraph {
    pub format: String,
    pub node_attrs: Attrs,
    nodes: Vec<(String, Attrs)>,
    edges: Vec<(String, String, Attrs)>,
}

impl Digraph {
    pub fn new(format: impl Into<String>, node_attrs: Attrs) -> Self {
        Self {
            format: format.into(),
            node_attrs,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn node(&mut self, name: impl Into<String>, attrs: Attrs) {
        self.nodes.push((name.into(), attrs));
    }

    pub fn edge(&mut self, tail: impl Into<String>, head: impl Into<String>, attrs: Attrs) {
        self.edges.push((tail.into(), head.into(), attrs));
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&str, &Attrs)> {
        self.nodes.iter().map(|(n, a)| (n.as_str(), a))
    }

    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &Attrs)> {
        self.edges.iter().map(|(t, h, a)| (t.as_str(), h.as_str(), a))
    }

    pub fn node_attr(&self, name: &str, key: &str) -> Option<&str> {
        self.nodes
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, a)| lookup(a, key))
    }

    pub fn edge_attr(&self, tail: &str, head: &str, key: &str) -> Option<&str> {
        self.edges
            .iter()
            .find(|(t, h, _)| t == tail && h == head)
            .and_then(|(_, _, a)| lookup(a, key))
    }

    /// DOT source text.
    pub fn source(&self) -> String {
        let mut out = String::from("digraph {\n");
        if !self.node_attrs.is_empty() {
            let _ = writeln!(out, "\tnode {}", format_attrs(&self.node_attrs));
        }
        for (name, a) in &self.nodes {
            let _ = writeln!(out, "\t{} {}", quote_id(name), format_attrs(a));
        }
        for (tail, head, a) in &self.edges {
            let _ = writeln!(
                out,
                "\t{} -> {} {}",
                quote_id(tail),
                quote_id(head),
                format_attrs(a)
            );
        }
        out.push_str("}\n");
        out
    }

    /// Write the source to `path` and run `dot` on it. Returns the path of
    /// the rendered `<path>.<format>` file.
    pub fn render(&self, path: &Path, dot_path: &str) -> Result<PathBuf> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.source())?;

        let mut rendered = path.as_os_str().to_owned();
        rendered.push(".");
        rendered.push(&self.format);
        let rendered = PathBuf::from(rendered);

        debug!("rendering {} -> {}", path.display(), rendered.display());
        let output = Command::new(dot_path)
            .arg(format!("-T{}", self.format))
            .arg("-o")
            .arg(&rendered)
            .arg(path)
            .output()?;
        if !output.status.success() {
            return Err(VisualizeError::GraphvizFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(rendered)
    }
}

fn lookup<'a>(a: &'a Attrs, key: &str) -> Option<&'a str> {
    a.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

fn format_attrs(a: &Attrs) -> String {
    let body: Vec<String> = a
        .iter()
        .map(|(k, v)| format!("{}={}", quote_id(k), quote_id(v)))
        .collect();
    format!("[{}]", body.join(" "))
}

/// Quote a DOT identifier unless it is a plain name or a numeral.
///
/// Only double quotes are escaped. Backslashes pass through so labels can
/// carry DOT escapes such as `\n` or `\l`.
pub fn quote_id(id: &str) -> String {
    if is_plain_name(id) || is_numeral(id) {
        id.to_string()
    } else {
        format!("\"{}\"", id.replace('"', "\\\""))
    }
}

fn is_plain_name(id: &str) -> bool {
    let mut chars = id.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        // Keywords are case-insensitive in DOT.
        !matches!(
            id.to_ascii_lowercase().as_str(),
            "node" | "edge" | "graph" | "digraph" | "subgraph" | "strict"
        )
    } else {
        false
    }
}

fn is_numeral(id: &str) -> bool {
    let digits = id.strip_prefix('-').unwrap_or(id);
    if digits.is_empty() {
        return false;
    }
    let mut seen_dot = false;
    let mut seen_digit = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}
