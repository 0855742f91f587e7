//! Two renderers over a decoded [`Document`]: an indented nested-XML
//! form with opening/closing tags, and a flat one-line-per-tag form.

use crate::tag::{ArgType, Document, Tag};

/// Renders `doc` as indented, nested XML.
pub fn format_nested(doc: &Document) -> String {
    let mut out = String::new();
    for tag in &doc.roots {
        if !tag.is_empty() {
            format_tag(tag, &mut out);
        }
    }
    out
}

fn format_tag(tag: &Tag, out: &mut String) {
    let depth = tag.name.matches('.').count();
    let indent = " ".repeat(3 * depth);
    let short = tag.short_name();

    out.push_str(&indent);
    out.push('<');
    out.push_str(short);
    out.push('>');

    if !tag.args.is_empty() {
        let sep = if tag.arg_type.is_text_like() { '|' } else { ',' };
        let mut joined = String::new();
        for arg in &tag.args {
            joined.push_str(&arg.to_string());
            joined.push(sep);
        }
        joined.pop();
        if tag.arg_type == ArgType::Snippets {
            out.push_str("snippets:");
        }
        out.push_str(&joined);
    }

    if !tag.children.is_empty() {
        out.push('\n');
        for child in &tag.children {
            if !child.is_empty() {
                format_tag(child, out);
            }
        }
        out.push_str(&indent);
        out.push_str("</");
        out.push_str(short);
        out.push_str(">\n");
    } else {
        out.push_str("</");
        out.push_str(short);
        out.push_str(">\n");
    }
}

/// Renders `doc` as flat, one-line-per-tag text: `full.dotted.path=args`.
pub fn format_flat(doc: &Document) -> String {
    let mut out = String::new();
    for tag in &doc.roots {
        if !tag.is_empty() {
            flatten_tag(tag, &mut out);
        }
    }
    out
}

fn flatten_tag(tag: &Tag, out: &mut String) {
    out.push_str(&tag.name);

    if !tag.args.is_empty() {
        let mut joined = String::new();
        for arg in &tag.args {
            joined.push_str(&arg.to_string());
            joined.push('|');
        }
        joined.pop();
        if tag.arg_type == ArgType::Snippets {
            out.push_str(".snippets=");
        } else {
            out.push('=');
        }
        out.push_str(&joined);
    }

    out.push('\n');

    for child in &tag.children {
        if !child.is_empty() {
            flatten_tag(child, out);
        }
    }
}
