// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! Shared helpers for walking a response document's DOM.
//!
//! Every response is a `<Response xmlns="...">...</Response>` (or
//! `MSPConfig`/`Backyard` document for config/telemetry) tree; these
//! helpers read it without pulling in a separate declarative binding layer,
//! per the one hand-written DOM-walking style used across every model in
//! this crate.

use std::collections::HashMap;

use roxmltree::{Document, Node};

use crate::error::{OmniError, Result};

pub fn parse_document(xml: &str) -> Result<Document<'_>> {
    Document::parse(xml).map_err(OmniError::from)
}

/// Collect every descendant `<Parameter name="..." ...>text</Parameter>`
/// into a name -> text map. Mirrors `LeadMessage.parse_xml_element`'s
/// `.//api:Parameter` walk.
pub fn collect_parameters<'a, 'input>(root: Node<'a, 'input>) -> HashMap<&'a str, &'a str> {
    root.descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "Parameter")
        .filter_map(|n| Some((n.attribute("name")?, n.text().unwrap_or(""))))
        .collect()
}

pub fn parameter_int(params: &HashMap<&str, &str>, name: &str) -> Result<i64> {
    params
        .get(name)
        .ok_or_else(|| OmniError::parsing(format!("missing Parameter '{name}'")))?
        .parse()
        .map_err(|_| OmniError::parsing(format!("Parameter '{name}' is not an integer")))
}

pub fn parameter_int_or(params: &HashMap<&str, &str>, name: &str, default: i64) -> i64 {
    params.get(name).and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// An element's own attribute, read as a string, with a named-field error on
/// absence. Used throughout `model::config` where nearly every field is an
/// XML attribute rather than nested text.
pub fn attr<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name)
        .ok_or_else(|| OmniError::parsing(format!("element <{}> missing attribute '{name}'", node.tag_name().name())))
}

pub fn attr_or<'a>(node: Node<'a, '_>, name: &str, default: &'a str) -> &'a str {
    node.attribute(name).unwrap_or(default)
}

pub fn attr_int(node: Node, name: &str) -> Result<i64> {
    attr(node, name)?
        .parse()
        .map_err(|_| OmniError::parsing(format!("attribute '{name}' on <{}> is not an integer", node.tag_name().name())))
}

pub fn attr_int_or(node: Node, name: &str, default: i64) -> i64 {
    node.attribute(name).and_then(|v| v.parse().ok()).unwrap_or(default)
}

pub fn attr_float(node: Node, name: &str) -> Result<f64> {
    attr(node, name)?
        .parse()
        .map_err(|_| OmniError::parsing(format!("attribute '{name}' on <{}> is not a float", node.tag_name().name())))
}

pub fn child_elements<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| n.is_element() && n.tag_name().name() == tag)
}

pub fn first_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    child_elements(node, tag).next()
}

/// Text content of a single child element (the shape `MSPConfig`'s tree
/// uses: `<System-Id>20</System-Id>` rather than an XML attribute).
pub fn child_text<'a>(node: Node<'a, '_>, tag: &str) -> Result<&'a str> {
    first_child(node, tag)
        .and_then(|n| n.text())
        .ok_or_else(|| OmniError::parsing(format!("element <{}> missing child <{tag}>", node.tag_name().name())))
}

pub fn child_text_opt<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    first_child(node, tag).and_then(|n| n.text())
}

pub fn child_int(node: Node, tag: &str) -> Result<i64> {
    child_text(node, tag)?
        .parse()
        .map_err(|_| OmniError::parsing(format!("child <{tag}> is not an integer")))
}

pub fn child_int_opt(node: Node, tag: &str) -> Option<i64> {
    child_text_opt(node, tag).and_then(|v| v.parse().ok())
}

/// The config tree's `"yes"`/`"no"` boolean convention.
pub fn child_yes_no(node: Node, tag: &str) -> Result<bool> {
    match child_text(node, tag)? {
        "yes" => Ok(true),
        "no" => Ok(false),
        other => Err(OmniError::parsing(format!("child <{tag}> expected yes/no, got '{other}'"))),
    }
}

pub fn child_yes_no_opt(node: Node, tag: &str) -> Option<bool> {
    match child_text_opt(node, tag) {
        Some("yes") => Some(true),
        Some("no") => Some(false),
        _ => None,
    }
}
