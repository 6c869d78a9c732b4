//! Namespace core (C4): a persistent scoped prefix→URI stack, and the
//! resolver that expands element/attribute [`QName`](crate::events::QName)s
//! against it while enforcing W3C Namespace Constraints (NSC).
//!
//! The stack is stored as buffer-indexed entries rather than one `HashMap`
//! per open element: each [`push`](NamespaceContext::push) call appends
//! entries for the declarations made on that element, and
//! [`pop`](NamespaceContext::pop) truncates back to the last entry still in
//! scope. A child scope implicitly shares everything the parent bound
//! without copying it.

use crate::errors::NamespaceError;
use crate::events::{Attribute, QName};

const XML_PREFIX: &[u8] = b"xml";
const XML_URI: &[u8] = b"http://www.w3.org/XML/1998/namespace";
const XMLNS_PREFIX: &[u8] = b"xmlns";
const XMLNS_URI: &[u8] = b"http://www.w3.org/2000/xmlns/";

#[derive(Debug, Clone)]
struct Entry {
    /// Offset into the shared buffer where the prefix bytes (if any) begin.
    start: usize,
    /// Length of the prefix; 0 means this entry binds the default namespace.
    prefix_len: usize,
    /// Length of the URI, stored just after the prefix bytes. Zero means the
    /// binding was explicitly undone (`xmlns[:p]=""`).
    value_len: usize,
    /// Nesting depth at which this entry was pushed; popped once depth
    /// drops back below it.
    level: u32,
}

impl Entry {
    fn uri<'b>(&self, buffer: &'b [u8]) -> Option<&'b [u8]> {
        if self.value_len == 0 {
            None
        } else {
            let start = self.start + self.prefix_len;
            Some(&buffer[start..start + self.value_len])
        }
    }

    fn matches_prefix(&self, buffer: &[u8], prefix: Option<&[u8]>) -> bool {
        match prefix {
            None => self.prefix_len == 0,
            Some(p) => self.prefix_len == p.len() && &buffer[self.start..self.start + self.prefix_len] == p,
        }
    }
}

/// The persistent scoped prefix→URI stack.
///
/// `xml` and `xmlns` are bound permanently and are never stored as entries;
/// [`resolve`](Self::resolve) special-cases them.
#[derive(Debug, Default)]
pub struct NamespaceContext {
    entries: Vec<Entry>,
    depth: u32,
    buffer: Vec<u8>,
}

impl NamespaceContext {
    /// An empty stack with only `xml`/`xmlns` bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a new scope for a `start_element`'s attributes, binding any
    /// `xmlns`/`xmlns:*` declarations found among them.
    ///
    /// Returns the NSC violations found, in attribute order. The binding
    /// is still recorded even when it violates a constraint, except for
    /// `empty_prefix_binding`, which the XML 1.0 namespaces spec ties to an
    /// error for namespace-well-formedness: this crate keeps the prefix
    /// unbound in that case.
    pub fn push(&mut self, attributes: &[Attribute]) -> Vec<NamespaceError> {
        self.depth += 1;
        let level = self.depth;
        let mut errors = Vec::new();

        for attr in attributes {
            let raw = attr.name.as_bytes();
            let (prefix, is_decl) = if raw == b"xmlns" {
                (None, true)
            } else if let Some(p) = raw.strip_prefix(b"xmlns:") {
                (Some(p), true)
            } else {
                (None, false)
            };
            if !is_decl {
                continue;
            }
            let uri = &attr.value[..];

            if let Some(p) = prefix {
                if p == XML_PREFIX && uri != XML_URI {
                    errors.push(NamespaceError::ReservedPrefix {
                        prefix: String::from_utf8_lossy(p).into_owned(),
                    });
                    continue;
                }
                if p == XMLNS_PREFIX {
                    errors.push(NamespaceError::ReservedPrefix {
                        prefix: String::from_utf8_lossy(p).into_owned(),
                    });
                    continue;
                }
            }
            if uri == XMLNS_URI {
                errors.push(NamespaceError::ReservedNamespace {
                    uri: String::from_utf8_lossy(uri).into_owned(),
                });
                continue;
            }
            if uri.is_empty() {
                if let Some(p) = prefix {
                    errors.push(NamespaceError::EmptyPrefixBinding {
                        prefix: String::from_utf8_lossy(p).into_owned(),
                    });
                    // Record the entry anyway with value_len == 0, so the
                    // prefix resolves to "no namespace" in this scope
                    // instead of falling through to an outer binding.
                }
            }

            let start = self.buffer.len();
            let prefix_len = prefix.map_or(0, <[u8]>::len);
            if let Some(p) = prefix {
                self.buffer.extend_from_slice(p);
            }
            self.buffer.extend_from_slice(uri);
            self.entries.push(Entry {
                start,
                prefix_len,
                value_len: uri.len(),
                level,
            });
        }

        errors
    }

    /// Leaves the scope most recently entered by [`push`](Self::push).
    pub fn pop(&mut self) {
        self.depth -= 1;
        let current = self.depth;
        match self.entries.iter().rposition(|e| e.level <= current) {
            None => {
                self.buffer.clear();
                self.entries.clear();
            }
            Some(last_valid) => {
                if let Some(trunc_at) = self.entries.get(last_valid + 1).map(|e| e.start) {
                    self.buffer.truncate(trunc_at);
                    self.entries.truncate(last_valid + 1);
                }
            }
        }
    }

    /// Resolves a qualified name to `(uri, local)`. `use_default` controls
    /// whether an unprefixed name inherits the current default namespace
    /// (true for element names, false for attribute names per NSC).
    pub fn resolve<'n>(&self, qname: QName<'n>, use_default: bool) -> (Option<Vec<u8>>, &'n [u8]) {
        let prefix = qname.prefix();
        if prefix == Some(XML_PREFIX) {
            return (Some(XML_URI.to_vec()), qname.local_name());
        }
        if prefix == Some(XMLNS_PREFIX) {
            return (Some(XMLNS_URI.to_vec()), qname.local_name());
        }

        match self.entries.iter().rev().find(|e| e.matches_prefix(&self.buffer, prefix)) {
            Some(e) if prefix.is_some() => (e.uri(&self.buffer).map(<[u8]>::to_vec), qname.local_name()),
            Some(e) if use_default => (e.uri(&self.buffer).map(<[u8]>::to_vec), qname.as_bytes()),
            Some(_) => (None, qname.as_bytes()),
            None if prefix.is_some() => (None, qname.local_name()),
            None => (None, qname.as_bytes()),
        }
    }

    /// Whether `prefix` currently resolves to some URI (used to detect
    /// `undeclared_prefix`).
    pub fn prefix_is_bound(&self, prefix: &[u8]) -> bool {
        if prefix == XML_PREFIX || prefix == XMLNS_PREFIX {
            return true;
        }
        self.entries
            .iter()
            .rev()
            .find(|e| e.matches_prefix(&self.buffer, Some(prefix)))
            .map_or(false, |e| e.uri(&self.buffer).is_some())
    }
}

/// A fully expanded name: the namespace URI (absent if none is in scope)
/// paired with the local part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedName {
    /// The resolved namespace URI, or `None` if no namespace is in scope.
    pub uri: Option<Vec<u8>>,
    /// The local part of the name (after any prefix).
    pub local: Vec<u8>,
}

/// Drives a [`NamespaceContext`] across a stream of `start_element`/
/// `end_element` events, expanding names and surfacing NSC violations.
///
/// This is a stream transform in spirit (see the crate-level design notes
/// on modeling validators as `Iterator<Event> -> Iterator<Event>`): callers
/// drive it with [`start_element`](Self::start_element)/[`end_element`](Self::end_element)
/// around their own event loop rather than through a combinator, because
/// expansion produces richer data (the `(uri, local)` pairs) than the
/// `Event` shape itself carries.
#[derive(Debug, Default)]
pub struct NamespaceResolver {
    context: NamespaceContext,
    /// When true, `xmlns`/`xmlns:*` attributes are omitted from the
    /// returned attribute list.
    pub strip_declarations: bool,
}

impl NamespaceResolver {
    /// A resolver with an empty scope stack and `strip_declarations` off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call on a `start_element`. Enters a new scope, then expands the
    /// element name and every attribute name. Returns the expanded element
    /// name, the expanded attributes (name, value), and any NSC violations.
    pub fn start_element<'n>(
        &mut self,
        name: QName<'n>,
        attributes: &[Attribute<'n>],
    ) -> (ExpandedName, Vec<(ExpandedName, Vec<u8>)>, Vec<NamespaceError>) {
        let mut errors = self.context.push(attributes);

        if let Some(prefix) = name.prefix() {
            if !self.context.prefix_is_bound(prefix) {
                errors.push(NamespaceError::UndeclaredPrefix {
                    prefix: String::from_utf8_lossy(prefix).into_owned(),
                    name: String::from_utf8_lossy(name.as_bytes()).into_owned(),
                });
            }
        }
        let (uri, local) = self.context.resolve(name, true);
        let element_name = ExpandedName {
            uri,
            local: local.to_vec(),
        };

        let mut seen: Vec<(Option<Vec<u8>>, Vec<u8>)> = Vec::with_capacity(attributes.len());
        let mut expanded = Vec::with_capacity(attributes.len());
        for attr in attributes {
            let raw = attr.name.as_bytes();
            let is_decl = raw == b"xmlns" || raw.starts_with(b"xmlns:");
            if is_decl && self.strip_declarations {
                continue;
            }
            if let Some(prefix) = attr.name.prefix() {
                if prefix != b"xmlns" && !self.context.prefix_is_bound(prefix) {
                    errors.push(NamespaceError::UndeclaredPrefix {
                        prefix: String::from_utf8_lossy(prefix).into_owned(),
                        name: String::from_utf8_lossy(raw).into_owned(),
                    });
                }
            }
            let (uri, local) = self.context.resolve(attr.name, false);
            let key = (uri.clone(), local.to_vec());
            if seen.contains(&key) {
                errors.push(NamespaceError::DuplicateExpandedAttribute {
                    uri: key.0.map(|u| String::from_utf8_lossy(&u).into_owned()),
                    local: String::from_utf8_lossy(local).into_owned(),
                });
            } else {
                seen.push(key);
            }
            expanded.push((
                ExpandedName {
                    uri,
                    local: local.to_vec(),
                },
                attr.value.to_vec(),
            ));
        }

        (element_name, expanded, errors)
    }

    /// Call on the matching `end_element`: leaves the scope entered by the
    /// corresponding [`start_element`](Self::start_element) call, and
    /// returns the expanded name.
    pub fn end_element<'n>(&mut self, name: QName<'n>) -> ExpandedName {
        let (uri, local) = self.context.resolve(name, true);
        let expanded = ExpandedName {
            uri,
            local: local.to_vec(),
        };
        self.context.pop();
        expanded
    }

    /// Call on a `processing_instruction` event's target: a PI target is a
    /// plain `Name`, not a `QName`, so a colon in it can never be a prefix
    /// separator — it is always a constraint violation, independent of scope.
    pub fn processing_instruction(&self, target: QName<'_>) -> Option<NamespaceError> {
        if target.as_bytes().contains(&b':') {
            Some(NamespaceError::ColonInPiTarget {
                target: String::from_utf8_lossy(target.as_bytes()).into_owned(),
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Attribute, Content, QName};
    use pretty_assertions::assert_eq;

    fn attr<'a>(name: &'a str, value: &'a str) -> Attribute<'a> {
        Attribute {
            name: QName::new(name.as_bytes()),
            value: Content::Borrowed(value.as_bytes()),
        }
    }

    #[test]
    fn resolves_default_and_prefixed_namespaces() {
        let mut resolver = NamespaceResolver::new();
        let root_attrs = vec![
            attr("xmlns", "http://d"),
            attr("xmlns:n", "http://n"),
        ];
        let (root_name, _, errors) =
            resolver.start_element(QName::new(b"root"), &root_attrs);
        assert!(errors.is_empty());
        assert_eq!(root_name.uri, Some(b"http://d".to_vec()));

        let child_attrs = vec![attr("id", "1")];
        let (child_name, child_attributes, errors) =
            resolver.start_element(QName::new(b"n:c"), &child_attrs);
        assert!(errors.is_empty());
        assert_eq!(child_name.uri, Some(b"http://n".to_vec()));
        assert_eq!(child_name.local, b"c");
        // Unprefixed attributes never inherit the default namespace.
        assert_eq!(child_attributes[0].0.uri, None);

        let popped_child = resolver.end_element(QName::new(b"n:c"));
        assert_eq!(popped_child.uri, Some(b"http://n".to_vec()));
        let popped_root = resolver.end_element(QName::new(b"root"));
        assert_eq!(popped_root.uri, Some(b"http://d".to_vec()));
    }

    #[test]
    fn undeclared_prefix_is_reported() {
        let mut resolver = NamespaceResolver::new();
        let (_, _, errors) = resolver.start_element(QName::new(b"p:a"), &[]);
        assert!(matches!(
            errors.as_slice(),
            [NamespaceError::UndeclaredPrefix { prefix, .. }] if prefix == "p"
        ));
    }

    #[test]
    fn binding_xml_to_wrong_uri_is_reserved_prefix_error() {
        let mut resolver = NamespaceResolver::new();
        let attrs = vec![attr("xmlns:xml", "http://wrong")];
        let (_, _, errors) = resolver.start_element(QName::new(b"a"), &attrs);
        assert!(matches!(
            errors.as_slice(),
            [NamespaceError::ReservedPrefix { prefix }] if prefix == "xml"
        ));
    }

    #[test]
    fn xmlns_prefix_is_always_bound() {
        let resolver = NamespaceResolver::new();
        assert!(resolver.context.prefix_is_bound(b"xmlns"));
        assert!(resolver.context.prefix_is_bound(b"xml"));
    }

    #[test]
    fn colon_in_pi_target_is_reported() {
        let resolver = NamespaceResolver::new();
        let err = resolver.processing_instruction(QName::new(b"p:target"));
        assert!(matches!(err, Some(NamespaceError::ColonInPiTarget { target }) if target == "p:target"));
        assert!(resolver.processing_instruction(QName::new(b"target")).is_none());
    }

    #[test]
    fn scope_pop_restores_parent_bindings() {
        let mut resolver = NamespaceResolver::new();
        resolver.start_element(QName::new(b"root"), &[attr("xmlns:n", "http://n")]);
        resolver.start_element(QName::new(b"n:child"), &[]);
        resolver.end_element(QName::new(b"n:child"));
        assert!(resolver.context.prefix_is_bound(b"n"));
        resolver.end_element(QName::new(b"root"));
        assert!(!resolver.context.prefix_is_bound(b"n"));
    }
}
