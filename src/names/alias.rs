//! Namespace/alias resolution.
//!
//! Annotation files refer to vocabularies and services either by namespace
//! (`com.sap.vocabularies.UI.v1.LineItem`) or by a file-local alias
//! (`UI.LineItem`). [`AliasInformation`] captures the mapping for one file
//! and the `to_*` functions normalize parsed names and paths in both
//! directions.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::identifier::{ActionFunction, Identifier, Parameter, ParsedName, parse_identifier};
use super::path::{ParsedPath, PathSegment, TermCast};
use crate::syntax::NamespaceDeclaration;

/// Alias-or-namespace → namespace, or namespace → alias for the reverse map.
pub type AliasMap = IndexMap<String, String>;

/// Alias information of one annotation file.
///
/// Built once per file by [`get_alias_information`] and never mutated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasInformation {
    /// Namespace declared by the file itself (empty when there is none).
    pub current_file_namespace: String,
    /// Alias of the file's own namespace (empty when there is none).
    pub current_file_alias: String,
    /// Alias or namespace → namespace. Every namespace maps to itself.
    pub alias_map: AliasMap,
    /// Namespace → preferred alias (the namespace itself when unaliased).
    pub reverse_alias_map: AliasMap,
    /// Entries of `alias_map` belonging to service metadata namespaces.
    pub alias_map_metadata: AliasMap,
    /// Entries of `alias_map` belonging to referenced vocabularies.
    pub alias_map_vocabulary: AliasMap,
}

/// Build the alias information from the file's namespace declarations.
///
/// Entries are processed in order. When the same namespace is declared
/// several times with different aliases, every alias resolves, and the last
/// one becomes the preferred alias in `reverse_alias_map`.
pub fn get_alias_information(
    entries: &[NamespaceDeclaration<'_>],
    metadata_namespace_names: &HashSet<String>,
) -> AliasInformation {
    let mut info = AliasInformation::default();

    for entry in entries {
        let name = entry.name();
        if name.is_empty() {
            continue;
        }
        let alias = entry.alias().filter(|alias| !alias.is_empty());

        info.alias_map.insert(name.to_string(), name.to_string());
        info.reverse_alias_map
            .insert(name.to_string(), name.to_string());
        if let Some(alias) = alias {
            info.alias_map.insert(alias.to_string(), name.to_string());
            if let Some(previous) = info
                .reverse_alias_map
                .insert(name.to_string(), alias.to_string())
            {
                if previous != name && previous != alias {
                    debug!(
                        "Namespace '{}' re-aliased: '{}' replaces '{}'",
                        name, alias, previous
                    );
                }
            }
        }

        let is_metadata = metadata_namespace_names.contains(name);
        let partition = match entry {
            NamespaceDeclaration::Namespace(_) => {
                info.current_file_namespace = name.to_string();
                info.current_file_alias = alias.unwrap_or_default().to_string();
                is_metadata.then_some(&mut info.alias_map_metadata)
            }
            NamespaceDeclaration::Reference(_) if is_metadata => Some(&mut info.alias_map_metadata),
            NamespaceDeclaration::Reference(_) => Some(&mut info.alias_map_vocabulary),
        };
        if let Some(partition) = partition {
            partition.insert(name.to_string(), name.to_string());
            if let Some(alias) = alias {
                partition.insert(alias.to_string(), name.to_string());
            }
        }
    }

    info
}

// ============================================================================
// ALIAS → NAMESPACE
// ============================================================================

/// Namespace for an optional alias-or-namespace qualifier.
///
/// Unqualified names belong to `current_namespace`. An empty result means the
/// name cannot be qualified.
fn resolve_namespace<'a>(
    namespace_map: &'a AliasMap,
    current_namespace: &'a str,
    namespace_or_alias: Option<&str>,
) -> Option<&'a str> {
    let namespace = match namespace_or_alias.filter(|alias| !alias.is_empty()) {
        Some(alias) => namespace_map.get(alias).map(String::as_str),
        None => Some(current_namespace),
    };
    if namespace.is_none_or(str::is_empty) {
        trace!(
            "Unresolved namespace or alias {:?} (current namespace '{}')",
            namespace_or_alias, current_namespace
        );
        return None;
    }
    namespace
}

fn qualify(
    namespace_map: &AliasMap,
    current_namespace: &str,
    namespace_or_alias: Option<&str>,
    name: &str,
) -> Option<String> {
    let namespace = resolve_namespace(namespace_map, current_namespace, namespace_or_alias)?;
    Some(format!("{namespace}.{name}"))
}

fn qualify_identifier(
    namespace_map: &AliasMap,
    current_namespace: &str,
    identifier: &Identifier,
) -> Option<String> {
    qualify(
        namespace_map,
        current_namespace,
        identifier.namespace_or_alias.as_deref(),
        &identifier.name,
    )
}

fn qualify_action(
    namespace_map: &AliasMap,
    current_namespace: &str,
    action: &ActionFunction,
) -> Option<String> {
    let head = qualify(
        namespace_map,
        current_namespace,
        action.namespace_or_alias.as_deref(),
        &action.name,
    )?;
    let parameters: Vec<String> = action
        .parameters
        .iter()
        .filter_map(|parameter| match parameter {
            Parameter::Identifier(identifier) => {
                qualify_identifier(namespace_map, current_namespace, identifier)
            }
            Parameter::Collection(identifier) => {
                qualify_identifier(namespace_map, current_namespace, identifier)
                    .map(|qualified| format!("Collection({qualified})"))
            }
        })
        .collect();
    Some(format!("{head}({})", parameters.join(",")))
}

fn qualify_term(namespace_map: &AliasMap, current_namespace: &str, term: &TermCast) -> String {
    let qualified = qualify(
        namespace_map,
        current_namespace,
        term.namespace_or_alias.as_deref(),
        &term.name,
    )
    .unwrap_or_default();
    match &term.qualifier {
        Some(qualifier) => format!("@{qualified}#{qualifier}"),
        None => format!("@{qualified}"),
    }
}

/// Fully-qualified form of a parsed name.
///
/// Returns `None` when the alias is unknown. Action/function parameters
/// whose alias is unknown are left out of the parameter list.
///
/// # Example
/// ```
/// use odata_annotation::names::{AliasMap, parse_identifier, to_fully_qualified_name};
///
/// let mut map = AliasMap::new();
/// map.insert("UI".into(), "com.sap.vocabularies.UI.v1".into());
/// assert_eq!(
///     to_fully_qualified_name(&map, "local", &parse_identifier("UI.LineItem")).as_deref(),
///     Some("com.sap.vocabularies.UI.v1.LineItem")
/// );
/// ```
pub fn to_fully_qualified_name(
    namespace_map: &AliasMap,
    current_namespace: &str,
    name: &ParsedName,
) -> Option<String> {
    match name {
        ParsedName::Identifier(identifier) => {
            qualify_identifier(namespace_map, current_namespace, identifier)
        }
        ParsedName::Collection(identifier) => {
            qualify_identifier(namespace_map, current_namespace, identifier)
                .map(|qualified| format!("Collection({qualified})"))
        }
        ParsedName::ActionFunction(action) => {
            qualify_action(namespace_map, current_namespace, action)
        }
    }
}

/// Fully-qualified form of a parsed path.
///
/// Unqualified identifier segments (property and navigation names) are kept
/// as written. A segment that cannot be qualified collapses to an empty
/// string while the remaining segments are still normalized.
pub fn to_fully_qualified_path(
    namespace_map: &AliasMap,
    current_namespace: &str,
    path: &ParsedPath,
) -> String {
    path.segments
        .iter()
        .map(|segment| match segment {
            PathSegment::Identifier(identifier) => match identifier
                .namespace_or_alias
                .as_deref()
                .filter(|qualifier| !qualifier.is_empty())
            {
                None => identifier.name.clone(),
                Some(_) => qualify_identifier(namespace_map, current_namespace, identifier)
                    .unwrap_or_default(),
            },
            PathSegment::ActionFunction(action) => {
                qualify_action(namespace_map, current_namespace, action).unwrap_or_default()
            }
            PathSegment::TermCast(term) => qualify_term(namespace_map, current_namespace, term),
            PathSegment::NavigationPropertyAnnotation(navigation) => {
                let property = qualify(
                    namespace_map,
                    current_namespace,
                    navigation.namespace_or_alias.as_deref(),
                    &navigation.name,
                )
                .unwrap_or_default();
                let term = qualify_term(namespace_map, current_namespace, &navigation.term);
                format!("{property}{term}")
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Parse `input` and qualify it against the file's alias map.
pub fn resolve_name(input: &str, info: &AliasInformation) -> Option<String> {
    to_fully_qualified_name(
        &info.alias_map,
        &info.current_file_namespace,
        &parse_identifier(input),
    )
}

// ============================================================================
// NAMESPACE → ALIAS
// ============================================================================

fn alias_identifier(identifier: &Identifier, info: &AliasInformation) -> Identifier {
    let namespace_or_alias = identifier.namespace_or_alias.as_deref().map(|namespace| {
        info.reverse_alias_map
            .get(namespace)
            .map(String::as_str)
            .unwrap_or(namespace)
    });
    Identifier::new(namespace_or_alias, identifier.name.clone())
}

/// Rewrite a fully-qualified name into the file's preferred alias form.
///
/// Namespaces without an alias in the file are left unchanged.
///
/// # Example
/// ```
/// use std::collections::HashSet;
/// use odata_annotation::names::{get_alias_information, to_alias_qualified_name};
/// use odata_annotation::syntax::{NamespaceDeclaration, Reference};
///
/// let ui = Reference::new("com.sap.vocabularies.UI.v1", Some("UI"));
/// let info = get_alias_information(&[NamespaceDeclaration::Reference(&ui)], &HashSet::new());
/// assert_eq!(
///     to_alias_qualified_name("com.sap.vocabularies.UI.v1.LineItem", &info),
///     "UI.LineItem"
/// );
/// ```
pub fn to_alias_qualified_name(fully_qualified: &str, info: &AliasInformation) -> String {
    match parse_identifier(fully_qualified) {
        ParsedName::Identifier(identifier) => alias_identifier(&identifier, info).to_string(),
        ParsedName::Collection(identifier) => {
            format!("Collection({})", alias_identifier(&identifier, info))
        }
        ParsedName::ActionFunction(action) => {
            let head = alias_identifier(
                &Identifier::new(action.namespace_or_alias.as_deref(), action.name.clone()),
                info,
            );
            ActionFunction {
                namespace_or_alias: head.namespace_or_alias,
                name: head.name,
                raw: action.raw,
                parameters: action
                    .parameters
                    .iter()
                    .map(|parameter| match parameter {
                        Parameter::Identifier(identifier) => {
                            Parameter::Identifier(alias_identifier(identifier, info))
                        }
                        Parameter::Collection(identifier) => {
                            Parameter::Collection(alias_identifier(identifier, info))
                        }
                    })
                    .collect(),
            }
            .to_string()
        }
    }
}
