//! Qualified-name parsing.
//!
//! ```text
//! qualifiedName  := [namespaceOrAlias '.'] simpleName ['(' paramList ')']
//! collectionForm := 'Collection(' qualifiedName [')']
//! paramList      := '' | param (',' param)*
//! ```
//!
//! Parsing never fails. Partially typed input (a missing closing parenthesis,
//! an empty parameter list) still produces a structured result.

use std::fmt;

const COLLECTION_PREFIX: &str = "Collection(";

/// A plain or collection-wrapped qualified name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Identifier {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub namespace_or_alias: Option<String>,
    pub name: String,
    /// The text this identifier was parsed from.
    pub raw: String,
}

/// An action or function reference with its parameter types.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ActionFunction {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub namespace_or_alias: Option<String>,
    pub name: String,
    pub raw: String,
    pub parameters: Vec<Parameter>,
}

/// A parameter type of an action or function overload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "kebab-case")
)]
pub enum Parameter {
    Identifier(Identifier),
    Collection(Identifier),
}

/// Result of [`parse_identifier`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "kebab-case")
)]
pub enum ParsedName {
    Identifier(Identifier),
    Collection(Identifier),
    ActionFunction(ActionFunction),
}

impl Identifier {
    pub fn new(namespace_or_alias: Option<&str>, name: impl Into<String>) -> Self {
        let name = name.into();
        let raw = match namespace_or_alias {
            Some(namespace) => format!("{namespace}.{name}"),
            None => name.clone(),
        };
        Self {
            namespace_or_alias: namespace_or_alias.map(str::to_string),
            name,
            raw,
        }
    }
}

impl ParsedName {
    pub fn namespace_or_alias(&self) -> Option<&str> {
        match self {
            ParsedName::Identifier(identifier) | ParsedName::Collection(identifier) => {
                identifier.namespace_or_alias.as_deref()
            }
            ParsedName::ActionFunction(action) => action.namespace_or_alias.as_deref(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ParsedName::Identifier(identifier) | ParsedName::Collection(identifier) => {
                &identifier.name
            }
            ParsedName::ActionFunction(action) => &action.name,
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            ParsedName::Identifier(identifier) | ParsedName::Collection(identifier) => {
                &identifier.raw
            }
            ParsedName::ActionFunction(action) => &action.raw,
        }
    }

    /// The namespace-or-alias and name, dropping any collection or
    /// parameter information.
    pub fn into_identifier(self) -> Identifier {
        match self {
            ParsedName::Identifier(identifier) | ParsedName::Collection(identifier) => identifier,
            ParsedName::ActionFunction(action) => Identifier {
                namespace_or_alias: action.namespace_or_alias,
                name: action.name,
                raw: action.raw,
            },
        }
    }
}

impl From<Parameter> for ParsedName {
    fn from(parameter: Parameter) -> Self {
        match parameter {
            Parameter::Identifier(identifier) => ParsedName::Identifier(identifier),
            Parameter::Collection(identifier) => ParsedName::Collection(identifier),
        }
    }
}

/// Parse a qualified name, collection type or action/function signature.
///
/// # Example
/// ```
/// use odata_annotation::names::{ParsedName, parse_identifier};
///
/// let ParsedName::Identifier(id) = parse_identifier("UI.LineItem") else { panic!() };
/// assert_eq!(id.namespace_or_alias.as_deref(), Some("UI"));
/// assert_eq!(id.name, "LineItem");
/// ```
pub fn parse_identifier(input: &str) -> ParsedName {
    if let Some(inner) = strip_collection(input) {
        return ParsedName::Collection(parse_identifier(inner).into_identifier());
    }

    let Some(open) = input.find('(') else {
        return ParsedName::Identifier(parse_plain(input));
    };

    let head = parse_plain(&input[..open]);
    let parameter_list = &input[open + 1..];
    let parameter_list = parameter_list
        .strip_suffix(')')
        .unwrap_or(parameter_list);

    let parameters = if parameter_list.is_empty() {
        Vec::new()
    } else {
        parameter_list.split(',').map(parse_parameter).collect()
    };

    ParsedName::ActionFunction(ActionFunction {
        namespace_or_alias: head.namespace_or_alias,
        name: head.name,
        raw: input.to_string(),
        parameters,
    })
}

/// `Collection(X)` or `Collection(X` → `X`.
fn strip_collection(input: &str) -> Option<&str> {
    let inner = input.strip_prefix(COLLECTION_PREFIX)?;
    Some(inner.strip_suffix(')').unwrap_or(inner))
}

fn parse_parameter(input: &str) -> Parameter {
    let input = input.trim();
    match strip_collection(input) {
        Some(inner) => Parameter::Collection(parse_identifier(inner).into_identifier()),
        None => Parameter::Identifier(parse_plain(input)),
    }
}

/// Split on the last `.` into namespace-or-alias and simple name.
fn parse_plain(input: &str) -> Identifier {
    match input.rsplit_once('.') {
        Some((namespace, name)) => Identifier {
            namespace_or_alias: Some(namespace.to_string()),
            name: name.to_string(),
            raw: input.to_string(),
        },
        None => Identifier {
            namespace_or_alias: None,
            name: input.to_string(),
            raw: input.to_string(),
        },
    }
}

// ============================================================================
// DISPLAY
// ============================================================================

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace_or_alias {
            Some(namespace) => write!(f, "{namespace}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Identifier(identifier) => write!(f, "{identifier}"),
            Parameter::Collection(identifier) => write!(f, "Collection({identifier})"),
        }
    }
}

impl fmt::Display for ActionFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(namespace) = &self.namespace_or_alias {
            write!(f, "{namespace}.")?;
        }
        write!(f, "{}(", self.name)?;
        for (index, parameter) in self.parameters.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{parameter}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for ParsedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedName::Identifier(identifier) => write!(f, "{identifier}"),
            ParsedName::Collection(identifier) => write!(f, "Collection({identifier})"),
            ParsedName::ActionFunction(action) => write!(f, "{action}"),
        }
    }
}
