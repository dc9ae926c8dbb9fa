//! Core data structures for the Verso theming system.
//!
//! This module contains the closed set of theme variants, the semantic color
//! palette, the custom-property naming and value types, and the fully derived
//! theme state handed to consumers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use verso_core::types::Color;

use super::errors::ThemingError;

// --- ThemeVariant ---

/// One of the two supported visual modes.
///
/// The set is closed: the active variant is always a member, and any value
/// read from persisted storage that is not a member is discarded in favor of
/// the default ([`ThemeVariant::Light`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    /// Light backgrounds, dark text. The default variant.
    #[default]
    Light,
    /// Dark backgrounds, light text.
    Dark,
}

impl ThemeVariant {
    /// The variant's name, used as the document root class and the persisted
    /// storage value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeVariant::Light => "light",
            ThemeVariant::Dark => "dark",
        }
    }

    /// Advances to the cycle successor. The cycle has two elements, so
    /// `rotate` is its own inverse.
    pub fn rotate(self) -> Self {
        match self {
            ThemeVariant::Light => ThemeVariant::Dark,
            ThemeVariant::Dark => ThemeVariant::Light,
        }
    }
}

impl fmt::Display for ThemeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ThemeVariant {
    type Err = ThemingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeVariant::Light),
            "dark" => Ok(ThemeVariant::Dark),
            other => Err(ThemingError::UnknownVariant {
                value: other.to_string(),
            }),
        }
    }
}

// --- VariableName ---

/// The name of a CSS custom property (e.g. `--colors-accent`).
///
/// Names must start with `--` and otherwise consist of ASCII alphanumeric
/// characters or hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariableName(String);

impl VariableName {
    /// Creates a new `VariableName`.
    /// Panics in debug mode if the name is not a valid custom-property name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(
            is_valid_variable_name(&name),
            "VariableName: '{}' is not a valid custom-property name",
            name
        );
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_variable_name(name: &str) -> bool {
    match name.strip_prefix("--") {
        Some(rest) => {
            !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        None => false,
    }
}

impl From<&str> for VariableName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for VariableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// --- VariableValue ---

/// The value of a derived CSS variable: either a literal string or a
/// reference to another variable.
///
/// References render as `var(--name)` and must resolve to a literal in a
/// single hop; the deriver never produces longer chains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariableValue {
    /// A literal CSS value (a color, a font stack, ...).
    Literal(String),
    /// A `var(--name)` reference to another variable in the same set.
    Reference(VariableName),
}

impl VariableValue {
    /// Renders the value in its CSS form.
    pub fn render(&self) -> String {
        match self {
            VariableValue::Literal(value) => value.clone(),
            VariableValue::Reference(name) => format!("var({})", name),
        }
    }
}

// --- VariableSet ---

/// A derived set of CSS custom properties for one theme variant.
///
/// Entries are kept in a `BTreeMap` so iteration and serialization order are
/// stable across calls, which is what makes derivation deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VariableSet {
    entries: BTreeMap<VariableName, VariableValue>,
}

impl VariableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any previous value for the same name.
    /// This is how the dark patch set overlays the base set.
    pub fn insert(&mut self, name: VariableName, value: VariableValue) {
        self.entries.insert(name, value);
    }

    pub fn get(&self, name: &VariableName) -> Option<&VariableValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &VariableName) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VariableName, &VariableValue)> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &VariableName> {
        self.entries.keys()
    }

    /// Resolves a variable to its literal value, following at most one
    /// reference hop. Returns `None` for unknown names or references that do
    /// not land on a literal.
    pub fn resolve(&self, name: &VariableName) -> Option<&str> {
        match self.entries.get(name)? {
            VariableValue::Literal(value) => Some(value),
            VariableValue::Reference(target) => match self.entries.get(target)? {
                VariableValue::Literal(value) => Some(value),
                VariableValue::Reference(_) => None,
            },
        }
    }

    /// Validates that every reference points at an existing entry and that
    /// the target is a literal (single-hop indirection).
    ///
    /// Supplying a broken set is a programming error in the derivation
    /// tables, not a runtime failure path; this is the check the derivation
    /// tests run.
    pub fn validate(&self) -> Result<(), ThemingError> {
        for (name, value) in &self.entries {
            if let VariableValue::Reference(target) = value {
                match self.entries.get(target) {
                    None => {
                        return Err(ThemingError::DanglingReference {
                            name: name.clone(),
                            target: target.clone(),
                        })
                    }
                    Some(VariableValue::Reference(_)) => {
                        return Err(ThemingError::MultiHopReference {
                            name: name.clone(),
                            target: target.clone(),
                        })
                    }
                    Some(VariableValue::Literal(_)) => {}
                }
            }
        }
        Ok(())
    }

    /// Renders the set as a single `name:value;` string with no whitespace,
    /// suitable for direct assignment to an element's inline `style`
    /// attribute.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.entries {
            out.push_str(name.as_str());
            out.push(':');
            out.extend(value.render().chars().filter(|c| !c.is_whitespace()));
            out.push(';');
        }
        out
    }
}

// --- Palette ---

/// The semantic color roles for one theme variant.
///
/// Every role required by the deriver is present in both variants, except
/// `accent_extra_light`, which the dark palette omits; the deriver
/// substitutes `accent_light` for it there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub accent: Color,
    pub accent_dark: Color,
    pub accent_darker: Color,
    pub accent_extra_dark: Color,
    pub accent_light: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_extra_light: Option<Color>,
    pub contra: Color,
    pub contra_light: Color,
    pub offset: Color,
    pub offset_more: Color,
    pub error: Color,
}

// --- AppliedThemeState ---

/// The fully derived state of the current theme, ready for consumers.
///
/// Imperative consumers such as the directed-graph view receive the resolved
/// `colors` directly rather than the raw variant tag, so they never need a
/// separate palette lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedThemeState {
    /// The variant this state was derived for. Its name is also the document
    /// root's class attribute.
    pub variant: ThemeVariant,
    /// The serialized variable set assigned to the document root's inline
    /// `style` attribute.
    pub style: String,
    /// The resolved palette for this variant, with the optional
    /// `accent_extra_light` role already substituted.
    pub colors: Palette,
}
