//! Core data types for construction plans
//!
//! A raw config tree ([`RawConfigNode`]) describes modules and the instructions used
//! to compute their data. Building it yields a [`ResolvedNode`] tree, the
//! construction plan, which carries only `name`, `path`, `data` and `areas`.
//!
//! # Config shape
//!
//! ```yaml
//! name: Page
//! dataFilter: page_data
//! dataFilterArgs: [home]
//! customData:
//!   title: Welcome
//! areas:
//!   main:
//!     - name: Teaser
//!     - name: Gallery
//! ```

use std::{fmt, marker::PhantomData};

use serde::{
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::Value;

use crate::error::PlanError;

/// Module data: an insertion-ordered mapping
pub type DataMap = serde_json::Map<String, Value>;

/// Named slots of a module, each holding an ordered list of child modules
///
/// Area order is insertion order and survives serialization in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct Areas<T> {
    slots: Vec<(String, Vec<T>)>,
}

impl<T> Areas<T> {
    /// Create an empty set of areas
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Whether no area is declared at all
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of declared areas, including empty ones
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether at least one area holds a module
    pub fn has_modules(&self) -> bool {
        self.slots.iter().any(|(_, modules)| !modules.is_empty())
    }

    /// Total number of modules across all areas
    pub fn module_count(&self) -> usize {
        self.slots.iter().map(|(_, modules)| modules.len()).sum()
    }

    /// Modules of one area
    pub fn get(&self, area: &str) -> Option<&[T]> {
        self.slots
            .iter()
            .find(|(name, _)| name == area)
            .map(|(_, modules)| modules.as_slice())
    }

    /// Set the modules of an area
    ///
    /// An existing area keeps its position; a new one is appended.
    pub fn insert(&mut self, area: impl Into<String>, modules: Vec<T>) {
        let area = area.into();
        match self.slots.iter_mut().find(|(name, _)| *name == area) {
            Some((_, existing)) => *existing = modules,
            None => self.slots.push((area, modules)),
        }
    }

    /// Append one module to an area, creating the area if needed
    pub fn push(&mut self, area: impl Into<String>, module: T) {
        let area = area.into();
        match self.slots.iter_mut().find(|(name, _)| *name == area) {
            Some((_, existing)) => existing.push(module),
            None => self.slots.push((area, vec![module])),
        }
    }

    /// Remove an area, returning its modules
    pub fn remove(&mut self, area: &str) -> Option<Vec<T>> {
        let index = self.slots.iter().position(|(name, _)| name == area)?;
        Some(self.slots.remove(index).1)
    }

    /// Area names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|(name, _)| name.as_str())
    }

    /// Areas in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.slots
            .iter()
            .map(|(name, modules)| (name.as_str(), modules.as_slice()))
    }
}

impl<T> Default for Areas<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for Areas<T> {
    type Item = (String, Vec<T>);
    type IntoIter = std::vec::IntoIter<(String, Vec<T>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}

impl<T, S: Into<String>> FromIterator<(S, Vec<T>)> for Areas<T> {
    fn from_iter<I: IntoIterator<Item = (S, Vec<T>)>>(iter: I) -> Self {
        let mut areas = Areas::new();
        for (area, modules) in iter {
            areas.insert(area, modules);
        }
        areas
    }
}

impl<T: Serialize> Serialize for Areas<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (area, modules) in &self.slots {
            map.serialize_entry(area, modules)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Areas<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct AreasVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for AreasVisitor<T> {
            type Value = Areas<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping from area name to a sequence of modules")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut areas = Areas::new();
                while let Some((area, modules)) = map.next_entry::<String, Vec<T>>()? {
                    areas.insert(area, modules);
                }
                Ok(areas)
            }
        }

        deserializer.deserialize_map(AreasVisitor(PhantomData))
    }
}

/// One node of a raw config tree
///
/// Parsed from an untyped value with [`TryFrom<Value>`], which validates the node and
/// its whole subtree. The `data` key of a config is reserved and ignored; unknown
/// keys are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct RawConfigNode {
    /// Module name, looked up in the module registry
    pub name: String,

    /// Data filter hook that computes the module data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_filter: Option<String>,

    /// Extra arguments handed to the data filter after the base data
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data_filter_args: Vec<Value>,

    /// Values merged over the filtered data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<DataMap>,

    /// Child modules by area
    #[serde(skip_serializing_if = "Areas::is_empty")]
    pub areas: Areas<RawConfigNode>,
}

impl RawConfigNode {
    /// A bare module reference
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_filter: None,
            data_filter_args: Vec::new(),
            custom_data: None,
            areas: Areas::new(),
        }
    }

    /// Compute the module data with the named filter
    pub fn with_data_filter(mut self, filter: impl Into<String>) -> Self {
        self.data_filter = Some(filter.into());
        self
    }

    /// Extra arguments for the data filter
    pub fn with_data_filter_args(mut self, args: Vec<Value>) -> Self {
        self.data_filter_args = args;
        self
    }

    /// Data merged over the filter output
    pub fn with_custom_data(mut self, data: DataMap) -> Self {
        self.custom_data = Some(data);
        self
    }

    /// Set the modules of one area
    pub fn with_area(mut self, area: impl Into<String>, modules: Vec<RawConfigNode>) -> Self {
        self.areas.insert(area, modules);
        self
    }
}

impl TryFrom<Value> for RawConfigNode {
    type Error = PlanError;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(PlanError::ConfigShape(format!(
                    "config must be a mapping, {} given",
                    value_kind(&other)
                )))
            }
        };

        let name = match fields.remove("name") {
            Some(Value::String(name)) => name,
            Some(other) => {
                return Err(PlanError::ConfigShape(format!(
                    "module name must be a string, {} given",
                    value_kind(&other)
                )))
            }
            None => return Err(PlanError::MissingName),
        };

        let data_filter = match fields.remove("dataFilter") {
            None | Some(Value::Null) => None,
            Some(Value::String(filter)) => Some(filter),
            Some(other) => return Err(field_error(&name, "dataFilter", "a string", &other)),
        };

        let data_filter_args = match fields.remove("dataFilterArgs") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(args)) => args,
            Some(other) => {
                return Err(field_error(&name, "dataFilterArgs", "a sequence", &other))
            }
        };

        let custom_data = match fields.remove("customData") {
            None | Some(Value::Null) => None,
            Some(Value::Object(data)) => Some(data),
            // Decoders that cannot tell `{}` from `[]` produce an empty sequence.
            Some(Value::Array(items)) if items.is_empty() => Some(DataMap::new()),
            Some(other) => return Err(field_error(&name, "customData", "a mapping", &other)),
        };

        let areas = match fields.remove("areas") {
            None | Some(Value::Null) => Areas::new(),
            Some(Value::Object(areas)) => parse_areas(&name, areas)?,
            Some(Value::Array(items)) if items.is_empty() => Areas::new(),
            Some(other) => return Err(field_error(&name, "areas", "a mapping", &other)),
        };

        Ok(Self {
            name,
            data_filter,
            data_filter_args,
            custom_data,
            areas,
        })
    }
}

fn parse_areas(module: &str, areas: DataMap) -> std::result::Result<Areas<RawConfigNode>, PlanError> {
    let mut parsed = Areas::new();
    for (area, modules) in areas {
        let modules = match modules {
            Value::Array(modules) => modules,
            other => {
                return Err(PlanError::ConfigShape(format!(
                    "area `{}` of module `{}` must be a sequence, {} given",
                    area,
                    module,
                    value_kind(&other)
                )))
            }
        };
        let children = modules
            .into_iter()
            .map(RawConfigNode::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        parsed.insert(area, children);
    }
    Ok(parsed)
}

fn field_error(module: &str, field: &str, expected: &str, found: &Value) -> PlanError {
    PlanError::ConfigShape(format!(
        "`{}` of module `{}` must be {}, {} given",
        field,
        module,
        expected,
        value_kind(found)
    ))
}

/// Human-readable kind of a JSON value, used in error messages
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// One node of a construction plan
///
/// Build-time instructions are gone; `areas` is absent unless at least one area
/// holds a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedNode {
    /// Module name
    pub name: String,

    /// Module location, present when the plan was built against a registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Final module data
    #[serde(default, deserialize_with = "data_or_empty_sequence")]
    pub data: DataMap,

    /// Resolved child modules by area
    #[serde(
        default,
        deserialize_with = "areas_or_empty_sequence",
        skip_serializing_if = "Option::is_none"
    )]
    pub areas: Option<Areas<ResolvedNode>>,
}

// Plans written by decoders that cannot tell `{}` from `[]` carry empty sequences.
fn data_or_empty_sequence<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<DataMap, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Object(data) => Ok(data),
        Value::Null => Ok(DataMap::new()),
        Value::Array(items) if items.is_empty() => Ok(DataMap::new()),
        other => Err(de::Error::custom(format!(
            "module data must be a mapping, {} given",
            value_kind(&other)
        ))),
    }
}

fn areas_or_empty_sequence<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<Areas<ResolvedNode>>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Array(items) if items.is_empty() => Ok(None),
        value => {
            let areas = Areas::<ResolvedNode>::deserialize(value).map_err(de::Error::custom)?;
            Ok(areas.has_modules().then_some(areas))
        }
    }
}

impl ResolvedNode {
    /// A node without children or path
    pub fn leaf(name: impl Into<String>, data: DataMap) -> Self {
        Self {
            name: name.into(),
            path: None,
            data,
            areas: None,
        }
    }

    /// Direct children across all areas, in area order then list order
    pub fn children(&self) -> impl Iterator<Item = &ResolvedNode> {
        self.areas
            .iter()
            .flat_map(|areas| areas.iter())
            .flat_map(|(_, modules)| modules.iter())
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children().map(ResolvedNode::node_count).sum::<usize>()
    }
}
