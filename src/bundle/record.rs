// ABOUTME: Readable-by-key capability used by the path resolver
// ABOUTME: Records expose a fixed set of named fields, mappings expose dynamic keys

use std::borrow::Cow;
use std::fmt;

use super::value::{Map, RecordValue, Value};

/// A structured value with a fixed, named set of fields.
pub trait Record {
    /// Short type name, kept when the record is captured without flattening.
    fn kind(&self) -> &'static str;

    /// Every defined field, in declaration order.
    fn field_names(&self) -> &'static [&'static str];

    /// Field access. `None` means the name is not a defined field.
    fn field(&self, name: &str) -> Option<Node<'_>>;

    /// Plain mapping of all fields, nested records flattened too.
    fn to_map(&self) -> Map {
        self.field_names()
            .iter()
            .filter_map(|name| {
                self.field(name)
                    .map(|node| (name.to_string(), node.into_value(true)))
            })
            .collect()
    }

    /// Owned snapshot keeping nested records as records.
    fn to_record_value(&self) -> RecordValue {
        let fields = self
            .field_names()
            .iter()
            .filter_map(|name| {
                self.field(name)
                    .map(|node| (name.to_string(), node.into_value(false)))
            })
            .collect();
        RecordValue::new(self.kind(), fields)
    }
}

/// A position reached while walking a path.
pub enum Node<'a> {
    Record(&'a dyn Record),
    Mapping(&'a Map),
    Value(Cow<'a, Value>),
}

impl<'a> Node<'a> {
    pub fn borrowed(value: &'a Value) -> Self {
        Node::Value(Cow::Borrowed(value))
    }

    pub fn owned(value: Value) -> Self {
        Node::Value(Cow::Owned(value))
    }

    pub fn is_record(&self) -> bool {
        match self {
            Node::Record(_) => true,
            Node::Mapping(_) => false,
            Node::Value(value) => matches!(value.as_ref(), Value::Record(_)),
        }
    }

    /// Convert into an owned value. With `flatten`, records become plain maps.
    pub fn into_value(self, flatten: bool) -> Value {
        match self {
            Node::Record(record) if flatten => Value::Map(record.to_map()),
            Node::Record(record) => Value::Record(record.to_record_value()),
            Node::Mapping(map) => {
                let value = Value::Map(map.clone());
                if flatten {
                    value.flatten_records()
                } else {
                    value
                }
            }
            Node::Value(value) => {
                let value = value.into_owned();
                if flatten {
                    value.flatten_records()
                } else {
                    value
                }
            }
        }
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Record(record) => f
                .debug_struct("Record")
                .field("kind", &record.kind())
                .finish(),
            Node::Mapping(map) => f.debug_tuple("Mapping").field(map).finish(),
            Node::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}
