// src/record.rs
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A person correlated from parallel name / link / credit lists.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PersonRef {
    pub name: String,
    /// Absolute profile URL.
    pub link: String,
    pub name_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
}

/// One field value. `Null` marks a field whose extractor failed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Text(String),
    List(Vec<String>),
    Integer(i64),
    Ref(PersonRef),
    Refs(Vec<PersonRef>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Person references held by this value, single or list.
    pub fn people(&self) -> &[PersonRef] {
        match self {
            Value::Ref(person) => std::slice::from_ref(person),
            Value::Refs(people) => people,
            _ => &[],
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<PersonRef> for Value {
    fn from(person: PersonRef) -> Self {
        Value::Ref(person)
    }
}

impl From<Vec<PersonRef>> for Value {
    fn from(people: Vec<PersonRef>) -> Self {
        Value::Refs(people)
    }
}

impl From<Option<String>> for Value {
    fn from(s: Option<String>) -> Self {
        s.map_or(Value::Null, Value::Text)
    }
}

/// Fully keyed output of one schema over one document. Fields keep their
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    schema: &'static str,
    fields: Vec<(&'static str, Value)>,
}

impl Record {
    pub(crate) fn new(schema: &'static str, fields: Vec<(&'static str, Value)>) -> Self {
        Self { schema, fields }
    }

    pub fn schema(&self) -> &'static str {
        self.schema
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Text value of `name`, `None` when absent, null or not text.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_text)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.fields.iter().filter(|(_, value)| value.is_null()).count()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
