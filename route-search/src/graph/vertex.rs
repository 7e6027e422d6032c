use std::convert::TryFrom;

use serde::Serialize;

use super::Node;

/// Tag attached to a vertex. Informational only; no search looks at it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Attribute {
    Empty = 0,
    Place = 1,
    Supply = 2,
    Occupied = 3,
}

impl Default for Attribute {
    fn default() -> Self {
        Attribute::Empty
    }
}

impl TryFrom<i64> for Attribute {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Attribute::Empty),
            1 => Ok(Attribute::Place),
            2 => Ok(Attribute::Supply),
            3 => Ok(Attribute::Occupied),
            other => Err(other),
        }
    }
}

impl From<Attribute> for i64 {
    fn from(attr: Attribute) -> Self {
        attr as i64
    }
}

/// A named city of the route network.
///
/// The `location` is carried for display and persistence; distances come from
/// the weight matrix only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Vertex {
    name: String,
    id: Node,
    location: (i64, i64),
    attr: Attribute,
}

impl Vertex {
    pub fn new(name: impl Into<String>, id: Node, location: (i64, i64)) -> Self {
        Self {
            name: name.into(),
            id,
            location,
            attr: Attribute::Empty,
        }
    }

    pub fn with_attr(mut self, attr: Attribute) -> Self {
        self.attr = attr;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Node {
        self.id
    }

    pub fn location(&self) -> (i64, i64) {
        self.location
    }

    pub fn attr(&self) -> Attribute {
        self.attr
    }
}
