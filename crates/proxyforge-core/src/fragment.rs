//! Small reusable fragments shared by endpoints and policies.

use serde::{Deserialize, Serialize};

/// A free-form `name = value` entry in a `properties` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    /// Source text of the value. Numeric literals keep their original spelling.
    pub value: String,
}

/// An environment variable passed to a script target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
}

/// An HTTP header reference.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// A URL query parameter reference.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryParam {
    pub name: String,
    pub value: String,
}

/// A form parameter reference.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormParam {
    pub name: String,
    pub value: String,
}

macro_rules! named_value {
    ($($ty:ident),+) => {
        $(
            impl $ty {
                pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
                    Self {
                        name: name.into(),
                        value: value.into(),
                    }
                }
            }
        )+
    };
}

named_value!(Property, EnvironmentVariable, Header, QueryParam, FormParam);

/// A value that is either taken literally or read from a flow variable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValueRef {
    /// Flow variable to read the value from.
    pub reference: Option<String>,
    /// Literal value, used when the reference is absent or unresolved.
    pub value: Option<String>,
}
