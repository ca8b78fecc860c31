use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Atomic-update operation applied to a single field of an existing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldModifier {
    /// Adds an additional value to a list.
    Add,
    /// Sets or replaces a value, or removes it if `null` is given.
    Set,
    /// Removes a value (or a list of values) from a list.
    Remove,
    /// Removes list entries matching a regular expression.
    RemoveRegex,
    /// Increments a numeric value; a negative amount decrements.
    Inc,
}

impl FieldModifier {
    pub const ALL: [FieldModifier; 5] = [
        FieldModifier::Add,
        FieldModifier::Set,
        FieldModifier::Remove,
        FieldModifier::RemoveRegex,
        FieldModifier::Inc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldModifier::Add => "add",
            FieldModifier::Set => "set",
            FieldModifier::Remove => "remove",
            FieldModifier::RemoveRegex => "removeregex",
            FieldModifier::Inc => "inc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_update_handler() {
        for modifier in FieldModifier::ALL {
            assert_eq!(modifier.to_string(), modifier.as_str());
            assert_eq!(
                serde_json::to_value(modifier).unwrap(),
                serde_json::Value::from(modifier.as_str())
            );
        }
        assert_eq!(FieldModifier::RemoveRegex.as_str(), "removeregex");
    }

    #[test]
    fn parses_wire_name() {
        assert_eq!("inc".parse::<FieldModifier>(), Ok(FieldModifier::Inc));
        assert!("increment".parse::<FieldModifier>().is_err());
    }
}
