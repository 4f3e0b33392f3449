use crate::common;

use std::collections;

/// Existence check on an attribute.
///
/// ```rust
/// use dynamodb_books::common::condition;
///
/// let create_if_absent = condition::KeyCondition {
///     name: "isbn".to_string(),
///     condition: condition::Condition::NotExists,
/// };
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Condition {
    /// The attribute must be present on the stored item.
    Exists,
    /// The attribute must be absent, i.e. no item is stored under the key.
    NotExists,
}

impl Condition {
    fn get_expression(self, key_placeholder: &str) -> String {
        match self {
            Self::Exists => format!("attribute_exists({key_placeholder})"),
            Self::NotExists => format!("attribute_not_exists({key_placeholder})"),
        }
    }
}

/// Condition applied to an attribute.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyCondition {
    /// The condition to apply to the attribute.
    pub condition: Condition,
    /// The name of the attribute to apply the condition to.
    pub name: String,
}

impl KeyCondition {
    /// Require an item to exist under `name` (update and delete).
    pub fn exists(name: &str) -> Self {
        Self {
            condition: Condition::Exists,
            name: name.to_string(),
        }
    }

    /// Require no item to exist under `name` (create).
    pub fn not_exists(name: &str) -> Self {
        Self {
            condition: Condition::NotExists,
            name: name.to_string(),
        }
    }
}

impl From<KeyCondition> for common::ExpressionInput {
    fn from(key_condition: KeyCondition) -> Self {
        let placeholder = common::placeholder(&key_condition.name);
        let expression = key_condition.condition.get_expression(&placeholder);
        Self {
            expression,
            expression_attribute_names: collections::HashMap::from([(
                placeholder,
                key_condition.name,
            )]),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::exists(
        KeyCondition::exists("isbn"),
        common::ExpressionInput {
            expression: "attribute_exists(#isbn)".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#isbn".to_string(), "isbn".to_string()),
                ]
            ),
            ..Default::default()
        }
    )]
    #[case::not_exists(
        KeyCondition::not_exists("isbn"),
        common::ExpressionInput {
            expression: "attribute_not_exists(#isbn)".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#isbn".to_string(), "isbn".to_string()),
                ]
            ),
            ..Default::default()
        }
    )]
    fn test_key_condition_to_expression(
        #[case] key_condition: KeyCondition,
        #[case] expected: common::ExpressionInput,
    ) {
        let actual: common::ExpressionInput = key_condition.into();
        assert_eq!(actual, expected);
    }
}
