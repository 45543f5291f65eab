//! Declarative form schemas.
//!
//! [`Schema::invoice`] describes every invoice field.  Operations derive the
//! subset they accept with [`Schema::omit`]; create and update both drop
//! `id` and `date`, which callers never supply.
//!
//! Validation is all-or-nothing: every field is checked, every failure is
//! collected, and a single [`ValidationError`] is returned if any failed.
//! Keys the schema does not know about are ignored.

use std::collections::BTreeMap;

use db::InvoiceStatus;

use crate::{
    error::{FieldIssue, ValidationError},
    models::InputBag,
    money::Amount,
};

/// How a single field is checked and coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any string, including the empty one.
    Text,
    /// A string with at least one non-whitespace character.
    NonEmptyText,
    /// A non-negative number, see [`Amount::parse`].
    Amount,
    /// One of [`InvoiceStatus::ALL`].
    Status,
}

/// A named field in a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// A coerced field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Amount(Amount),
    Status(InvoiceStatus),
}

/// An ordered set of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// The full invoice shape.
    pub fn invoice() -> Self {
        Self {
            fields: vec![
                Field { name: "id", kind: FieldKind::Text },
                Field { name: "customerId", kind: FieldKind::NonEmptyText },
                Field { name: "amount", kind: FieldKind::Amount },
                Field { name: "status", kind: FieldKind::Status },
                Field { name: "date", kind: FieldKind::Text },
            ],
        }
    }

    /// Fields accepted by the create form.
    pub fn create_invoice() -> Self {
        Self::invoice().omit(&["id", "date"])
    }

    /// Fields accepted by the update form.
    pub fn update_invoice() -> Self {
        Self::invoice().omit(&["id", "date"])
    }

    /// A copy of this schema without the named fields.
    pub fn omit(&self, names: &[&str]) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .filter(|f| !names.contains(&f.name))
                .copied()
                .collect(),
        }
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Check `bag` against every field, returning all coerced values or
    /// every issue found.
    pub fn validate(&self, bag: &InputBag) -> Result<Record, ValidationError> {
        let mut values = BTreeMap::new();
        let mut issues = Vec::new();

        for field in &self.fields {
            match check(field, bag.get(field.name)) {
                Ok(value) => {
                    values.insert(field.name, value);
                }
                Err(message) => issues.push(FieldIssue {
                    field: field.name.to_owned(),
                    message,
                }),
            }
        }

        if issues.is_empty() {
            Ok(Record { values })
        } else {
            Err(ValidationError::new(issues))
        }
    }
}

fn check(field: &Field, raw: Option<&str>) -> Result<Value, String> {
    let Some(raw) = raw else {
        return Err(format!("{} is required", field.name));
    };

    match field.kind {
        FieldKind::Text => Ok(Value::Text(raw.to_owned())),
        FieldKind::NonEmptyText => {
            if raw.trim().is_empty() {
                Err(format!("{} is required", field.name))
            } else {
                Ok(Value::Text(raw.to_owned()))
            }
        }
        FieldKind::Amount => Amount::parse(raw)
            .map(Value::Amount)
            .map_err(|e| e.to_string()),
        FieldKind::Status => raw.parse::<InvoiceStatus>().map(Value::Status).map_err(|_| {
            let allowed: Vec<_> = InvoiceStatus::ALL.iter().map(|s| s.as_str()).collect();
            format!("expected one of {}, received '{raw}'", allowed.join(" | "))
        }),
    }
}

/// The values of a successfully validated form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    values: BTreeMap<&'static str, Value>,
}

impl Record {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn text(&self, name: &str) -> Result<&str, ValidationError> {
        match self.get(name) {
            Some(Value::Text(s)) => Ok(s),
            _ => Err(missing(name)),
        }
    }

    pub fn amount(&self, name: &str) -> Result<Amount, ValidationError> {
        match self.get(name) {
            Some(Value::Amount(a)) => Ok(*a),
            _ => Err(missing(name)),
        }
    }

    pub fn status(&self, name: &str) -> Result<InvoiceStatus, ValidationError> {
        match self.get(name) {
            Some(Value::Status(s)) => Ok(*s),
            _ => Err(missing(name)),
        }
    }
}

fn missing(name: &str) -> ValidationError {
    ValidationError::field(name, format!("{name} is not part of this form"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(pairs: &[(&str, &str)]) -> InputBag {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn create_schema_omits_id_and_date() {
        let names: Vec<_> = Schema::create_invoice().field_names().collect();
        assert_eq!(names, vec!["customerId", "amount", "status"]);
        assert_eq!(Schema::create_invoice(), Schema::update_invoice());
    }

    #[test]
    fn valid_form_produces_typed_values() {
        let record = Schema::create_invoice()
            .validate(&bag(&[("customerId", "c1"), ("amount", "15.50"), ("status", "pending")]))
            .unwrap();

        assert_eq!(record.text("customerId").unwrap(), "c1");
        assert_eq!(record.amount("amount").unwrap().cents(), 1550);
        assert_eq!(record.status("status").unwrap(), InvoiceStatus::Pending);
    }

    #[test]
    fn every_failing_field_is_reported() {
        let err = Schema::create_invoice()
            .validate(&bag(&[("customerId", ""), ("amount", "abc"), ("status", "void")]))
            .unwrap_err();

        let fields: Vec<_> = err.issues().iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["customerId", "amount", "status"]);
        assert_eq!(
            err.field_errors()["status"],
            vec!["expected one of pending | paid, received 'void'"]
        );
    }

    #[test]
    fn missing_fields_are_required() {
        let err = Schema::create_invoice()
            .validate(&bag(&[("customerId", "c1"), ("amount", "1")]))
            .unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].message, "status is required");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let record = Schema::create_invoice()
            .validate(&bag(&[
                ("customerId", "c1"),
                ("amount", "1"),
                ("status", "paid"),
                ("$ACTION_ID", "abc"),
                ("id", "should-not-matter"),
            ]))
            .unwrap();
        assert!(record.get("id").is_none());
        assert!(record.get("$ACTION_ID").is_none());
    }

    #[test]
    fn base_schema_requires_id_and_date() {
        let err = Schema::invoice()
            .validate(&bag(&[("customerId", "c1"), ("amount", "1"), ("status", "paid")]))
            .unwrap_err();
        assert!(err.has_field("id"));
        assert!(err.has_field("date"));
    }

    #[test]
    fn reading_an_omitted_field_is_an_error() {
        let record = Schema::create_invoice()
            .validate(&bag(&[("customerId", "c1"), ("amount", "1"), ("status", "paid")]))
            .unwrap();
        assert!(record.text("date").is_err());
        assert!(record.amount("customerId").is_err());
    }
}
