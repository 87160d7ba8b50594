//! Per-entity validation rule sets

use crate::core::error::FieldValidationError;
use indexmap::IndexMap;
use serde_json::{Map, Value};

type Validator = Box<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;
type Filter = Box<dyn Fn(Value) -> Value + Send + Sync>;
type FormRule = Box<dyn Fn(&Map<String, Value>) -> Option<FieldValidationError> + Send + Sync>;

#[derive(Default)]
struct FieldRules {
    filters: Vec<Filter>,
    validators: Vec<Validator>,
    required: bool,
}

/// Filters and validators for every field of one entity operation.
///
/// Fields are processed in the order they were first configured, so error
/// lists come back in form order.
pub struct EntityValidationConfig {
    pub entity_type: String,
    fields: IndexMap<String, FieldRules>,
    form_rules: Vec<FormRule>,
}

impl EntityValidationConfig {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            fields: IndexMap::new(),
            form_rules: Vec::new(),
        }
    }

    /// Add a sanitizing filter, run before any validator of the field
    pub fn add_filter<F>(&mut self, field: &str, filter: F) -> &mut Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.rules_mut(field).filters.push(Box::new(filter));
        self
    }

    pub fn add_validator<V>(&mut self, field: &str, validator: V) -> &mut Self
    where
        V: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.rules_mut(field).validators.push(Box::new(validator));
        self
    }

    /// Mark a field as required; it counts towards form progress
    pub fn add_required(&mut self, field: &str, message: &'static str) -> &mut Self {
        let rules = self.rules_mut(field);
        rules.required = true;
        rules
            .validators
            .insert(0, Box::new(super::validators::required(message)));
        self
    }

    /// Add a rule that looks at the whole form, e.g. two fields that must agree
    pub fn add_form_rule<R>(&mut self, rule: R) -> &mut Self
    where
        R: Fn(&Map<String, Value>) -> Option<FieldValidationError> + Send + Sync + 'static,
    {
        self.form_rules.push(Box::new(rule));
        self
    }

    fn rules_mut(&mut self, field: &str) -> &mut FieldRules {
        self.fields.entry(field.to_string()).or_default()
    }

    /// Names of the required fields, in form order
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, rules)| rules.required)
            .map(|(name, _)| name.as_str())
    }

    /// Sanitize then validate a payload.
    ///
    /// Each field reports its first failing validator; failures are collected
    /// across fields. Optional fields absent from the payload are skipped and
    /// never inserted, so an update body stays partial. Unconfigured fields
    /// pass through untouched.
    pub fn validate_and_filter(
        &self,
        payload: Value,
    ) -> Result<Value, Vec<FieldValidationError>> {
        let mut object = match payload {
            Value::Object(map) => map,
            _ => {
                return Err(vec![FieldValidationError::new(
                    "body",
                    "Expected a JSON object",
                )]);
            }
        };

        let mut errors = Vec::new();

        for (name, rules) in &self.fields {
            let present = object.contains_key(name);
            if !present && !rules.required {
                continue;
            }
            let mut value = object.remove(name).unwrap_or(Value::Null);

            for filter in &rules.filters {
                value = filter(value);
            }

            if let Some(message) = rules
                .validators
                .iter()
                .find_map(|validator| validator(&value).err())
            {
                errors.push(FieldValidationError::new(name.clone(), message));
            }

            if present {
                object.insert(name.clone(), value);
            }
        }

        for rule in &self.form_rules {
            if let Some(error) = rule(&object) {
                if !errors.iter().any(|e| e.field == error.field) {
                    errors.push(error);
                }
            }
        }

        if errors.is_empty() {
            Ok(Value::Object(object))
        } else {
            Err(errors)
        }
    }

    /// Share of required fields filled in, as a whole percentage rounded down
    pub fn progress(&self, form: &Value) -> u8 {
        let required: Vec<&str> = self.required_fields().collect();
        if required.is_empty() {
            return 100;
        }
        let filled = required
            .iter()
            .filter(|name| is_filled(form.get(**name)))
            .count();
        (filled * 100 / required.len()) as u8
    }
}

fn is_filled(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}
