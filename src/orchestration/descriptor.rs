//! Declarative sub-command requests

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Positional arguments of a request, by argument name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Arguments(BTreeMap<String, String>);

impl Arguments {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Argument value, or `default` when absent or empty
    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        match self.get(name) {
            Some(value) if !value.is_empty() => value,
            _ => default,
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }
}

/// Named options of a request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Options(BTreeMap<String, Value>);

impl Options {
    /// Boolean flag; absent, null and `false` all read as unset
    pub fn flag(&self, name: &str) -> bool {
        match self.0.get(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Null) | None => false,
            Some(Value::String(s)) => !s.is_empty() && s != "0" && s != "false",
            Some(Value::Number(n)) => n.as_i64().map_or(true, |n| n != 0),
            Some(_) => true,
        }
    }

    /// Flag that distinguishes "not given" from an explicit value
    pub fn explicit_flag(&self, name: &str) -> Option<bool> {
        self.0.get(name).map(|_| self.flag(name))
    }

    /// String option; empty strings and null read as absent
    pub fn string(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Null | Value::Bool(false) => None,
            other => Some(other.to_string()),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }
}

/// One unit of work for the runner: a command name plus its input
///
/// Built fresh by the caller for every run and consumed by the runner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    name: String,
    arguments: Arguments,
    options: Options,
}

impl RequestDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Arguments::default(),
            options: Options::default(),
        }
    }

    /// Add a positional argument
    pub fn argument(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.insert(name, value);
        self
    }

    /// Add an option
    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name, value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}
