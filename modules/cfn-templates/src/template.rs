use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{Result, TemplateError};

/// Policy language version used by every policy document in these templates.
pub const POLICY_VERSION: &str = "2012-10-17";

/// A CloudFormation template.
///
/// Fields are declared in alphabetical order and collections are `BTreeMap`s,
/// so the rendered document is sorted by key at every level.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Template {
    #[serde(
        rename = "AWSTemplateFormatVersion",
        skip_serializing_if = "Option::is_none"
    )]
    format_version: Option<String>,

    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(rename = "Parameters", skip_serializing_if = "BTreeMap::is_empty")]
    parameters: BTreeMap<String, Parameter>,

    #[serde(rename = "Resources")]
    resources: BTreeMap<String, Resource>,

    #[serde(rename = "Transform", skip_serializing_if = "Option::is_none")]
    transform: Option<String>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.format_version = Some(version.into());
    }

    pub fn set_transform(&mut self, transform: impl Into<String>) {
        self.transform = Some(transform.into());
    }

    /// Add a parameter and return its logical id.
    pub fn add_parameter(&mut self, name: &str, parameter: Parameter) -> Result<String> {
        if self.parameters.contains_key(name) || self.resources.contains_key(name) {
            return Err(TemplateError::DuplicateLogicalId(name.to_string()));
        }
        self.parameters.insert(name.to_string(), parameter);
        Ok(name.to_string())
    }

    /// Add a resource and return its logical id.
    pub fn add_resource(&mut self, name: &str, resource: Resource) -> Result<String> {
        if self.parameters.contains_key(name) || self.resources.contains_key(name) {
            return Err(TemplateError::DuplicateLogicalId(name.to_string()));
        }
        self.resources.insert(name.to_string(), resource);
        Ok(name.to_string())
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParameterType {
    String,
    Number,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Parameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub description: String,
    #[serde(rename = "Type")]
    pub kind: ParameterType,
}

impl Parameter {
    pub fn string(description: impl Into<String>) -> Self {
        Self {
            default: None,
            description: description.into(),
            kind: ParameterType::String,
        }
    }

    pub fn number(description: impl Into<String>) -> Self {
        Self {
            default: None,
            description: description.into(),
            kind: ParameterType::Number,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resource {
    pub properties: Value,
    #[serde(rename = "Type")]
    pub kind: String,
}

impl Resource {
    pub fn new(kind: impl Into<String>, properties: Value) -> Self {
        Self {
            properties,
            kind: kind.into(),
        }
    }
}

/// `{"Ref": name}`
pub fn ref_to(name: &str) -> Value {
    json!({ "Ref": name })
}

/// `{"Fn::Join": [delimiter, parts]}`
pub fn join(delimiter: &str, parts: Vec<Value>) -> Value {
    json!({ "Fn::Join": [delimiter, parts] })
}

/// ARNs of an S3 bucket and of every object in it.
pub fn bucket_and_objects_arns(bucket_name: Value) -> Value {
    json!([
        join("", vec![json!("arn:aws:s3:::"), bucket_name.clone()]),
        join("", vec![json!("arn:aws:s3:::"), bucket_name, json!("/*")]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_logical_ids_rejected() {
        let mut template = Template::new();
        template.add_parameter("Thing", Parameter::string("a thing")).unwrap();

        let err = template
            .add_resource("Thing", Resource::new("AWS::SNS::Topic", json!({})))
            .unwrap_err();
        assert!(matches!(err, TemplateError::DuplicateLogicalId(ref id) if id == "Thing"));

        template.add_resource("Topic", Resource::new("AWS::SNS::Topic", json!({}))).unwrap();
        assert!(template
            .add_resource("Topic", Resource::new("AWS::SNS::Topic", json!({})))
            .is_err());
    }

    #[test]
    fn yaml_keys_are_sorted() {
        let mut template = Template::new();
        template.set_transform("AWS::Serverless-2016-10-31");
        template.set_version("2010-09-09");
        template.set_description("test");
        template.add_parameter("Zeta", Parameter::number("z")).unwrap();
        template.add_parameter("Alpha", Parameter::string("a").with_default("")).unwrap();
        template
            .add_resource("Topic", Resource::new("AWS::SNS::Topic", json!({"TopicName": "t"})))
            .unwrap();

        let yaml = template.to_yaml().unwrap();
        let order: Vec<usize> = [
            "AWSTemplateFormatVersion",
            "Description",
            "Parameters",
            "  Alpha",
            "  Zeta",
            "Resources",
            "Transform",
        ]
        .iter()
        .map(|key| yaml.find(key).unwrap_or_else(|| panic!("{key} missing in {yaml}")))
        .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{yaml}");
    }

    #[test]
    fn empty_parameters_omitted() {
        let mut template = Template::new();
        template.add_resource("Topic", Resource::new("AWS::SNS::Topic", json!({}))).unwrap();
        let json: Value = serde_json::from_str(&template.to_json().unwrap()).unwrap();
        assert!(json.get("Parameters").is_none());
        assert!(json.get("Transform").is_none());
        assert_eq!(json["Resources"]["Topic"]["Type"], "AWS::SNS::Topic");
    }

    #[test]
    fn intrinsics() {
        assert_eq!(ref_to("Bucket"), json!({"Ref": "Bucket"}));
        assert_eq!(
            join("", vec![json!("a"), ref_to("B")]),
            json!({"Fn::Join": ["", ["a", {"Ref": "B"}]]})
        );
    }
}
