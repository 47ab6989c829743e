// lib/src/graphql/contract.rs

//! Checks the executable schema against the checked-in SDL contract.
//!
//! The contract lists object types, input types and enums by name with their
//! fields and values. Verification introspects the executable schema and
//! collects every difference before failing, so a drifted build reports all
//! of its problems at once.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use graphql_parser::schema::{parse_schema, Definition, TypeDefinition, TypeExtension};
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use crate::graphql::MedicationsSchema;

pub const EMBEDDED_CONTRACT: &str = include_str!("../../graphql/schema.graphql");

const INTROSPECTION_QUERY: &str = r#"
{
  __schema {
    queryType { name }
    mutationType { name }
    types {
      name
      kind
      fields(includeDeprecated: true) { name }
      inputFields { name }
      enumValues(includeDeprecated: true) { name }
    }
  }
}
"#;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Failed to read schema contract {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse schema contract: {0}")]
    Parse(String),
    #[error("Schema introspection failed: {0}")]
    Introspection(String),
    #[error("Executable schema does not match its contract:\n  {}", .0.join("\n  "))]
    Mismatch(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaContract {
    objects: BTreeMap<String, BTreeSet<String>>,
    inputs: BTreeMap<String, BTreeSet<String>>,
    enums: BTreeMap<String, BTreeSet<String>>,
}

impl SchemaContract {
    pub fn parse(source: &str) -> Result<Self, ContractError> {
        let document =
            parse_schema::<String>(source).map_err(|e| ContractError::Parse(e.to_string()))?;

        let mut contract = SchemaContract::default();
        for definition in document.definitions {
            match definition {
                Definition::TypeDefinition(TypeDefinition::Object(object)) => {
                    contract
                        .objects
                        .entry(object.name)
                        .or_default()
                        .extend(object.fields.into_iter().map(|f| f.name));
                }
                Definition::TypeExtension(TypeExtension::Object(object)) => {
                    contract
                        .objects
                        .entry(object.name)
                        .or_default()
                        .extend(object.fields.into_iter().map(|f| f.name));
                }
                Definition::TypeDefinition(TypeDefinition::InputObject(input)) => {
                    contract
                        .inputs
                        .entry(input.name)
                        .or_default()
                        .extend(input.fields.into_iter().map(|f| f.name));
                }
                Definition::TypeDefinition(TypeDefinition::Enum(enumeration)) => {
                    contract
                        .enums
                        .entry(enumeration.name)
                        .or_default()
                        .extend(enumeration.values.into_iter().map(|v| v.name));
                }
                _ => {}
            }
        }
        Ok(contract)
    }

    /// The contract compiled into the binary.
    pub fn embedded() -> Result<Self, ContractError> {
        Self::parse(EMBEDDED_CONTRACT)
    }

    pub fn from_path(path: &Path) -> Result<Self, ContractError> {
        let source = fs::read_to_string(path).map_err(|source| ContractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// Reads the contract at `path`, or the embedded one when no path is set.
    pub fn load(path: Option<&Path>) -> Result<Self, ContractError> {
        match path {
            Some(path) => {
                info!("Loading schema contract from {}", path.display());
                Self::from_path(path)
            }
            None => Self::embedded(),
        }
    }

    pub fn object_fields(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.objects.get(name)
    }

    pub fn input_fields(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.inputs.get(name)
    }

    pub fn enum_values(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.enums.get(name)
    }

    pub async fn verify(&self, schema: &MedicationsSchema) -> Result<(), ContractError> {
        let response = schema.execute(INTROSPECTION_QUERY).await;
        if !response.errors.is_empty() {
            let messages: Vec<String> = response.errors.iter().map(|e| e.message.clone()).collect();
            return Err(ContractError::Introspection(messages.join("; ")));
        }
        let data = response
            .data
            .into_json()
            .map_err(|e| ContractError::Introspection(e.to_string()))?;
        let introspection: Introspection =
            serde_json::from_value(data).map_err(|e| ContractError::Introspection(e.to_string()))?;

        let mismatches = self.compare(&introspection.schema);
        if mismatches.is_empty() {
            debug!(
                "Schema contract verified: {} object types, {} input types, {} enums",
                self.objects.len(),
                self.inputs.len(),
                self.enums.len()
            );
            Ok(())
        } else {
            Err(ContractError::Mismatch(mismatches))
        }
    }

    fn compare(&self, served: &IntrospectedSchema) -> Vec<String> {
        let types: HashMap<&str, &IntrospectedType> =
            served.types.iter().map(|t| (t.name.as_str(), t)).collect();
        let mut mismatches = Vec::new();

        let declared = [
            ("OBJECT", &self.objects),
            ("INPUT_OBJECT", &self.inputs),
            ("ENUM", &self.enums),
        ];
        for (kind, declarations) in declared {
            for (name, members) in declarations {
                let Some(served_type) = types.get(name.as_str()) else {
                    mismatches.push(format!("type {} is declared but not served", name));
                    continue;
                };
                if served_type.kind != kind {
                    mismatches.push(format!(
                        "type {} is declared as {} but served as {}",
                        name, kind, served_type.kind
                    ));
                    continue;
                }
                let served_members = served_type.member_names();
                for member in members.difference(&served_members) {
                    mismatches.push(format!("{}.{} is declared but not served", name, member));
                }
            }
        }

        let roots = [&served.query_type, &served.mutation_type];
        for root in roots.into_iter().flatten() {
            let Some(served_type) = types.get(root.name.as_str()) else {
                continue;
            };
            let declared_fields = self.objects.get(&root.name);
            for field in served_type.member_names() {
                if field.starts_with('_') {
                    continue;
                }
                if !declared_fields.is_some_and(|fields| fields.contains(&field)) {
                    mismatches.push(format!("{}.{} is served but not declared", root.name, field));
                }
            }
        }

        mismatches
    }
}

#[derive(Debug, Deserialize)]
struct Introspection {
    #[serde(rename = "__schema")]
    schema: IntrospectedSchema,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectedSchema {
    query_type: Option<NamedRef>,
    mutation_type: Option<NamedRef>,
    types: Vec<IntrospectedType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectedType {
    name: String,
    kind: String,
    fields: Option<Vec<NamedRef>>,
    input_fields: Option<Vec<NamedRef>>,
    enum_values: Option<Vec<NamedRef>>,
}

impl IntrospectedType {
    fn member_names(&self) -> BTreeSet<String> {
        [&self.fields, &self.input_fields, &self.enum_values]
            .into_iter()
            .flatten()
            .flatten()
            .map(|member| member.name.clone())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: String,
}
