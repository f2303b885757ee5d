use std::collections::{ BTreeSet, HashSet };
use std::fmt;

use serde::{ Deserialize, Serialize };

use crate::errors::{ BenchError, BenchResult };
use crate::models::formula::extract_identifiers;

/// Keywords and temporal operators a variable may not be named after
const SMV_RESERVED: &[&str] = &[
    "MODULE", "VAR", "IVAR", "FROZENVAR", "DEFINE", "ASSIGN", "INIT", "TRANS", "INVAR",
    "SPEC", "CTLSPEC", "LTLSPEC", "PSLSPEC", "INVARSPEC", "TRUE", "FALSE", "boolean",
    "integer", "real", "word", "array", "of", "case", "esac", "init", "next", "mod",
    "union", "in", "xor", "xnor", "self", "X", "G", "F", "U", "V", "Y", "Z", "H", "O",
    "S", "T", "EX", "AX", "EF", "AF", "EG", "AG", "E", "A", "FAIRNESS", "JUSTICE",
    "COMPASSION", "CONSTANTS", "ISA", "COMPUTE", "MIN", "MAX", "READ", "WRITE", "abs", "max",
    "min", "count", "bool", "toint", "signed", "unsigned", "extend", "resize", "swconst",
    "uwconst", "sizeof", "floor", "word1", "CONSTARRAY", "typeof",
];

/// Declared type of a schema variable. Every type has a finite domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    Boolean,
    Range {
        lo: i64,
        hi: i64,
    },
    #[serde(rename = "enum")]
    Enumeration(Vec<String>),
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarType::Boolean => write!(f, "boolean"),
            VarType::Range { lo, hi } => write!(f, "{}..{}", lo, hi),
            VarType::Enumeration(values) => write!(f, "{{{}}}", values.join(", ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub name: String,
    /// `boolean`, `range: { lo, hi }` or `enum: [...]` in YAML
    #[serde(rename = "type", with = "serde_yaml::with::singleton_map")]
    pub var_type: VarType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VariableDeclaration {
    pub fn boolean(name: &str) -> Self {
        Self::new(name, VarType::Boolean)
    }

    pub fn range(name: &str, lo: i64, hi: i64) -> Self {
        Self::new(name, VarType::Range { lo, hi })
    }

    pub fn enumeration<V: ToString>(name: &str, values: &[V]) -> Self {
        Self::new(name, VarType::Enumeration(values.iter().map(|v| v.to_string()).collect()))
    }

    pub fn new(name: &str, var_type: VarType) -> Self {
        Self {
            name: name.to_string(),
            var_type,
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Named, validated set of variable declarations for one use case.
///
/// Invariants: names are unique, ranges satisfy `lo <= hi`, enumerations
/// are non-empty and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSchema {
    domain: String,
    variables: Vec<VariableDeclaration>,
}

impl VariableSchema {
    pub fn new(domain: &str, variables: Vec<VariableDeclaration>) -> BenchResult<Self> {
        let schema_error = |message: String| BenchError::SchemaError {
            domain: domain.to_string(),
            message,
        };

        if variables.is_empty() {
            return Err(schema_error("schema declares no variables".to_string()));
        }

        let mut seen = HashSet::new();
        for var in &variables {
            if var.name.trim().is_empty() {
                return Err(schema_error("variable with an empty name".to_string()));
            }
            if SMV_RESERVED.contains(&var.name.as_str()) {
                return Err(schema_error(format!("`{}` is a reserved SMV keyword", var.name)));
            }
            if !seen.insert(var.name.as_str()) {
                return Err(schema_error(format!("variable `{}` declared twice", var.name)));
            }
            match &var.var_type {
                VarType::Boolean => {}
                VarType::Range { lo, hi } if lo > hi => {
                    return Err(
                        schema_error(format!("variable `{}` has empty range {}..{}", var.name, lo, hi))
                    );
                }
                VarType::Range { .. } => {}
                VarType::Enumeration(values) => {
                    if values.is_empty() {
                        return Err(
                            schema_error(format!("variable `{}` has an empty enumeration", var.name))
                        );
                    }
                    let unique: HashSet<&String> = values.iter().collect();
                    if unique.len() != values.len() {
                        return Err(
                            schema_error(
                                format!("variable `{}` repeats an enumeration value", var.name)
                            )
                        );
                    }
                }
            }
        }

        Ok(Self {
            domain: domain.to_string(),
            variables,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn variables(&self) -> &[VariableDeclaration] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&VariableDeclaration> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Render the `VAR` section of an SMV module
    pub fn smv_declarations(&self) -> String {
        let mut out = String::from("VAR\n");
        for var in &self.variables {
            out.push_str(&format!("    {} : {};\n", var.name, var.var_type));
        }
        out
    }

    /// Human-readable variable mapping, used as prompt context
    pub fn variable_table(&self) -> String {
        let mut out = String::from("Variable Mapping Table:\n------------------------\n");
        for var in &self.variables {
            match &var.description {
                Some(description) =>
                    out.push_str(&format!("{} ({}): {}\n", var.name, var.var_type, description)),
                None => out.push_str(&format!("{} ({})\n", var.name, var.var_type)),
            }
        }
        out
    }

    /// Identifiers used by `formula` that the schema does not declare.
    ///
    /// Symbolic enumeration values count as declared.
    pub fn undeclared_identifiers(&self, formula: &str) -> BTreeSet<String> {
        let symbols: HashSet<&str> = self.variables
            .iter()
            .filter_map(|v| {
                match &v.var_type {
                    VarType::Enumeration(values) => Some(values.iter().map(String::as_str)),
                    _ => None,
                }
            })
            .flatten()
            .collect();

        extract_identifiers(formula)
            .into_iter()
            .filter(|ident| !self.contains(ident) && !symbols.contains(ident.as_str()))
            .collect()
    }
}
