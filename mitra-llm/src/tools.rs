//! Tool catalog offered to the model.
//!
//! Every argument is declared as a string; the model is more reliable that
//! way and the agents parse numbers themselves.

use serde::Serialize;
use serde_json::{json, Map, Value};

/// One callable tool: a name, a description and string-typed parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// `(parameter, description)` pairs. Empty descriptions are omitted.
    pub parameters: &'static [(&'static str, &'static str)],
    pub required: &'static [&'static str],
}

/// Wire form of a tool's function definition.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolSpec {
    /// JSON schema object describing the parameters.
    pub fn parameters_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|(name, description)| {
                let schema = if description.is_empty() {
                    json!({ "type": "string" })
                } else {
                    json!({ "type": "string", "description": description })
                };
                (name.to_string(), schema)
            })
            .collect();

        let mut schema = json!({ "type": "object", "properties": properties });
        if !self.required.is_empty() {
            schema["required"] = json!(self.required);
        }
        schema
    }

    pub fn definition(&self) -> FunctionDefinition {
        FunctionDefinition {
            name: self.name.to_string(),
            description: self.description.to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

const CATALOG: &[ToolSpec] = &[
    ToolSpec {
        name: "log_workout",
        description: "Log a gym workout or exercise",
        parameters: &[
            ("exercise", ""),
            ("sets", ""),
            ("reps", ""),
            ("weight", ""),
            ("is_pr", ""),
        ],
        required: &["exercise", "sets", "reps"],
    },
    ToolSpec {
        name: "log_finance",
        description: "Log expense or income",
        parameters: &[("item", ""), ("amount", ""), ("type", ""), ("category", "")],
        required: &["item", "amount", "type"],
    },
    ToolSpec {
        name: "add_task",
        description: "Add a task to to-do list",
        parameters: &[("task", ""), ("priority", "")],
        required: &["task"],
    },
    ToolSpec {
        name: "write_journal",
        description: "Write a journal entry",
        parameters: &[("title", ""), ("content", ""), ("mood", "")],
        required: &["content"],
    },
    // Offered to the model but not handled; routing answers with a no-op.
    ToolSpec {
        name: "add_travel_plan",
        description: "Add travel plan",
        parameters: &[("destination", ""), ("duration", "")],
        required: &["destination"],
    },
    ToolSpec {
        name: "add_habit",
        description: "Add lifestyle habit",
        parameters: &[("habit", "")],
        required: &["habit"],
    },
    ToolSpec {
        name: "add_medication",
        description: "Add medication schedule",
        parameters: &[("medicine", ""), ("time", ""), ("dose", "")],
        required: &["medicine", "time"],
    },
    ToolSpec {
        name: "generate_schedule",
        description: "Generate optimized daily schedule based on all user data",
        parameters: &[("date", "Date for schedule (YYYY-MM-DD)")],
        required: &[],
    },
];

/// All tools, in the order they are offered.
pub fn tool_catalog() -> &'static [ToolSpec] {
    CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_eight_tools() {
        let names: Vec<_> = tool_catalog().iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "log_workout",
                "log_finance",
                "add_task",
                "write_journal",
                "add_travel_plan",
                "add_habit",
                "add_medication",
                "generate_schedule",
            ]
        );
    }

    #[test]
    fn test_required_parameters_are_declared() {
        for tool in tool_catalog() {
            for required in tool.required {
                assert!(
                    tool.parameters.iter().any(|(name, _)| name == required),
                    "{} requires undeclared {}",
                    tool.name,
                    required
                );
            }
        }
    }

    #[test]
    fn test_schema_shape() {
        let schema = tool_catalog()[0].parameters_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["sets"]["type"], "string");
        assert_eq!(schema["required"], json!(["exercise", "sets", "reps"]));

        let schedule = tool_catalog()[7].parameters_schema();
        assert!(schedule.get("required").is_none());
        assert_eq!(
            schedule["properties"]["date"]["description"],
            "Date for schedule (YYYY-MM-DD)"
        );
    }
}
