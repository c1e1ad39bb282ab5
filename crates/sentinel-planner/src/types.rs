use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Plan produced by the planning service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan(Value);

impl Plan {
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Plan identifier, when the service assigns one
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Number of steps, when the plan lists them
    pub fn step_count(&self) -> Option<usize> {
        self.0.get("steps").and_then(Value::as_array).map(Vec::len)
    }

    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Result of executing a [`Plan`] with the planner's own engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanRun(Value);

impl PlanRun {
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Run state such as `COMPLETE` or `FAILED`
    pub fn state(&self) -> Option<&str> {
        self.0.get("state").and_then(Value::as_str)
    }

    /// `outputs.final_output`, when the run produced one
    pub fn final_output(&self) -> Option<&Value> {
        self.0.get("outputs").and_then(|o| o.get("final_output"))
    }

    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}
