use envconfig::Envconfig;

use crate::error::{AssignorError, Result};

#[derive(Envconfig, Clone, Debug)]
pub struct Config {
    #[envconfig(from = "ASSIGNMENT_PLAN", default = "demos/assignment-plan.json")]
    pub assignment_plan: String,

    #[envconfig(from = "FALLBACK_STRATEGY")]
    pub fallback_strategy: Option<String>,

    #[envconfig(from = "PRETTY_OUTPUT", default = "true")]
    pub pretty_output: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Config::init_from_env().map_err(|e| AssignorError::Config(e.to_string()))
    }
}
