// ABOUTME: Echo function returning the call's params and savepoint untouched
// ABOUTME: Useful for checking what a configured caller actually sends

use super::{data, meta};
use crate::bundle::{ElementalParams, Value};
use crate::config::FunctionEntry;
use crate::functions::{
    ElementalFunction, ElementalResponse, FunctionCharacteristics, FunctionOutput, RoleInProcess,
};

pub struct EchoFunction {
    characteristics: FunctionCharacteristics,
}

impl EchoFunction {
    pub const CLASS: &'static str = "EchoFunction";

    pub fn new() -> Self {
        Self {
            characteristics: FunctionCharacteristics::new(
                "Echo",
                "Echoes input parameters.",
                RoleInProcess::BusinessAction,
            ),
        }
    }

    pub fn create(_entry: Option<&FunctionEntry>) -> Box<dyn ElementalFunction> {
        Box::new(Self::new())
    }
}

impl Default for EchoFunction {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementalFunction for EchoFunction {
    fn characteristics(&self) -> &FunctionCharacteristics {
        &self.characteristics
    }

    fn run(&self, params: &ElementalParams) -> FunctionOutput {
        ElementalResponse::success(
            data([
                ("echo", Value::Map(params.params.clone())),
                ("savepoint", Value::Map(params.savepoint.clone())),
            ]),
            meta(params),
        )
        .into()
    }
}
