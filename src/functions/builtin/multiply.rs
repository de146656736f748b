// ABOUTME: Multiply function returning both operands and their product
// ABOUTME: Integers multiply with overflow checks, any float operand yields a float

use super::{data, meta};
use crate::bundle::{ElementalParams, Value};
use crate::config::FunctionEntry;
use crate::functions::{
    ElementalFunction, ElementalResponse, FunctionCharacteristics, FunctionOutput, RoleInProcess,
};

pub struct MultiplyFunction {
    characteristics: FunctionCharacteristics,
}

impl MultiplyFunction {
    pub const CLASS: &'static str = "MultiplyFunction";

    pub fn new() -> Self {
        Self {
            characteristics: FunctionCharacteristics::new(
                "Multiply",
                "Receives two numbers and returns them along with their multiplication.",
                RoleInProcess::BusinessAction,
            ),
        }
    }

    pub fn create(_entry: Option<&FunctionEntry>) -> Box<dyn ElementalFunction> {
        Box::new(Self::new())
    }
}

impl Default for MultiplyFunction {
    fn default() -> Self {
        Self::new()
    }
}

fn multiply(a: &Value, b: &Value) -> Result<Value, String> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x
            .checked_mul(*y)
            .map(Value::Int)
            .ok_or_else(|| format!("integer overflow multiplying {} by {}", x, y)),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => Ok(Value::Float(x * y)),
                _ => Err(unsupported(a, b)),
            }
        }
        _ => Err(unsupported(a, b)),
    }
}

fn unsupported(a: &Value, b: &Value) -> String {
    format!(
        "unsupported operand types for *: '{}' and '{}'",
        a.type_name(),
        b.type_name()
    )
}

impl ElementalFunction for MultiplyFunction {
    fn characteristics(&self) -> &FunctionCharacteristics {
        &self.characteristics
    }

    fn run(&self, params: &ElementalParams) -> FunctionOutput {
        let (a, b) = match (params.param("a"), params.param("b")) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                return ElementalResponse::missing_param(
                    "Both 'a' and 'b' must be provided.",
                    meta(params),
                )
                .into()
            }
        };

        match multiply(a, b) {
            Ok(product) => ElementalResponse::success(
                data([("a", a.clone()), ("b", b.clone()), ("product", product)]),
                meta(params),
            )
            .into(),
            Err(message) => ElementalResponse::exception(message, meta(params)).into(),
        }
    }
}
