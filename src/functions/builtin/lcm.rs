// ABOUTME: Least common multiple of two integer parameters
// ABOUTME: Zero divisors, overflow and non-integer operands become exception results

use super::{data, meta};
use crate::bundle::{ElementalParams, Value};
use crate::config::FunctionEntry;
use crate::functions::{ElementalFunction, ElementalResponse, FunctionCharacteristics, FunctionOutput};

pub struct LcmFunction {
    characteristics: FunctionCharacteristics,
}

impl LcmFunction {
    pub const CLASS: &'static str = "LcmFunction";

    pub fn new(entry: Option<&FunctionEntry>) -> Self {
        Self {
            characteristics: FunctionCharacteristics::configured(
                entry,
                "LCM",
                "Calculate the least common multiple of two numbers",
            ),
        }
    }

    pub fn create(entry: Option<&FunctionEntry>) -> Box<dyn ElementalFunction> {
        Box::new(Self::new(entry))
    }
}

fn gcd(mut a: i128, mut b: i128) -> i128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a.abs()
}

/// `|a*b| / gcd(a, b)`, widened so the intermediate product cannot overflow
pub fn lcm(a: i64, b: i64) -> Result<i64, String> {
    let (a, b) = (i128::from(a), i128::from(b));
    let divisor = gcd(a, b);
    if divisor == 0 {
        return Err("integer division or modulo by zero".to_string());
    }
    i64::try_from((a * b).abs() / divisor)
        .map_err(|_| "least common multiple does not fit in a 64-bit integer".to_string())
}

impl ElementalFunction for LcmFunction {
    fn characteristics(&self) -> &FunctionCharacteristics {
        &self.characteristics
    }

    fn run(&self, params: &ElementalParams) -> FunctionOutput {
        let (a, b) = match (params.param("a"), params.param("b")) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                return ElementalResponse::missing_param(
                    "Parameters 'a' and 'b' are required.",
                    meta(params),
                )
                .into()
            }
        };

        let result = match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => lcm(a, b),
            _ => Err(format!(
                "'{}' and '{}' cannot be interpreted as integers",
                a.type_name(),
                b.type_name()
            )),
        };

        match result {
            Ok(value) => {
                ElementalResponse::success(data([("lcm", Value::Int(value))]), meta(params)).into()
            }
            Err(message) => ElementalResponse::exception(message, meta(params)).into(),
        }
    }
}
