// ABOUTME: Concat function joining two texts
// ABOUTME: Characteristics can be overridden by the function's configuration entry

use super::{data, meta};
use crate::bundle::{ElementalParams, Value};
use crate::config::FunctionEntry;
use crate::functions::{ElementalFunction, ElementalResponse, FunctionCharacteristics, FunctionOutput};

pub struct ConcatFunction {
    characteristics: FunctionCharacteristics,
}

impl ConcatFunction {
    pub const CLASS: &'static str = "ConcatFunction";

    pub fn new(entry: Option<&FunctionEntry>) -> Self {
        Self {
            characteristics: FunctionCharacteristics::configured(
                entry,
                "Concat",
                "Receives two texts and returns them along with their concatenation.",
            ),
        }
    }

    pub fn create(entry: Option<&FunctionEntry>) -> Box<dyn ElementalFunction> {
        Box::new(Self::new(entry))
    }
}

impl ElementalFunction for ConcatFunction {
    fn characteristics(&self) -> &FunctionCharacteristics {
        &self.characteristics
    }

    fn run(&self, params: &ElementalParams) -> FunctionOutput {
        match (params.param("text1"), params.param("text2")) {
            (Some(text1), Some(text2)) => {
                let concat = format!("{}{}", text1, text2);
                ElementalResponse::success(
                    data([
                        ("text1", text1.clone()),
                        ("text2", text2.clone()),
                        ("concat", Value::String(concat)),
                    ]),
                    meta(params),
                )
                .into()
            }
            _ => ElementalResponse::missing_param(
                "Both 'text1' and 'text2' must be provided.",
                meta(params),
            )
            .into(),
        }
    }
}
