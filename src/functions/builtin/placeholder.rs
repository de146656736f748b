// ABOUTME: Placeholder bound to freshly scaffolded configuration entries
// ABOUTME: Always answers with a not_implemented error result

use super::meta;
use crate::bundle::ElementalParams;
use crate::config::FunctionEntry;
use crate::functions::{ElementalFunction, ElementalResponse, FunctionCharacteristics, FunctionOutput};

pub struct PlaceholderFunction {
    characteristics: FunctionCharacteristics,
}

impl PlaceholderFunction {
    pub const CLASS: &'static str = "PlaceholderFunction";

    pub fn new(entry: Option<&FunctionEntry>) -> Self {
        Self {
            characteristics: FunctionCharacteristics::configured(
                entry,
                "Placeholder",
                "Function not implemented yet",
            ),
        }
    }

    pub fn create(entry: Option<&FunctionEntry>) -> Box<dyn ElementalFunction> {
        Box::new(Self::new(entry))
    }
}

impl ElementalFunction for PlaceholderFunction {
    fn characteristics(&self) -> &FunctionCharacteristics {
        &self.characteristics
    }

    fn run(&self, params: &ElementalParams) -> FunctionOutput {
        ElementalResponse::not_implemented(meta(params)).into()
    }
}
