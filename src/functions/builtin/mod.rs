// ABOUTME: Built-in elemental function implementations
// ABOUTME: Contains multiply, echo, concat, LCM and the scaffold placeholder

pub mod concat;
pub mod echo;
pub mod lcm;
pub mod multiply;
pub mod placeholder;

pub use concat::ConcatFunction;
pub use echo::EchoFunction;
pub use lcm::LcmFunction;
pub use multiply::MultiplyFunction;
pub use placeholder::PlaceholderFunction;

use crate::bundle::{ElementalParams, Map, Value};

fn data(entries: impl IntoIterator<Item = (&'static str, Value)>) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect::<Map>(),
    )
}

fn meta(params: &ElementalParams) -> Option<Value> {
    params.meta_value()
}
