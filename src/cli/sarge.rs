use std::convert::Infallible;

use sarge::ArgumentType;

use crate::cli::InputArg;

impl ArgumentType for InputArg {
    type Error = Infallible;

    fn from_value(val: Option<&str>) -> sarge::ArgResult<Self> {
        Some(Ok(val.map(InputArg::from_token).unwrap_or_default()))
    }

    fn default_value() -> Option<Self> {
        Some(InputArg::default())
    }
}
