mod request;
mod validation;

pub use request::*;
pub use validation::*;

use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct NextQuery {
    #[serde(default)]
    pub next: Option<String>,
}
