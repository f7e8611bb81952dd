use serde::{Deserialize, Serialize};

/// Body of `GET /greeting`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    pub greeting: String,
}

impl Greeting {
    pub fn for_name(name: &str) -> Self {
        Self {
            greeting: format!("hello {}", name),
        }
    }
}
