use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// The closed set of model names accepted by `/models/{model_name}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelName {
    Alexnet,
    Resnet,
    Lenet,
}

impl ModelName {
    pub const ALL: [ModelName; 3] = [ModelName::Alexnet, ModelName::Resnet, ModelName::Lenet];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelName::Alexnet => "alexnet",
            ModelName::Resnet => "resnet",
            ModelName::Lenet => "lenet",
        }
    }

    /// The blurb returned alongside the model name.
    pub fn message(self) -> &'static str {
        match self {
            ModelName::Alexnet => "Deep Learning FTW!",
            ModelName::Lenet => "LeCNN all the images",
            ModelName::Resnet => "Have some residuals",
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the known model names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModel(pub String);

impl fmt::Display for UnknownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Input should be 'alexnet', 'resnet' or 'lenet'")
    }
}

impl std::error::Error for UnknownModel {}

impl FromStr for ModelName {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelName::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownModel(s.to_string()))
    }
}
