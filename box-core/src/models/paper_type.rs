use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperType {
    #[default]
    Kraft,
    Virgin,
    VirginAndKraft,
}

impl PaperType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kraft => "K",
            Self::Virgin => "V",
            Self::VirginAndKraft => "VK",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "K" => Some(Self::Kraft),
            "V" => Some(Self::Virgin),
            "VK" => Some(Self::VirginAndKraft),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Kraft => "Kraft",
            Self::Virgin => "Virgin",
            Self::VirginAndKraft => "Virgin top over kraft",
        }
    }
}
