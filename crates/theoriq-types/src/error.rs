/// Protocol type error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    InvalidAmount(String),
    UnknownCurrency(String),
    UnknownSourceType(String),
}

impl std::fmt::Display for TypesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAmount(raw) => write!(f, "invalid cost amount: {raw}"),
            Self::UnknownCurrency(raw) => write!(f, "unknown currency: {raw}"),
            Self::UnknownSourceType(raw) => write!(f, "unknown source type: {raw}"),
        }
    }
}

impl std::error::Error for TypesError {}
