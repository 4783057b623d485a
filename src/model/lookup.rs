use crate::ParseError;

/// Outcome of locating one field on a page
///
/// Required elements that are absent abort the extraction; optional ones
/// degrade to an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    MissingOptional,
    MissingRequired(ParseError),
}

impl<T> Lookup<T> {
    /// Wraps a lookup whose absence is tolerated
    pub fn optional(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Found(v),
            None => Self::MissingOptional,
        }
    }

    /// Wraps a lookup whose absence fails the whole page
    pub fn required(value: Option<T>, url: &str, element: &'static str) -> Self {
        match value {
            Some(v) => Self::Found(v),
            None => Self::MissingRequired(ParseError::MissingElement {
                url: url.to_string(),
                element,
            }),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Found value, `None` for a missing optional, error for a missing required
    pub fn into_result(self) -> Result<Option<T>, ParseError> {
        match self {
            Self::Found(v) => Ok(Some(v)),
            Self::MissingOptional => Ok(None),
            Self::MissingRequired(e) => Err(e),
        }
    }
}

impl<T: Default> Lookup<T> {
    /// Like `into_result`, with missing optionals replaced by `T::default()`
    pub fn or_default(self) -> Result<T, ParseError> {
        self.into_result().map(Option::unwrap_or_default)
    }
}
