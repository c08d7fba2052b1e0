use std::fmt;

/// Errors raised while assembling a [`ProjectionConfig`](crate::config::ProjectionConfig)
/// through the builder DSL.
///
/// Deserialized configs never fail this way: bad dates there are dropped
/// and the entity is treated as undated.
#[derive(Debug)]
pub enum ConfigError {
    InvalidDate {
        /// Name of the asset, debt or event carrying the date
        entity: String,
        year: i16,
        month: i8,
        day: i8,
        source: jiff::Error,
    },
    /// Two entities of the same kind share an id
    DuplicateId(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDate {
                entity,
                year,
                month,
                day,
                source,
            } => write!(
                f,
                "invalid date {year:04}-{month:02}-{day:02} on {entity:?}: {source}"
            ),
            ConfigError::DuplicateId(id) => write!(f, "duplicate id {id:?}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidDate { source, .. } => Some(source),
            ConfigError::DuplicateId(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let source = jiff::civil::Date::new(2027, 2, 30).unwrap_err();
        let err = ConfigError::InvalidDate {
            entity: "Bonus".into(),
            year: 2027,
            month: 2,
            day: 30,
            source,
        };
        let text = err.to_string();
        assert!(text.starts_with("invalid date 2027-02-30 on \"Bonus\""));
        assert!(std::error::Error::source(&err).is_some());

        assert_eq!(
            ConfigError::DuplicateId("a1".into()).to_string(),
            "duplicate id \"a1\""
        );
    }
}
