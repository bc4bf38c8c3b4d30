use std::fmt;

/// A solar event that does not occur on the given date at the given location.
///
/// At latitudes beyond the polar circles the sun can stay below the horizon
/// (polar night) or above it (midnight sun) for the whole day. This is a
/// legitimate outcome of the calculation, not a defect, and is never replaced
/// with a fallback value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoSuchEvent {
    NeverRises,
    NeverSets,
}

impl NoSuchEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoSuchEvent::NeverRises => "never rises",
            NoSuchEvent::NeverSets => "never sets",
        }
    }
}

impl fmt::Display for NoSuchEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NoSuchEvent::NeverRises => {
                write!(f, "the sun never rises at this location on the given date")
            }
            NoSuchEvent::NeverSets => {
                write!(f, "the sun never sets at this location on the given date")
            }
        }
    }
}

impl std::error::Error for NoSuchEvent {}

#[derive(Debug)]
pub enum SolariumError {
    Config(ConfigErrorKind),
    Event(NoSuchEvent),
}

#[derive(Debug)]
pub enum ConfigErrorKind {
    InvalidCoordinates(&'static str),
    InvalidTomlFile(String),
}

impl fmt::Display for SolariumError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolariumError::Config(kind) => match kind {
                ConfigErrorKind::InvalidCoordinates(msg) => {
                    write!(f, "Config error: invalid coordinates - {msg}")
                }
                ConfigErrorKind::InvalidTomlFile(msg) => {
                    write!(f, "Config error: invalid TOML file - {msg}")
                }
            },
            SolariumError::Event(event) => write!(f, "{event}"),
        }
    }
}

impl std::error::Error for SolariumError {}

impl From<NoSuchEvent> for SolariumError {
    fn from(event: NoSuchEvent) -> Self {
        SolariumError::Event(event)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn event_errors_display_their_reason() {
        assert_eq!(
            NoSuchEvent::NeverRises.to_string(),
            "the sun never rises at this location on the given date"
        );
        assert_eq!(NoSuchEvent::NeverSets.as_str(), "never sets");
    }

    #[test]
    fn event_errors_convert_to_the_crate_error() {
        let err = SolariumError::from(NoSuchEvent::NeverSets);
        assert_eq!(
            err.to_string(),
            "the sun never sets at this location on the given date"
        );
    }
}
