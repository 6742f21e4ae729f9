//! JSON process list parser

use crate::LoaderError;
use core_types::{IoEvent, ProcessDescriptor, ProcessId};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProcess {
    #[serde(default)]
    id: Option<u64>,
    arrival: u64,
    cpu_time: u64,
    #[serde(default)]
    io: Vec<(u64, u64)>,
}

impl RawProcess {
    fn into_descriptor(self, position: usize) -> ProcessDescriptor {
        ProcessDescriptor {
            id: ProcessId::new(self.id.unwrap_or(position as u64)),
            arrival: self.arrival,
            cpu_time: self.cpu_time,
            io_events: self
                .io
                .into_iter()
                .map(|(offset, duration)| IoEvent::new(offset, duration))
                .collect(),
        }
    }
}

/// Parses the JSON format
pub fn parse_json(source: &str) -> Result<Vec<ProcessDescriptor>, LoaderError> {
    let raw: Vec<RawProcess> = serde_json::from_str(source)?;
    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(position, process)| process.into_descriptor(position))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_ids() {
        let source = r#"[
            { "arrival": 0, "cpu_time": 4, "io": [[1, 2]] },
            { "id": 7, "arrival": 2, "cpu_time": 1 }
        ]"#;
        let descs = parse_json(source).unwrap();
        assert_eq!(descs[0], ProcessDescriptor::new(0, 0, 4).with_io(1, 2));
        assert_eq!(descs[1], ProcessDescriptor::new(7, 2, 1));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_json(r#"[{ "arrival": 0, "cpu_time": 1, "priority": 3 }]"#).unwrap_err();
        assert!(matches!(err, LoaderError::Json(_)));
    }

    #[test]
    fn test_negative_value_rejected() {
        let err = parse_json(r#"[{ "arrival": -1, "cpu_time": 1 }]"#).unwrap_err();
        assert!(matches!(err, LoaderError::Json(_)));
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_json("[]").unwrap().is_empty());
    }
}
