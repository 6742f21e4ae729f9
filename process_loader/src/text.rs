//! Line-based process list parser

use crate::LoaderError;
use core_types::{IoEvent, ProcessDescriptor};

/// Parses the text format
///
/// Only syntax is checked here; see [`crate::validate`] for semantics.
pub fn parse_text(source: &str) -> Result<Vec<ProcessDescriptor>, LoaderError> {
    let mut descriptors = Vec::new();

    for (line_num, line) in source.lines().enumerate() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        let id = descriptors.len() as u64;
        descriptors.push(parse_line(line, line_num + 1, id)?);
    }

    Ok(descriptors)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_line(line: &str, line_num: usize, id: u64) -> Result<ProcessDescriptor, LoaderError> {
    let fields = line
        .split_whitespace()
        .map(|token| parse_number(token, line_num))
        .collect::<Result<Vec<u64>, _>>()?;

    let (header, io) = match fields.as_slice() {
        [arrival, cpu_time, io @ ..] => ((*arrival, *cpu_time), io),
        _ => {
            return Err(LoaderError::ParseError {
                line: line_num,
                message: "expected `<arrival> <cpu_time> [<io_offset> <io_duration>]...`"
                    .to_string(),
            })
        }
    };

    if io.len() % 2 != 0 {
        return Err(LoaderError::ParseError {
            line: line_num,
            message: "I/O events must be `<offset> <duration>` pairs".to_string(),
        });
    }

    let mut descriptor = ProcessDescriptor::new(id, header.0, header.1);
    descriptor.io_events = io
        .chunks_exact(2)
        .map(|pair| IoEvent::new(pair[0], pair[1]))
        .collect();
    Ok(descriptor)
}

fn parse_number(token: &str, line_num: usize) -> Result<u64, LoaderError> {
    token.parse().map_err(|_| LoaderError::ParseError {
        line: line_num,
        message: format!("invalid non-negative integer `{}`", token),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::ProcessId;

    #[test]
    fn test_parse_simple_lines() {
        let descs = parse_text("0 2\n3 5 1 4\n").unwrap();
        assert_eq!(descs.len(), 2);
        assert_eq!(descs[0], ProcessDescriptor::new(0, 0, 2));
        assert_eq!(descs[1], ProcessDescriptor::new(1, 3, 5).with_io(1, 4));
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let source = r#"
            # arrival cpu io...
            0 2   # first

            1 1
        "#;
        let descs = parse_text(source).unwrap();
        assert_eq!(descs.len(), 2);
        assert_eq!(descs[1].id, ProcessId::new(1));
    }

    #[test]
    fn test_multiple_io_events_keep_order() {
        let descs = parse_text("0 10 2 1 5 3 5 2").unwrap();
        assert_eq!(
            descs[0].io_events,
            vec![IoEvent::new(2, 1), IoEvent::new(5, 3), IoEvent::new(5, 2)]
        );
    }

    #[test]
    fn test_missing_cpu_time() {
        let err = parse_text("0\n").unwrap_err();
        assert!(matches!(err, LoaderError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_odd_io_fields() {
        let err = parse_text("0 2\n0 4 1\n").unwrap_err();
        assert!(matches!(err, LoaderError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_negative_number_rejected() {
        let err = parse_text("0 -3").unwrap_err();
        assert!(err.to_string().contains("`-3`"));
    }

    #[test]
    fn test_empty_source() {
        assert!(parse_text("").unwrap().is_empty());
    }
}
