//! Load-time validation

use crate::ValidationError;
use core_types::ProcessDescriptor;
use std::collections::HashSet;

/// Rejects process sets the scheduler core cannot run
///
/// Checks, per process: positive CPU time, positive I/O durations, every
/// I/O offset below the CPU time, offsets in non-decreasing order. Across
/// the set: unique ids.
pub fn validate(descriptors: &[ProcessDescriptor]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();

    for descriptor in descriptors {
        let id = descriptor.id;
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId(id));
        }

        if descriptor.cpu_time == 0 {
            return Err(ValidationError::ZeroCpuTime { id });
        }

        let mut previous: Option<u64> = None;
        for (index, event) in descriptor.io_events.iter().enumerate() {
            if event.duration == 0 {
                return Err(ValidationError::ZeroIoDuration { id, index });
            }
            if event.offset >= descriptor.cpu_time {
                return Err(ValidationError::OffsetOutOfRange {
                    id,
                    offset: event.offset,
                    cpu_time: descriptor.cpu_time,
                });
            }
            if let Some(previous) = previous.filter(|&p| event.offset < p) {
                return Err(ValidationError::UnorderedOffsets {
                    id,
                    previous,
                    offset: event.offset,
                });
            }
            previous = Some(event.offset);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::ProcessId;

    #[test]
    fn test_valid_set() {
        let descs = vec![
            ProcessDescriptor::new(0, 0, 4).with_io(0, 1).with_io(3, 2),
            ProcessDescriptor::new(1, 0, 1),
        ];
        assert_eq!(validate(&descs), Ok(()));
    }

    #[test]
    fn test_zero_cpu_time() {
        let descs = vec![ProcessDescriptor::new(3, 0, 0)];
        assert_eq!(
            validate(&descs),
            Err(ValidationError::ZeroCpuTime {
                id: ProcessId::new(3)
            })
        );
    }

    #[test]
    fn test_zero_io_duration() {
        let descs = vec![ProcessDescriptor::new(0, 0, 4).with_io(1, 1).with_io(2, 0)];
        assert_eq!(
            validate(&descs),
            Err(ValidationError::ZeroIoDuration {
                id: ProcessId::new(0),
                index: 1
            })
        );
    }

    #[test]
    fn test_offset_must_be_below_cpu_time() {
        let descs = vec![ProcessDescriptor::new(0, 0, 3).with_io(3, 1)];
        assert!(matches!(
            validate(&descs),
            Err(ValidationError::OffsetOutOfRange {
                offset: 3,
                cpu_time: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_offsets_must_not_decrease() {
        let descs = vec![ProcessDescriptor::new(0, 0, 5).with_io(3, 1).with_io(1, 1)];
        assert!(matches!(
            validate(&descs),
            Err(ValidationError::UnorderedOffsets {
                previous: 3,
                offset: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_repeated_offsets_allowed() {
        let descs = vec![ProcessDescriptor::new(0, 0, 5).with_io(2, 1).with_io(2, 3)];
        assert_eq!(validate(&descs), Ok(()));
    }

    #[test]
    fn test_duplicate_ids() {
        let descs = vec![
            ProcessDescriptor::new(1, 0, 1),
            ProcessDescriptor::new(1, 2, 1),
        ];
        assert_eq!(
            validate(&descs),
            Err(ValidationError::DuplicateId(ProcessId::new(1)))
        );
    }
}
