//! Run-length compression of per-slot quality and event metadata.

use crate::slots::Slot;

/// A maximal run of consecutive slots sharing one
/// `(quality, event_code, event_desc)` triple.
///
/// Runs partition the day's slot sequence with no gaps or overlaps; the
/// end of a run is the start of the next (or the slot count for the last
/// run).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EventRun {
    pub start: usize,
    pub quality: Option<String>,
    pub event_code: Option<String>,
    pub event_desc: Option<String>,
}

impl EventRun {
    fn matches(&self, slot: &Slot) -> bool {
        self.quality == slot.quality
            && self.event_code == slot.event_code
            && self.event_desc == slot.event_desc
    }
}

/// Scans a day's slot sequence left to right and collects maximal runs of
/// identical quality/event metadata.
///
/// A non-empty input always yields at least one run starting at slot 0.
pub(crate) fn compress_runs(slots: &[Slot]) -> Vec<EventRun> {
    let mut runs: Vec<EventRun> = Vec::new();

    for (pos, slot) in slots.iter().enumerate() {
        if runs.last().is_some_and(|run| run.matches(slot)) {
            continue;
        }
        runs.push(EventRun {
            start: pos,
            quality: slot.quality.clone(),
            event_code: slot.event_code.clone(),
            event_desc: slot.event_desc.clone(),
        });
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(quality: Option<&str>, code: Option<&str>, desc: Option<&str>) -> Slot {
        Slot {
            value: 1.0,
            quality: quality.map(str::to_string),
            event_code: code.map(str::to_string),
            event_desc: desc.map(str::to_string),
        }
    }

    #[test]
    fn uniform_day_is_one_run() {
        let slots = vec![slot(Some("A"), None, None); 48];
        let runs = compress_runs(&slots);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].start, 0);
        assert_eq!(runs[0].quality.as_deref(), Some("A"));
    }

    #[test]
    fn quality_change_starts_new_run() {
        let mut slots = vec![slot(Some("A"), None, None); 4];
        slots.extend(vec![slot(Some("N"), None, None); 2]);
        slots.extend(vec![slot(Some("A"), None, None); 4]);

        let runs = compress_runs(&slots);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].start, 0);
        assert_eq!(runs[1].start, 4);
        assert_eq!(runs[1].quality.as_deref(), Some("N"));
        assert_eq!(runs[2].start, 6);
    }

    #[test]
    fn event_desc_change_starts_new_run() {
        let slots = vec![
            slot(Some("E"), Some("52"), Some("estimated")),
            slot(Some("E"), Some("52"), Some("substituted")),
        ];
        let runs = compress_runs(&slots);
        assert_eq!(runs.len(), 2);
    }

    #[test]
    fn absent_metadata_is_a_run_value() {
        // None quality is distinct from "A", not a wildcard.
        let slots = vec![slot(None, None, None), slot(Some("A"), None, None)];
        let runs = compress_runs(&slots);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].quality, None);
    }

    #[test]
    fn empty_input_yields_no_runs() {
        assert!(compress_runs(&[]).is_empty());
    }
}
