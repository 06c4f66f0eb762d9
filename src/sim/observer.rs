use crate::app::Crossing;
use crate::geometry::{Rect, intersection_ratio};

/// Threshold observer over the scroll container.
///
/// Records a crossing for every target on first observation and afterwards
/// only when a target's side of the threshold changes.
#[derive(Debug)]
pub struct ThresholdObserver {
    threshold: f32,
    root_margin: f32,
    last: Vec<Option<bool>>,
    queue: Vec<Crossing>,
}

impl ThresholdObserver {
    pub fn new(targets: usize, threshold: f32, root_margin: f32) -> Self {
        ThresholdObserver {
            threshold,
            root_margin,
            last: vec![None; targets],
            queue: Vec::new(),
        }
    }

    pub fn observe<I>(&mut self, root: Rect, targets: I)
    where
        I: IntoIterator<Item = (usize, Rect)>,
    {
        for (section, rect) in targets {
            let Some(last) = self.last.get_mut(section) else {
                continue;
            };
            let intersecting = intersection_ratio(rect, root, self.root_margin) >= self.threshold;
            if *last != Some(intersecting) {
                *last = Some(intersecting);
                self.queue.push(Crossing {
                    section,
                    intersecting,
                });
            }
        }
    }

    /// Drain records queued but not yet delivered.
    pub fn take_records(&mut self) -> Vec<Crossing> {
        std::mem::take(&mut self.queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(scroll_top: f32) -> Vec<(usize, Rect)> {
        (0..3)
            .map(|idx| (idx, Rect::new(idx as f32 * 800.0 - scroll_top, 800.0)))
            .collect()
    }

    #[test]
    fn first_observation_reports_everything() {
        let mut observer = ThresholdObserver::new(3, 0.65, 1.0);
        observer.observe(Rect::new(0.0, 800.0), layout(0.0));
        let records = observer.take_records();
        assert_eq!(records.len(), 3);
        assert!(records[0].intersecting);
        assert!(!records[1].intersecting && !records[2].intersecting);
        assert!(observer.take_records().is_empty());
    }

    #[test]
    fn only_changes_are_recorded() {
        let mut observer = ThresholdObserver::new(3, 0.65, 1.0);
        observer.observe(Rect::new(0.0, 800.0), layout(0.0));
        observer.take_records();

        observer.observe(Rect::new(0.0, 800.0), layout(100.0));
        assert!(observer.take_records().is_empty());

        observer.observe(Rect::new(0.0, 800.0), layout(500.0));
        assert_eq!(
            observer.take_records(),
            vec![Crossing {
                section: 0,
                intersecting: false
            }]
        );
    }
}
