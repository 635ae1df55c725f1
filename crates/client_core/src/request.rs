use shared::domain::RequestId;

/// Issues request ids and decides which resolutions are still authoritative.
///
/// Only the most recently issued id is accepted, once, and only while the
/// owner is live. Retiring the tracker makes every outstanding id stale.
#[derive(Debug, Clone)]
pub struct RequestTracker {
    last_issued: u64,
    in_flight: Option<RequestId>,
    live: bool,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self {
            last_issued: 0,
            in_flight: None,
            live: true,
        }
    }

    pub fn issue(&mut self) -> RequestId {
        self.last_issued += 1;
        let id = RequestId(self.last_issued);
        self.in_flight = Some(id);
        id
    }

    /// Returns `true` exactly once for the latest issued id.
    pub fn accept(&mut self, id: RequestId) -> bool {
        if self.live && self.in_flight == Some(id) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn retire(&mut self) {
        self.live = false;
        self.in_flight = None;
    }

    pub fn revive(&mut self) {
        self.live = true;
    }
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_id_is_accepted_once() {
        let mut tracker = RequestTracker::new();
        let first = tracker.issue();
        let second = tracker.issue();
        assert!(first < second);

        assert!(!tracker.accept(first));
        assert!(tracker.accept(second));
        assert!(!tracker.accept(second));
        assert_eq!(tracker.in_flight(), None);
    }

    #[test]
    fn retired_tracker_rejects_outstanding_ids() {
        let mut tracker = RequestTracker::new();
        let id = tracker.issue();
        tracker.retire();
        assert!(!tracker.accept(id));

        tracker.revive();
        assert!(!tracker.accept(id));
        let fresh = tracker.issue();
        assert!(tracker.accept(fresh));
    }
}
