use super::types::{Destination, Source};

#[derive(Debug, Default)]
pub(super) struct DragSession {
    next_id: u64,
    active: Option<ActiveSession>,
}

#[derive(Debug)]
pub(super) struct ActiveSession {
    pub(super) id: u64,
    pub(super) source: Source,
    pub(super) destination: Option<Destination>,
    pub(super) samples: u64,
}

impl DragSession {
    /// Open a session for `source`. Returns the new session id, or `None` if one is
    /// already active (which is left untouched).
    pub(super) fn begin(&mut self, source: Source) -> Option<u64> {
        if self.active.is_some() {
            return None;
        }
        let id = self.next_id.max(1);
        self.next_id = id.saturating_add(1);
        self.active = Some(ActiveSession {
            id,
            source,
            destination: None,
            samples: 0,
        });
        Some(id)
    }

    pub(super) fn active(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    pub(super) fn active_mut(&mut self) -> Option<&mut ActiveSession> {
        self.active.as_mut()
    }

    pub(super) fn end(&mut self) -> Option<ActiveSession> {
        self.active.take()
    }
}

#[cfg(test)]
mod tests {
    use crate::reorder::types::DragMode;
    use crate::surface::NodeId;

    use super::*;

    fn source(n: u64) -> Source {
        Source {
            element: NodeId::from_u64(n),
            mode: DragMode::Move,
        }
    }

    #[test]
    fn begin_is_ignored_while_active() {
        let mut session = DragSession::default();
        assert_eq!(session.begin(source(1)), Some(1));
        assert_eq!(session.begin(source(2)), None);
        assert_eq!(
            session.active().map(|a| a.source.element),
            Some(NodeId::from_u64(1))
        );
    }

    #[test]
    fn ids_keep_increasing_across_sessions() {
        let mut session = DragSession::default();
        assert_eq!(session.begin(source(1)), Some(1));
        let ended = session.end().expect("session was active");
        assert_eq!(ended.id, 1);
        assert!(session.active().is_none());
        assert_eq!(session.begin(source(1)), Some(2));
    }
}
