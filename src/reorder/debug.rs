use crate::surface::Surface;

use super::DragController;

impl<S: Surface> DragController<S> {
    pub(super) fn debug_log_event(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("{message}");
        if !self.options.debug_event_log {
            return;
        }
        let cap = self.options.debug_event_log_capacity.clamp(1, 10_000);
        while self.debug_log.len() >= cap {
            self.debug_log.pop_front();
        }
        self.debug_log
            .push_back(format!("[sample {}] {}", self.debug_sample, message));
    }

    /// Recorded debug lines, oldest first. Empty unless `options.debug_event_log` is set.
    pub fn debug_log_text(&self) -> String {
        itertools::join(&self.debug_log, "\n")
    }

    pub fn debug_log_clear(&mut self) {
        self.debug_log.clear();
    }
}
