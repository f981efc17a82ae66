//! Side effects the viewer asks of its embedding page.
//!
//! The viewer itself is pure state. Everything that touches the outside
//! world while it is open (the Escape key listener, page scroll locking,
//! telling the owner the viewer closed) goes through [`ViewerHost`].

use tracing::{debug, info};

pub trait ViewerHost {
    /// Start routing key presses to the viewer.
    fn attach_escape_listener(&mut self);
    /// Stop routing key presses to the viewer.
    fn detach_escape_listener(&mut self);
    /// Suppress page scrolling behind the overlay.
    fn lock_scroll(&mut self);
    /// Restore page scrolling.
    fn restore_scroll(&mut self);
    /// The viewer closed (button, backdrop, or Escape).
    fn on_close(&mut self);
}

/// Host that only logs; used by the CLI replay command.
#[derive(Debug, Default)]
pub struct TracingHost {
    pub closed: u32,
}

impl ViewerHost for TracingHost {
    fn attach_escape_listener(&mut self) {
        debug!("escape listener attached");
    }

    fn detach_escape_listener(&mut self) {
        debug!("escape listener detached");
    }

    fn lock_scroll(&mut self) {
        debug!("page scroll locked");
    }

    fn restore_scroll(&mut self) {
        debug!("page scroll restored");
    }

    fn on_close(&mut self) {
        self.closed += 1;
        info!("viewer closed");
    }
}
