//! Serial-console display adapter.
//!
//! Implements [`DisplayPort`] by logging each page.  The refresh loop
//! redraws every interval, so identical consecutive pages are logged
//! once.  A panel driver would implement the same trait.

use log::info;

use crate::app::ports::DisplayPort;
use crate::dashboard::StatusPage;

#[derive(Debug, Default)]
pub struct LogDisplay {
    last: Option<StatusPage>,
    redraws: u32,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages actually logged (duplicates excluded).
    pub fn redraws(&self) -> u32 {
        self.redraws
    }

    pub fn last_page(&self) -> Option<&StatusPage> {
        self.last.as_ref()
    }
}

impl DisplayPort for LogDisplay {
    fn show(&mut self, page: &StatusPage) {
        if self.last.as_ref() == Some(page) {
            return;
        }

        match page.progress {
            Some(pct) => info!("SCREEN | {} [{:>3}%]", page.title, pct),
            None => info!("SCREEN | {}", page.title),
        }
        for line in page.body.lines() {
            info!("SCREEN |   {}", line);
        }

        self.redraws += 1;
        self.last = Some(page.clone());
    }
}
