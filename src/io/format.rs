//! Nice QcRef output formatting.

use std::fmt;

use log;

const QCREF_BANNER_LENGTH: usize = 103;

/// Logs a main output line to the `qcref-output` logger.
macro_rules! qcref_output {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::info!(target: "qcref-output", $fmt, $($($arg)*)?); }
}

/// Logs a nicely formatted section title to the `qcref-output` logger.
pub(crate) fn log_title(title: &str) {
    let length = title.chars().count().max(QCREF_BANNER_LENGTH - 6);
    let bar = "─".repeat(length);
    qcref_output!("┌──{bar}──┐");
    qcref_output!("│§ {title:^length$} §│");
    qcref_output!("└──{bar}──┘");
}

/// Logs a nicely formatted subtitle to the `qcref-output` logger.
pub(crate) fn log_subtitle(subtitle: &str) {
    let length = subtitle.chars().count();
    let bar = "═".repeat(length);
    qcref_output!("{}", subtitle);
    qcref_output!("{}", bar);
}

/// Turns a boolean into a string of `yes` or `no`.
pub(crate) fn nice_bool(b: bool) -> String {
    if b {
        "yes".to_string()
    } else {
        "no".to_string()
    }
}

/// A trait for logging QcRef outputs nicely.
pub(crate) trait QcRefOutput: fmt::Debug + fmt::Display {
    /// Logs display output nicely.
    fn log_output_display(&self) {
        let lines = self.to_string();
        lines.lines().for_each(|line| {
            qcref_output!("{line}");
        })
    }
}

// Blanket implementation
impl<T> QcRefOutput for T where T: fmt::Debug + fmt::Display {}
