//! Progress indicator output

use tracing::debug;

const BAR_WIDTH: usize = 20;

/// Receives the elapsed fraction of the current phase, in [0, 1]
pub trait ProgressRenderer: Send + Sync {
    fn set_progress(&self, fraction: f64);
}

/// Renders progress as a text bar in the debug log
#[derive(Debug, Clone, Default)]
pub struct TracingProgressRenderer;

impl ProgressRenderer for TracingProgressRenderer {
    fn set_progress(&self, fraction: f64) {
        debug!("Progress {}", render_bar(fraction));
    }
}

/// Format a fraction as `[#####.....]  50%`
pub fn render_bar(fraction: f64) -> String {
    let fraction = fraction.clamp(0.0, 1.0);
    let filled = (fraction * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        (fraction * 100.0).round() as u32
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_full_bars() {
        assert_eq!(render_bar(0.0), format!("[{}]   0%", ".".repeat(BAR_WIDTH)));
        assert_eq!(render_bar(1.0), format!("[{}] 100%", "#".repeat(BAR_WIDTH)));
    }

    #[test]
    fn half_bar() {
        assert_eq!(
            render_bar(0.5),
            format!("[{}{}]  50%", "#".repeat(10), ".".repeat(10))
        );
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(render_bar(1.7), render_bar(1.0));
        assert_eq!(render_bar(-0.2), render_bar(0.0));
    }
}
