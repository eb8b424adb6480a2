//! Calibration observer trait for progress reporting.

use crate::IterationGaps;

/// Callbacks invoked by [`Calibrator::calibrate`][crate::Calibrator::calibrate]
/// once per iteration, after deviations are computed and before volumes are
/// adjusted.
///
/// # Example — convergence printer
///
/// ```rust,ignore
/// struct GapPrinter;
///
/// impl CalibrationObserver for GapPrinter {
///     fn on_iteration(&mut self, gaps: &IterationGaps) {
///         println!(
///             "iteration {}: abs gap {:.2}, link rel {:.2}%",
///             gaps.iteration, gaps.total_abs, gaps.link_rel * 100.0,
///         );
///     }
/// }
/// ```
pub trait CalibrationObserver {
    fn on_iteration(&mut self, _gaps: &IterationGaps) {}
}

/// A [`CalibrationObserver`] that does nothing.
pub struct NoopObserver;

impl CalibrationObserver for NoopObserver {}
