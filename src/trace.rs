//! Debug-level instrumentation for the decode, suppress, and detect stages.
//!
//! Call sites use `trace_span!` and `trace_event!` unconditionally. Every
//! record goes to the `yolopost` target with a stage name and candidate
//! counts. Without the `tracing` feature both macros only evaluate their
//! field values and spans become [`NoopSpan`].

#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($stage:literal, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::debug_span!(target: "yolopost", $stage, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($stage:literal, $($key:ident = $value:expr),+ $(,)?) => {{
        let _ = ($($value,)+);
        $crate::trace::NoopSpan
    }};
}

#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($stage:literal, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::debug!(target: "yolopost", stage = $stage, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($stage:literal, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// Guard returned by `trace_span!` when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
pub(crate) struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    #[inline]
    pub(crate) fn entered(self) -> Self {
        self
    }
}
