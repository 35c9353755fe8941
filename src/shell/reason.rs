//! Why a recompute was requested.

bitflags::bitflags! {
    /// Triggers of a truncation pass.
    ///
    /// Only logged today, but kept as flags so coalesced triggers
    /// (`CONTENT | ROWS`) stay visible in traces.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RecomputeReason: u8 {
        const MOUNT = 1 << 0;
        const CONTENT = 1 << 1;
        const ROWS = 1 << 2;
        const MARKER = 1 << 3;
        const POSITION = 1 << 4;
        /// The trailing control changed shape or labels.
        const CONTROL = 1 << 5;
        const RESIZE = 1 << 6;
        /// Deferred pass after the surface was not attached.
        const RETRY = 1 << 7;
    }
}
