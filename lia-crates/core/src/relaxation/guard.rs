use std::ops::Deref;
use std::ops::DerefMut;

use super::Relaxation;

/// Disables the tracking of pivoted rows for as long as the guard lives.
///
/// The previous setting is restored when the guard is dropped, which also happens when a check
/// returns early or unwinds. The relaxation is accessed through the guard in the meantime.
#[derive(Debug)]
pub(crate) struct TrackPivotedRowsGuard<'a> {
    relaxation: &'a mut dyn Relaxation,
    previous: bool,
}

impl<'a> TrackPivotedRowsGuard<'a> {
    pub(crate) fn new(relaxation: &'a mut dyn Relaxation) -> Self {
        let previous = relaxation.track_pivoted_rows();
        relaxation.set_track_pivoted_rows(false);
        TrackPivotedRowsGuard {
            relaxation,
            previous,
        }
    }
}

impl<'a> Deref for TrackPivotedRowsGuard<'a> {
    type Target = dyn Relaxation + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.relaxation
    }
}

impl<'a> DerefMut for TrackPivotedRowsGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.relaxation
    }
}

impl Drop for TrackPivotedRowsGuard<'_> {
    fn drop(&mut self) {
        self.relaxation.set_track_pivoted_rows(self.previous);
    }
}
