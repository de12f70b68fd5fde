// src/selection.rs

use crate::distance::check_end_distance;
use crate::error::RouteError;
use crate::geopoint::GeoPoint;

/// A selected point together with the marker that shows it on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint<H> {
    pub point: GeoPoint,
    pub marker: H,
}

impl<H> Endpoint<H> {
    pub fn new(point: GeoPoint, marker: H) -> Self {
        Endpoint { point, marker }
    }
}

/// Which endpoint the next map click sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Start,
    End,
}

/// The user's endpoint selection.
///
/// An end point only exists together with a start point. Transitions consume the
/// current state and hand back any marker that is no longer shown, so the caller can
/// remove it from the map.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<H> {
    NoSelection,
    StartOnly {
        start: Endpoint<H>,
    },
    StartAndEnd {
        start: Endpoint<H>,
        end: Endpoint<H>,
    },
}

impl<H> Default for Selection<H> {
    fn default() -> Self {
        Selection::NoSelection
    }
}

impl<H> Selection<H> {
    pub fn start(&self) -> Option<&Endpoint<H>> {
        match self {
            Selection::NoSelection => None,
            Selection::StartOnly { start } | Selection::StartAndEnd { start, .. } => Some(start),
        }
    }

    pub fn end(&self) -> Option<&Endpoint<H>> {
        match self {
            Selection::StartAndEnd { end, .. } => Some(end),
            _ => None,
        }
    }

    /// Both points, once the selection is complete.
    pub fn endpoints(&self) -> Option<(GeoPoint, GeoPoint)> {
        match self {
            Selection::StartAndEnd { start, end } => Some((start.point, end.point)),
            _ => None,
        }
    }

    /// Checks whether `candidate` may become the end point.
    ///
    /// # Returns
    /// The distance from the start in kilometers, `RouteError::StartNotSet` when there is
    /// no start, or `RouteError::EndTooFar` when the candidate is over the 3 km cap.
    pub fn admit_end(&self, candidate: &GeoPoint) -> Result<f64, RouteError> {
        match self.start() {
            Some(start) => check_end_distance(&start.point, candidate),
            None => Err(RouteError::StartNotSet),
        }
    }

    /// Replaces the start point, keeping any end point.
    ///
    /// Returns the new state and the marker of the previous start, if there was one.
    pub fn with_start(self, start: Endpoint<H>) -> (Self, Option<H>) {
        match self {
            Selection::NoSelection => (Selection::StartOnly { start }, None),
            Selection::StartOnly { start: old } => (Selection::StartOnly { start }, Some(old.marker)),
            Selection::StartAndEnd { start: old, end } => {
                (Selection::StartAndEnd { start, end }, Some(old.marker))
            }
        }
    }

    /// Replaces the end point.
    ///
    /// Returns the new state and the marker that is no longer shown: the previous end's
    /// marker, or the new end's own marker when there is no start to attach it to (the
    /// state is then left unchanged). Distance is not checked here; see [`Self::admit_end`].
    pub fn with_end(self, end: Endpoint<H>) -> (Self, Option<H>) {
        match self {
            Selection::NoSelection => (Selection::NoSelection, Some(end.marker)),
            Selection::StartOnly { start } => (Selection::StartAndEnd { start, end }, None),
            Selection::StartAndEnd { start, end: old } => {
                (Selection::StartAndEnd { start, end }, Some(old.marker))
            }
        }
    }
}
