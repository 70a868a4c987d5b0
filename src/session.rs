//! Interactive table placement session.
//!
//! The editor walks a single table through
//!
//! ```text
//! Idle -> Configuring -> Previewing -> Committed -> Idle
//!                   \              \-> Cancelled -> Idle
//!                    \-> Committed (direct commit, no preview)
//! ```
//!
//! The session owns the base seat positions and only recomputes them when the
//! shape, seat count or size changes. Rotating, scaling and moving a preview
//! reuse the cached positions through a [`Placement`] transform.
//!
//! The whole session, its `LayoutConfig` included, is plain data and
//! serializes with serde, so a UI can store it in whatever state container
//! it uses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::{
    compute_seat_positions_with_clearance, LayoutConfig, LayoutError, Placement, PlacedTable,
    Point, Seat, TableLayout, TableShape, TableSize, TableSpec,
};

/// Rotation change per step button press, in degrees
pub const ROTATION_STEP: f64 = 15.0;
/// Scale change per step button press
pub const SCALE_STEP: f64 = 0.1;
pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 2.0;

/// Errors returned by session operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The operation is not allowed in the current state
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    /// An edit produced a table that cannot be laid out
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// A slider or drag produced NaN or infinity
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
}

/// Where the session is in the placement flow
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    Configuring {
        spec: TableSpec,
        base_seats: Vec<Point>,
    },
    Previewing {
        spec: TableSpec,
        base_seats: Vec<Point>,
        placement: Placement,
    },
    Committed {
        table: PlacedTable,
    },
    Cancelled,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Configuring { .. } => "configuring",
            SessionState::Previewing { .. } => "previewing",
            SessionState::Committed { .. } => "committed",
            SessionState::Cancelled => "cancelled",
        }
    }

    /// Committed and Cancelled end a placement
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Committed { .. } | SessionState::Cancelled)
    }
}

/// State machine driving one table from configuration to placement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlacementSession {
    state: SessionState,
    /// Number of times seat geometry has been computed
    geometry_revision: u64,
    #[serde(default)]
    config: LayoutConfig,
}

impl PlacementSession {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            state: SessionState::Idle,
            geometry_revision: 0,
            config,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn geometry_revision(&self) -> u64 {
        self.geometry_revision
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Current table spec while configuring or previewing
    pub fn spec(&self) -> Option<&TableSpec> {
        match &self.state {
            SessionState::Configuring { spec, .. } | SessionState::Previewing { spec, .. } => {
                Some(spec)
            }
            SessionState::Committed { table } => Some(&table.layout.spec),
            SessionState::Idle | SessionState::Cancelled => None,
        }
    }

    /// Current placement while previewing
    pub fn placement(&self) -> Option<&Placement> {
        match &self.state {
            SessionState::Previewing { placement, .. } => Some(placement),
            SessionState::Committed { table } => Some(&table.placement),
            _ => None,
        }
    }

    /// Open the table creator with a default round table
    pub fn open(&mut self) -> Result<(), SessionError> {
        self.open_with(TableSpec::default())
    }

    /// Open the table creator with an initial spec
    pub fn open_with(&mut self, spec: TableSpec) -> Result<(), SessionError> {
        if !matches!(self.state, SessionState::Idle) {
            return Err(self.invalid("open the table creator"));
        }
        spec.validate(&self.config)?;
        let base_seats = compute_geometry(&self.config, &mut self.geometry_revision, &spec);
        self.transition(self.state.name(), SessionState::Configuring { spec, base_seats });
        Ok(())
    }

    pub fn set_shape(&mut self, shape: TableShape) -> Result<(), SessionError> {
        self.edit_spec(|spec| spec.shape = shape)
    }

    pub fn set_seat_count(&mut self, seat_count: u32) -> Result<(), SessionError> {
        self.edit_spec(|spec| spec.seat_count = seat_count)
    }

    pub fn set_size(&mut self, width: f64, height: f64) -> Result<(), SessionError> {
        self.edit_spec(|spec| spec.size = TableSize::new(width, height))
    }

    pub fn set_label(&mut self, label: Option<String>) -> Result<(), SessionError> {
        self.edit_spec(|spec| spec.label = label)
    }

    pub fn set_category(&mut self, category: Option<String>) -> Result<(), SessionError> {
        self.edit_spec(|spec| spec.category = category)
    }

    /// Apply an edit to the spec, recomputing seats only if geometry changed.
    ///
    /// An edit that fails validation leaves the session untouched.
    pub fn edit_spec(&mut self, edit: impl FnOnce(&mut TableSpec)) -> Result<(), SessionError> {
        let state = self.state.name();
        let (spec, base_seats) = match &mut self.state {
            SessionState::Configuring { spec, base_seats }
            | SessionState::Previewing {
                spec, base_seats, ..
            } => (spec, base_seats),
            _ => {
                return Err(SessionError::InvalidTransition {
                    action: "edit the table",
                    state,
                })
            }
        };

        let mut updated = spec.clone();
        edit(&mut updated);
        updated.validate(&self.config)?;

        if updated.geometry_differs(spec) {
            *base_seats = compute_geometry(&self.config, &mut self.geometry_revision, &updated);
        }
        *spec = updated;
        Ok(())
    }

    /// Table-local layout shown next to the configuration form
    pub fn inline_preview(&self) -> Result<TableLayout, SessionError> {
        match &self.state {
            SessionState::Configuring { spec, base_seats }
            | SessionState::Previewing {
                spec, base_seats, ..
            } => Ok(TableLayout::from_positions(spec.clone(), base_seats)),
            _ => Err(self.invalid("show an inline preview")),
        }
    }

    /// Enter interactive placement with the table centered at `position`
    pub fn start_preview(&mut self, position: Point) -> Result<(), SessionError> {
        ensure_finite("position", position)?;
        let from = self.state.name();
        match std::mem::take(&mut self.state) {
            SessionState::Configuring { spec, base_seats } => {
                self.transition(
                    from,
                    SessionState::Previewing {
                        spec,
                        base_seats,
                        placement: Placement::at(position),
                    },
                );
                Ok(())
            }
            other => {
                self.state = other;
                Err(self.invalid("start a preview"))
            }
        }
    }

    /// Rotate by whole steps of [`ROTATION_STEP`]; negative steps turn back
    pub fn rotate_step(&mut self, steps: i32) -> Result<f64, SessionError> {
        let placement = self.placement_mut("rotate")?;
        placement.rotation = normalize_rotation(placement.rotation + ROTATION_STEP * steps as f64);
        Ok(placement.rotation)
    }

    /// Set the rotation from the continuous slider
    pub fn set_rotation(&mut self, degrees: f64) -> Result<f64, SessionError> {
        if !degrees.is_finite() {
            return Err(SessionError::NonFinite { field: "rotation" });
        }
        let placement = self.placement_mut("rotate")?;
        placement.rotation = normalize_rotation(degrees);
        Ok(placement.rotation)
    }

    /// Scale by whole steps of [`SCALE_STEP`], clamped to the allowed range
    pub fn scale_step(&mut self, steps: i32) -> Result<f64, SessionError> {
        let placement = self.placement_mut("scale")?;
        let stepped = ((placement.scale + SCALE_STEP * steps as f64) * 10.0).round() / 10.0;
        placement.scale = stepped.clamp(MIN_SCALE, MAX_SCALE);
        Ok(placement.scale)
    }

    /// Set the scale from the continuous slider, clamped to the allowed range
    pub fn set_scale(&mut self, scale: f64) -> Result<f64, SessionError> {
        if !scale.is_finite() {
            return Err(SessionError::NonFinite { field: "scale" });
        }
        let placement = self.placement_mut("scale")?;
        placement.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        Ok(placement.scale)
    }

    /// Move the previewed table center to `position`
    pub fn move_to(&mut self, position: Point) -> Result<(), SessionError> {
        ensure_finite("position", position)?;
        self.placement_mut("move")?.position = position;
        Ok(())
    }

    /// Seats of the live preview in canvas coordinates
    pub fn preview(&self) -> Result<Vec<Seat>, SessionError> {
        match &self.state {
            SessionState::Previewing {
                spec,
                base_seats,
                placement,
            } => Ok(placement.apply(&TableLayout::from_positions(spec.clone(), base_seats))),
            _ => Err(self.invalid("render a preview")),
        }
    }

    /// Confirm the previewed placement
    pub fn commit(&mut self) -> Result<PlacedTable, SessionError> {
        let from = self.state.name();
        match std::mem::take(&mut self.state) {
            SessionState::Previewing {
                spec,
                base_seats,
                placement,
            } => {
                let table =
                    PlacedTable::new(TableLayout::from_positions(spec, &base_seats), placement);
                self.transition(
                    from,
                    SessionState::Committed {
                        table: table.clone(),
                    },
                );
                Ok(table)
            }
            other => {
                self.state = other;
                Err(self.invalid("commit"))
            }
        }
    }

    /// Place the configured table without previewing it first
    pub fn commit_immediately(&mut self, position: Point) -> Result<PlacedTable, SessionError> {
        ensure_finite("position", position)?;
        let from = self.state.name();
        match std::mem::take(&mut self.state) {
            SessionState::Configuring { spec, base_seats } => {
                let table = PlacedTable::new(
                    TableLayout::from_positions(spec, &base_seats),
                    Placement::at(position),
                );
                self.transition(
                    from,
                    SessionState::Committed {
                        table: table.clone(),
                    },
                );
                Ok(table)
            }
            other => {
                self.state = other;
                Err(self.invalid("commit immediately"))
            }
        }
    }

    /// Abort configuration or preview without producing a table
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Configuring { .. } | SessionState::Previewing { .. } => {
                self.transition(self.state.name(), SessionState::Cancelled);
                Ok(())
            }
            _ => Err(self.invalid("cancel")),
        }
    }

    /// Return to Idle after a commit or cancel
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if !self.state.is_terminal() {
            return Err(self.invalid("reset"));
        }
        self.transition(self.state.name(), SessionState::Idle);
        Ok(())
    }

    fn placement_mut(&mut self, action: &'static str) -> Result<&mut Placement, SessionError> {
        let state = self.state.name();
        match &mut self.state {
            SessionState::Previewing { placement, .. } => Ok(placement),
            _ => Err(SessionError::InvalidTransition { action, state }),
        }
    }

    fn transition(&mut self, from: &'static str, next: SessionState) {
        tracing::debug!(from, to = next.name(), "session transition");
        self.state = next;
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}

fn compute_geometry(config: &LayoutConfig, revision: &mut u64, spec: &TableSpec) -> Vec<Point> {
    *revision += 1;
    tracing::debug!(
        shape = %spec.shape,
        seats = spec.seat_count,
        width = spec.size.width,
        height = spec.size.height,
        revision = *revision,
        "computing seat geometry"
    );
    compute_seat_positions_with_clearance(
        spec.shape,
        spec.seat_count as usize,
        spec.size.width,
        spec.size.height,
        config.seat_radius,
    )
}

pub(crate) fn normalize_rotation(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

fn ensure_finite(field: &'static str, point: Point) -> Result<(), SessionError> {
    if point.x.is_finite() && point.y.is_finite() {
        Ok(())
    } else {
        Err(SessionError::NonFinite { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configuring() -> PlacementSession {
        let mut session = PlacementSession::default();
        session.open().unwrap();
        session
    }

    fn previewing() -> PlacementSession {
        let mut session = configuring();
        session.start_preview(Point::new(200.0, 200.0)).unwrap();
        session
    }

    #[test]
    fn test_open_computes_default_geometry() {
        let session = configuring();
        assert_eq!(session.state().name(), "configuring");
        assert_eq!(session.geometry_revision(), 1);
        assert_eq!(session.inline_preview().unwrap().seats.len(), 4);
    }

    #[test]
    fn test_open_twice_fails() {
        let mut session = configuring();
        let err = session.open().unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidTransition {
                action: "open the table creator",
                state: "configuring"
            }
        );
    }

    #[test]
    fn test_label_edit_does_not_recompute() {
        let mut session = configuring();
        session.set_label(Some("VIP 1".to_string())).unwrap();
        session.set_category(Some("vip".to_string())).unwrap();
        assert_eq!(session.geometry_revision(), 1);
        let preview = session.inline_preview().unwrap();
        assert_eq!(preview.spec.label.as_deref(), Some("VIP 1"));
        assert_eq!(preview.seats[0].category.as_deref(), Some("vip"));
    }

    #[test]
    fn test_geometry_edit_recomputes() {
        let mut session = configuring();
        session.set_seat_count(6).unwrap();
        session.set_shape(TableShape::Rectangle).unwrap();
        session.set_size(160.0, 80.0).unwrap();
        assert_eq!(session.geometry_revision(), 4);
        assert_eq!(session.inline_preview().unwrap().seats.len(), 6);
    }

    #[test]
    fn test_invalid_edit_keeps_state() {
        let mut session = configuring();
        let before = session.clone();
        assert!(matches!(
            session.set_seat_count(0),
            Err(SessionError::Layout(LayoutError::InvalidSeatCount { .. }))
        ));
        assert_eq!(session, before);
    }

    #[test]
    fn test_rotation_steps_wrap() {
        let mut session = previewing();
        assert_eq!(session.rotate_step(1).unwrap(), 15.0);
        assert_eq!(session.rotate_step(-2).unwrap(), 345.0);
        assert_eq!(session.rotate_step(1).unwrap(), 0.0);
        assert_eq!(session.set_rotation(360.0).unwrap(), 0.0);
        assert_eq!(session.set_rotation(-90.0).unwrap(), 270.0);
    }

    #[test]
    fn test_scale_steps_clamp() {
        let mut session = previewing();
        assert_eq!(session.scale_step(3).unwrap(), 1.3);
        assert_eq!(session.scale_step(20).unwrap(), MAX_SCALE);
        assert_eq!(session.scale_step(-40).unwrap(), MIN_SCALE);
        assert_eq!(session.set_scale(5.0).unwrap(), MAX_SCALE);
        assert!(matches!(
            session.set_scale(f64::NAN),
            Err(SessionError::NonFinite { field: "scale" })
        ));
    }

    #[test]
    fn test_transforms_reuse_geometry() {
        let mut session = previewing();
        session.rotate_step(3).unwrap();
        session.scale_step(2).unwrap();
        session.move_to(Point::new(50.0, 60.0)).unwrap();
        assert_eq!(session.geometry_revision(), 1);
    }

    #[test]
    fn test_rotate_outside_preview_fails() {
        let mut session = configuring();
        assert!(matches!(
            session.rotate_step(1),
            Err(SessionError::InvalidTransition { action: "rotate", .. })
        ));
    }

    #[test]
    fn test_commit_and_reset() {
        let mut session = previewing();
        let table = session.commit().unwrap();
        assert_eq!(table.seats.len(), 4);
        assert!(session.state().is_terminal());
        assert!(session.commit().is_err());
        session.reset().unwrap();
        assert_eq!(session.state(), &SessionState::Idle);
    }

    #[test]
    fn test_cancel_produces_nothing() {
        let mut session = previewing();
        session.cancel().unwrap();
        assert_eq!(session.state(), &SessionState::Cancelled);
        assert!(session.preview().is_err());
        session.reset().unwrap();
        assert!(session.cancel().is_err());
    }

    #[test]
    fn test_failed_transition_keeps_state() {
        let mut session = configuring();
        assert!(session.commit().is_err());
        assert_eq!(session.state().name(), "configuring");
    }
}
