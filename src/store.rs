//! In-memory point collection and the per-id entry state machine.

use crate::persist::LoadedTable;
use crate::types::{Point, PointId, Slot};

#[cfg(test)]
mod tests;

/// Opaque reference to a stored point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointHandle(usize);

/// Rejected store mutation. The store is left unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("id {id} is already fixed; start a new entry")]
    AlreadyFixed { id: PointId },
    #[error("{slot} is already entered for id {id}")]
    SlotOccupied { id: PointId, slot: Slot },
    #[error("id {id} has no points to save")]
    NoPointsForId { id: PointId },
    #[error("no point behind this handle")]
    UnknownPoint,
    #[error("coordinate ({x}, {y}) is not finite")]
    NonFiniteCoordinate { x: f64, y: f64 },
    #[error("id {id} is the last available id and cannot be saved")]
    IdsExhausted { id: PointId },
}

/// Persistence work a successful mutation requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Followup {
    /// Rewrite the table.
    Persist,
    /// Rewrite the table, then regenerate the chart.
    PersistAndExport,
}

impl Followup {
    pub const fn exports(self) -> bool {
        matches!(self, Self::PersistAndExport)
    }
}

/// Entry progress of a single id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IdPhase {
    Empty,
    Partial,
    Full,
    Fixed,
}

impl IdPhase {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Partial => "one slot entered",
            Self::Full => "both slots entered",
            Self::Fixed => "fixed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Added {
    pub handle: PointHandle,
    pub point: Point,
    pub followup: Followup,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommitResult {
    /// Id that was fixed.
    pub id: PointId,
    /// Points that became fixed, for recoloring.
    pub fixed: Vec<PointHandle>,
    /// New current id.
    pub next_id: PointId,
    pub followup: Followup,
}

#[derive(Debug, Clone)]
pub struct PointStore {
    points: Vec<Point>,
    current_id: PointId,
    next_slot: Slot,
}

impl Default for PointStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PointStore {
    pub const fn new() -> Self {
        Self {
            points: Vec::new(),
            current_id: PointId::FIRST,
            next_slot: Slot::Before,
        }
    }

    /// Rebuild from a loaded table; the cursor starts at the table's next free id.
    pub fn from_loaded(table: LoadedTable) -> Self {
        Self {
            points: table.points,
            current_id: table.next_id,
            next_slot: Slot::Before,
        }
    }

    pub const fn current_id(&self) -> PointId {
        self.current_id
    }

    /// Slot the next click fills.
    pub const fn next_slot(&self) -> Slot {
        self.next_slot
    }

    /// Flip the next-slot indicator without touching any point.
    pub const fn advance_slot(&mut self) {
        self.next_slot = self.next_slot.opposite();
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn handles(&self) -> impl Iterator<Item = (PointHandle, &Point)> {
        self.points
            .iter()
            .enumerate()
            .map(|(idx, p)| (PointHandle(idx), p))
    }

    pub fn get(&self, handle: PointHandle) -> Option<&Point> {
        self.points.get(handle.0)
    }

    fn current_points(&self) -> impl Iterator<Item = &Point> {
        let id = self.current_id;
        self.points.iter().filter(move |p| p.id == id)
    }

    pub fn is_current_id_fixed(&self) -> bool {
        self.current_points().any(|p| p.fixed)
    }

    pub fn has_slot_for_current_id(&self, slot: Slot) -> bool {
        self.current_points().any(|p| p.slot == slot)
    }

    pub fn phase(&self, id: PointId) -> IdPhase {
        let mut count = 0;
        for p in self.points.iter().filter(|p| p.id == id) {
            if p.fixed {
                return IdPhase::Fixed;
            }
            count += 1;
        }
        match count {
            0 => IdPhase::Empty,
            1 => IdPhase::Partial,
            _ => IdPhase::Full,
        }
    }

    /// Closest point within `radius` of `(x, y)`, fixed or not.
    pub fn nearest(&self, x: f64, y: f64, radius: f64) -> Option<PointHandle> {
        let mut best: Option<(PointHandle, f64)> = None;
        for (handle, p) in self.handles() {
            let dist = (p.x - x).hypot(p.y - y);
            if dist <= radius && best.is_none_or(|(_, best_dist)| dist < best_dist) {
                best = Some((handle, dist));
            }
        }
        best.map(|(handle, _)| handle)
    }

    pub fn add_point(&mut self, slot: Slot, x: f64, y: f64) -> Result<Added, StoreError> {
        let id = self.current_id;
        if self.is_current_id_fixed() {
            return Err(StoreError::AlreadyFixed { id });
        }
        if self.has_slot_for_current_id(slot) {
            return Err(StoreError::SlotOccupied { id, slot });
        }
        ensure_finite(x, y)?;
        let point = Point::unfixed(id, slot, x, y);
        let handle = PointHandle(self.points.len());
        self.points.push(point);
        self.next_slot = slot.opposite();
        Ok(Added {
            handle,
            point,
            followup: Followup::Persist,
        })
    }

    pub fn update_position(
        &mut self,
        handle: PointHandle,
        x: f64,
        y: f64,
    ) -> Result<Followup, StoreError> {
        let point = self
            .points
            .get_mut(handle.0)
            .ok_or(StoreError::UnknownPoint)?;
        if point.fixed {
            return Err(StoreError::AlreadyFixed { id: point.id });
        }
        ensure_finite(x, y)?;
        debug_assert_eq!(point.id, self.current_id);
        point.x = x;
        point.y = y;
        Ok(Followup::Persist)
    }

    pub fn commit_current_id(&mut self) -> Result<CommitResult, StoreError> {
        let id = self.current_id;
        if !self.points.iter().any(|p| p.id == id) {
            return Err(StoreError::NoPointsForId { id });
        }
        let next_id = id.next().ok_or(StoreError::IdsExhausted { id })?;
        let mut fixed = Vec::new();
        for (idx, point) in self.points.iter_mut().enumerate() {
            if point.id == id {
                point.fixed = true;
                fixed.push(PointHandle(idx));
            }
        }
        self.current_id = next_id;
        self.next_slot = Slot::Before;
        Ok(CommitResult {
            id,
            fixed,
            next_id: self.current_id,
            followup: Followup::PersistAndExport,
        })
    }
}

fn ensure_finite(x: f64, y: f64) -> Result<(), StoreError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(StoreError::NonFiniteCoordinate { x, y })
    }
}
