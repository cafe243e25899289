//! Point store bound to its table and chart files.
//!
//! Every successful store mutation is followed by the work its [`Followup`] names before the
//! call returns, so the table on disk always reflects the last applied mutation.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{error, info, warn};

use crate::persist::{self, PersistError};
use crate::render::{self, ChartSpec, ExportError};
use crate::store::{Added, CommitResult, Followup, PointHandle, PointStore, StoreError};
use crate::types::Point;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The mutation was applied; only the table write failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
    /// The mutation and table write succeeded; only the chart failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl SessionError {
    /// Whether the store changed despite the error.
    pub const fn store_changed(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

pub struct Session {
    store: PointStore,
    table_path: PathBuf,
    chart_path: PathBuf,
    chart: ChartSpec,
    last_saved: Option<SystemTime>,
}

impl Session {
    /// Load the table at `table_path`, creating a header-only one when absent.
    pub fn open(
        table_path: PathBuf,
        chart_path: PathBuf,
        chart: ChartSpec,
    ) -> Result<Self, PersistError> {
        if persist::ensure_table(&table_path)? {
            info!("Created empty table {}", table_path.display());
        }
        let table = persist::load_points(&table_path)?;
        info!(
            "Loaded {} points from {}; next id {}",
            table.points.len(),
            table_path.display(),
            table.next_id
        );
        Ok(Self {
            store: PointStore::from_loaded(table),
            table_path,
            chart_path,
            chart,
            last_saved: None,
        })
    }

    pub const fn store(&self) -> &PointStore {
        &self.store
    }

    pub fn points(&self) -> &[Point] {
        self.store.points()
    }

    pub fn table_path(&self) -> &Path {
        &self.table_path
    }

    pub fn chart_path(&self) -> &Path {
        &self.chart_path
    }

    /// Time of the last successful table write in this session.
    pub const fn last_saved(&self) -> Option<SystemTime> {
        self.last_saved
    }

    /// Add a point at the next slot of the current id.
    ///
    /// When that slot is already taken the indicator still moves on, so the next click fills
    /// the other slot.
    pub fn place_point(&mut self, x: f64, y: f64) -> Result<Added, SessionError> {
        let slot = self.store.next_slot();
        match self.store.add_point(slot, x, y) {
            Ok(added) => {
                info!(
                    "Added {} (id={}): ({:.1}, {:.1})",
                    added.point.slot, added.point.id, added.point.x, added.point.y
                );
                self.run(added.followup)?;
                Ok(added)
            }
            Err(err) => {
                if matches!(err, StoreError::SlotOccupied { .. }) {
                    self.store.advance_slot();
                }
                warn!("{err}");
                Err(err.into())
            }
        }
    }

    pub fn move_point(&mut self, handle: PointHandle, x: f64, y: f64) -> Result<(), SessionError> {
        let followup = self.store.update_position(handle, x, y).inspect_err(|err| {
            warn!("{err}");
        })?;
        info!("Moved point to ({x:.1}, {y:.1})");
        self.run(followup)
    }

    /// Fix the current id, then rewrite the table and the chart.
    pub fn commit(&mut self) -> Result<CommitResult, SessionError> {
        let result = self.store.commit_current_id().inspect_err(|err| {
            warn!("{err}");
        })?;
        info!(
            "Fixed id={} ({} points); next id={}",
            result.id,
            result.fixed.len(),
            result.next_id
        );
        self.run(result.followup)?;
        Ok(result)
    }

    fn run(&mut self, followup: Followup) -> Result<(), SessionError> {
        persist::save_points(&self.table_path, self.store.points()).inspect_err(|err| {
            error!("{err}");
        })?;
        self.last_saved = Some(SystemTime::now());
        if followup.exports() {
            render::export_chart(self.store.points(), &self.chart, &self.chart_path)
                .inspect_err(|err| error!("{err}"))?;
            info!("Exported chart {}", self.chart_path.display());
        }
        Ok(())
    }
}
