//! Pixel geometry for render instructions.
//!
//! A reference [`RenderSink`] that turns column assignments into boxes on a
//! vertical track, one pixel per minute. Width is split evenly between the
//! pocket's columns and offset by a left margin.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::layout::{RenderInstruction, RenderSink};

/// Track dimensions, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Width shared by the columns of a pocket.
    pub width: f64,
    /// Offset of column 0 from the left edge.
    pub margin: f64,
    /// Space between an event's box and its content.
    pub gutter: f64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            margin: 10.0,
            gutter: 5.0,
        }
    }
}

impl TrackConfig {
    /// # Errors
    ///
    /// [`LayoutError::InvalidTrack`] for a non-positive width, a negative
    /// margin or gutter, or a gutter that would swallow a full-width box.
    pub fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(LayoutError::InvalidTrack(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(LayoutError::InvalidTrack(format!(
                "margin must be non-negative, got {}",
                self.margin
            )));
        }
        if !self.gutter.is_finite() || self.gutter < 0.0 || self.gutter >= self.width {
            return Err(LayoutError::InvalidTrack(format!(
                "gutter must be in [0, {}), got {}",
                self.width, self.gutter
            )));
        }
        Ok(())
    }

    pub fn geometry(&self, instruction: &RenderInstruction) -> Geometry {
        let width = self.width / instruction.column_count as f64;
        let interval = &instruction.interval;
        Geometry {
            top: interval.start() as f64,
            left: self.margin + width * instruction.column_index as f64,
            width,
            height: interval.duration() as f64,
            content_width: width - self.gutter,
        }
    }
}

/// A box on the track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub content_width: f64,
}

/// A render instruction with its computed box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    #[serde(flatten)]
    pub instruction: RenderInstruction,
    pub geometry: Geometry,
}

/// Collects [`Placement`]s for every instruction it receives.
#[derive(Debug, Clone, Default)]
pub struct PlacementSink {
    config: TrackConfig,
    placements: Vec<Placement>,
}

impl PlacementSink {
    /// # Errors
    ///
    /// Whatever [`TrackConfig::validate`] rejects.
    pub fn new(config: TrackConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            placements: Vec::new(),
        })
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn into_placements(self) -> Vec<Placement> {
        self.placements
    }
}

impl RenderSink for PlacementSink {
    fn clear(&mut self) {
        self.placements.clear();
    }

    fn render(&mut self, instruction: RenderInstruction) {
        let geometry = self.config.geometry(&instruction);
        self.placements.push(Placement {
            instruction,
            geometry,
        });
    }
}
