//! Trace: an ordered key-vertex path and its resampled stitch sequence.
//!
//! A trace is built in two layers. Generators insert *vertices* - the minimum
//! set of points that defines the path shape. `rebuild` then resamples the
//! vertex polyline into *stitches* spaced by the machine's jump size; the
//! stitch list is what gets validated, corrected and exported.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::config::Color;
use crate::error::PatternError;
use crate::geometry::Point;

/// Minimum stitch spacing as a fraction of the jump size. Used both as the
/// default dedup threshold and as the density-lint limit.
pub const MIN_JUMP_FACTOR: f64 = 0.20;

/// Opaque render-buffer handle owned by a trace.
///
/// Stands in for the GPU-side stitch buffer of the interactive front end.
/// Every trace owns exactly one; cloning a trace allocates a fresh handle so
/// two traces never share one. Rebuilds bump the generation counter, which is
/// what an uploader would poll to know the buffer contents are stale.
#[derive(Debug)]
pub struct StitchBuffer {
    id: u64,
    generation: u64,
}

impl StitchBuffer {
    fn allocate() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            generation: 0,
        }
    }

    /// Unique handle id; never reused within a process.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Bumped every time the owning trace's stitches change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }
}

/// One continuous stitched path: key vertices plus derived stitches.
#[derive(Debug)]
pub struct Trace {
    color: Color,
    verts: Vec<Point>,
    stitches: Vec<Point>,
    jump_size: f64,
    min_jump_size: f64,
    run_length: f64,
    epsilon: f64,
    dedup: bool,
    buffer: StitchBuffer,
}

impl Clone for Trace {
    /// Deep copy of the geometry with a freshly allocated buffer handle.
    fn clone(&self) -> Self {
        Self {
            color: self.color,
            verts: self.verts.clone(),
            stitches: self.stitches.clone(),
            jump_size: self.jump_size,
            min_jump_size: self.min_jump_size,
            run_length: self.run_length,
            epsilon: self.epsilon,
            dedup: self.dedup,
            buffer: StitchBuffer::allocate(),
        }
    }
}

impl Trace {
    pub fn new(color: Color, epsilon: f64, dedup: bool) -> Self {
        Self {
            color,
            verts: Vec::new(),
            stitches: Vec::new(),
            jump_size: 0.0,
            min_jump_size: 0.0,
            run_length: 0.0,
            epsilon,
            dedup,
            buffer: StitchBuffer::allocate(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn verts(&self) -> &[Point] {
        &self.verts
    }

    pub fn stitches(&self) -> &[Point] {
        &self.stitches
    }

    pub fn jump_size(&self) -> f64 {
        self.jump_size
    }

    pub fn min_jump_size(&self) -> f64 {
        self.min_jump_size
    }

    /// Cumulative vertex-to-vertex length as inserted. Not re-derived after
    /// transforms, and not the length of the stitch polyline.
    pub fn run_length(&self) -> f64 {
        self.run_length
    }

    pub fn vertex_count(&self) -> usize {
        self.verts.len()
    }

    pub fn stitch_count(&self) -> usize {
        self.stitches.len()
    }

    pub fn buffer(&self) -> &StitchBuffer {
        &self.buffer
    }

    /// Append a vertex, extending the run length by the distance to the
    /// current last vertex.
    pub fn insert_back(&mut self, v: Point) {
        if let Some(last) = self.verts.last() {
            self.run_length += v.distance(*last);
        }
        self.verts.push(v);
    }

    /// Prepend a vertex, extending the run length by the distance to the
    /// current first vertex.
    pub fn insert_front(&mut self, v: Point) {
        if let Some(first) = self.verts.first() {
            self.run_length += v.distance(*first);
        }
        self.verts.insert(0, v);
    }

    pub fn clear(&mut self) {
        self.verts.clear();
        self.stitches.clear();
        self.run_length = 0.0;
        self.buffer.invalidate();
    }

    /// Recompute the stitch list from the vertices.
    ///
    /// A `min_jump_size` below 1e-8 counts as unset and defaults to
    /// `jump_size * 0.2`. Fails on an empty vertex list or a jump size below
    /// epsilon. Rebuilding twice with the same inputs yields identical
    /// stitches.
    pub fn rebuild(&mut self, jump_size: f64, min_jump_size: f64) -> Result<(), PatternError> {
        self.jump_size = jump_size;
        self.min_jump_size = if min_jump_size < 1e-8 {
            jump_size * MIN_JUMP_FACTOR
        } else {
            min_jump_size
        };

        self.resample()?;

        if self.stitches.is_empty() {
            return Err(PatternError::EmptyTrace);
        }

        self.buffer.invalidate();
        Ok(())
    }

    fn resample(&mut self) -> Result<(), PatternError> {
        if self.verts.is_empty() {
            return Err(PatternError::EmptyTrace);
        }
        if self.jump_size < self.epsilon {
            return Err(PatternError::InvalidParams(
                "jump size below epsilon".into(),
            ));
        }

        self.stitches.clear();

        if self.verts.len() > 1 {
            for i in 0..self.verts.len() - 1 {
                let mut v = self.verts[i];
                self.stitches.push(v);

                let d = self.verts[i + 1] - v;
                let mut l = d.length();

                let jump = d.normalized() * self.jump_size;

                l -= self.jump_size;
                while l > self.epsilon {
                    v += jump;
                    self.stitches.push(v);

                    l -= self.jump_size;
                }
            }

            self.stitches.push(self.verts[self.verts.len() - 1]);
        } else {
            self.stitches = self.verts.clone();
        }

        if self.dedup {
            self.drop_close_stitches();
        }

        Ok(())
    }

    /// Post-filter: of any consecutive pair closer than the minimum jump
    /// size, drop the earlier stitch. The last stitch is always kept.
    fn drop_close_stitches(&mut self) {
        if self.stitches.len() < 2 {
            return;
        }

        let mj2 = self.min_jump_size * self.min_jump_size;

        let mut kept = Vec::with_capacity(self.stitches.len());
        for i in 0..self.stitches.len() - 1 {
            let d = self.stitches[i] - self.stitches[i + 1];
            if d.x * d.x + d.y * d.y > mj2 {
                kept.push(self.stitches[i]);
            }
        }
        kept.push(self.stitches[self.stitches.len() - 1]);

        self.stitches = kept;
    }

    /// Density lint: warns about consecutive stitches closer than 20% of the
    /// jump size. Never fails - a warning, not a correctness gate.
    pub fn validate(&self) -> bool {
        if self.stitches.is_empty() {
            return true;
        }

        let min_dist = self.jump_size * MIN_JUMP_FACTOR;
        let min_dist2 = min_dist * min_dist;

        for i in 0..self.stitches.len() - 1 {
            let d = self.stitches[i + 1] - self.stitches[i];
            let l2 = d.x * d.x + d.y * d.y;

            if l2 < min_dist2 {
                warn!(
                    first = i,
                    second = i + 1,
                    distance = l2.sqrt(),
                    "stitches are quite close"
                );
            }
        }

        true
    }

    /// Remove a single stitch by index.
    pub fn remove_stitch(&mut self, index: usize) -> Result<(), PatternError> {
        if index >= self.stitches.len() {
            return Err(PatternError::StitchIndex {
                index,
                len: self.stitches.len(),
            });
        }

        self.stitches.remove(index);
        self.buffer.invalidate();
        Ok(())
    }

    /// Remove a batch of stitches by index. Indices are sorted and
    /// de-duplicated first; if any is out of range nothing is removed.
    pub fn remove_stitches(&mut self, mut indices: Vec<usize>) -> Result<(), PatternError> {
        if indices.is_empty() {
            return Ok(());
        }

        indices.sort_unstable();
        indices.dedup();

        if let Some(&max) = indices.last() {
            if max >= self.stitches.len() {
                return Err(PatternError::StitchIndex {
                    index: max,
                    len: self.stitches.len(),
                });
            }
        }

        // Highest first, so earlier removals don't shift later indices.
        for &idx in indices.iter().rev() {
            self.stitches.remove(idx);
        }

        self.buffer.invalidate();
        Ok(())
    }

    // Transforms act on the vertices only; follow with `rebuild` to
    // regenerate the stitches.

    pub fn translate(&mut self, t: Point) {
        for v in &mut self.verts {
            *v += t;
        }
    }

    pub fn rotate(&mut self, rad: f64) {
        for v in &mut self.verts {
            *v = v.rotated(rad);
        }
    }

    pub fn rotate90_cw(&mut self) {
        for v in &mut self.verts {
            *v = Point::new(v.y, -v.x);
        }
    }

    pub fn rotate90_ccw(&mut self) {
        for v in &mut self.verts {
            *v = Point::new(-v.y, v.x);
        }
    }

    pub fn rotate180(&mut self) {
        for v in &mut self.verts {
            *v = Point::new(-v.x, -v.y);
        }
    }
}
