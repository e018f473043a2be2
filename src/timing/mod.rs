/* Copyright (C) 2022 Antmicro
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     https://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rr_graph::{RrKind, RrNodeId};

pub mod seg_index;
pub mod switch_cap;


/// Data-integrity failures detected while annotating capacitance.
///
/// Both variants mean the architecture description or the graph built
/// from it is malformed; neither is retryable. The caller decides
/// whether that is fatal, but on `Err` the graph must be discarded:
/// the pass makes no promise about which nodes were already touched.
#[derive(Clone, PartialEq, Debug, Error)]
pub enum AnnotateError {
    /// A single-driver resource is claimed by switches with different
    /// output capacitances. Resolving this silently (e.g. by taking the
    /// maximum) would mask the broken architecture and corrupt every
    /// downstream timing number, so both values are reported instead.
    #[error("a single driver resource ({node}) is driven by different Cout's ({first:e} != {second:e})")]
    ConflictingDriverCout {
        node: RrNodeId,
        first: f32,
        second: f32,
    },

    /// A switch-box location was requested for a node that is not a
    /// channel. This is a defect in the calling code, not in the data.
    #[error("segment index query on node {node} of non-channel kind {kind:?}")]
    NonChannelSegQuery { node: RrNodeId, kind: RrKind },
}

/// Options consumed by the annotation pass.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AnnotateOpts {
    /// Input capacitance of the connection block (or of the buffer
    /// separating a track from it) charged to a wire per logic input
    /// it feeds.
    pub ipin_cblock_cap: f32,
    /// Share one track-to-connection-block buffer per segment location
    /// instead of charging every input connection separately.
    pub shared_track_buffers: bool,
}

/// Per-location accumulators reused across nodes by the annotation pass.
///
/// Sized to the architecture's coordinate extent rather than its edge
/// count; slots are handed back in their neutral state after each node,
/// so one allocation serves the whole pass. Callers construct it, pass
/// it in and drop it afterwards; there is no hidden static scratch.
pub struct CapScratch {
    /* [0 ..= max(width, height)], indexed by segment location */
    pub(crate) buffer_cin: Vec<f32>,
    pub(crate) cblock_counted: Vec<bool>,
}

impl CapScratch {
    /// `width` and `height` are the maximum x and y coordinates of the
    /// architecture grid.
    pub fn new(width: u32, height: u32) -> Self {
        let maxlen = width.max(height) as usize + 1;
        Self {
            buffer_cin: vec![0.0; maxlen],
            cblock_counted: vec![false; maxlen],
        }
    }

    #[cfg(debug_assertions)]
    pub(crate) fn is_neutral(&self) -> bool {
        self.buffer_cin.iter().all(|c| *c == 0.0)
            && self.cblock_counted.iter().all(|counted| !*counted)
    }
}
