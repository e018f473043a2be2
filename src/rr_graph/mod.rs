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

#[cfg(test)]
mod tests;

/// Kind of a routing resource node.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum RrKind {
    Source,
    Sink,
    Opin,
    Ipin,
    ChanX,
    ChanY,
}

impl RrKind {
    pub fn is_chan(self) -> bool {
        match self {
            Self::ChanX | Self::ChanY => true,
            _ => false,
        }
    }
}

/* Meaningful for channel nodes only. Other kinds keep the default and
 * nothing ever reads it for them. */
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ChanDir {
    Inc,
    Dec,
    Bidir,
}

/// Index of a node in the routing resource graph.
///
/// Node identity is the index, never a pointer. The derived `Ord` is
/// load-bearing: the annotation pass charges a pass-transistor pair to
/// the lower-indexed of its two endpoints.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
)]
pub struct RrNodeId(pub usize);

impl std::fmt::Display for RrNodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Index into the switch catalog.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct RrSwitchId(pub usize);

/// Electrical characteristics of one switch type from the architecture's
/// switch catalog.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SwitchInfo {
    pub cin: f32,
    pub cout: f32,
    pub buffered: bool,
}

/// A directed edge owned by its source node.
///
/// A physical pass transistor shows up as two directed edges (one in each
/// node's list) sharing a switch id; a buffered single-driver connection
/// shows up as one edge only.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct RrEdge {
    pub sink: RrNodeId,
    pub switch: RrSwitchId,
}

/// A routing resource node.
///
/// The bounds are inclusive: the span along the node's axis for channel
/// kinds, a point location otherwise. `cap` starts out as the metal
/// capacitance for channel nodes (zero for everything else) and is only
/// ever written by the annotation pass.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct RrNode {
    pub kind: RrKind,
    pub xlow: u32,
    pub xhigh: u32,
    pub ylow: u32,
    pub yhigh: u32,
    pub dir: ChanDir,
    pub cap: f32,
    edges: Vec<RrEdge>,
}

impl RrNode {
    pub fn new(kind: RrKind, xlow: u32, xhigh: u32, ylow: u32, yhigh: u32) -> Self {
        Self {
            kind,
            xlow,
            xhigh,
            ylow,
            yhigh,
            dir: ChanDir::Bidir,
            cap: 0.0,
            edges: Vec::new(),
        }
    }

    pub fn with_dir(self, dir: ChanDir) -> Self {
        Self { dir, ..self }
    }

    pub fn with_cap(self, cap: f32) -> Self {
        Self { cap, ..self }
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Edges are returned by value so walking them never holds a borrow
    /// on the graph while node capacitances are being updated.
    pub fn get_edge(&self, iedge: usize) -> RrEdge {
        self.edges[iedge]
    }

    pub fn edges(&self) -> &[RrEdge] {
        &self.edges
    }
}

/// The routing resource graph: an owned collection of nodes, each owning
/// its outgoing edge list.
///
/// Traversal order is defined by indices (nodes ascending, edges in
/// insertion order), which keeps the annotation pass deterministic.
#[derive(Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
pub struct RrGraph {
    nodes: Vec<RrNode>,
}

impl RrGraph {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn add_node(&mut self, node: RrNode) -> RrNodeId {
        let id = RrNodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn add_edge(&mut self, from: RrNodeId, sink: RrNodeId, switch: RrSwitchId) {
        assert!(sink.0 < self.nodes.len(), "edge to nonexistent node {}", sink);
        self.nodes[from.0].edges.push(RrEdge { sink, switch });
    }

    pub fn get_node<'a>(&'a self, node: RrNodeId) -> &'a RrNode {
        &self.nodes[node.0]
    }

    pub fn get_node_mut<'a>(&'a mut self, node: RrNodeId) -> &'a mut RrNode {
        &mut self.nodes[node.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[RrNode] {
        &self.nodes
    }
}
