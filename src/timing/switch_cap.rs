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

use crate::rr_graph::{ChanDir, RrGraph, RrKind, RrNodeId, SwitchInfo};
#[allow(unused)]
use crate::log::*;

use super::seg_index::{seg_index_of_cblock, seg_index_of_sblock};
use super::{AnnotateError, AnnotateOpts, CapScratch};

/// Finishes loading the capacitance of the routing resource graph.
///
/// Expects every channel node's `cap` to hold its metal capacitance and
/// every other node's to be zero, with the topology and switch
/// assignments final. On top of that the pass adds, for channel nodes
/// only:
///
/// 1. the output capacitance of switches driving them from output pins;
/// 2. the input and output capacitance of switches between channel
///    segments, with each physical pass transistor and each shared
///    switch-box buffer counted once; and
/// 3. the input capacitance of the connection block (or of the buffers
///    separating tracks from it, when `opts.shared_track_buffers` is
///    set).
///
/// Driver conflicts on single-driver wires are detected before any node
/// is written; the `NonChannelSegQuery` defect can still surface
/// mid-walk, so on any `Err` the caller must throw the graph away.
///
/// # Arguments
/// * `graph` - the routing resource graph; only channel-node `cap`
///   fields are written
/// * `switches` - switch catalog, indexed by the edges' switch ids
/// * `opts` - connection-block capacitance and buffer-sharing options
/// * `scratch` - per-location accumulators sized to the grid extent,
///   see [`CapScratch::new`]
pub fn annotate_switch_cap(
    graph: &mut RrGraph,
    switches: &[SwitchInfo],
    opts: &AnnotateOpts,
    scratch: &mut CapScratch,
) -> Result<(), AnnotateError> {
    dbg_log!(
        DBG_INFO,
        "Annotating switch capacitance on {} rr nodes",
        graph.node_count()
    );

    /* Collecting is pure and finds every driver conflict up front, so
     * a conflicting architecture bails out before the first write. */
    let couts_to_add = collect_unidir_driver_cout(graph, switches)?;

    accumulate_local_cap(graph, switches, opts, scratch)?;

    for inode in 0..graph.node_count() {
        graph.get_node_mut(RrNodeId(inode)).cap += couts_to_add[inode];
    }

    Ok(())
}

/// Pass 1: contributions resolvable while looking at one node's edges.
fn accumulate_local_cap(
    graph: &mut RrGraph,
    switches: &[SwitchInfo],
    opts: &AnnotateOpts,
    scratch: &mut CapScratch,
) -> Result<(), AnnotateError> {
    for inode in 0..graph.node_count() {
        let from = RrNodeId(inode);

        match graph.get_node(from).kind {
            RrKind::ChanX | RrKind::ChanY => {
                add_wire_node_cap(graph, switches, opts, scratch, from)?;
            }
            RrKind::Opin => add_opin_driver_cap(graph, switches, from),
            _ => {}
        }
    }

    /* Every slot a node touched must have been handed back neutral. */
    #[cfg(debug_assertions)]
    assert!(scratch.is_neutral());

    Ok(())
}

fn add_wire_node_cap(
    graph: &mut RrGraph,
    switches: &[SwitchInfo],
    opts: &AnnotateOpts,
    scratch: &mut CapScratch,
    from: RrNodeId,
) -> Result<(), AnnotateError> {
    let from_kind = graph.get_node(from).kind;

    for iedge in 0..graph.get_node(from).num_edges() {
        let edge = graph.get_node(from).get_edge(iedge);
        let to = edge.sink;
        let to_kind = graph.get_node(to).kind;

        if to_kind.is_chan() {
            let sw = &switches[edge.switch.0];

            /* A pass transistor pair is two directed edges over one
             * physical switch; only the lower-indexed endpoint charges
             * it. Buffers sharing a switch-box location are one
             * physical instance, so the location keeps the largest
             * input capacitance seen instead of a sum. */
            if !sw.buffered && from < to {
                graph.get_node_mut(from).cap += sw.cin;
                graph.get_node_mut(to).cap += sw.cout;
            } else if sw.buffered {
                if graph.get_node(to).dir == ChanDir::Bidir {
                    /* Every edge into a bidirectional wire is its own
                     * physical driver, nothing to deduplicate. */
                    graph.get_node_mut(to).cap += sw.cout;
                }
                let isblock = seg_index_of_sblock(graph, from, to)? as usize;
                scratch.buffer_cin[isblock] = scratch.buffer_cin[isblock].max(sw.cin);
            }
        } else if let RrKind::Ipin = to_kind {
            if opts.shared_track_buffers {
                /* One track-to-cblock buffer per segment location, no
                 * matter how many inputs hang off it there. */
                let icblock = seg_index_of_cblock(from_kind, graph.get_node(to)) as usize;
                if !scratch.cblock_counted[icblock] {
                    graph.get_node_mut(from).cap += opts.ipin_cblock_cap;
                    scratch.cblock_counted[icblock] = true;
                }
            } else {
                graph.get_node_mut(from).cap += opts.ipin_cblock_cap;
            }
        }
    }

    let (seg_low, seg_high) = {
        let node = graph.get_node(from);
        if let RrKind::ChanX = from_kind {
            (node.xlow, node.xhigh)
        } else {
            (node.ylow, node.yhigh)
        }
    };
    debug_assert!(seg_low >= 1, "channel segments start at coordinate 1");

    for icblock in seg_low..=seg_high {
        scratch.cblock_counted[icblock as usize] = false;
    }

    /* The segment is bounded by switch boxes at low-1 and high, and
     * every switch box it drives through lies in that same window, so
     * this commit both charges the node with the biggest buffer Cin per
     * location and returns the slots to zero for the next node. */
    for isblock in (seg_low - 1)..=seg_high {
        graph.get_node_mut(from).cap += scratch.buffer_cin[isblock as usize];
        scratch.buffer_cin[isblock as usize] = 0.0;
    }

    dbg_log!(
        DBG_EXTRA,
        "Wire node {} capacitance after local pass: {}",
        from.0,
        graph.get_node(from).cap
    );

    Ok(())
}

/* Output pins load a bidirectional wire directly. Single-driver wires
 * get their driver's Cout in the reconciliation pass instead. */
fn add_opin_driver_cap(graph: &mut RrGraph, switches: &[SwitchInfo], from: RrNodeId) {
    for iedge in 0..graph.get_node(from).num_edges() {
        let edge = graph.get_node(from).get_edge(iedge);
        let to = edge.sink;

        if !graph.get_node(to).kind.is_chan() {
            continue;
        }

        if graph.get_node(to).dir == ChanDir::Bidir {
            graph.get_node_mut(to).cap += switches[edge.switch.0].cout;
        }
    }
}

/// Pass 2: the driver output capacitance owed to every single-driver
/// channel node, as a per-node delta to be committed by the caller.
///
/// Edges carry switch data in the driving direction only, so the whole
/// edge set has to be scanned to find out what loads each wire. At most
/// one distinct Cout may claim a node; a second, different claim means
/// the architecture description is broken and is reported instead of
/// being resolved by a max or a latest-wins rule.
pub fn collect_unidir_driver_cout(
    graph: &RrGraph,
    switches: &[SwitchInfo],
) -> Result<Vec<f32>, AnnotateError> {
    let mut couts: Vec<Option<f32>> = vec![None; graph.node_count()];

    for inode in 0..graph.node_count() {
        let from = RrNodeId(inode);

        for edge in graph.get_node(from).edges() {
            let to = edge.sink;
            let to_node = graph.get_node(to);

            if !to_node.kind.is_chan() || to_node.dir == ChanDir::Bidir {
                continue;
            }

            let cout = switches[edge.switch.0].cout;
            match couts[to.0] {
                Some(prev) if prev != cout => {
                    return Err(AnnotateError::ConflictingDriverCout {
                        node: to,
                        first: prev,
                        second: cout,
                    });
                }
                _ => couts[to.0] = Some(cout),
            }
        }
    }

    Ok(couts.into_iter().map(|cout| cout.unwrap_or(0.0)).collect())
}
