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

use crate::rr_graph::{RrGraph, RrKind, RrNode, RrNodeId};

use super::AnnotateError;

/// Returns the segment location (distance along the channel) of the
/// connection block joining a wire of kind `from_kind` to the input pin
/// `to_node`.
pub fn seg_index_of_cblock(from_kind: RrKind, to_node: &RrNode) -> u32 {
    if let RrKind::ChanX = from_kind {
        to_node.xlow
    } else {
        /* ChanY */
        to_node.ylow
    }
}

/// Returns the segment location of the switch box joining the two
/// channel nodes `from` and `to`.
///
/// The switch box on the low side of a horizontal segment starting at
/// column `i` has location `i - 1`, the one on its high side sits at
/// `xhigh`; vertical segments work the same way along y. Both endpoints
/// must be channel nodes. Anything else is a defect in the caller and
/// comes back as [`AnnotateError::NonChannelSegQuery`].
pub fn seg_index_of_sblock(
    graph: &RrGraph,
    from: RrNodeId,
    to: RrNodeId,
) -> Result<u32, AnnotateError> {
    let from_node = graph.get_node(from);
    let to_node = graph.get_node(to);

    match from_node.kind {
        RrKind::ChanX => match to_node.kind {
            RrKind::ChanY => Ok(to_node.xlow),
            RrKind::ChanX => {
                if to_node.xlow > from_node.xlow {
                    /* Going right */
                    Ok(from_node.xhigh)
                } else {
                    /* Going left */
                    Ok(to_node.xhigh)
                }
            }
            kind => Err(AnnotateError::NonChannelSegQuery { node: to, kind }),
        },
        RrKind::ChanY => match to_node.kind {
            RrKind::ChanX => Ok(to_node.ylow),
            RrKind::ChanY => {
                if to_node.ylow > from_node.ylow {
                    /* Going up */
                    Ok(from_node.yhigh)
                } else {
                    /* Going down */
                    Ok(to_node.yhigh)
                }
            }
            kind => Err(AnnotateError::NonChannelSegQuery { node: to, kind }),
        },
        kind => Err(AnnotateError::NonChannelSegQuery { node: from, kind }),
    }
}
