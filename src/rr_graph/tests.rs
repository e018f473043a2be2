use super::*;

fn wire(xlow: u32, xhigh: u32) -> RrNode {
    RrNode::new(RrKind::ChanX, xlow, xhigh, 1, 1).with_cap(0.25)
}

#[test]
fn test_node_ids_are_assigned_in_insertion_order() {
    let mut graph = RrGraph::new();
    let a = graph.add_node(wire(1, 2));
    let b = graph.add_node(wire(3, 4));

    assert_eq!(a, RrNodeId(0));
    assert_eq!(b, RrNodeId(1));
    assert_eq!(graph.node_count(), 2);
}

#[test]
fn test_node_id_order_matches_index_order() {
    /* The pass-transistor owner rule compares ids numerically. */
    assert!(RrNodeId(2) < RrNodeId(5));
    assert!(!(RrNodeId(5) < RrNodeId(5)));
}

#[test]
fn test_edges_keep_insertion_order() {
    let mut graph = RrGraph::new();
    let a = graph.add_node(wire(1, 2));
    let b = graph.add_node(wire(3, 4));
    let c = graph.add_node(wire(5, 6));

    graph.add_edge(a, c, RrSwitchId(1));
    graph.add_edge(a, b, RrSwitchId(0));

    let node = graph.get_node(a);
    assert_eq!(node.num_edges(), 2);
    assert_eq!(
        node.get_edge(0),
        RrEdge {
            sink: c,
            switch: RrSwitchId(1),
        }
    );
    assert_eq!(
        node.get_edge(1),
        RrEdge {
            sink: b,
            switch: RrSwitchId(0),
        }
    );
}

#[test]
#[should_panic(expected = "edge to nonexistent node")]
fn test_edge_to_missing_node_is_rejected() {
    let mut graph = RrGraph::new();
    let a = graph.add_node(wire(1, 2));
    graph.add_edge(a, RrNodeId(7), RrSwitchId(0));
}

#[test]
fn test_chan_kind_predicate() {
    assert!(RrKind::ChanX.is_chan());
    assert!(RrKind::ChanY.is_chan());
    assert!(!RrKind::Ipin.is_chan());
    assert!(!RrKind::Opin.is_chan());
    assert!(!RrKind::Source.is_chan());
    assert!(!RrKind::Sink.is_chan());
}

#[test]
fn test_builder_defaults() {
    let node = RrNode::new(RrKind::ChanY, 2, 2, 1, 4);

    assert_eq!(node.dir, ChanDir::Bidir);
    assert_eq!(node.cap, 0.0);
    assert_eq!(node.num_edges(), 0);

    let node = node.with_dir(ChanDir::Dec).with_cap(0.5);
    assert_eq!(node.dir, ChanDir::Dec);
    assert_eq!(node.cap, 0.5);
}
