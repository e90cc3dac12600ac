use super::*;

fn placed(index: usize, id: &str, rank: usize, order: usize, x: f64, y: f64) -> LayoutNode {
    let mut n = LayoutNode::new(index, id, rank, order);
    n.x = x;
    n.y = y;
    n
}

fn sample_result() -> LayoutResult {
    LayoutResult {
        nodes: vec![
            placed(0, "A", 0, 0, 20.0, 20.0),
            placed(1, "C", 1, 1, 260.0, 220.0),
            placed(2, "B", 1, 0, 20.0, 220.0),
        ],
        rank_count: 2,
        crossings: 0,
        direction: Direction::TopToBottom,
    }
}

#[test]
fn test_layout_node_new_starts_at_origin() {
    let n = LayoutNode::new(3, "x", 2, 1);
    assert_eq!(n.index, 3);
    assert_eq!(n.id, "x");
    assert_eq!(n.rank, 2);
    assert_eq!(n.order, 1);
    assert_eq!(n.position(), Position::new(0.0, 0.0));
}

#[test]
fn test_empty_result() {
    let r = LayoutResult::new(Direction::LeftToRight);
    assert!(r.nodes.is_empty());
    assert_eq!(r.rank_count, 0);
    assert_eq!(r.direction, Direction::LeftToRight);
    assert!(r.get("A").is_none());
}

#[test]
fn test_get_by_id() {
    let r = sample_result();
    assert_eq!(r.get("C").map(|n| n.order), Some(1));
    assert!(r.get("Z").is_none());
}

#[test]
fn test_rank_members_sorted_by_order() {
    let r = sample_result();
    assert_eq!(r.rank_members(0), vec!["A"]);
    assert_eq!(r.rank_members(1), vec!["B", "C"]);
    assert!(r.rank_members(5).is_empty());
}

#[test]
fn test_apply_copies_positions_and_keeps_fields() {
    let mut input = vec![
        Node::new("A", "Alpha", 999.0, 999.0),
        Node::new("C", "Gamma", 0.0, 0.0),
        Node::new("B", "Beta", -5.0, 7.0),
    ];
    input[1].selected = true;

    let out = sample_result().apply(&input);
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].position, Position::new(20.0, 20.0));
    assert_eq!(out[1].position, Position::new(260.0, 220.0));
    assert_eq!(out[2].position, Position::new(20.0, 220.0));
    assert_eq!(out[1].label, "Gamma");
    assert!(out[1].selected);
    // Caller's slice is untouched.
    assert_eq!(input[0].position, Position::new(999.0, 999.0));
}
