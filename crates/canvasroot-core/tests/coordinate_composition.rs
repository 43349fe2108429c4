use canvasroot_core::{InstanceTree, Point, ShapeKind, ShapeProps};
use proptest::prelude::*;

fn offsets() -> impl Strategy<Value = Vec<(i16, i16)>> {
    prop::collection::vec((-500i16..500, -500i16..500), 1..24)
}

proptest! {
    #[test]
    fn nested_origin_is_running_sum(chain in offsets()) {
        let mut tree = InstanceTree::new();
        let mut parent = None;
        let mut expected = Point::ZERO;
        let mut ids = Vec::new();
        for (x, y) in &chain {
            let id = tree.create_instance(
                ShapeKind::Rect,
                ShapeProps::rect(*x as f32, *y as f32, 1.0, 1.0),
            );
            match parent {
                Some(parent) => tree.append_child(parent, id),
                None => tree.append_to_container(id),
            };
            expected = expected + Point::new(*x as f32, *y as f32);
            ids.push((id, expected));
            parent = Some(id);
        }

        let mut visited = Vec::new();
        tree.visit_preorder(|id, _, origin| visited.push((id, origin)));
        prop_assert_eq!(&visited, &ids);
        for (id, origin) in ids {
            prop_assert_eq!(tree.absolute_origin(id), Some(origin));
        }
    }

    #[test]
    fn siblings_share_their_parent_origin(
        parent_offset in (-100i16..100, -100i16..100),
        children in prop::collection::vec((-100i16..100, -100i16..100), 0..12),
    ) {
        let mut tree = InstanceTree::new();
        let parent = tree.create_instance(
            ShapeKind::Rect,
            ShapeProps::new().at(parent_offset.0 as f32, parent_offset.1 as f32),
        );
        tree.append_to_container(parent);
        for (x, y) in &children {
            let child = tree.create_instance(ShapeKind::Circle, ShapeProps::circle(*x as f32, *y as f32, 1.0));
            tree.append_child(parent, child);
        }

        let base = Point::new(parent_offset.0 as f32, parent_offset.1 as f32);
        let mut seen = 0;
        tree.visit_preorder(|id, _, origin| {
            if id != parent {
                let (x, y) = children[seen];
                assert_eq!(origin, base + Point::new(x as f32, y as f32));
                seen += 1;
            }
        });
        prop_assert_eq!(seen, children.len());
    }
}
