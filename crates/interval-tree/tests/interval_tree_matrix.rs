use interval_tree::{IntervalTree, LNode, PartitionError, TreeError, DOMAIN_SIZE};

fn assert_valid<T>(tree: &IntervalTree<T>, what: &str) {
    if let Err(err) = tree.validate() {
        panic!("invalid interval tree after {what}: {err}");
    }
}

fn expand<T: Clone>(runs: &[LNode<T>]) -> Vec<T> {
    runs.iter()
        .flat_map(|run| std::iter::repeat(run.data.clone()).take(run.length as usize))
        .collect()
}

fn partition(lengths: &[u16]) -> Vec<LNode<u32>> {
    let mut start = 0u16;
    lengths
        .iter()
        .enumerate()
        .map(|(i, &length)| {
            let run = LNode::new(start, length, i as u32);
            start = start.wrapping_add(length);
            run
        })
        .collect()
}

#[test]
fn single_run_covers_whole_domain() {
    let tree = IntervalTree::single(5u8);
    assert_eq!(tree.size(), 1);
    assert!(tree.check_tree_validity());
    assert!(tree.check_valid_rb());
    assert_eq!(*tree.get_data(0), 5);
    assert_eq!(*tree.get_data(DOMAIN_SIZE - 1), 5);
    let root = tree.root().unwrap();
    assert_eq!(tree.get_interval(1234), root);
    assert_eq!(tree.node(root).start(), 0);
    assert_eq!(tree.node(root).length(), DOMAIN_SIZE);
}

#[test]
fn split_in_the_middle() {
    let mut tree = IntervalTree::new();
    tree.init_single(0u32, DOMAIN_SIZE);
    let unit = tree.insert(100, 1);

    assert_eq!(*tree.get_data(99), 0);
    assert_eq!(*tree.get_data(100), 1);
    assert_eq!(*tree.get_data(101), 0);
    assert_eq!(tree.size(), 3);
    assert_eq!(tree.get_interval(100), unit);
    assert_eq!(tree.node(unit).start(), 100);
    assert_eq!(tree.node(unit).length(), 1);
    assert_valid(&tree, "insert(100, 1)");

    let runs = tree.runs();
    assert_eq!(
        runs,
        vec![
            LNode::new(0, 100, 0),
            LNode::new(100, 1, 1),
            LNode::new(101, (DOMAIN_SIZE - 101) as u16, 0),
        ]
    );
}

#[test]
fn split_at_run_head_and_tail() {
    let mut tree = IntervalTree::single('a');
    let head = tree.insert(0, 'b');
    assert_eq!(tree.size(), 2);
    assert_eq!(tree.node(head).start(), 0);
    assert_eq!(tree.node(head).length(), 1);
    assert_valid(&tree, "insert(0)");

    let tail = tree.insert(DOMAIN_SIZE - 1, 'c');
    assert_eq!(tree.size(), 3);
    assert_eq!(tree.node(tail).start() as usize, DOMAIN_SIZE - 1);
    assert_valid(&tree, "insert(last)");

    assert_eq!(*tree.get_data(0), 'b');
    assert_eq!(*tree.get_data(1), 'a');
    assert_eq!(*tree.get_data(DOMAIN_SIZE - 2), 'a');
    assert_eq!(*tree.get_data(DOMAIN_SIZE - 1), 'c');
}

#[test]
fn overwrite_unit_run_reuses_node() {
    let mut tree = IntervalTree::single(0u8);
    let unit = tree.insert(10, 1);
    let size = tree.size();
    assert_eq!(tree.insert(10, 2), unit);
    assert_eq!(tree.size(), size);
    assert_eq!(*tree.get_data(10), 2);
    assert_valid(&tree, "overwrite");
}

#[test]
fn insert_same_value_is_idempotent() {
    let mut tree = IntervalTree::single(0u8);
    for i in [5, 9, 400, 20000] {
        tree.insert(i, (i % 7) as u8);
    }
    let before = tree.runs();
    let shape = tree.print();
    for i in [0, 5, 6, 9, 399, 400, 20000, DOMAIN_SIZE - 1] {
        let v = *tree.get_data(i);
        let idx = tree.insert(i, v);
        assert_eq!(idx, tree.get_interval(i));
    }
    assert_eq!(tree.runs(), before);
    assert_eq!(tree.print(), shape);
}

#[test]
fn point_consistency_for_scattered_writes() {
    let mut tree = IntervalTree::single(0u32);
    let mut model = vec![0u32; DOMAIN_SIZE];
    let mut x = 12345usize;
    for step in 0..5000u32 {
        x = (x * 1103515245 + 12345) % (1 << 31);
        let i = x % DOMAIN_SIZE;
        let v = step % 13;
        tree.insert(i, v);
        model[i] = v;
        assert_eq!(*tree.get_data(i), v);
    }
    assert_valid(&tree, "scattered writes");
    assert_eq!(tree.to_vec(), model);
}

#[test]
fn full_fragmentation_ascending() {
    let mut tree = IntervalTree::new();
    tree.init_single(0u32, DOMAIN_SIZE);
    for i in 0..DOMAIN_SIZE {
        tree.insert(i, i as u32);
    }
    assert_eq!(tree.size(), DOMAIN_SIZE);
    assert!(tree.check_tree_validity());
    for i in 0..DOMAIN_SIZE {
        assert_eq!(*tree.get_data(i), i as u32);
    }
}

#[test]
fn full_fragmentation_descending() {
    let mut tree = IntervalTree::single(u32::MAX);
    for i in (0..DOMAIN_SIZE).rev() {
        tree.insert(i, i as u32);
    }
    assert_eq!(tree.size(), DOMAIN_SIZE);
    assert_valid(&tree, "descending fragmentation");
    assert!(tree.iter().enumerate().all(|(i, n)| *n.data() == i as u32));
}

#[test]
fn bulk_load_round_trip() {
    let runs = partition(&[1, 2, 3, 100, 1000, 31662]);
    let mut tree = IntervalTree::new();
    tree.init_from_sorted_array(&runs);
    assert_eq!(tree.size(), 6);
    assert_valid(&tree, "bulk load");

    let mut buffer = vec![u32::MAX; DOMAIN_SIZE];
    tree.uncompress_into_buffer(&mut buffer);
    assert_eq!(buffer, expand(&runs));
    assert_eq!(tree.runs(), runs);
}

#[test]
fn bulk_load_many_unit_runs() {
    let runs = partition(&vec![1u16; DOMAIN_SIZE]);
    let tree = IntervalTree::from_sorted(runs.clone()).unwrap();
    assert_eq!(tree.size(), DOMAIN_SIZE);
    assert_valid(&tree, "unit bulk load");
    assert_eq!(tree.to_vec(), expand(&runs));
}

#[test]
fn bulk_load_then_insert() {
    let runs = partition(&[8192, 8192, 8192, 8192]);
    let mut tree = IntervalTree::from_sorted(runs).unwrap();
    for i in (0..DOMAIN_SIZE).step_by(97) {
        tree.insert(i, 99);
        assert_valid(&tree, &format!("insert({i}) after bulk load"));
    }
    assert_eq!(*tree.get_data(97), 99);
    assert_eq!(*tree.get_data(98), 0);
    assert_eq!(*tree.get_data(8192 + 1), 1);
}

#[test]
fn iteration_is_sorted_by_start() {
    let mut tree = IntervalTree::single(0u8);
    // Arena order differs from domain order after these writes.
    for i in [30000, 20, 15000, 5, 25000] {
        tree.insert(i, 1);
    }
    let starts: Vec<usize> = tree.iter().map(|n| n.start() as usize).collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
    assert_eq!(starts.len(), tree.size());

    let arena_starts: Vec<usize> = tree.nodes().iter().map(|n| n.start() as usize).collect();
    assert_ne!(arena_starts, starts);

    let mut end = 0;
    for node in &tree {
        assert_eq!(node.start() as usize, end);
        end = node.end();
    }
    assert_eq!(end, DOMAIN_SIZE);
}

#[test]
fn export_and_reload_preserves_contents() {
    let mut tree = IntervalTree::single(0u16);
    for i in (0..DOMAIN_SIZE).step_by(1000) {
        tree.insert(i, (i / 1000) as u16 + 1);
    }
    let runs = tree.runs();
    let mut reloaded = IntervalTree::new();
    reloaded.try_init_from_sorted_array(&runs).unwrap();
    assert_valid(&reloaded, "reload");
    assert_eq!(reloaded.to_vec(), tree.to_vec());
    assert_eq!(reloaded.size(), tree.size());
}

#[test]
fn compact_merges_equal_neighbours() {
    let mut tree = IntervalTree::single(0u8);
    tree.insert(10, 1);
    tree.insert(11, 1);
    tree.insert(12, 1);
    assert_eq!(tree.size(), 5);
    let contents = tree.to_vec();

    let removed = tree.compact();
    assert_eq!(removed, 2);
    assert_eq!(tree.size(), 3);
    assert_valid(&tree, "compact");
    assert_eq!(tree.to_vec(), contents);

    assert_eq!(tree.compact(), 0);
    tree.insert(11, 0);
    tree.insert(10, 0);
    tree.insert(12, 0);
    let runs_before = tree.size();
    assert_eq!(runs_before, 5);
    assert_eq!(tree.compact(), runs_before - 1);
    assert_eq!(tree.size(), 1);
    assert_valid(&tree, "compact to single run");
}

#[test]
fn clear_resets_to_empty() {
    let mut tree = IntervalTree::single(1u8);
    tree.insert(3, 2);
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.size(), 0);
    assert_eq!(tree.root(), None);
    assert_eq!(tree.get(0), None);
    assert_eq!(tree.iter().count(), 0);
    assert_eq!(tree.validate(), Err(TreeError::Empty));

    tree.init_single(4, DOMAIN_SIZE);
    assert_eq!(tree.get(0), Some(&4));
}

#[test]
fn get_outside_domain_is_none() {
    let tree = IntervalTree::single(1u8);
    assert_eq!(tree.get(DOMAIN_SIZE), None);
    assert_eq!(tree.find(DOMAIN_SIZE + 10), None);
}

#[test]
#[should_panic(expected = "not covered")]
fn get_data_outside_domain_panics() {
    let tree = IntervalTree::single(1u8);
    tree.get_data(DOMAIN_SIZE);
}

#[test]
#[should_panic(expected = "not covered")]
fn insert_into_empty_tree_panics() {
    let mut tree = IntervalTree::<u8>::new();
    tree.insert(0, 1);
}

#[test]
fn checked_loader_rejects_malformed_input() {
    let mut tree = IntervalTree::single(9u32);

    assert_eq!(
        tree.try_init_from_sorted_array(&[]),
        Err(PartitionError::Empty)
    );
    assert_eq!(
        tree.try_init_from_sorted_array(&partition(&[100, 200])),
        Err(PartitionError::Coverage {
            total: 300,
            expected: DOMAIN_SIZE
        })
    );
    assert_eq!(
        tree.try_init_from_sorted_array(&[LNode::new(0, 100, 0), LNode::new(50, 32718, 1)]),
        Err(PartitionError::Discontiguous {
            position: 1,
            expected: 100,
            found: 50
        })
    );
    // Rejected input leaves the tree as it was.
    assert_eq!(tree.size(), 1);
    assert_eq!(*tree.get_data(0), 9);

    assert!(IntervalTree::from_sorted(partition(&[1, 0, 32767])).is_err());
}

#[test]
fn unchecked_loader_defers_to_validation() {
    let mut tree = IntervalTree::new();
    tree.init_from_sorted_array(&partition(&[100, 200]));
    assert!(!tree.check_tree_validity());
    assert_eq!(
        tree.validate(),
        Err(TreeError::Coverage {
            total: 300,
            expected: DOMAIN_SIZE
        })
    );
    // The shape itself is still a valid red-black tree.
    assert!(tree.check_valid_rb());
}

#[test]
fn partial_single_run_fails_validation() {
    let mut tree = IntervalTree::new();
    tree.init_single(0u8, 100);
    assert!(!tree.check_tree_validity());
    assert!(tree.check_valid_rb());
}

#[test]
fn print_shows_colors_and_ranges() {
    let mut tree = IntervalTree::single(0u8);
    tree.insert(5, 1);
    let out = tree.print();
    assert!(out.starts_with("Node["));
    assert!(out.contains("black"));
    assert!(out.contains("red"));
    assert!(out.contains("[5, 6) = 1"));
}
