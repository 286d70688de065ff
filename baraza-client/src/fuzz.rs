#![cfg(test)]

use std::collections::{HashMap, HashSet};

use chrono::{Duration, TimeZone, Utc};

use crate::{
    api::{self, Error, OpinionId, Time},
    Thread,
};

fn reply_counts(t: &Thread) -> HashMap<OpinionId, usize> {
    t.traverse().map(|(o, _)| (o.id, o.replies.len())).collect()
}

fn shape(t: &Thread) -> Vec<(OpinionId, usize)> {
    t.traverse().map(|(o, d)| (o.id, d)).collect()
}

fn check_invariants(t: &Thread) {
    // every opinion is visited exactly once, at its own depth
    let visited = shape(t);
    assert_eq!(visited.len(), t.len());
    let mut seen = HashSet::new();
    for (id, depth) in &visited {
        assert!(seen.insert(*id), "{id} visited twice");
        assert_eq!(t.depth_of(id), Some(*depth));
    }

    // walking again without changes gives the same result
    assert_eq!(shape(t), visited);

    // the nested form describes the same forest
    let rebuilt = Thread::from_forest(t.to_forest()).expect("rebuilding thread from its forest");
    assert_eq!(shape(&rebuilt), visited);
}

fn start() -> Time {
    Utc.with_ymd_and_hms(2024, 1, 10, 14, 30, 0)
        .single()
        .expect("valid start date")
}

/// Builds a forest out of `(id, near u64::MAX, parent)` triples, where
/// `parent` picks one of the opinions built before
fn seeded_forest(seeds: &[(u8, bool, Option<u8>)]) -> Vec<api::Opinion> {
    let mut nodes = Vec::with_capacity(seeds.len());
    let mut parents = Vec::with_capacity(seeds.len());
    for (i, (id, high, parent)) in seeds.iter().enumerate() {
        let id = match *high {
            true => u64::MAX - u64::from(*id),
            false => u64::from(*id),
        };
        let o = api::Opinion::new(
            OpinionId(id),
            String::from("Jane K."),
            format!("seeded opinion {i}"),
            start(),
        );
        nodes.push(Some(o));
        parents.push(parent.filter(|_| i > 0).map(|p| p as usize % i));
    }

    // parents come before their replies, so assemble from the back
    let mut forest = Vec::new();
    for i in (0..nodes.len()).rev() {
        let o = nodes[i].take().expect("every opinion is moved once");
        match parents[i] {
            Some(p) => nodes[p]
                .as_mut()
                .expect("parent is still unassembled")
                .replies
                .insert(0, o),
            None => forest.insert(0, o),
        }
    }
    forest
}

fn run(mut t: Thread, ops: Vec<(bool, u16, String)>) {
    let start = start();
    let mut ids = t.traverse().map(|(o, _)| o.id).collect::<Vec<_>>();
    let mut created = Vec::new();
    for (i, (top_level, target, content)) in ops.into_iter().enumerate() {
        // every other operation happens "earlier", to exercise clamping
        let now = match i % 2 {
            0 => start + Duration::seconds(i as i64),
            _ => start - Duration::seconds(i as i64),
        };
        let valid = !content.trim().is_empty() && !content.contains('\0');
        let len_before = t.len();
        let roots_before = t.roots().count();
        let counts_before = reply_counts(&t);
        let forest_before = t.to_forest();

        if top_level {
            match t.create_top_level("You", &content, now) {
                Ok(o) => {
                    assert!(valid, "accepted invalid content {content:?}");
                    let id = o.id;
                    assert!(!ids.contains(&id), "reused id {id}");
                    ids.push(id);
                    created.push(id);
                    assert_eq!(t.roots().next().map(|o| o.id), Some(id));
                    assert_eq!(t.roots().count(), roots_before + 1);
                    assert_eq!(reply_counts(&t).len(), counts_before.len() + 1);
                }
                Err(Error::OpinionIdsExhausted) => {
                    assert!(valid);
                    assert_eq!(t.to_forest(), forest_before);
                }
                Err(_) => {
                    assert!(!valid, "rejected valid content {content:?}");
                    assert_eq!(t.to_forest(), forest_before);
                }
            }
        } else {
            // indices past the end target an id that is most likely absent
            let parent = ids
                .get(target as usize % (ids.len() + 1))
                .copied()
                .unwrap_or(OpinionId(u64::MAX));
            match t.create_reply(parent, "You", &content, now) {
                Ok(o) => {
                    assert!(valid, "accepted invalid content {content:?}");
                    let id = o.id;
                    assert!(!ids.contains(&id), "reused id {id}");
                    ids.push(id);
                    created.push(id);
                    let counts_after = reply_counts(&t);
                    for (k, n) in counts_before.iter() {
                        let expected = if *k == parent { n + 1 } else { *n };
                        assert_eq!(counts_after[k], expected, "reply count of {k}");
                    }
                    assert_eq!(t.roots().count(), roots_before);
                }
                Err(Error::ParentNotFound(p)) => {
                    assert!(valid);
                    assert_eq!(p, parent);
                    assert!(!ids.contains(&p));
                    assert_eq!(t.to_forest(), forest_before);
                }
                Err(Error::OpinionIdsExhausted) => {
                    assert!(valid);
                    assert!(ids.contains(&parent));
                    assert_eq!(t.to_forest(), forest_before);
                }
                Err(_) => {
                    assert!(!valid, "rejected valid content {content:?}");
                    assert_eq!(t.to_forest(), forest_before);
                }
            }
        }
        assert_eq!(t.len(), ids.len());
        assert!(t.len() == len_before || t.len() == len_before + 1);
        check_invariants(&t);
    }

    // local timestamps follow creation order
    let stamps = created
        .iter()
        .map(|id| t.get(id).expect("created opinion is in thread").timestamp)
        .collect::<Vec<_>>();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn random_operations() {
    bolero::check!()
        .with_type::<Vec<(bool, u16, String)>>()
        .cloned()
        .for_each(|ops| run(Thread::new(), ops));
}

#[test]
fn random_operations_on_seeded_forest() {
    bolero::check!()
        .with_type::<(Vec<(u8, bool, Option<u8>)>, Vec<(bool, u16, String)>)>()
        .cloned()
        .for_each(|(seeds, ops)| {
            let forest = seeded_forest(&seeds);
            let t = match Thread::from_forest(forest.clone()) {
                Ok(t) => t,
                Err(e) => {
                    assert!(matches!(e, Error::OpinionIdAlreadyUsed(_)), "{e}");
                    return;
                }
            };
            assert_eq!(t.len(), seeds.len());
            assert_eq!(t.to_forest(), forest);
            check_invariants(&t);
            run(t, ops);
        });
}
