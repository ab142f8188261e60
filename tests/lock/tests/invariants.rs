//! Invariant lock: the properties that must hold for all scenarios.

use std::collections::BTreeSet;

use lock_tests::{build_world, mode_label, mode_matrix, run_complete};
use veil_harness::worlds::all_scenarios;
use veil_kernel::deadline::Deadline;
use veil_kernel::feature::NodeTypeV1;
use veil_kernel::lexicon::LexiconV1;
use veil_wl::coloring::initial_coloring;
use veil_wl::compliance::{counts_and_members, is_k_compliant, partition_of};
use veil_wl::distance::subject_distances;
use veil_wl::refine::{refine_round, refine_to_fixed_point};
use veil_wl::verify::{candidate_is_necessary, TrialContextV1, TrialModeV1};

const K: u32 = 2;

#[test]
fn necessary_always_contains_the_subjects() {
    for world in all_scenarios() {
        let built = build_world(world.as_ref());
        for options in mode_matrix() {
            let result = run_complete(world.as_ref(), &options);
            for s in &built.subjects {
                let id = built.graph.identifier(*s);
                assert!(
                    result.necessary.contains(id),
                    "{} under {}: subject {id} missing from necessary",
                    world.world_id(),
                    mode_label(&options)
                );
            }
        }
    }
}

#[test]
fn saturated_subject_classes_are_fully_seeded() {
    for world in all_scenarios() {
        let built = build_world(world.as_ref());
        let lexicon = LexiconV1::build(&built.raw).unwrap();
        let features = lexicon.materialize(&built.raw).unwrap();
        let refined = refine_to_fixed_point(
            &built.graph,
            initial_coloring(&features),
            &Deadline::unlimited(),
        );
        assert!(refined.converged);
        let (counts, members) = counts_and_members(&refined.coloring);

        let result = run_complete(world.as_ref(), &mode_matrix()[0]);
        for s in &built.subjects {
            let color = refined.coloring[*s as usize];
            if counts.get(&color) == Some(&(K as usize)) {
                for member in &members[&color] {
                    let id = built.graph.identifier(*member);
                    assert!(
                        result.necessary.contains(id),
                        "{}: saturated classmate {id} missing",
                        world.world_id()
                    );
                }
            }
        }
    }
}

#[test]
fn singletons_and_necessary_are_disjoint() {
    for world in all_scenarios() {
        for options in mode_matrix() {
            let result = run_complete(world.as_ref(), &options);
            let overlap: Vec<_> = result
                .singletons
                .intersection(&result.necessary)
                .collect();
            assert!(
                overlap.is_empty(),
                "{} under {}: overlap {overlap:?}",
                world.world_id(),
                mode_label(&options)
            );
        }
    }
}

#[test]
fn freezing_the_necessary_set_preserves_compliance() {
    for world in all_scenarios() {
        let built = build_world(world.as_ref());
        let result = run_complete(world.as_ref(), &mode_matrix()[0]);

        let lexicon = LexiconV1::build(&built.raw).unwrap();
        let mut features = lexicon.materialize(&built.raw).unwrap();
        for v in 0..built.graph.node_count() {
            if result.necessary.contains(built.graph.identifier(v)) {
                features[v as usize].set_node_type(NodeTypeV1::Constant);
            }
        }
        let refined = refine_to_fixed_point(
            &built.graph,
            initial_coloring(&features),
            &Deadline::unlimited(),
        );
        assert!(refined.converged);
        assert!(
            is_k_compliant(&refined.coloring, &refined.counts, &built.subjects, K),
            "{}: freezing the necessary set broke compliance",
            world.world_id()
        );
    }
}

#[test]
fn verified_members_are_individually_load_bearing() {
    // Minimality under the chosen policy: every necessary member that was
    // promoted by verification (not a subject, not a saturated-class
    // seed) fails its own trial.
    for world in all_scenarios() {
        let built = build_world(world.as_ref());
        let result = run_complete(world.as_ref(), &mode_matrix()[0]);

        let lexicon = LexiconV1::build(&built.raw).unwrap();
        let features = lexicon.materialize(&built.raw).unwrap();
        let refined = refine_to_fixed_point(
            &built.graph,
            initial_coloring(&features),
            &Deadline::unlimited(),
        );
        let (counts, members) = counts_and_members(&refined.coloring);

        let mut seeded: BTreeSet<u32> = built.subjects.clone();
        for s in &built.subjects {
            let color = refined.coloring[*s as usize];
            if counts.get(&color) == Some(&(K as usize)) {
                seeded.extend(members[&color].iter().copied());
            }
        }

        let distances = subject_distances(&built.graph, &built.subjects, &Deadline::unlimited());
        let deadline = Deadline::unlimited();
        let ctx = TrialContextV1 {
            graph: &built.graph,
            features: &features,
            baseline: &refined.coloring,
            counts: &counts,
            subjects: &built.subjects,
            k: K,
            distances: &distances,
            deadline: &deadline,
        };
        for v in 0..built.graph.node_count() {
            let id = built.graph.identifier(v);
            if result.necessary.contains(id) && !seeded.contains(&v) {
                assert!(
                    candidate_is_necessary(&ctx, v, TrialModeV1::Full),
                    "{}: {id} is in necessary but its trial passes",
                    world.world_id()
                );
            }
        }
    }
}

#[test]
fn scenario_partitions_refine_monotonically() {
    for world in all_scenarios() {
        let built = build_world(world.as_ref());
        let lexicon = LexiconV1::build(&built.raw).unwrap();
        let features = lexicon.materialize(&built.raw).unwrap();
        let mut coloring = initial_coloring(&features);
        let mut previous = partition_of(&coloring);
        for round in 0..5 {
            coloring = refine_round(&built.graph, &coloring, &Deadline::unlimited()).unwrap();
            let current = partition_of(&coloring);
            assert!(
                is_refinement_of(&current, &previous),
                "{} round {round}: partition coarsened",
                world.world_id()
            );
            previous = current;
        }
    }
}

fn is_refinement_of(finer: &[Vec<u32>], coarser: &[Vec<u32>]) -> bool {
    finer.iter().all(|class| {
        coarser
            .iter()
            .any(|super_class| class.iter().all(|v| super_class.contains(v)))
    })
}
