//! Permutation-preserving variation operators for tours.
//!
//! # Crossover
//!
//! - [`ordered_crossover`]: keeps each parent's prefix and suffix around two
//!   cut points and refills the middle in the other parent's order.
//!
//! # Mutation
//!
//! - [`reverse_segment`]: reverses the half-open slice between two cut
//!   points (a 2-opt move).
//!
//! Both operators draw two *distinct* cut indices, so a cut can never
//! collapse to a single point. Fixed-cut variants (`*_at`) take the cuts
//! explicitly and are what the random versions delegate to.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Croes (1958), "A Method for Solving Traveling-Salesman Problems"

use super::types::Tour;
use rand::seq::index;
use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Ordered crossover on two tours, in place.
///
/// Picks two distinct cuts and rewrites both parents into their children.
/// Both fitnesses are cleared, even if a child happens to equal its parent.
/// Tours shorter than 2 nodes are left untouched.
///
/// # Panics
/// Panics if the tours have different lengths.
pub fn ordered_crossover<R: Rng>(a: &mut Tour, b: &mut Tour, rng: &mut R) {
    assert_eq!(a.len(), b.len(), "parents must have equal length");
    if a.len() < 2 {
        return;
    }
    let (lo, hi) = distinct_cuts(a.len(), rng);
    let (child_a, child_b) = ordered_crossover_at(a.nodes(), b.nodes(), lo, hi);
    a.replace_nodes(child_a);
    b.replace_nodes(child_b);
}

/// Ordered crossover with explicit cuts.
///
/// Cuts may be given in either order. Child 1 keeps `p1[..lo]` and `p1[hi..]`
/// and fills `lo..hi` with the nodes of `p2`, in `p2` order, that are not
/// already in the kept part. Child 2 keeps the ends of `p2` and takes its
/// middle in the order the nodes appear in child 1.
///
/// # Panics
/// Panics if the parents differ in length or a cut is out of range.
pub fn ordered_crossover_at(
    p1: &[usize],
    p2: &[usize],
    cut_a: usize,
    cut_b: usize,
) -> (Vec<usize>, Vec<usize>) {
    let n = p1.len();
    assert_eq!(n, p2.len(), "parents must have equal length");
    let (lo, hi) = if cut_a <= cut_b { (cut_a, cut_b) } else { (cut_b, cut_a) };
    assert!(hi <= n, "cut index out of range");

    let child_a = ox_build_child(p1, p2, lo, hi);
    let child_b = ox_build_child(p2, &child_a, lo, hi);
    (child_a, child_b)
}

/// Build one child: prefix/suffix from `template`, middle from `donor`.
fn ox_build_child(template: &[usize], donor: &[usize], lo: usize, hi: usize) -> Vec<usize> {
    let n = template.len();
    let max_node = template.iter().chain(donor).copied().max().unwrap_or(0);
    let mut fixed = vec![false; max_node + 1];
    for &v in template[..lo].iter().chain(&template[hi..]) {
        fixed[v] = true;
    }

    let mut child = Vec::with_capacity(n);
    child.extend_from_slice(&template[..lo]);
    child.extend(donor.iter().copied().filter(|&v| !fixed[v]));
    child.extend_from_slice(&template[hi..]);
    child
}

// ============================================================================
// Mutation
// ============================================================================

/// Segment-reversal mutation, in place.
///
/// Picks two distinct cuts `lo < hi` and reverses `lo..hi`. Clears the
/// fitness. Tours shorter than 2 nodes are left untouched.
pub fn reverse_segment<R: Rng>(tour: &mut Tour, rng: &mut R) {
    if tour.len() < 2 {
        return;
    }
    let (lo, hi) = distinct_cuts(tour.len(), rng);
    reverse_segment_at(tour.nodes_mut(), lo, hi);
}

/// Reverses `nodes[lo..hi]` for cuts given in either order.
///
/// Applying it twice with the same cuts restores the input.
pub fn reverse_segment_at(nodes: &mut [usize], cut_a: usize, cut_b: usize) {
    let (lo, hi) = if cut_a <= cut_b { (cut_a, cut_b) } else { (cut_b, cut_a) };
    nodes[lo..hi].reverse();
}

// ============================================================================
// Helpers
// ============================================================================

/// Two distinct indices in `0..n`, sorted ascending.
///
/// # Panics
/// Panics if `n < 2`.
fn distinct_cuts<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let picked = index::sample(rng, n, 2);
    let (a, b) = (picked.index(0), picked.index(1));
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================
