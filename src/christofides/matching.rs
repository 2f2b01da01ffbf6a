//! Minimum-weight perfect matching via the blossom algorithm.
//!
//! # Algorithm
//!
//! Maximum-weight matching in a general graph, in the primal-dual
//! formulation of Galil (1986): grow alternating trees from free vertices,
//! contract odd cycles (blossoms) on the fly, and pump slack out of the
//! dual variables until an augmenting path appears. With the
//! maximum-cardinality option the search keeps augmenting past the point
//! where extra edges stop paying for themselves, which on a complete graph
//! with an even vertex count yields a perfect matching.
//!
//! Minimum-weight perfect matching is obtained by negating the weights
//! first, the same reduction the surrounding Christofides step uses.
//!
//! # Complexity
//!
//! O(n³) over n vertices; each of the O(n) stages scans every edge a
//! constant number of times per dual adjustment.
//!
//! # Reference
//!
//! Galil, Z. (1986). "Efficient algorithms for finding maximum matching in
//! graphs", *ACM Computing Surveys* 18(1), 23-38.

use crate::error::{Error, Result};
use crate::graph::Graph;

/// Sentinel for "no vertex / no endpoint / no edge".
const NONE: usize = usize::MAX;

/// Computes a minimum-weight perfect matching over all nodes of `graph`.
///
/// Returns the matched pairs `(i, j)` with `i < j`. The node count must be
/// even; on a complete graph (the only shape the Christofides step
/// produces) a perfect matching always exists.
pub fn minimum_weight_perfect_matching(graph: &Graph) -> Result<Vec<(usize, usize)>> {
    let n = graph.num_nodes();
    if n % 2 != 0 {
        return Err(Error::invalid_graph(format!(
            "perfect matching needs an even node count, got {n}"
        )));
    }
    // Negate weights: maximum-weight max-cardinality matching on the
    // negated graph is a minimum-weight perfect matching on the original.
    // Self-loops are excluded by construction, so no loop penalty is
    // needed here.
    let mut edges = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            edges.push((i, j, -graph.weight(i, j)));
        }
    }
    let mate = max_weight_matching(n, &edges, true);
    let mut pairs = Vec::with_capacity(n / 2);
    for v in 0..n {
        let w = mate[v];
        if w == NONE {
            return Err(Error::invalid_graph(format!(
                "perfect matching left node {v} unmatched"
            )));
        }
        if v < w {
            pairs.push((v, w));
        }
    }
    Ok(pairs)
}

/// Maximum-weight matching over `edges` on vertices `0..nvertex`.
///
/// Returns `mate` where `mate[v]` is the vertex matched to `v`, or the
/// `NONE` sentinel if `v` stays single. With `max_cardinality` the matching
/// has maximum size among all matchings (and maximum weight among those).
pub(crate) fn max_weight_matching(
    nvertex: usize,
    edges: &[(usize, usize, f64)],
    max_cardinality: bool,
) -> Vec<usize> {
    if edges.is_empty() {
        return vec![NONE; nvertex];
    }
    let mut matcher = Matcher::new(nvertex, edges, max_cardinality);
    matcher.run();
    matcher.finish()
}

/// State of one blossom-algorithm run.
///
/// Vertices are `0..n`; blossom slots are `n..2n`. Edge "endpoints" are
/// `2k` and `2k + 1` for edge `k`, so `p ^ 1` is the opposite endpoint.
/// Vertex duals are stored pre-multiplied by two, as are edge slacks.
struct Matcher<'a> {
    n: usize,
    edges: &'a [(usize, usize, f64)],
    max_cardinality: bool,
    /// endpoint[p]: vertex to which endpoint p is attached.
    endpoint: Vec<usize>,
    /// neighbend[v]: remote endpoints of the edges attached to v.
    neighbend: Vec<Vec<usize>>,
    /// mate[v]: remote endpoint of v's matched edge, or NONE.
    mate: Vec<usize>,
    /// label[b]: 0 free, 1 S, 2 T (bit 4 is a trace breadcrumb).
    label: Vec<u8>,
    /// labelend[b]: remote endpoint through which b got its label, or NONE.
    labelend: Vec<usize>,
    /// inblossom[v]: top-level blossom containing v.
    inblossom: Vec<usize>,
    blossomparent: Vec<usize>,
    blossomchilds: Vec<Vec<usize>>,
    /// blossombase[b]: base vertex of b, or NONE for unused slots.
    blossombase: Vec<usize>,
    blossomendps: Vec<Vec<usize>>,
    /// bestedge[b]: least-slack edge as tracked during scanning, or NONE.
    bestedge: Vec<usize>,
    blossombestedges: Vec<Vec<usize>>,
    unusedblossoms: Vec<usize>,
    dualvar: Vec<f64>,
    allowedge: Vec<bool>,
    queue: Vec<usize>,
}

impl<'a> Matcher<'a> {
    fn new(n: usize, edges: &'a [(usize, usize, f64)], max_cardinality: bool) -> Self {
        let nedge = edges.len();
        let maxweight = edges.iter().map(|e| e.2).fold(0.0f64, f64::max);
        let mut endpoint = Vec::with_capacity(2 * nedge);
        let mut neighbend = vec![Vec::new(); n];
        for (k, &(i, j, _)) in edges.iter().enumerate() {
            endpoint.push(i);
            endpoint.push(j);
            neighbend[i].push(2 * k + 1);
            neighbend[j].push(2 * k);
        }
        let mut dualvar = vec![maxweight; n];
        dualvar.extend(std::iter::repeat(0.0).take(n));
        Self {
            n,
            edges,
            max_cardinality,
            endpoint,
            neighbend,
            mate: vec![NONE; n],
            label: vec![0; 2 * n],
            labelend: vec![NONE; 2 * n],
            inblossom: (0..n).collect(),
            blossomparent: vec![NONE; 2 * n],
            blossomchilds: vec![Vec::new(); 2 * n],
            blossombase: (0..n).chain(std::iter::repeat(NONE).take(n)).collect(),
            blossomendps: vec![Vec::new(); 2 * n],
            bestedge: vec![NONE; 2 * n],
            blossombestedges: vec![Vec::new(); 2 * n],
            unusedblossoms: (n..2 * n).collect(),
            dualvar,
            allowedge: vec![false; nedge],
            queue: Vec::new(),
        }
    }

    /// 2 × slack of edge k (not meaningful for edges inside a blossom).
    fn slack(&self, k: usize) -> f64 {
        let (i, j, wt) = self.edges[k];
        self.dualvar[i] + self.dualvar[j] - 2.0 * wt
    }

    /// All leaf vertices of blossom b.
    fn blossom_leaves(&self, b: usize) -> Vec<usize> {
        let mut leaves = Vec::new();
        let mut stack = vec![b];
        while let Some(t) = stack.pop() {
            if t < self.n {
                leaves.push(t);
            } else {
                stack.extend(self.blossomchilds[t].iter().copied());
            }
        }
        leaves
    }

    /// Wrapping (Python-style, negative-tolerant) child lookup.
    fn child_at(&self, b: usize, j: isize) -> usize {
        let len = self.blossomchilds[b].len() as isize;
        self.blossomchilds[b][j.rem_euclid(len) as usize]
    }

    fn endp_at(&self, b: usize, j: isize) -> usize {
        let len = self.blossomendps[b].len() as isize;
        self.blossomendps[b][j.rem_euclid(len) as usize]
    }

    /// Labels the top-level blossom of w with t, reached through remote
    /// endpoint p. Labeling a blossom T immediately labels its mate S.
    fn assign_label(&mut self, w: usize, t: u8, p: usize) {
        let b = self.inblossom[w];
        debug_assert!(self.label[w] == 0 && self.label[b] == 0);
        self.label[w] = t;
        self.label[b] = t;
        self.labelend[w] = p;
        self.labelend[b] = p;
        self.bestedge[w] = NONE;
        self.bestedge[b] = NONE;
        if t == 1 {
            let leaves = self.blossom_leaves(b);
            self.queue.extend(leaves);
        } else if t == 2 {
            let base = self.blossombase[b];
            let matep = self.mate[base];
            debug_assert!(matep != NONE);
            self.assign_label(self.endpoint[matep], 1, matep ^ 1);
        }
    }

    /// Traces back from S-vertices v and w; returns the base of a new
    /// blossom, or NONE if the paths meet at distinct roots (an augmenting
    /// path exists).
    fn scan_blossom(&mut self, v: usize, w: usize) -> usize {
        let mut path = Vec::new();
        let mut base = NONE;
        let mut v = v;
        let mut w = w;
        while v != NONE || w != NONE {
            let mut b = self.inblossom[v];
            if self.label[b] & 4 != 0 {
                base = self.blossombase[b];
                break;
            }
            debug_assert_eq!(self.label[b], 1);
            path.push(b);
            self.label[b] = 5;
            debug_assert_eq!(self.labelend[b], self.mate[self.blossombase[b]]);
            if self.labelend[b] == NONE {
                // Reached a single vertex; this path ends here.
                v = NONE;
            } else {
                v = self.endpoint[self.labelend[b]];
                b = self.inblossom[v];
                debug_assert_eq!(self.label[b], 2);
                debug_assert!(self.labelend[b] != NONE);
                v = self.endpoint[self.labelend[b]];
            }
            if w != NONE {
                std::mem::swap(&mut v, &mut w);
            }
        }
        for b in path {
            self.label[b] = 1;
        }
        base
    }

    /// Contracts the cycle closed by edge k (joining two S-blossoms whose
    /// alternating paths meet at `base`) into a new S-blossom.
    fn add_blossom(&mut self, base: usize, k: usize) {
        let (mut v, mut w, _) = self.edges[k];
        let bb = self.inblossom[base];
        let mut bv = self.inblossom[v];
        let mut bw = self.inblossom[w];
        let b = self.unusedblossoms.pop().expect("blossom slots exhausted");
        self.blossombase[b] = base;
        self.blossomparent[b] = NONE;
        self.blossomparent[bb] = b;
        let mut path = Vec::new();
        let mut endps = Vec::new();
        while bv != bb {
            self.blossomparent[bv] = b;
            path.push(bv);
            endps.push(self.labelend[bv]);
            debug_assert!(self.labelend[bv] != NONE);
            v = self.endpoint[self.labelend[bv]];
            bv = self.inblossom[v];
        }
        path.push(bb);
        path.reverse();
        endps.reverse();
        endps.push(2 * k);
        while bw != bb {
            self.blossomparent[bw] = b;
            path.push(bw);
            endps.push(self.labelend[bw] ^ 1);
            debug_assert!(self.labelend[bw] != NONE);
            w = self.endpoint[self.labelend[bw]];
            bw = self.inblossom[w];
        }
        debug_assert_eq!(self.label[bb], 1);
        self.blossomchilds[b] = path;
        self.blossomendps[b] = endps;
        self.label[b] = 1;
        self.labelend[b] = self.labelend[bb];
        self.dualvar[b] = 0.0;
        for v in self.blossom_leaves(b) {
            if self.label[self.inblossom[v]] == 2 {
                // Former T-vertex becomes S through the contraction.
                self.queue.push(v);
            }
            self.inblossom[v] = b;
        }

        // Compute the least-slack edges from the new blossom to every
        // other S-blossom.
        let mut bestedgeto = vec![NONE; 2 * self.n];
        for idx in 0..self.blossomchilds[b].len() {
            let bv = self.blossomchilds[b][idx];
            let nblists: Vec<Vec<usize>> = if self.blossombestedges[bv].is_empty() {
                self.blossom_leaves(bv)
                    .into_iter()
                    .map(|v| self.neighbend[v].iter().map(|p| p / 2).collect())
                    .collect()
            } else {
                vec![self.blossombestedges[bv].clone()]
            };
            for nblist in nblists {
                for k in nblist {
                    let (mut i, mut j, _) = self.edges[k];
                    if self.inblossom[j] == b {
                        std::mem::swap(&mut i, &mut j);
                    }
                    let bj = self.inblossom[j];
                    if bj != b
                        && self.label[bj] == 1
                        && (bestedgeto[bj] == NONE || self.slack(k) < self.slack(bestedgeto[bj]))
                    {
                        bestedgeto[bj] = k;
                    }
                }
            }
            self.blossombestedges[bv] = Vec::new();
            self.bestedge[bv] = NONE;
        }
        self.blossombestedges[b] = bestedgeto.into_iter().filter(|&k| k != NONE).collect();
        self.bestedge[b] = NONE;
        for idx in 0..self.blossombestedges[b].len() {
            let k = self.blossombestedges[b][idx];
            if self.bestedge[b] == NONE || self.slack(k) < self.slack(self.bestedge[b]) {
                self.bestedge[b] = k;
            }
        }
    }

    /// Expands blossom b back into its sub-blossoms; during a stage a
    /// T-blossom's children are relabeled along the alternating path.
    fn expand_blossom(&mut self, b: usize, endstage: bool) {
        for idx in 0..self.blossomchilds[b].len() {
            let s = self.blossomchilds[b][idx];
            self.blossomparent[s] = NONE;
            if s < self.n {
                self.inblossom[s] = s;
            } else if endstage && self.dualvar[s] == 0.0 {
                self.expand_blossom(s, endstage);
            } else {
                for v in self.blossom_leaves(s) {
                    self.inblossom[v] = s;
                }
            }
        }
        if !endstage && self.label[b] == 2 {
            debug_assert!(self.labelend[b] != NONE);
            let entrychild = self.inblossom[self.endpoint[self.labelend[b] ^ 1]];
            let pos = self.blossomchilds[b]
                .iter()
                .position(|&c| c == entrychild)
                .expect("entry child is a direct sub-blossom");
            let len = self.blossomchilds[b].len() as isize;
            let (mut j, jstep, endptrick): (isize, isize, usize) = if pos % 2 == 1 {
                (pos as isize - len, 1, 0)
            } else {
                (pos as isize, -1, 1)
            };
            let mut p = self.labelend[b];
            while j != 0 {
                // Relabel the T-sub-blossom.
                let t_entry = self.endpoint[p ^ 1];
                let q = self.endp_at(b, j - endptrick as isize) ^ endptrick ^ 1;
                let s_entry = self.endpoint[q];
                self.label[t_entry] = 0;
                self.label[s_entry] = 0;
                self.assign_label(t_entry, 2, p);
                // Step past the next S-sub-blossom.
                let e = self.endp_at(b, j - endptrick as isize);
                self.allowedge[e / 2] = true;
                j += jstep;
                p = self.endp_at(b, j - endptrick as isize) ^ endptrick;
                self.allowedge[p / 2] = true;
                j += jstep;
            }
            // Base sub-blossom: label T without stepping to its mate.
            let bv = self.child_at(b, j);
            let entry = self.endpoint[p ^ 1];
            self.label[entry] = 2;
            self.label[bv] = 2;
            self.labelend[entry] = p;
            self.labelend[bv] = p;
            self.bestedge[bv] = NONE;
            // Continue along the blossom until we get back to entrychild,
            // labeling unreached sub-blossoms that have become reachable.
            j += jstep;
            while self.child_at(b, j) != entrychild {
                let bv = self.child_at(b, j);
                if self.label[bv] == 1 {
                    j += jstep;
                    continue;
                }
                let mut reached = NONE;
                for v in self.blossom_leaves(bv) {
                    if self.label[v] != 0 {
                        reached = v;
                        break;
                    }
                }
                if reached != NONE {
                    debug_assert_eq!(self.label[reached], 2);
                    debug_assert_eq!(self.inblossom[reached], bv);
                    self.label[reached] = 0;
                    let base_mate = self.endpoint[self.mate[self.blossombase[bv]]];
                    self.label[base_mate] = 0;
                    self.assign_label(reached, 2, self.labelend[reached]);
                }
                j += jstep;
            }
        }
        // Recycle the blossom slot.
        self.label[b] = 0;
        self.labelend[b] = NONE;
        self.blossomchilds[b] = Vec::new();
        self.blossomendps[b] = Vec::new();
        self.blossombase[b] = NONE;
        self.blossombestedges[b] = Vec::new();
        self.bestedge[b] = NONE;
        self.unusedblossoms.push(b);
    }

    /// Swaps matched/unmatched edges along the path inside blossom b from
    /// vertex v down to the base, then rotates the blossom onto v.
    fn augment_blossom(&mut self, b: usize, v: usize) {
        let mut t = v;
        while self.blossomparent[t] != b {
            t = self.blossomparent[t];
        }
        if t >= self.n {
            self.augment_blossom(t, v);
        }
        let pos = self.blossomchilds[b]
            .iter()
            .position(|&c| c == t)
            .expect("t is a direct sub-blossom");
        let len = self.blossomchilds[b].len() as isize;
        let (mut j, jstep, endptrick): (isize, isize, usize) = if pos % 2 == 1 {
            (pos as isize - len, 1, 0)
        } else {
            (pos as isize, -1, 1)
        };
        while j != 0 {
            j += jstep;
            let t = self.child_at(b, j);
            let p = self.endp_at(b, j - endptrick as isize) ^ endptrick;
            if t >= self.n {
                self.augment_blossom(t, self.endpoint[p]);
            }
            j += jstep;
            let t = self.child_at(b, j);
            if t >= self.n {
                self.augment_blossom(t, self.endpoint[p ^ 1]);
            }
            let (eu, ev) = (self.endpoint[p], self.endpoint[p ^ 1]);
            self.mate[eu] = p ^ 1;
            self.mate[ev] = p;
        }
        self.blossomchilds[b].rotate_left(pos);
        self.blossomendps[b].rotate_left(pos);
        self.blossombase[b] = self.blossombase[self.blossomchilds[b][0]];
        debug_assert_eq!(self.blossombase[b], v);
    }

    /// Augments the matching along the path through edge k, which joins a
    /// pair of S-vertices in different trees.
    fn augment_matching(&mut self, k: usize) {
        let (v, w, _) = self.edges[k];
        for (mut s, mut p) in [(v, 2 * k + 1), (w, 2 * k)] {
            loop {
                let bs = self.inblossom[s];
                debug_assert_eq!(self.label[bs], 1);
                debug_assert_eq!(self.labelend[bs], self.mate[self.blossombase[bs]]);
                if bs >= self.n {
                    self.augment_blossom(bs, s);
                }
                self.mate[s] = p;
                if self.labelend[bs] == NONE {
                    // Reached a single vertex; this half of the path ends.
                    break;
                }
                let t = self.endpoint[self.labelend[bs]];
                let bt = self.inblossom[t];
                debug_assert_eq!(self.label[bt], 2);
                debug_assert!(self.labelend[bt] != NONE);
                s = self.endpoint[self.labelend[bt]];
                let j = self.endpoint[self.labelend[bt] ^ 1];
                debug_assert_eq!(self.blossombase[bt], t);
                if bt >= self.n {
                    self.augment_blossom(bt, j);
                }
                self.mate[j] = self.labelend[bt];
                p = self.labelend[bt] ^ 1;
            }
        }
    }

    fn run(&mut self) {
        for _stage in 0..self.n {
            // A stage finds one augmenting path and uses it; labels and
            // allowable-edge knowledge do not survive between stages.
            self.label.iter_mut().for_each(|l| *l = 0);
            self.bestedge.iter_mut().for_each(|e| *e = NONE);
            for b in self.n..2 * self.n {
                self.blossombestedges[b] = Vec::new();
            }
            self.allowedge.iter_mut().for_each(|a| *a = false);
            self.queue.clear();

            for v in 0..self.n {
                if self.mate[v] == NONE && self.label[self.inblossom[v]] == 0 {
                    self.assign_label(v, 1, NONE);
                }
            }

            let mut augmented = false;
            loop {
                // Substage: grow trees breadth-first; on failure, adjust
                // duals and retry.
                while let Some(v) = self.queue.pop() {
                    debug_assert_eq!(self.label[self.inblossom[v]], 1);
                    for idx in 0..self.neighbend[v].len() {
                        let p = self.neighbend[v][idx];
                        let k = p / 2;
                        let w = self.endpoint[p];
                        if self.inblossom[v] == self.inblossom[w] {
                            // Internal to a blossom.
                            continue;
                        }
                        let mut kslack = 0.0;
                        if !self.allowedge[k] {
                            kslack = self.slack(k);
                            if kslack <= 0.0 {
                                self.allowedge[k] = true;
                            }
                        }
                        if self.allowedge[k] {
                            if self.label[self.inblossom[w]] == 0 {
                                // Free vertex: label T, its mate S.
                                self.assign_label(w, 2, p ^ 1);
                            } else if self.label[self.inblossom[w]] == 1 {
                                // Two S-trees touch: blossom or augment.
                                let base = self.scan_blossom(v, w);
                                if base != NONE {
                                    self.add_blossom(base, k);
                                } else {
                                    self.augment_matching(k);
                                    augmented = true;
                                    break;
                                }
                            } else if self.label[w] == 0 {
                                // Unreached vertex inside a T-blossom;
                                // remember the entry for expansion.
                                debug_assert_eq!(self.label[self.inblossom[w]], 2);
                                self.label[w] = 2;
                                self.labelend[w] = p ^ 1;
                            }
                        } else if self.label[self.inblossom[w]] == 1 {
                            let b = self.inblossom[v];
                            if self.bestedge[b] == NONE || kslack < self.slack(self.bestedge[b]) {
                                self.bestedge[b] = k;
                            }
                        } else if self.label[w] == 0
                            && (self.bestedge[w] == NONE || kslack < self.slack(self.bestedge[w]))
                        {
                            self.bestedge[w] = k;
                        }
                    }
                    if augmented {
                        break;
                    }
                }
                if augmented {
                    break;
                }

                // No augmenting path: compute the dual adjustment.
                let mut deltatype = 0u8;
                let mut delta = 0.0;
                let mut deltaedge = NONE;
                let mut deltablossom = NONE;

                if !self.max_cardinality {
                    deltatype = 1;
                    delta = self.dualvar[..self.n]
                        .iter()
                        .fold(f64::INFINITY, |a, &b| a.min(b));
                }
                for v in 0..self.n {
                    if self.label[self.inblossom[v]] == 0 && self.bestedge[v] != NONE {
                        let d = self.slack(self.bestedge[v]);
                        if deltatype == 0 || d < delta {
                            delta = d;
                            deltatype = 2;
                            deltaedge = self.bestedge[v];
                        }
                    }
                }
                for b in 0..2 * self.n {
                    if self.blossomparent[b] == NONE
                        && self.label[b] == 1
                        && self.bestedge[b] != NONE
                    {
                        let d = self.slack(self.bestedge[b]) / 2.0;
                        if deltatype == 0 || d < delta {
                            delta = d;
                            deltatype = 3;
                            deltaedge = self.bestedge[b];
                        }
                    }
                }
                for b in self.n..2 * self.n {
                    if self.blossombase[b] != NONE
                        && self.blossomparent[b] == NONE
                        && self.label[b] == 2
                        && (deltatype == 0 || self.dualvar[b] < delta)
                    {
                        delta = self.dualvar[b];
                        deltatype = 4;
                        deltablossom = b;
                    }
                }
                if deltatype == 0 {
                    // Max-cardinality optimum reached; do one final dual
                    // update so the optimum is verifiable.
                    debug_assert!(self.max_cardinality);
                    deltatype = 1;
                    delta = self.dualvar[..self.n]
                        .iter()
                        .fold(f64::INFINITY, |a, &b| a.min(b))
                        .max(0.0);
                }

                for v in 0..self.n {
                    match self.label[self.inblossom[v]] {
                        1 => self.dualvar[v] -= delta,
                        2 => self.dualvar[v] += delta,
                        _ => {}
                    }
                }
                for b in self.n..2 * self.n {
                    if self.blossombase[b] != NONE && self.blossomparent[b] == NONE {
                        match self.label[b] {
                            1 => self.dualvar[b] += delta,
                            2 => self.dualvar[b] -= delta,
                            _ => {}
                        }
                    }
                }

                match deltatype {
                    1 => break,
                    2 => {
                        self.allowedge[deltaedge] = true;
                        let (mut i, j, _) = self.edges[deltaedge];
                        if self.label[self.inblossom[i]] == 0 {
                            i = j;
                        }
                        debug_assert_eq!(self.label[self.inblossom[i]], 1);
                        self.queue.push(i);
                    }
                    3 => {
                        self.allowedge[deltaedge] = true;
                        let (i, _, _) = self.edges[deltaedge];
                        debug_assert_eq!(self.label[self.inblossom[i]], 1);
                        self.queue.push(i);
                    }
                    _ => self.expand_blossom(deltablossom, false),
                }
            }
            if !augmented {
                break;
            }

            // End of stage: expand all S-blossoms whose dual dropped to 0.
            for b in self.n..2 * self.n {
                if self.blossomparent[b] == NONE
                    && self.blossombase[b] != NONE
                    && self.label[b] == 1
                    && self.dualvar[b] == 0.0
                {
                    self.expand_blossom(b, true);
                }
            }
        }
    }

    /// Maps endpoint-valued mates to vertex-valued mates.
    fn finish(self) -> Vec<usize> {
        let mut mate = vec![NONE; self.n];
        for v in 0..self.n {
            if self.mate[v] != NONE {
                mate[v] = self.endpoint[self.mate[v]];
            }
        }
        mate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matching_weight(edges: &[(usize, usize, f64)], mate: &[usize]) -> f64 {
        edges
            .iter()
            .filter(|&&(i, j, _)| mate[i] == j)
            .map(|&(_, _, w)| w)
            .sum()
    }

    #[test]
    fn test_single_edge() {
        let edges = [(0, 1, 5.0)];
        let mate = max_weight_matching(2, &edges, false);
        assert_eq!(mate, vec![1, 0]);
    }

    #[test]
    fn test_prefers_heavy_edge() {
        // Path 0-1-2: only one edge fits; take the heavier.
        let edges = [(0, 1, 2.0), (1, 2, 5.0)];
        let mate = max_weight_matching(3, &edges, false);
        assert_eq!(mate[1], 2);
        assert_eq!(mate[2], 1);
        assert_eq!(mate[0], NONE);
    }

    #[test]
    fn test_path_weights_force_two_edges() {
        // Path 0-1-2-3 with weights 5, 11, 5: a single middle edge (11)
        // loses to the two outer edges (10) only under max cardinality.
        let edges = [(0, 1, 5.0), (1, 2, 11.0), (2, 3, 5.0)];
        let mate = max_weight_matching(4, &edges, false);
        assert_eq!(mate[1], 2);
        let mate = max_weight_matching(4, &edges, true);
        assert_eq!(mate, vec![1, 0, 3, 2]);
    }

    #[test]
    fn test_triangle_with_pendant() {
        // Triangle 0-1-2 plus pendant 3; unique optimum pairs the outside.
        let edges = [(0, 1, 6.0), (0, 2, 10.0), (1, 2, 5.0), (2, 3, 9.0)];
        let mate = max_weight_matching(4, &edges, false);
        assert_eq!(mate, vec![1, 0, 3, 2]);
        assert!((matching_weight(&edges, &mate) - 15.0).abs() < 1e-10);
    }

    #[test]
    fn test_s_blossom_augmentation() {
        // Creates an S-blossom and augments through it.
        let edges = [(0, 1, 8.0), (0, 2, 9.0), (1, 2, 10.0), (2, 3, 7.0)];
        let mate = max_weight_matching(4, &edges, false);
        assert_eq!(mate, vec![1, 0, 3, 2]);
    }

    #[test]
    fn test_nested_blossom_augmentation() {
        // Nested S-blossom contracted, relabeled, and used for augmenting.
        let edges = [
            (0, 1, 10.0),
            (0, 6, 10.0),
            (1, 2, 12.0),
            (2, 3, 20.0),
            (2, 4, 20.0),
            (3, 4, 25.0),
            (4, 5, 10.0),
            (5, 6, 10.0),
            (6, 7, 8.0),
        ];
        let mate = max_weight_matching(8, &edges, false);
        assert_eq!(mate, vec![1, 0, 3, 2, 5, 4, 7, 6]);
    }

    #[test]
    fn test_perfect_matching_square() {
        // Unit square: perfect matching picks two opposite unit sides.
        let g = Graph::from_fn(4, |i, j| {
            if (i + 2) % 4 == j {
                2f64.sqrt()
            } else {
                1.0
            }
        })
        .expect("valid");
        let pairs = minimum_weight_perfect_matching(&g).expect("even");
        assert_eq!(pairs.len(), 2);
        let total: f64 = pairs.iter().map(|&(i, j)| g.weight(i, j)).sum();
        assert!((total - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_perfect_matching_odd_count_rejected() {
        let g = Graph::from_fn(3, |_, _| 1.0).expect("valid");
        assert!(minimum_weight_perfect_matching(&g).is_err());
    }

    #[test]
    fn test_perfect_matching_six_nodes() {
        // Three cheap disjoint pairs among otherwise expensive edges.
        let cheap = [(0usize, 3usize), (1, 4), (2, 5)];
        let g = Graph::from_fn(6, |i, j| {
            let pair = (i.min(j), i.max(j));
            if cheap.contains(&pair) {
                1.0
            } else {
                10.0
            }
        })
        .expect("valid");
        let pairs = minimum_weight_perfect_matching(&g).expect("even");
        let total: f64 = pairs.iter().map(|&(i, j)| g.weight(i, j)).sum();
        assert!((total - 3.0).abs() < 1e-10);
    }
}
