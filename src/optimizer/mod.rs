pub mod depth;
pub mod runner;

use crate::config::{DepthMode, EngineConfig, MAX_DEPTH};
use crate::geometry::{Finger, FINGERS};
use crate::notes::NoteEvent;
use crate::scorer::Scorer;
use rayon::prelude::*;
use std::sync::Arc;

pub const INFEASIBLE_COST: f32 = -1.0;

/// Best fingering found for one window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowResult {
    /// One finger per enumerated position; all zeros when infeasible.
    pub fingering: Vec<Finger>,
    /// Mean velocity, or `INFEASIBLE_COST`.
    pub cost: f32,
    pub depth: usize,
}

impl WindowResult {
    pub fn infeasible(depth: usize) -> Self {
        Self {
            fingering: vec![0; depth],
            cost: INFEASIBLE_COST,
            depth,
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.cost >= 0.0
    }

    /// Finger committed for the window's first note (0 if infeasible).
    pub fn first(&self) -> Finger {
        self.fingering.first().copied().unwrap_or(0)
    }

    /// Finger the next window must start with (0 = unconstrained).
    pub fn continuation(&self) -> Finger {
        self.fingering.get(1).copied().unwrap_or(0)
    }
}

/// Exhaustive, eagerly pruned search over a window of upcoming notes.
pub struct WindowOptimizer {
    scorer: Arc<Scorer>,
    mode: DepthMode,
    parallel: bool,
}

impl WindowOptimizer {
    pub fn new(scorer: Arc<Scorer>, config: &EngineConfig) -> Self {
        Self {
            scorer,
            mode: config.depth_mode(),
            parallel: config.parallel,
        }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Finds the cheapest feasible fingering of `window`.
    ///
    /// `continuation` pins the first finger when it is 1..=5. Ties keep the first
    /// assignment in ascending enumeration order, in parallel mode too.
    pub fn optimize(&self, window: &[NoteEvent], continuation: Finger) -> WindowResult {
        let window = &window[..window.len().min(MAX_DEPTH)];
        let depth = depth::window_depth(window, self.mode);
        if depth == 0 {
            return WindowResult::infeasible(0);
        }

        let starts: Vec<Finger> = if !FINGERS.contains(&continuation) {
            FINGERS.to_vec()
        } else {
            vec![continuation]
        };

        // Seed the search with every feasible two-finger prefix.
        let mut prefixes: Vec<Vec<Finger>> = Vec::with_capacity(starts.len() * FINGERS.len());
        for &f1 in &starts {
            if depth == 1 {
                prefixes.push(vec![f1]);
                continue;
            }
            for &f2 in &FINGERS {
                if !self.scorer.forbidden(f1, f2, &window[0], &window[1]) {
                    prefixes.push(vec![f1, f2]);
                }
            }
        }

        let branch_bests: Vec<Option<(Vec<Finger>, f32)>> = if self.parallel {
            prefixes
                .into_par_iter()
                .map(|p| self.search_branch(window, depth, p))
                .collect()
        } else {
            prefixes
                .into_iter()
                .map(|p| self.search_branch(window, depth, p))
                .collect()
        };

        // Ordered reduction: strict `<` keeps the earliest branch on ties.
        let mut best: Option<(Vec<Finger>, f32)> = None;
        for (fingering, cost) in branch_bests.into_iter().flatten() {
            match &best {
                Some((_, c)) if cost >= *c => {}
                _ => best = Some((fingering, cost)),
            }
        }

        match best {
            Some((fingering, cost)) => WindowResult {
                fingering,
                cost,
                depth,
            },
            None => WindowResult::infeasible(depth),
        }
    }

    fn search_branch(
        &self,
        window: &[NoteEvent],
        depth: usize,
        mut prefix: Vec<Finger>,
    ) -> Option<(Vec<Finger>, f32)> {
        let mut best = None;
        let mut min_cost = f32::INFINITY;
        self.descend(window, depth, &mut prefix, &mut best, &mut min_cost);
        best.map(|f| (f, min_cost))
    }

    // Depth-first: the pair (k-1, k) is checked before position k is extended.
    fn descend(
        &self,
        window: &[NoteEvent],
        depth: usize,
        prefix: &mut Vec<Finger>,
        best: &mut Option<Vec<Finger>>,
        min_cost: &mut f32,
    ) {
        let k = prefix.len();
        if k == depth {
            let cost = self.scorer.evaluate(prefix, window, depth);
            if cost < *min_cost {
                *min_cost = cost;
                *best = Some(prefix.clone());
            }
            return;
        }

        let fa = prefix[k - 1];
        for &fb in &FINGERS {
            if self.scorer.forbidden(fa, fb, &window[k - 1], &window[k]) {
                continue;
            }
            prefix.push(fb);
            self.descend(window, depth, prefix, best, min_cost);
            prefix.pop();
        }
    }
}
