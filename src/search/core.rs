use bigdecimal::BigDecimal;
use log::{debug, info, trace};
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::expression::{ExpressionTree, NodeId, Operator};
use crate::search::config::SearchConfig;
use crate::search::errors::SearchError;
use crate::search::store::ResultStore;

/// One in-flight search state. Never mutated once pushed.
#[derive(Debug, Clone)]
struct Snapshot {
    tree: ExpressionTree,
    active_site: NodeId,
    remaining: Vec<BigDecimal>,
}

/// `values` with the element at `index` removed, order preserved
fn without(values: &[BigDecimal], index: usize) -> Vec<BigDecimal> {
    values
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, v)| v.clone())
        .collect()
}

impl Snapshot {
    /// One snapshot per source, each rooted at that source alone
    fn seeds(sources: &[BigDecimal]) -> Vec<Snapshot> {
        sources
            .iter()
            .enumerate()
            .map(|(index, constant)| {
                debug!("Seeding root {}", constant);
                let tree = ExpressionTree::constant(constant.clone());
                Snapshot {
                    active_site: tree.root(),
                    tree,
                    remaining: without(sources, index),
                }
            })
            .collect()
    }

    fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Push every expansion of this snapshot onto `stack`
    fn spawn(&self, stack: &mut Vec<Snapshot>) -> Result<(), SearchError> {
        for (index, constant) in self.remaining.iter().enumerate() {
            let remaining = without(&self.remaining, index);
            for op in Operator::ALL {
                for constant_on_right in [true, false] {
                    // k op x would only reorder the operands of x op k
                    if !constant_on_right && op.is_commutative() {
                        continue;
                    }
                    let expansion = self
                        .tree
                        .expand(self.active_site, op, constant, constant_on_right)?;
                    stack.push(Snapshot {
                        tree: expansion.tree,
                        active_site: expansion.active_site,
                        remaining: remaining.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Receives complete trees in the order the stack yields them
trait Completion {
    fn complete(&mut self, tree: ExpressionTree);
}

/// Completion path of a whole search: dedup, evaluate, store
#[derive(Default)]
struct Collector {
    evaluated: FxHashSet<u64>,
    results: ResultStore,
}

impl Completion for Collector {
    fn complete(&mut self, tree: ExpressionTree) {
        if !self.evaluated.insert(tree.canonical_hash()) {
            trace!("Skipping already evaluated shape {}", tree);
            return;
        }
        if let Ok(value) = tree.evaluate() {
            self.results.record(&value, tree);
        }
    }
}

/// A complete tree seen by one shard, kept for the ordered merge
struct Completed {
    hash: u64,
    value: Option<(BigDecimal, ExpressionTree)>,
}

/// Completion path of one root constant explored on its own
#[derive(Default)]
struct Shard {
    evaluated: FxHashSet<u64>,
    completed: Vec<Completed>,
}

impl Completion for Shard {
    fn complete(&mut self, tree: ExpressionTree) {
        let hash = tree.canonical_hash();
        if !self.evaluated.insert(hash) {
            return;
        }
        let value = tree.evaluate().ok().map(|value| (value, tree));
        self.completed.push(Completed { hash, value });
    }
}

/// Depth-first expansion until the stack is empty; returns the number of pops
fn drain(mut stack: Vec<Snapshot>, sink: &mut impl Completion) -> Result<u64, SearchError> {
    let mut iterations = 0u64;

    while let Some(snapshot) = stack.pop() {
        iterations += 1;

        if snapshot.is_complete() {
            sink.complete(snapshot.tree);
            continue;
        }

        snapshot.spawn(&mut stack)?;
    }

    Ok(iterations)
}

/// Everything a search produces
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub results: ResultStore,
    /// Total stack pops, complete or not
    pub iterations: u64,
}

/// Exact number of stack pops a search over `sources` constants performs,
/// or `None` if it does not fit in a `u64`.
///
/// A snapshot with `n` constants left spawns `6n` children (four operators
/// on the right, subtraction and division on the left), so with
/// `P(0) = 1` and `P(n) = 1 + 6n * P(n - 1)` the total is `k * P(k - 1)`.
pub fn search_space_size(sources: usize) -> Option<u64> {
    if sources == 0 {
        return Some(0);
    }
    let mut pops: u64 = 1;
    for n in 1..sources as u64 {
        pops = n.checked_mul(6)?.checked_mul(pops)?.checked_add(1)?;
    }
    (sources as u64).checked_mul(pops)
}

/// Enumerates every cascade expression over a set of constants
pub struct ExpressionSearch {
    config: SearchConfig,
}

impl ExpressionSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the search configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Enumerate, evaluate and group every expression that uses each source
    /// exactly once.
    ///
    /// Branches that divide by zero or overflow are dropped silently.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Tree`] only if an expansion loses track of its
    /// active site, which indicates a bug rather than bad input.
    pub fn search(&self, sources: &[BigDecimal]) -> Result<SearchOutcome, SearchError> {
        match search_space_size(sources.len()) {
            Some(pops) => info!(
                "Searching expressions over {} sources ({} pops expected)",
                sources.len(),
                pops
            ),
            None => info!("Searching expressions over {} sources", sources.len()),
        }

        let seeds = Snapshot::seeds(sources);
        let outcome = if self.config.parallel {
            Self::search_sharded(seeds)?
        } else {
            Self::search_sequential(seeds)?
        };

        info!(
            "Completed in {} iterations: {} values, {} expressions",
            outcome.iterations,
            outcome.results.len(),
            outcome.results.expression_count()
        );
        Ok(outcome)
    }

    fn search_sequential(seeds: Vec<Snapshot>) -> Result<SearchOutcome, SearchError> {
        let mut collector = Collector::default();
        let iterations = drain(seeds, &mut collector)?;
        Ok(SearchOutcome {
            results: collector.results,
            iterations,
        })
    }

    /// Explore each seed separately, then merge in the order a single stack
    /// would have popped them: the last seed first, each subtree in full.
    fn search_sharded(seeds: Vec<Snapshot>) -> Result<SearchOutcome, SearchError> {
        let shards = seeds
            .into_par_iter()
            .rev()
            .map(|seed| {
                let mut shard = Shard::default();
                let iterations = drain(vec![seed], &mut shard)?;
                Ok((iterations, shard))
            })
            .collect::<Result<Vec<_>, SearchError>>()?;

        let mut collector = Collector::default();
        let mut iterations = 0;
        for (count, shard) in shards {
            iterations += count;
            for done in shard.completed {
                if !collector.evaluated.insert(done.hash) {
                    continue;
                }
                if let Some((value, tree)) = done.value {
                    collector.results.record(&value, tree);
                }
            }
        }

        Ok(SearchOutcome {
            results: collector.results,
            iterations,
        })
    }
}

impl Default for ExpressionSearch {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
