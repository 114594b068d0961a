use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{
    automaton::{Dfa, State, StateIndex},
    math::Partition,
};

// A block is the slice elements[start..end]. During a refinement step the marked elements of
// a block are moved to its front, so elements[start..start + marked] are the marked ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    start: usize,
    end: usize,
    marked: usize,
}

impl Block {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

/// A partition of the states `0..n` into disjoint, non-empty blocks, which can only ever be
/// refined. Splitting off the marked part of a block takes time proportional to the size of
/// that part.
#[derive(Debug, Clone)]
pub(crate) struct RefinablePartition {
    // concatenation of all blocks
    elements: Vec<StateIndex>,
    // position of a state in `elements`
    location: Vec<usize>,
    // block that a state belongs to
    block_of: Vec<usize>,
    blocks: Vec<Block>,
}

impl RefinablePartition {
    /// Creates the partition with a single block containing all `n > 0` elements.
    pub(crate) fn new(n: usize) -> Self {
        debug_assert!(n > 0);
        Self {
            elements: (0..n).collect(),
            location: (0..n).collect(),
            block_of: vec![0; n],
            blocks: vec![Block {
                start: 0,
                end: n,
                marked: 0,
            }],
        }
    }

    pub(crate) fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    pub(crate) fn block_size(&self, block: usize) -> usize {
        self.blocks[block].len()
    }

    pub(crate) fn members(&self, block: usize) -> &[StateIndex] {
        let Block { start, end, .. } = self.blocks[block];
        &self.elements[start..end]
    }

    pub(crate) fn block_of(&self, q: StateIndex) -> usize {
        self.block_of[q]
    }

    /// Marks `q`, which must not be marked already. Returns true if `q` is the first marked
    /// element of its block.
    pub(crate) fn mark(&mut self, q: StateIndex) -> bool {
        let block = &mut self.blocks[self.block_of[q]];
        let position = self.location[q];
        let first_unmarked = block.start + block.marked;
        debug_assert!(position >= first_unmarked, "{q} is marked twice");

        let other = self.elements[first_unmarked];
        self.elements.swap(position, first_unmarked);
        self.location[q] = first_unmarked;
        self.location[other] = position;

        block.marked += 1;
        block.marked == 1
    }

    /// Splits the marked elements of `block` off into a new block and returns the id of the
    /// new block. If either all or none of the elements are marked, nothing is split. In any
    /// case the marks of `block` are cleared.
    pub(crate) fn split_marked(&mut self, block: usize) -> Option<usize> {
        let Block { start, end, marked } = self.blocks[block];
        self.blocks[block].marked = 0;
        if marked == 0 || marked == end - start {
            return None;
        }

        let new = self.blocks.len();
        self.blocks.push(Block {
            start,
            end: start + marked,
            marked: 0,
        });
        self.blocks[block].start = start + marked;
        for &q in &self.elements[start..start + marked] {
            self.block_of[q] = new;
        }
        Some(new)
    }
}

/// Hopcroft's partition refinement for a [`Dfa`] whose transitions may be partial. If some
/// transition is undefined, the automaton is completed with an additional rejecting sink
/// state which has index `dfa.size()` and loops on every symbol.
#[derive(Debug)]
pub(crate) struct Hopcroft<'a> {
    dfa: &'a Dfa,
    sink: Option<StateIndex>,
    partition: RefinablePartition,
    // predecessors[c][q] are the states with a transition on the c-th symbol into q
    predecessors: Vec<Vec<Vec<StateIndex>>>,
    worklist: VecDeque<usize>,
    pending: Vec<bool>,
}

impl<'a> Hopcroft<'a> {
    pub(crate) fn new(dfa: &'a Dfa) -> Self {
        let sink = (!dfa.is_complete()).then_some(dfa.size());
        let n = dfa.size() + usize::from(sink.is_some());

        let mut predecessors = vec![vec![vec![]; n]; dfa.alphabet().len()];
        for (c, &sym) in dfa.alphabet().iter().enumerate() {
            for q in 0..n {
                let target = dfa
                    .successor(q, sym)
                    .or(sink)
                    .expect("only incomplete automata have undefined transitions");
                predecessors[c][target].push(q);
            }
        }

        Self {
            dfa,
            sink,
            partition: RefinablePartition::new(n),
            predecessors,
            worklist: VecDeque::new(),
            pending: vec![],
        }
    }

    fn push(&mut self, block: usize) {
        if self.pending.len() <= block {
            self.pending.resize(block + 1, false);
        }
        if !self.pending[block] {
            self.pending[block] = true;
            self.worklist.push_back(block);
        }
    }

    fn pop(&mut self) -> Option<usize> {
        let block = self.worklist.pop_front()?;
        self.pending[block] = false;
        Some(block)
    }

    fn is_pending(&self, block: usize) -> bool {
        self.pending.get(block).copied().unwrap_or(false)
    }

    /// Splits the states into accepting and rejecting ones and seeds the worklist with the
    /// smaller of the two blocks, or with the only block if all states agree.
    fn initialize(&mut self) {
        for q in self.dfa.state_indices().filter(|&q| self.dfa.is_accepting(q)) {
            self.partition.mark(q);
        }

        match self.partition.split_marked(0) {
            None => {
                trace!("all states agree on acceptance, starting from a single block");
                self.push(0);
            }
            Some(accepting) => {
                let rejecting = 0;
                if self.partition.block_size(accepting) <= self.partition.block_size(rejecting) {
                    self.push(accepting);
                } else {
                    self.push(rejecting);
                }
            }
        }
    }

    fn refine_with(&mut self, splitter: &[StateIndex]) {
        for c in 0..self.predecessors.len() {
            let mut touched = vec![];
            for &p in splitter {
                for &q in &self.predecessors[c][p] {
                    if self.partition.mark(q) {
                        touched.push(self.partition.block_of(q));
                    }
                }
            }

            for block in touched {
                let Some(new) = self.partition.split_marked(block) else {
                    continue;
                };
                trace!(
                    "split {:?} off block {block} on symbol {}",
                    self.partition.members(new),
                    self.dfa.alphabet()[c]
                );
                if self.is_pending(block)
                    || self.partition.block_size(new) <= self.partition.block_size(block)
                {
                    self.push(new);
                } else {
                    self.push(block);
                }
            }
        }
    }

    /// Refines the partition until the worklist is empty. The blocks of the result are the
    /// classes of the Myhill-Nerode equivalence on the states, including the sink if there
    /// is one.
    pub(crate) fn refine(mut self) -> Refined {
        self.initialize();
        while let Some(block) = self.pop() {
            let splitter = self.partition.members(block).to_vec();
            self.refine_with(&splitter);
        }
        debug!(
            "partition refinement found {} classes among {} states",
            self.partition.num_blocks(),
            self.dfa.size()
        );
        Refined {
            sink: self.sink,
            partition: self.partition,
        }
    }
}

/// The outcome of [`Hopcroft::refine`].
#[derive(Debug)]
pub(crate) struct Refined {
    sink: Option<StateIndex>,
    partition: RefinablePartition,
}

impl Refined {
    /// The block of states from which no word is accepted, if some transition is undefined.
    fn sink_block(&self) -> Option<usize> {
        self.sink.map(|sink| self.partition.block_of(sink))
    }

    fn into_partition(self) -> Partition<StateIndex> {
        let sink = self.sink;
        let partition = self.partition;
        Partition::new(
            (0..partition.num_blocks())
                .map(|b| {
                    partition
                        .members(b)
                        .iter()
                        .copied()
                        .filter(|&q| Some(q) != sink)
                        .collect::<Vec<_>>()
                })
                .filter(|class| !class.is_empty()),
        )
    }
}

/// Computes the Myhill-Nerode classes of the states of `dfa`.
pub(crate) fn equivalence_classes(dfa: &Dfa) -> Partition<StateIndex> {
    Hopcroft::new(dfa).refine().into_partition()
}

/// Builds the quotient of `dfa` under its Myhill-Nerode equivalence. Each block becomes one
/// state whose acceptance and transitions are those of an arbitrary member, the blocks are
/// visited breadth-first from the block containing the initial state. Transitions into the
/// block of the sink are left undefined, so states that cannot reach an accepting state
/// disappear unless the initial state is one of them.
pub(crate) fn hopcroft_minimize(dfa: &Dfa) -> Dfa {
    let refined = Hopcroft::new(dfa).refine();
    let sink_block = refined.sink_block();
    let partition = &refined.partition;

    let initial = partition.block_of(dfa.initial());
    if Some(initial) == sink_block {
        trace!("the automaton accepts no word");
        return Dfa::new(vec![State::new(false)], 0, dfa.alphabet().to_vec());
    }

    let mut index: Vec<Option<StateIndex>> = vec![None; partition.num_blocks()];
    index[initial] = Some(0);
    let mut queue = VecDeque::from([initial]);
    let mut states = Vec::with_capacity(partition.num_blocks());

    while let Some(block) = queue.pop_front() {
        // only the block of the sink may contain the sink
        let members = partition.members(block);
        let representative = members[0];
        let target_block = |q: StateIndex, sym| {
            dfa.successor(q, sym)
                .map_or(sink_block, |p| Some(partition.block_of(p)))
        };
        debug_assert!(members.iter().all(|&q| {
            dfa.is_accepting(q) == dfa.is_accepting(representative)
                && dfa
                    .alphabet()
                    .iter()
                    .all(|&sym| target_block(q, sym) == target_block(representative, sym))
        }));

        let mut state = State::new(dfa.is_accepting(representative));
        for (sym, p) in dfa.transitions_from(representative) {
            let target = partition.block_of(p);
            if Some(target) == sink_block {
                continue;
            }
            let target = match index[target] {
                Some(idx) => idx,
                None => {
                    let idx = states.len() + queue.len() + 1;
                    index[target] = Some(idx);
                    queue.push_back(target);
                    idx
                }
            };
            state.add_transition(sym, target);
        }
        states.push(state);
    }

    Dfa::new(states, 0, dfa.alphabet().to_vec())
}
