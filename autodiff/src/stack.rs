use std::cell::RefCell;

use crate::Var;

/// A single recorded statement, holding the partial derivatives of its result
/// with respect to the statements it was computed from.
#[derive(Debug, Clone, Copy)]
enum Node {
    Leaf,
    Unary { dep: usize, partial: f64 },
    Binary { deps: [(usize, f64); 2] },
}

#[derive(Debug, Default)]
struct Tape {
    nodes: Vec<Node>,
    adjoints: Vec<f64>,
}

impl Tape {
    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn sync_adjoints(&mut self) {
        self.adjoints.resize(self.nodes.len(), 0.);
    }
}

/// A recording context.
///
/// Every operation on a [`Var`] bound to this stack is appended to the current
/// recording. The stack uses interior mutability and is therefore not `Sync`, a
/// recording can only ever be driven from the thread that owns it.
#[derive(Debug, Default)]
pub struct Stack {
    tape: RefCell<Tape>,
}

impl Stack {
    /// Creates a new `Stack` with an empty recording.
    ///
    /// # Returns
    /// A new `Stack` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards the current recording and its adjoints.
    ///
    /// Takes `&mut self`, so no `Var` from the previous recording can outlive it.
    pub fn new_recording(&mut self) {
        let tape = self.tape.get_mut();
        tape.nodes.clear();
        tape.adjoints.clear();
    }

    /// Registers an independent input on the current recording.
    ///
    /// # Arguments
    /// * `value` - The numeric value of the input.
    ///
    /// # Returns
    /// A differentiable value bound to this stack.
    pub fn variable(&self, value: f64) -> Var<'_> {
        let index = self.tape.borrow_mut().push(Node::Leaf);
        Var::new(self, index, value)
    }

    /// Propagates every seeded gradient backwards through the recording.
    ///
    /// Running it twice without re-seeding accumulates the adjoints twice.
    pub fn compute_adjoint(&self) {
        let mut tape = self.tape.borrow_mut();
        tape.sync_adjoints();

        let Tape { nodes, adjoints } = &mut *tape;

        for i in (0..nodes.len()).rev() {
            let adjoint = adjoints[i];
            if adjoint == 0. {
                continue;
            }

            match nodes[i] {
                Node::Leaf => {}
                Node::Unary { dep, partial } => adjoints[dep] += adjoint * partial,
                Node::Binary { deps } => {
                    for (dep, partial) in deps {
                        adjoints[dep] += adjoint * partial;
                    }
                }
            }
        }
    }

    /// Returns the number of statements in the current recording.
    pub fn len(&self) -> usize {
        self.tape.borrow().nodes.len()
    }

    /// Returns `true` if nothing has been recorded since the last `new_recording`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn push_unary(&self, dep: usize, partial: f64) -> usize {
        self.tape.borrow_mut().push(Node::Unary { dep, partial })
    }

    pub(crate) fn push_binary(&self, lhs: (usize, f64), rhs: (usize, f64)) -> usize {
        self.tape.borrow_mut().push(Node::Binary { deps: [lhs, rhs] })
    }

    pub(crate) fn set_adjoint(&self, index: usize, seed: f64) {
        let mut tape = self.tape.borrow_mut();
        tape.sync_adjoints();
        tape.adjoints[index] = seed;
    }

    pub(crate) fn adjoint(&self, index: usize) -> f64 {
        self.tape
            .borrow()
            .adjoints
            .get(index)
            .copied()
            .unwrap_or_default()
    }
}
