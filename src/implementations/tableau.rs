//! Satisfiability of LTL through generalized Büchi automata.
//!
//! Formulas are put in negation normal form, expanded into a tableau graph
//! with the construction from "Simple On-the-Fly Automatic Verification of
//! Linear Temporal Logic" (Gerth, Peled, Vardi, Wolper), and the graph is
//! searched for a reachable strongly connected component that meets every
//! acceptance set.

use std::collections::{ BTreeSet, HashMap };

use log::trace;

use crate::implementations::ltl::Ltl;

/// Negation normal form: negation only on atoms
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Nnf {
    True,
    False,
    Lit(String, bool),
    And(Box<Nnf>, Box<Nnf>),
    Or(Box<Nnf>, Box<Nnf>),
    Next(Box<Nnf>),
    Until(Box<Nnf>, Box<Nnf>),
    Release(Box<Nnf>, Box<Nnf>),
}

fn and(a: Nnf, b: Nnf) -> Nnf {
    Nnf::And(Box::new(a), Box::new(b))
}

fn or(a: Nnf, b: Nnf) -> Nnf {
    Nnf::Or(Box::new(a), Box::new(b))
}

fn until(a: Nnf, b: Nnf) -> Nnf {
    Nnf::Until(Box::new(a), Box::new(b))
}

fn release(a: Nnf, b: Nnf) -> Nnf {
    Nnf::Release(Box::new(a), Box::new(b))
}

/// Push negations inward. `negated` says whether `f` sits under an odd
/// number of negations.
pub fn to_nnf(f: &Ltl, negated: bool) -> Nnf {
    match f {
        Ltl::True => if negated { Nnf::False } else { Nnf::True }
        Ltl::False => if negated { Nnf::True } else { Nnf::False }
        Ltl::Atom(a) => Nnf::Lit(a.clone(), !negated),
        Ltl::Not(e) => to_nnf(e, !negated),
        Ltl::And(p, q) => {
            if negated {
                or(to_nnf(p, true), to_nnf(q, true))
            } else {
                and(to_nnf(p, false), to_nnf(q, false))
            }
        }
        Ltl::Or(p, q) => {
            if negated {
                and(to_nnf(p, true), to_nnf(q, true))
            } else {
                or(to_nnf(p, false), to_nnf(q, false))
            }
        }
        // p -> q = !p | q
        Ltl::Implies(p, q) => {
            if negated {
                and(to_nnf(p, false), to_nnf(q, true))
            } else {
                or(to_nnf(p, true), to_nnf(q, false))
            }
        }
        // p <-> q = (p & q) | (!p & !q)
        Ltl::Iff(p, q) => {
            if negated {
                or(and(to_nnf(p, false), to_nnf(q, true)), and(to_nnf(p, true), to_nnf(q, false)))
            } else {
                or(and(to_nnf(p, false), to_nnf(q, false)), and(to_nnf(p, true), to_nnf(q, true)))
            }
        }
        Ltl::Next(e) => Nnf::Next(Box::new(to_nnf(e, negated))),
        // F p = true U p, !F p = false R !p
        Ltl::Finally(e) => {
            if negated {
                release(Nnf::False, to_nnf(e, true))
            } else {
                until(Nnf::True, to_nnf(e, false))
            }
        }
        // G p = false R p, !G p = true U !p
        Ltl::Globally(e) => {
            if negated {
                until(Nnf::True, to_nnf(e, true))
            } else {
                release(Nnf::False, to_nnf(e, false))
            }
        }
        Ltl::Until(p, q) => {
            if negated {
                release(to_nnf(p, true), to_nnf(q, true))
            } else {
                until(to_nnf(p, false), to_nnf(q, false))
            }
        }
        Ltl::Release(p, q) => {
            if negated {
                until(to_nnf(p, true), to_nnf(q, true))
            } else {
                release(to_nnf(p, false), to_nnf(q, false))
            }
        }
        // p W q = q R (q | p), !(p W q) = !q U (!p & !q)
        Ltl::WeakUntil(p, q) => {
            if negated {
                until(to_nnf(q, true), and(to_nnf(p, true), to_nnf(q, true)))
            } else {
                release(to_nnf(q, false), or(to_nnf(q, false), to_nnf(p, false)))
            }
        }
    }
}

/// Incoming edge from the virtual initial state
const INIT: usize = usize::MAX;

#[derive(Debug, Clone)]
pub struct TableauNode {
    pub incoming: BTreeSet<usize>,
    pub old: BTreeSet<Nnf>,
    pub next: BTreeSet<Nnf>,
}

struct Pending {
    incoming: BTreeSet<usize>,
    old: BTreeSet<Nnf>,
    new: BTreeSet<Nnf>,
    next: BTreeSet<Nnf>,
}

impl Pending {
    fn schedule(&mut self, f: Nnf) {
        if !self.old.contains(&f) {
            self.new.insert(f);
        }
    }

    fn split(&self) -> Pending {
        Pending {
            incoming: self.incoming.clone(),
            old: self.old.clone(),
            new: self.new.clone(),
            next: self.next.clone(),
        }
    }
}

/// Expand `f` into the tableau graph. Nodes are identified by their
/// `(old, next)` pair; node `i` has an edge to node `j` iff `i` is in
/// `j.incoming`.
pub fn build_graph(f: Nnf) -> Vec<TableauNode> {
    let mut nodes: Vec<TableauNode> = Vec::new();
    let mut index: HashMap<(BTreeSet<Nnf>, BTreeSet<Nnf>), usize> = HashMap::new();
    let mut stack = vec![Pending {
        incoming: BTreeSet::from([INIT]),
        old: BTreeSet::new(),
        new: BTreeSet::from([f]),
        next: BTreeSet::new(),
    }];

    while let Some(mut pending) = stack.pop() {
        let Some(f) = pending.new.pop_first() else {
            let key = (pending.old, pending.next);
            if let Some(&existing) = index.get(&key) {
                nodes[existing].incoming.extend(pending.incoming);
                continue;
            }

            let id = nodes.len();
            let (old, next) = key;
            stack.push(Pending {
                incoming: BTreeSet::from([id]),
                old: BTreeSet::new(),
                new: next.clone(),
                next: BTreeSet::new(),
            });
            index.insert((old.clone(), next.clone()), id);
            nodes.push(TableauNode {
                incoming: pending.incoming,
                old,
                next,
            });
            continue;
        };

        if pending.old.contains(&f) {
            stack.push(pending);
            continue;
        }

        match f {
            Nnf::False => {}
            Nnf::True => {
                pending.old.insert(f);
                stack.push(pending);
            }
            Nnf::Lit(ref atom, positive) => {
                if !pending.old.contains(&Nnf::Lit(atom.clone(), !positive)) {
                    pending.old.insert(f);
                    stack.push(pending);
                }
            }
            Nnf::And(ref p, ref q) => {
                pending.schedule(p.as_ref().clone());
                pending.schedule(q.as_ref().clone());
                pending.old.insert(f);
                stack.push(pending);
            }
            Nnf::Next(ref p) => {
                pending.next.insert(p.as_ref().clone());
                pending.old.insert(f);
                stack.push(pending);
            }
            Nnf::Or(ref p, ref q) => {
                let mut left = pending.split();
                left.schedule(p.as_ref().clone());
                left.old.insert(f.clone());

                pending.schedule(q.as_ref().clone());
                pending.old.insert(f);
                stack.push(left);
                stack.push(pending);
            }
            // p U q = q | (p & X(p U q))
            Nnf::Until(ref p, ref q) => {
                let mut waiting = pending.split();
                waiting.schedule(p.as_ref().clone());
                waiting.next.insert(f.clone());
                waiting.old.insert(f.clone());

                pending.schedule(q.as_ref().clone());
                pending.old.insert(f);
                stack.push(waiting);
                stack.push(pending);
            }
            // p R q = (p & q) | (q & X(p R q))
            Nnf::Release(ref p, ref q) => {
                let mut holding = pending.split();
                holding.schedule(q.as_ref().clone());
                holding.next.insert(f.clone());
                holding.old.insert(f.clone());

                pending.schedule(p.as_ref().clone());
                pending.schedule(q.as_ref().clone());
                pending.old.insert(f);
                stack.push(holding);
                stack.push(pending);
            }
        }
    }

    trace!("Tableau built with {} nodes", nodes.len());
    nodes
}

fn collect_untils(f: &Nnf, out: &mut BTreeSet<Nnf>) {
    match f {
        Nnf::True | Nnf::False | Nnf::Lit(..) => {}
        Nnf::Next(p) => collect_untils(p, out),
        Nnf::And(p, q) | Nnf::Or(p, q) | Nnf::Release(p, q) => {
            collect_untils(p, out);
            collect_untils(q, out);
        }
        Nnf::Until(p, q) => {
            out.insert(f.clone());
            collect_untils(p, out);
            collect_untils(q, out);
        }
    }
}

/// Tarjan's algorithm over the successor lists
struct SccFinder<'a> {
    successors: &'a [Vec<usize>],
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    counter: usize,
    components: Vec<Vec<usize>>,
}

impl<'a> SccFinder<'a> {
    fn new(successors: &'a [Vec<usize>]) -> Self {
        let n = successors.len();
        Self {
            successors,
            index: vec![None; n],
            lowlink: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            counter: 0,
            components: Vec::new(),
        }
    }

    fn open(&mut self, v: usize) {
        self.index[v] = Some(self.counter);
        self.lowlink[v] = self.counter;
        self.counter += 1;
        self.stack.push(v);
        self.on_stack[v] = true;
    }

    /// Depth-first search from `root` with an explicit work stack of
    /// `(node, next successor position)` frames
    fn visit(&mut self, root: usize) {
        let successors = self.successors;
        self.open(root);
        let mut work = vec![(root, 0usize)];

        while let Some((v, position)) = work.last().copied() {
            if let Some(&w) = successors[v].get(position) {
                if let Some(frame) = work.last_mut() {
                    frame.1 += 1;
                }
                match self.index[w] {
                    None => {
                        self.open(w);
                        work.push((w, 0));
                    }
                    Some(w_index) if self.on_stack[w] => {
                        self.lowlink[v] = self.lowlink[v].min(w_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            work.pop();
            if let Some(&(parent, _)) = work.last() {
                self.lowlink[parent] = self.lowlink[parent].min(self.lowlink[v]);
            }

            if Some(self.lowlink[v]) == self.index[v] {
                let mut component = Vec::new();
                while let Some(w) = self.stack.pop() {
                    self.on_stack[w] = false;
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                self.components.push(component);
            }
        }
    }
}

/// Whether some infinite word satisfies `f`
pub fn is_satisfiable(f: &Ltl) -> bool {
    let nnf = to_nnf(f, false);
    let mut untils = BTreeSet::new();
    collect_untils(&nnf, &mut untils);

    let nodes = build_graph(nnf);

    let mut successors = vec![Vec::new(); nodes.len()];
    let mut initial = Vec::new();
    for (id, node) in nodes.iter().enumerate() {
        for &from in &node.incoming {
            if from == INIT {
                initial.push(id);
            } else {
                successors[from].push(id);
            }
        }
    }

    let mut finder = SccFinder::new(&successors);
    for &start in &initial {
        if finder.index[start].is_none() {
            finder.visit(start);
        }
    }

    // Only nodes reachable from an initial node were visited
    let acceptance: Vec<BTreeSet<usize>> = untils
        .iter()
        .map(|u| {
            let Nnf::Until(_, goal) = u else {
                unreachable!("collect_untils only gathers Until nodes")
            };
            nodes
                .iter()
                .enumerate()
                .filter(|(_, n)| !n.old.contains(u) || n.old.contains(goal.as_ref()))
                .map(|(id, _)| id)
                .collect()
        })
        .collect();

    let member: HashMap<usize, usize> = finder.components
        .iter()
        .enumerate()
        .flat_map(|(c, members)| members.iter().map(move |&v| (v, c)))
        .collect();

    finder.components.iter().enumerate().any(|(c, members)| {
        let cyclic =
            members.len() > 1 ||
            members.iter().any(|&v| successors[v].iter().any(|&w| member.get(&w) == Some(&c)));
        cyclic && acceptance.iter().all(|set| members.iter().any(|v| set.contains(v)))
    })
}

/// Language equivalence: neither `f & !g` nor `!f & g` has a model
pub fn are_equivalent(f: &Ltl, g: &Ltl) -> bool {
    let f_not_g = f.clone().and(g.clone().negate());
    let g_not_f = g.clone().and(f.clone().negate());
    !is_satisfiable(&f_not_g) && !is_satisfiable(&g_not_f)
}
