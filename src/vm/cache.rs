//! The fetch/branch-decision cache: a commutative monoid so that exploring
//! two symbolic paths independently and merging their caches afterward gives
//! the same result as exploring them in either order.

use std::collections::BTreeMap;

use crate::error::CodeLocation;
use crate::expr::Storage;
use crate::numeric::Addr;
use crate::vm::contract::Contract;

/// Cached fetch results and branch decisions, shared across path
/// exploration. `path` remembers which side of a branch was taken at a
/// given `(location, branch_id)`; `fetched` remembers contracts pulled in
/// from outside this run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cache {
    pub fetched: BTreeMap<Addr, Contract>,
    pub path: BTreeMap<(CodeLocation, u32), bool>,
}

impl Cache {
    pub fn new() -> Self {
        Cache::default()
    }

    /// Associative, commutative merge. `path` unions (later wins on
    /// collision, which implies agreement: a collision
    /// means two explorations of the same branch agreed). `fetched` merges
    /// per-address via `unify_cached_contract`.
    pub fn combine(mut self, other: Cache) -> Cache {
        for (k, v) in other.path {
            self.path.entry(k).or_insert(v);
        }
        for (addr, b) in other.fetched {
            match self.fetched.remove(&addr) {
                Some(a) => {
                    self.fetched.insert(addr, unify_cached_contract(a, b));
                }
                None => {
                    self.fetched.insert(addr, b);
                }
            }
        }
        self
    }
}

/// Keep contract `a` but replace its storage with the union of both sides'
/// concrete stores when both are concrete; otherwise keep `a`'s storage
/// unchanged (merging symbolic storage views is the simplifier's job).
pub fn unify_cached_contract(a: Contract, b: Contract) -> Contract {
    let mut merged = a.clone();
    if let (Storage::ConcreteStore(sa), Storage::ConcreteStore(sb)) = (&a.storage, &b.storage) {
        let mut union = sa.clone();
        for (k, v) in sb {
            union.entry(*k).or_insert(*v);
        }
        merged.storage = Storage::ConcreteStore(union);
    }
    merged
}
