use crate::error::{CellForgeError, CfResult};
use crate::optimizer::genotype::Genotype;
use fnv::FnvHashMap;

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    cost: u64,
    copies: usize,
}

/// Fixed-size pool of genotypes plus the cost cache for the distinct members.
///
/// Duplicates are allowed; the cache keeps one entry per distinct genotype and
/// drops it once the last copy is evicted.
#[derive(Debug, Clone, Default)]
pub struct Population {
    members: Vec<Genotype>,
    cache: FnvHashMap<Genotype, CacheEntry>,
}

impl Population {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            cache: FnvHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    #[inline]
    pub fn all(&self) -> &[Genotype] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of distinct genotypes currently held.
    #[inline]
    pub fn distinct(&self) -> usize {
        self.cache.len()
    }

    pub fn cached(&self, genotype: &Genotype) -> Option<u64> {
        self.cache.get(genotype).map(|e| e.cost)
    }

    pub fn cost_of(&self, genotype: &Genotype) -> CfResult<u64> {
        self.cached(genotype)
            .ok_or_else(|| CellForgeError::NotCached(genotype.to_string()))
    }

    /// Costs aligned with `all()`.
    pub fn costs(&self) -> CfResult<Vec<u64>> {
        self.members.iter().map(|g| self.cost_of(g)).collect()
    }

    /// Member with the highest cost; the first one in order wins ties.
    pub fn worst(&self) -> CfResult<&Genotype> {
        let mut worst: Option<(&Genotype, u64)> = None;
        for g in &self.members {
            let cost = self.cost_of(g)?;
            match worst {
                Some((_, w)) if cost <= w => {}
                _ => worst = Some((g, cost)),
            }
        }
        worst.map(|(g, _)| g).ok_or(CellForgeError::EmptyPopulation)
    }

    /// Member with the lowest cost; the first one in order wins ties.
    pub fn best(&self) -> CfResult<(&Genotype, u64)> {
        let mut best: Option<(&Genotype, u64)> = None;
        for g in &self.members {
            let cost = self.cost_of(g)?;
            match best {
                Some((_, b)) if cost >= b => {}
                _ => best = Some((g, cost)),
            }
        }
        best.ok_or(CellForgeError::EmptyPopulation)
    }

    pub fn insert(&mut self, genotype: Genotype, cost: u64) {
        let entry = self
            .cache
            .entry(genotype.clone())
            .or_insert(CacheEntry { cost, copies: 0 });
        debug_assert_eq!(entry.cost, cost, "cost changed for a cached genotype");
        entry.copies += 1;
        self.members.push(genotype);
    }

    /// Removes the first occurrence of `genotype`.
    pub fn evict(&mut self, genotype: &Genotype) -> CfResult<()> {
        let idx = self
            .members
            .iter()
            .position(|g| g == genotype)
            .ok_or_else(|| CellForgeError::NotCached(genotype.to_string()))?;
        self.members.remove(idx);

        let entry = self
            .cache
            .get_mut(genotype)
            .ok_or_else(|| CellForgeError::NotCached(genotype.to_string()))?;
        entry.copies -= 1;
        if entry.copies == 0 {
            self.cache.remove(genotype);
        }
        Ok(())
    }

    /// Steady-state replacement: evicts the current worst member, then costs and inserts
    /// `child`. `score` only runs when the child is not cached after the eviction.
    ///
    /// Returns the evicted genotype and the child's cost.
    pub fn replace_worst<F>(&mut self, child: Genotype, score: F) -> CfResult<(Genotype, u64)>
    where
        F: FnOnce(&Genotype) -> CfResult<u64>,
    {
        let worst = self.worst()?.clone();
        self.evict(&worst)?;

        let cost = match self.cached(&child) {
            Some(c) => c,
            None => score(&child)?,
        };
        self.insert(child, cost);

        Ok((worst, cost))
    }
}
