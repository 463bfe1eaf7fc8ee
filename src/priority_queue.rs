//! Binary max-heap with an auxiliary hash index, used as the open set of every search.
//!
//! Heap slots are numbered from 1 so that the parent of slot `i` is `i / 2` and its children are
//! `2 * i` and `2 * i + 1`; slot `i` lives at `items[i - 1]`. Priority comes from a caller-supplied
//! comparison where [Ordering::Greater] means "extract first". Searches pass a reversed cost
//! comparison so the cheapest node wins. Equal values may be pending more than once; each copy
//! keeps its own slot.
use crate::N_SMALLVEC_SIZE;
use fxhash::FxHashMap;
use log::debug;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::hash::Hash;

const DEFAULT_CAPACITY: usize = 16;

#[derive(Clone, Debug)]
pub struct PriorityQueue<T, F> {
    items: Vec<T>,
    /// Maps every pending value to the heap slots holding a copy of it.
    slots: FxHashMap<T, SmallVec<[usize; N_SMALLVEC_SIZE]>>,
    capacity: usize,
    order: F,
}

impl<T, F> PriorityQueue<T, F>
where
    T: Clone + Eq + Hash,
    F: Fn(&T, &T) -> Ordering,
{
    pub fn new(order: F) -> PriorityQueue<T, F> {
        PriorityQueue::with_capacity(DEFAULT_CAPACITY, order)
    }

    pub fn with_capacity(capacity: usize, order: F) -> PriorityQueue<T, F> {
        let capacity = capacity.max(1);
        PriorityQueue {
            items: Vec::with_capacity(capacity),
            slots: FxHashMap::default(),
            capacity,
            order,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of elements the queue holds before it doubles its storage.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether an element equal to `value` is currently pending. O(1).
    pub fn contains(&self, value: &T) -> bool {
        self.slots.contains_key(value)
    }

    /// The highest priority element, without removing it.
    pub fn max(&self) -> Option<&T> {
        self.items.first()
    }

    /// Inserts `value` and sifts it up. A value equal to a pending one is added as another copy;
    /// use [update](Self::update) to change the priority of a pending element instead.
    pub fn add(&mut self, value: T) {
        if self.items.len() == self.capacity {
            self.grow();
        }
        self.items.push(value.clone());
        let slot = self.items.len();
        self.slots.entry(value).or_default().push(slot);
        self.sift_up(slot);
    }

    /// Removes and returns the highest priority element, or [None] if the queue is empty.
    pub fn delete_max(&mut self) -> Option<T> {
        let last = self.items.len();
        if last == 0 {
            return None;
        }
        self.swap(1, last);
        let max = self.items.pop()?;
        if let Some(slots) = self.slots.get_mut(&max) {
            slots.retain(|slot| *slot != last);
            if slots.is_empty() {
                self.slots.remove(&max);
            }
        }
        if !self.items.is_empty() {
            self.sift_down(1);
        }
        Some(max)
    }

    /// Replaces a pending element equal to `value` and restores the heap order around it.
    /// Returns false if no such element is pending.
    pub fn update(&mut self, value: T) -> bool {
        let Some(&slot) = self.slots.get(&value).and_then(|slots| slots.first()) else {
            return false;
        };
        self.items[slot - 1] = value;
        if self.sift_up(slot) == slot {
            self.sift_down(slot);
        }
        true
    }

    fn grow(&mut self) {
        let capacity = self.capacity * 2;
        self.items.reserve_exact(capacity - self.items.len());
        debug!("Priority queue grows from {} to {}", self.capacity, capacity);
        self.capacity = capacity;
    }

    fn higher(&self, a: usize, b: usize) -> bool {
        (self.order)(&self.items[a - 1], &self.items[b - 1]) == Ordering::Greater
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.items.swap(a - 1, b - 1);
        self.relocate(a, b);
        self.relocate(b, a);
    }

    /// Records that the element now in slot `to` moved there from slot `from`.
    fn relocate(&mut self, to: usize, from: usize) {
        if let Some(slots) = self.slots.get_mut(&self.items[to - 1]) {
            if let Some(slot) = slots.iter_mut().find(|slot| **slot == from) {
                *slot = to;
            }
        }
    }

    /// Returns the slot the element ends up in.
    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 1 && self.higher(slot, slot / 2) {
            self.swap(slot, slot / 2);
            slot /= 2;
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * slot;
            let right = left + 1;
            let mut best = slot;
            if left <= len && self.higher(left, best) {
                best = left;
            }
            if right <= len && self.higher(right, best) {
                best = right;
            }
            if best == slot {
                break;
            }
            self.swap(slot, best);
            slot = best;
        }
    }

    #[cfg(test)]
    fn is_consistent(&self) -> bool {
        let len = self.items.len();
        let heap_ok = (2..=len).all(|slot| !self.higher(slot, slot / 2));
        let slots_ok = self.slots.values().map(|slots| slots.len()).sum::<usize>() == len
            && self.items.iter().enumerate().all(|(i, item)| {
                self.slots
                    .get(item)
                    .is_some_and(|slots| slots.contains(&(i + 1)))
            });
        heap_ok && slots_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::Hasher;

    fn cheapest_first(a: &i32, b: &i32) -> Ordering {
        b.cmp(a)
    }

    /// Drains the queue while checking membership before and after every removal.
    fn drain<F: Fn(&i32, &i32) -> Ordering>(queue: &mut PriorityQueue<i32, F>) -> Vec<i32> {
        let mut out = vec![];
        while let Some(&top) = queue.max() {
            assert!(queue.contains(&top));
            assert_eq!(queue.delete_max(), Some(top));
            assert!(!queue.contains(&top));
            assert!(queue.is_consistent());
            out.push(top);
        }
        out
    }

    #[test]
    fn drains_in_comparison_order() {
        let mut queue = PriorityQueue::new(cheapest_first);
        for cost in [5, 3, 8, 1] {
            assert!(!queue.contains(&cost));
            queue.add(cost);
            assert!(queue.contains(&cost));
            assert!(queue.is_consistent());
        }
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.max(), Some(&1));
        assert_eq!(drain(&mut queue), vec![1, 3, 5, 8]);
        assert!(queue.is_empty());
        assert_eq!(queue.delete_max(), None);
    }

    #[test]
    fn largest_first_ordering() {
        let mut queue = PriorityQueue::new(|a: &i32, b: &i32| a.cmp(b));
        for cost in [5, 3, 8, 1] {
            queue.add(cost);
        }
        assert_eq!(drain(&mut queue), vec![8, 5, 3, 1]);
    }

    #[test]
    fn capacity_doubles_without_losing_elements() {
        let mut queue = PriorityQueue::with_capacity(2, cheapest_first);
        assert_eq!(queue.capacity(), 2);
        for cost in (0..9).rev() {
            queue.add(cost);
        }
        assert_eq!(queue.capacity(), 16);
        assert_eq!(queue.len(), 9);
        assert!((0..9).all(|cost| queue.contains(&cost)));
        assert_eq!(drain(&mut queue), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut queue = PriorityQueue::with_capacity(0, cheapest_first);
        assert_eq!(queue.capacity(), 1);
        queue.add(4);
        queue.add(2);
        assert_eq!(queue.capacity(), 2);
        assert_eq!(drain(&mut queue), vec![2, 4]);
    }

    /// Element whose identity is `id` while its priority is `cost`.
    #[derive(Clone, Copy, Debug)]
    struct Keyed {
        id: usize,
        cost: i32,
    }
    impl PartialEq for Keyed {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }
    impl Eq for Keyed {}
    impl Hash for Keyed {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.id.hash(state);
        }
    }

    #[test]
    fn update_rekeys_pending_elements() {
        let mut queue = PriorityQueue::new(|a: &Keyed, b: &Keyed| b.cost.cmp(&a.cost));
        for (id, cost) in [(0, 50), (1, 30), (2, 80), (3, 10), (4, 60)] {
            queue.add(Keyed { id, cost });
        }
        assert!(queue.update(Keyed { id: 2, cost: 5 }));
        assert!(queue.is_consistent());
        assert_eq!(queue.max().map(|k| k.id), Some(2));
        assert!(queue.update(Keyed { id: 3, cost: 70 }));
        assert!(queue.is_consistent());
        assert!(!queue.update(Keyed { id: 9, cost: 1 }));

        let mut order = vec![];
        while let Some(k) = queue.delete_max() {
            order.push((k.id, k.cost));
        }
        assert_eq!(order, vec![(2, 5), (1, 30), (0, 50), (4, 60), (3, 70)]);
    }

    #[test]
    fn equal_values_are_pending_separately() {
        let mut queue = PriorityQueue::new(cheapest_first);
        for cost in [5, 3, 5, 1] {
            queue.add(cost);
            assert!(queue.is_consistent());
        }
        assert_eq!(queue.len(), 4);
        let mut drained = vec![];
        while let Some(cost) = queue.delete_max() {
            assert!(queue.is_consistent());
            drained.push((cost, queue.contains(&5), queue.len()));
        }
        assert_eq!(drained, vec![(1, true, 3), (3, true, 2), (5, true, 1), (5, false, 0)]);
    }

    #[test]
    fn update_moves_one_copy_of_a_duplicate() {
        let mut queue = PriorityQueue::new(|a: &Keyed, b: &Keyed| b.cost.cmp(&a.cost));
        for (id, cost) in [(0, 40), (1, 20), (0, 30)] {
            queue.add(Keyed { id, cost });
        }
        assert!(queue.update(Keyed { id: 0, cost: 10 }));
        assert!(queue.is_consistent());
        assert_eq!(queue.delete_max().map(|k| (k.id, k.cost)), Some((0, 10)));
        assert!(queue.contains(&Keyed { id: 0, cost: 0 }));
        assert_eq!(queue.len(), 2);
        assert!(queue.is_consistent());
    }
}
