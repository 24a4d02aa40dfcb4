/// ----- SERVICE QUEUE -----
/// Ordered set of floors a unit still has to stop at in one direction of
/// travel. The up queue is kept ascending and the down queue descending, so
/// `head` is always the next stop when sweeping in that direction.

use std::collections::BTreeSet;

use crate::Floor;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceQueue {
    order: QueueOrder,
    floors: BTreeSet<Floor>,
}

impl ServiceQueue {
    pub fn new(order: QueueOrder) -> Self {
        ServiceQueue {
            order: order,
            floors: BTreeSet::new(),
        }
    }

    pub fn ascending() -> Self {
        ServiceQueue::new(QueueOrder::Ascending)
    }

    pub fn descending() -> Self {
        ServiceQueue::new(QueueOrder::Descending)
    }

    /// Returns false if the floor was already queued.
    pub fn insert(&mut self, floor: Floor) -> bool {
        self.floors.insert(floor)
    }

    pub fn remove(&mut self, floor: Floor) -> bool {
        self.floors.remove(&floor)
    }

    pub fn head(&self) -> Option<Floor> {
        match self.order {
            QueueOrder::Ascending => self.floors.first().copied(),
            QueueOrder::Descending => self.floors.last().copied(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    pub fn clear(&mut self) -> Vec<Floor> {
        let drained = self.to_vec();
        self.floors.clear();
        drained
    }

    /// Floors in service order.
    pub fn to_vec(&self) -> Vec<Floor> {
        match self.order {
            QueueOrder::Ascending => self.floors.iter().copied().collect(),
            QueueOrder::Descending => self.floors.iter().rev().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascending_queue_heads_with_lowest_floor() {
        let mut queue = ServiceQueue::ascending();
        for floor in [7, 2, 9, 4] {
            queue.insert(floor);
        }
        assert_eq!(queue.head(), Some(2));
        assert_eq!(queue.to_vec(), vec![2, 4, 7, 9]);
    }

    #[test]
    fn descending_queue_heads_with_highest_floor() {
        let mut queue = ServiceQueue::descending();
        for floor in [3, 7, 5] {
            queue.insert(floor);
        }
        assert_eq!(queue.head(), Some(7));
        assert_eq!(queue.to_vec(), vec![7, 5, 3]);
    }

    #[test]
    fn duplicate_insert_is_ignored() {
        let mut queue = ServiceQueue::ascending();
        assert!(queue.insert(5));
        assert!(!queue.insert(5));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn clear_returns_drained_floors_in_service_order() {
        let mut queue = ServiceQueue::descending();
        queue.insert(2);
        queue.insert(6);
        assert_eq!(queue.clear(), vec![6, 2]);
        assert!(queue.is_empty());
        assert_eq!(queue.head(), None);
    }
}
