// src/fixed/collector.rs

use alloc::collections::VecDeque;

use super::types::Cplx64;
use crate::config::Direction;

/// Terminal sink of a pipelined FFT: a FIFO of finished values.
///
/// Inverse transforms divide each component by N on the way in.
pub struct Collector {
    queue: VecDeque<Cplx64>,
    length: usize,
    direction: Direction,
}

impl Collector {
    pub(crate) fn new(length: usize, direction: Direction) -> Self {
        Self {
            queue: VecDeque::with_capacity(length),
            length,
            direction,
        }
    }

    pub(crate) fn push(&mut self, value: Cplx64) {
        let value = match self.direction {
            Direction::Forward => value,
            Direction::Inverse => value.div_int(self.length as i64),
        };
        self.queue.push_back(value);
    }

    pub(crate) fn pop(&mut self) -> Option<Cplx64> {
        self.queue.pop_front()
    }

    pub(crate) fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
