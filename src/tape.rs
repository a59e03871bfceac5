use std::collections::VecDeque;
use std::fmt;
use std::ops::RangeInclusive;

/// A single tape cell. Arithmetic wraps modulo 256 in both directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Byte(u8);

impl Byte {
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn increment(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    pub fn decrement(&mut self) {
        self.0 = self.0.wrapping_sub(1);
    }
}

impl PartialEq<u8> for Byte {
    fn eq(&self, other: &u8) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Byte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Memory tape addressed by a signed pointer.
///
/// Cells are materialized lazily as the pointer visits them. The backing
/// deque is anchored at `origin`, the storage slot of index 0, so moving
/// left of the origin grows the front and moving right grows the back.
#[derive(Debug, Clone)]
pub struct Tape {
    cells: VecDeque<Byte>,
    origin: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// A tape holding only the zeroed origin cell.
    pub fn new() -> Self {
        Self {
            cells: VecDeque::from([Byte::default()]),
            origin: 0,
        }
    }

    /// Value at `index`; cells never visited read as zero.
    pub fn get(&self, index: isize) -> Byte {
        self.slot(index)
            .and_then(|slot| self.cells.get(slot).copied())
            .unwrap_or_default()
    }

    pub fn get_mut(&mut self, index: isize) -> &mut Byte {
        let slot = self.ensure(index);
        &mut self.cells[slot]
    }

    /// Materialize the cell at `index` (zeroed if new) and return its storage slot.
    pub fn ensure(&mut self, index: isize) -> usize {
        let lowest = -(self.origin as isize);
        if index < lowest {
            let grow = lowest.abs_diff(index);
            for _ in 0..grow {
                self.cells.push_front(Byte::default());
            }
            self.origin += grow;
        }

        let slot = self.origin.wrapping_add_signed(index);
        if slot >= self.cells.len() {
            self.cells.resize(slot + 1, Byte::default());
        }
        slot
    }

    /// Indices of every materialized cell.
    pub fn span(&self) -> RangeInclusive<isize> {
        let lowest = -(self.origin as isize);
        let highest = (self.cells.len() - self.origin - 1) as isize;
        lowest..=highest
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn slot(&self, index: isize) -> Option<usize> {
        self.origin.checked_add_signed(index)
    }
}
