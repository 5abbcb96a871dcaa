/// Fixed-capacity circular buffer of recent samples. Pre-allocated; the
/// oldest sample is overwritten once full.
pub struct RingBuffer<T> {
    buf: Vec<T>,
    head: usize,
    len: usize,
}

impl<T: Copy + Default> RingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer needs room for one sample");
        Self {
            buf: vec![T::default(); capacity],
            head: 0,
            len: 0,
        }
    }

    pub fn push(&mut self, value: T) {
        self.buf[self.head] = value;
        self.head = (self.head + 1) % self.buf.len();
        self.len = (self.len + 1).min(self.buf.len());
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let cap = self.buf.len();
        let start = (self.head + cap - self.len) % cap;
        (0..self.len).map(move |i| &self.buf[(start + i) % cap])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_oldest_first_before_wrap() {
        let mut ring = RingBuffer::new(4);
        assert!(ring.is_empty());
        ring.push(1.0);
        ring.push(2.0);
        assert_eq!(ring.iter().copied().collect::<Vec<f64>>(), vec![1.0, 2.0]);
    }

    #[test]
    fn overwrites_oldest_after_wrap() {
        let mut ring = RingBuffer::new(3);
        for v in 1..=5u32 {
            ring.push(v);
        }
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
    }
}
