/// Fixed-length input history, most recent sample first
///
/// Backed by a buffer of twice the window length. New samples are written
/// just ahead of the current window so the window is always one contiguous
/// slice; when the front of the buffer is reached the newest `len - 1`
/// samples are copied back to the tail. Pushing never allocates.
#[derive(Debug, Clone)]
pub struct DelayLine<T> {
    buffer: Vec<T>,
    len: usize,
    head: usize,
}

impl<T: Copy + Default> DelayLine<T> {
    /// Create a zero-filled delay line holding `len` samples
    pub fn new(len: usize) -> Self {
        Self {
            buffer: vec![T::default(); 2 * len],
            len,
            head: len,
        }
    }

    /// Shift a sample into the front, discarding the oldest
    pub fn push(&mut self, sample: T) {
        if self.len == 0 {
            return;
        }
        if self.head == 0 {
            self.buffer.copy_within(0..self.len - 1, self.len + 1);
            self.head = self.len + 1;
        }
        self.head -= 1;
        self.buffer[self.head] = sample;
    }

    /// The `len` most recent samples, newest at index 0
    pub fn window(&self) -> &[T] {
        &self.buffer[self.head..self.head + self.len]
    }

    /// Clear the history to zero
    pub fn reset(&mut self) {
        self.buffer.fill(T::default());
        self.head = self.len;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_zeroed() {
        let line: DelayLine<f32> = DelayLine::new(4);
        assert_eq!(line.window(), &[0.0; 4]);
    }

    #[test]
    fn test_most_recent_first() {
        let mut line = DelayLine::new(3);
        line.push(1.0f32);
        assert_eq!(line.window(), &[1.0, 0.0, 0.0]);
        line.push(2.0);
        line.push(3.0);
        assert_eq!(line.window(), &[3.0, 2.0, 1.0]);
        line.push(4.0);
        assert_eq!(line.window(), &[4.0, 3.0, 2.0]);
    }

    #[test]
    fn test_wraps_many_times() {
        let len = 5;
        let mut line = DelayLine::new(len);
        for i in 0..100 {
            line.push(i as f32);
            let window = line.window();
            for (j, &v) in window.iter().enumerate() {
                let expected = if i >= j { (i - j) as f32 } else { 0.0 };
                assert_eq!(v, expected, "push {} index {}", i, j);
            }
        }
    }

    #[test]
    fn test_single_sample() {
        let mut line = DelayLine::new(1);
        for i in 0..5 {
            line.push(i);
            assert_eq!(line.window(), &[i]);
        }
    }

    #[test]
    fn test_reset() {
        let mut line = DelayLine::new(3);
        for i in 0..7 {
            line.push(i);
        }
        line.reset();
        assert_eq!(line.window(), &[0, 0, 0]);
        line.push(9);
        assert_eq!(line.window(), &[9, 0, 0]);
    }
}
