/// Wrap-around index into a fixed-length list.
///
/// The index is always in `[0, len)` for a non-empty list and stays `0` for an
/// empty one; every update goes through `(index + delta + len) mod len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Moves by `delta` positions, wrapping at both ends.
    pub fn step(&mut self, delta: isize) -> usize {
        self.index = wrap(self.index, delta, self.len);
        self.index
    }

    /// Jumps to `index`, reduced modulo the length.
    pub fn set(&mut self, index: usize) -> usize {
        self.index = if self.len == 0 { 0 } else { index % self.len };
        self.index
    }

    /// Index `delta` positions away without moving.
    pub fn offset(&self, delta: isize) -> usize {
        wrap(self.index, delta, self.len)
    }
}

pub fn wrap(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    ((index as isize + delta % len + len) % len) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_wrap_in_both_directions() {
        let mut cursor = Cursor::new(3);
        assert_eq!(cursor.step(-1), 2);
        assert_eq!(cursor.step(1), 0);
        assert_eq!(cursor.step(1), 1);
        assert_eq!(cursor.step(1), 2);
        assert_eq!(cursor.step(1), 0);
    }

    #[test]
    fn stays_in_range_for_any_walk() {
        for len in 1..7 {
            let mut cursor = Cursor::new(len);
            for i in 0..50 {
                let delta = if i % 3 == 0 { -1 } else { 1 };
                assert!(cursor.step(delta) < len);
            }
        }
    }

    #[test]
    fn empty_cursor_never_moves() {
        let mut cursor = Cursor::new(0);
        assert_eq!(cursor.step(1), 0);
        assert_eq!(cursor.step(-1), 0);
        assert_eq!(cursor.set(4), 0);
        assert!(cursor.is_empty());
    }

    #[test]
    fn offset_does_not_move() {
        let cursor = Cursor::new(4);
        assert_eq!(cursor.offset(-1), 3);
        assert_eq!(cursor.offset(1), 1);
        assert_eq!(cursor.index(), 0);
    }
}
