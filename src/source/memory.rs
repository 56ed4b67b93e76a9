use std::collections::VecDeque;

use opencv::core::Mat;

use crate::error::Result;
use crate::source::FrameSource;

/// Frame source backed by an in-memory queue of already decoded frames.
#[derive(Default)]
pub struct MemorySource {
    frames: VecDeque<Mat>,
    closed: bool,
}

impl MemorySource {
    pub fn new(frames: impl IntoIterator<Item = Mat>) -> MemorySource {
        MemorySource {
            frames: frames.into_iter().collect(),
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for MemorySource {
    fn next_frame(&mut self) -> Result<Option<Mat>> {
        if self.closed {
            return Ok(None);
        }
        Ok(self.frames.pop_front())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.frames.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_frames::uniform;
    use opencv::core::Vec3b;
    use opencv::prelude::*;

    #[test]
    fn frames_come_out_in_order_then_end() {
        let mut source = MemorySource::new((0..4).map(|i| uniform(2, 2, i as f64 * 10.0)));
        for i in 0..4 {
            let frame = source.next_frame().unwrap().unwrap();
            assert_eq!(*frame.at_2d::<Vec3b>(0, 0).unwrap(), Vec3b::all(i * 10));
        }
        assert!(source.next_frame().unwrap().is_none());
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn close_ends_the_stream() {
        let mut source = MemorySource::new([uniform(2, 2, 0.0), uniform(2, 2, 0.0)]);
        source.close().unwrap();
        assert!(source.is_closed());
        assert_eq!(source.remaining(), 0);
        assert!(source.next_frame().unwrap().is_none());
    }
}
