use serde::Serialize;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

/// Horizontal window over the validation sources. Scrolling moves half a window at a time
/// and never runs past either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Carousel {
    len: usize,
    page_size: usize,
    offset: usize,
}

impl Carousel {
    pub fn new(len: usize, page_size: usize) -> Self {
        Self {
            len,
            page_size: page_size.max(1),
            offset: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn max_offset(&self) -> usize {
        self.len.saturating_sub(self.page_size)
    }

    fn step(&self) -> usize {
        (self.page_size / 2).max(1)
    }

    pub fn can_scroll(&self, direction: ScrollDirection) -> bool {
        match direction {
            ScrollDirection::Left => self.offset > 0,
            ScrollDirection::Right => self.offset < self.max_offset(),
        }
    }

    pub fn scroll(&mut self, direction: ScrollDirection) {
        self.offset = match direction {
            ScrollDirection::Left => self.offset.saturating_sub(self.step()),
            ScrollDirection::Right => (self.offset + self.step()).min(self.max_offset()),
        };
    }

    /// Jumps to the window starting at `page * page_size`, clamped to the last full window.
    pub fn jump_to_page(&mut self, page: usize) {
        self.offset = page.saturating_mul(self.page_size).min(self.max_offset());
    }

    pub fn visible(&self) -> Range<usize> {
        let end = (self.offset + self.page_size).min(self.len);
        self.offset.min(end)..end
    }

    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.visible();
        let end = range.end.min(items.len());
        &items[range.start.min(end)..end]
    }
}
