use crate::error::{CarouselError, Result};

/// Which slide, if any, is shown in the details overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailsView {
    len: usize,
    selected: Option<usize>,
}

impl DetailsView {
    pub fn new(len: usize) -> Self {
        Self { len, selected: None }
    }

    pub fn open(&mut self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(CarouselError::OutOfRange { index, len: self.len });
        }
        tracing::debug!(index, "details opened");
        self.selected = Some(index);
        Ok(())
    }

    pub fn close(&mut self) {
        if self.selected.take().is_some() {
            tracing::debug!("details closed");
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_and_close() {
        let mut details = DetailsView::new(3);
        assert!(!details.is_open());

        details.open(2).unwrap();
        assert_eq!(details.selected(), Some(2));

        details.open(0).unwrap();
        assert_eq!(details.selected(), Some(0));

        details.close();
        details.close();
        assert_eq!(details.selected(), None);
    }

    #[test]
    fn out_of_range_keeps_previous_selection() {
        let mut details = DetailsView::new(2);
        details.open(1).unwrap();
        assert_eq!(
            details.open(2),
            Err(CarouselError::OutOfRange { index: 2, len: 2 })
        );
        assert_eq!(details.selected(), Some(1));
    }
}
